/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const DOSSIER_ROUTE_COMPONENT: &str = "dossiers";
pub const DOSSIER_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", DOSSIER_ROUTE_COMPONENT);

/// Path parameter carrying the dossier id on dossier-scoped routes.
pub const DOSSIER_ID_PARAM: &str = "dossier_id";

/// Placeholder recorded when a client address or user agent cannot be determined.
pub const UNKNOWN_CLIENT_VALUE: &str = "unknown";
