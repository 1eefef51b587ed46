//! Dossier access resolution.
//!
//! ## Module Organization
//!
//! - `audit`: Best-effort logging of denials to the audit repository
//! - `authn`: Bearer-token verification backends (remote, disabled)
//! - `context`: `AccessContext`, the positive outcome of resolution
//! - `credentials`: Credential extraction from Salvo requests
//! - `denial`: Denial reasons, status codes and client messages
//! - `depot`: Depot integration for the resolver and resolved context
//! - `guest`: Guest-token strategy
//! - `memory`: In-memory repositories and authenticator (`test-support` feature)
//! - `owner_shared`: Bearer-token strategy for owners and shared users
//! - `permission`: Permissions, principal types and the grant table
//! - `ports`: Traits for the collaborators the resolver depends on
//! - `resolver`: `AccessResolver`, the strategy orchestrator
//! - `store`: Postgres-backed repositories
//! - `strategy`: The `AuthStrategy` trait

pub mod audit;
pub mod authn;
pub mod context;
pub mod credentials;
pub mod denial;
pub mod depot;
pub mod guest;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod owner_shared;
pub mod permission;
pub mod ports;
pub mod resolver;
pub mod store;
pub mod strategy;

pub use audit::AccessAuditLogger;
pub use authn::{
    DisabledAuthenticationService, RemoteAuthenticationService,
    authentication_service_from_config,
};
pub use context::{AccessContext, Principal};
pub use credentials::{Credentials, extract_credentials, parse_bearer};
pub use denial::{AccessDecision, Denial, DenialBody, DenialReason, MISSING_PERMISSION_CODE};
pub use depot::{
    AccessResolverHandler, get_access_context_from_depot, get_resolver_from_depot,
    insert_access_context, require_permission_from_depot,
};
pub use guest::{GuestTokenStrategy, is_valid_guest_token_format};
pub use owner_shared::{UserAccess, UserAccessStrategy};
pub use permission::{GuestRights, Permission, PermissionSet, PrincipalType, permissions_for};
pub use ports::{
    AuditRepository, AuthenticationService, DenialRecord, DossierAccessRepository,
    GuestTokenRecord, GuestTokenRepository,
};
pub use resolver::AccessResolver;
pub use store::PgAccessStore;
pub use strategy::{AuthStrategy, StrategyOutcome};
