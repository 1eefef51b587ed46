mod app_specific;
mod dossier;

use salvo::Router;

pub use dossier_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, DOSSIER_ROUTE_COMPONENT, DOSSIER_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(dossier::routes()))
}
