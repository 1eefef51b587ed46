//! Dossier-scoped routes. Every route here runs behind [`DossierAccessMiddleware`].

use salvo::Router;
use serde::Serialize;

use dossier_core::constants::{DOSSIER_ID_PARAM, DOSSIER_ROUTE_COMPONENT};

use crate::middleware::dossier_access::DossierAccessMiddleware;

mod access;
mod permissions;

/// Success envelope shared by dossier endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(format!("{DOSSIER_ROUTE_COMPONENT}/{{{DOSSIER_ID_PARAM}}}"))
        .hoop(DossierAccessMiddleware)
        .push(access::routes())
        .push(permissions::routes())
}
