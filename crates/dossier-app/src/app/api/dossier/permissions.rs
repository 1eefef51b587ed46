use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;

use dossier_service::access::{Permission, require_permission_from_depot};

use super::DataResponse;
use crate::error::{AppError, ErrorResponse};

const PERMISSION_PARAM: &str = "permission";
pub const UNKNOWN_PERMISSION_MESSAGE: &str = "Onbekende permissie";

#[derive(Debug, Serialize)]
struct PermissionGrant {
    permission: Permission,
    granted: bool,
}

/// ## Summary
/// GET /api/dossiers/{dossier_id}/permissions/{permission} - Checks one permission.
///
/// ## Errors
/// Returns HTTP 400 for an unknown permission name and HTTP 403 if the
/// resolved principal does not hold the permission.
#[handler]
async fn check_permission(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(permission) = req
        .param::<String>(PERMISSION_PARAM)
        .as_deref()
        .and_then(Permission::parse)
    else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new(UNKNOWN_PERMISSION_MESSAGE)));
        return;
    };

    match require_permission_from_depot(depot, permission) {
        Ok(_ctx) => res.render(Json(DataResponse::new(PermissionGrant {
            permission,
            granted: true,
        }))),
        Err(e) => AppError::from(e).render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(format!("permissions/{{{PERMISSION_PARAM}}}")).get(check_permission)
}
