use salvo::writing::Json;
use salvo::{Depot, Response, Router, handler};

use dossier_service::access::get_access_context_from_depot;

use super::DataResponse;
use crate::error::AppError;

/// ## Summary
/// GET /api/dossiers/{dossier_id}/access - Returns the resolved access context.
#[handler]
async fn access_context(depot: &mut Depot, res: &mut Response) {
    match get_access_context_from_depot(depot) {
        Ok(ctx) => res.render(Json(DataResponse::new(ctx.clone()))),
        Err(e) => AppError::from(e).render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("access").get(access_context)
}
