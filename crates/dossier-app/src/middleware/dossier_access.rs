//! Middleware that resolves dossier access before any dossier handler runs.

use salvo::Depot;
use salvo::http::StatusCode;
use salvo::writing::Json;

use dossier_core::constants::DOSSIER_ID_PARAM;
use dossier_core::types::DossierId;
use dossier_service::access::{get_resolver_from_depot, insert_access_context};

use crate::error::{AppError, ErrorResponse};

pub const INVALID_DOSSIER_ID_MESSAGE: &str = "Ongeldig dossiernummer";

/// Resolves the caller's access to the dossier named in the path.
///
/// On grant the `AccessContext` is stored in the depot for downstream
/// handlers. On denial the denial body is rendered with its status and the
/// rest of the chain is skipped.
pub struct DossierAccessMiddleware;

/// Serial keys start at 1, so ids ≤ 0 are rejected here with 400 before the
/// resolver sees them. A malformed guest token on such a path therefore gets
/// this 400 and not `invalid_token_format`; see DESIGN.md, decision 8.
fn parse_dossier_id(req: &salvo::Request) -> Option<DossierId> {
    req.param::<String>(DOSSIER_ID_PARAM)?
        .parse::<DossierId>()
        .ok()
        .filter(|id| id.get() > 0)
}

#[salvo::async_trait]
impl salvo::Handler for DossierAccessMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let Some(dossier_id) = parse_dossier_id(req) else {
            tracing::debug!("Rejecting request with malformed dossier id");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse::new(INVALID_DOSSIER_ID_MESSAGE)));
            ctrl.skip_rest();
            return;
        };

        let resolver = match get_resolver_from_depot(depot) {
            Ok(r) => r,
            Err(e) => {
                AppError::from(e).render(res);
                ctrl.skip_rest();
                return;
            }
        };

        match resolver.resolve_access(req, dossier_id).await {
            Ok(Ok(ctx)) => {
                insert_access_context(depot, ctx);
            }
            Ok(Err(denial)) => {
                res.status_code(denial.status_code());
                res.render(Json(denial.body()));
                ctrl.skip_rest();
            }
            Err(e) => {
                AppError::from(e).render(res);
                ctrl.skip_rest();
            }
        }
    }
}
