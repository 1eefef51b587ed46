use salvo::writing::Json;
use salvo::{Response, Router, handler};
use serde::Serialize;

/// Liveness payload. Says nothing about the database; see `readiness`.
#[derive(Debug, Serialize)]
struct Liveness {
    status: &'static str,
    version: &'static str,
}

/// ## Summary
/// GET /api/app/healthcheck - Reports that the process is serving requests.
#[handler]
async fn alive(res: &mut Response) {
    res.render(Json(Liveness {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(alive)
}
