use salvo::http::StatusCode;
use salvo::{Depot, Response, Router, handler};

use crate::db_handler::get_db_from_depot;

/// ## Summary
/// Reports whether a database connection can be checked out.
///
/// ## Errors
/// Returns HTTP 503 if the pool cannot hand out a connection, 500 if no
/// provider was injected.
#[handler]
async fn ready(depot: &mut Depot, res: &mut Response) {
    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            e.render(res);
            return;
        }
    };

    match provider.get_connection().await {
        Ok(_conn) => res.render("OK"),
        Err(e) => {
            tracing::error!(error = %e, "Database not ready");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
            res.render("Database unavailable");
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("readiness").get(ready)
}
