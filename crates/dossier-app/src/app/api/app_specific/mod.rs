use salvo::Router;

mod healthcheck;
mod readiness;

#[must_use]
pub fn routes() -> Router {
    Router::with_path("app")
        .push(healthcheck::routes())
        .push(readiness::routes())
}
