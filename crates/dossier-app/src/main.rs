use std::sync::Arc;

use dossier_app::app::api::routes;
use dossier_app::db_handler::DbProviderHandler;
use dossier_core::config::load_config;
use dossier_db::db::connection::create_pool;
use dossier_db::db::migrations::run_pending_migrations;
use dossier_service::access::{
    AccessResolver, AccessResolverHandler, PgAccessStore, authentication_service_from_config,
};
use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting dossier access service");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    run_pending_migrations(&config.database.url).await?;

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let authn = authentication_service_from_config(&config.auth)?;
    let store = Arc::new(PgAccessStore::new(Arc::new(pool.clone())));
    let resolver = AccessResolver::new(authn, store.clone(), store.clone(), store)
        .with_credential_sources(config.access.clone());

    tracing::info!(strategies = ?resolver.strategy_names(), "Access resolver ready");

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(DbProviderHandler { provider: pool })
        .hoop(AccessResolverHandler {
            resolver: Arc::new(resolver),
        })
        .push(routes()?);

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
