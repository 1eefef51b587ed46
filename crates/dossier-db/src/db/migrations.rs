//! Embedded schema migrations.

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{DbError, DbResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// ## Summary
/// Applies pending migrations using a short-lived synchronous connection.
///
/// The migration harness is blocking, so it runs on tokio's blocking pool
/// rather than on a pooled async connection.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration fails.
#[tracing::instrument(skip(database_url))]
pub async fn run_pending_migrations(database_url: &str) -> DbResult<usize> {
    let database_url = database_url.to_owned();

    let applied = tokio::task::spawn_blocking(move || -> DbResult<usize> {
        let mut conn = diesel::PgConnection::establish(&database_url)?;
        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::MigrationError(e.to_string()))?;
        Ok(versions.len())
    })
    .await
    .map_err(|e| DbError::MigrationError(format!("migration task failed: {e}")))??;

    tracing::info!(applied, "Database migrations applied");

    Ok(applied)
}
