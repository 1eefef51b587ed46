//! Denied-access audit trail.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::access_audit_log;
use crate::error::DbResult;
use crate::model::audit::NewAccessAuditEntry;

/// ## Summary
/// Appends one denial to the audit trail.
///
/// ## Errors
/// Returns a database error if the insert fails.
#[tracing::instrument(skip(conn, entry), fields(dossier_id = entry.dossier_id, reason = entry.reason))]
pub async fn insert_denial(
    conn: &mut DbConnection<'_>,
    entry: &NewAccessAuditEntry<'_>,
) -> DbResult<()> {
    let _inserted = diesel::insert_into(access_audit_log::table)
        .values(entry)
        .execute(conn)
        .await?;

    Ok(())
}
