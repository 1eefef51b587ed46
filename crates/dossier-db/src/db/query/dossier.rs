//! Ownership and sharing lookups for dossiers.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{dossier, dossier_share};
use crate::error::DbResult;

/// ## Summary
/// Returns a query to find dossiers owned by a user.
#[must_use]
pub fn owned_by(user_id: i32) -> dossier::BoxedQuery<'static, diesel::pg::Pg> {
    dossier::table
        .filter(dossier::user_id.eq(user_id))
        .into_boxed()
}

/// ## Summary
/// Returns a query to find the share rows for a dossier.
#[must_use]
pub fn shares_for(dossier_id: i32) -> dossier_share::BoxedQuery<'static, diesel::pg::Pg> {
    dossier_share::table
        .filter(dossier_share::dossier_id.eq(dossier_id))
        .into_boxed()
}

/// ## Summary
/// Checks whether `user_id` owns `dossier_id`.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn is_owner(conn: &mut DbConnection<'_>, dossier_id: i32, user_id: i32) -> DbResult<bool> {
    let owned = diesel::select(exists(
        owned_by(user_id).filter(dossier::id.eq(dossier_id)),
    ))
    .get_result::<bool>(conn)
    .await?;

    Ok(owned)
}

/// ## Summary
/// Checks whether `dossier_id` has been shared with `user_id`.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn has_shared_access(
    conn: &mut DbConnection<'_>,
    dossier_id: i32,
    user_id: i32,
) -> DbResult<bool> {
    let shared = diesel::select(exists(
        shares_for(dossier_id).filter(dossier_share::user_id.eq(user_id)),
    ))
    .get_result::<bool>(conn)
    .await?;

    Ok(shared)
}
