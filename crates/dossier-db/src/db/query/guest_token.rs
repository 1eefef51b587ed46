//! Guest token lookups.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use sha2::{Digest, Sha256};

use crate::db::connection::DbConnection;
use crate::db::schema::guest_token;
use crate::error::DbResult;
use crate::model::guest_token::GuestToken;

/// ## Summary
/// Hashes a presented guest token into the form stored in `guest_token.token_hash`.
///
/// Hex tokens are case-insensitive, so the token is lowercased first.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.to_ascii_lowercase().as_bytes());
    hex::encode(hasher.finalize())
}

/// ## Summary
/// Returns a query to find a guest token by its stored hash.
#[must_use]
pub fn by_token_hash(token_hash: &str) -> guest_token::BoxedQuery<'_, diesel::pg::Pg> {
    guest_token::table
        .filter(guest_token::token_hash.eq(token_hash))
        .into_boxed()
}

/// ## Summary
/// Looks up the guest token record matching a presented token.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn, token))]
pub async fn find_by_token(conn: &mut DbConnection<'_>, token: &str) -> DbResult<Option<GuestToken>> {
    let token_hash = hash_token(token);

    let record = by_token_hash(&token_hash)
        .select(GuestToken::as_select())
        .first::<GuestToken>(conn)
        .await
        .optional()?;

    Ok(record)
}

/// ## Summary
/// Sets `last_access_at` to the current time.
///
/// Concurrent touches race; the last write wins.
///
/// ## Errors
/// Returns a database error if the update fails.
#[tracing::instrument(skip(conn))]
pub async fn touch_last_access(conn: &mut DbConnection<'_>, guest_id: i32) -> DbResult<()> {
    let _updated = diesel::update(guest_token::table.find(guest_id))
        .set(guest_token::last_access_at.eq(Some(chrono::Utc::now())))
        .execute(conn)
        .await?;

    Ok(())
}
