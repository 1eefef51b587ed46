use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// A guest invitation bound to exactly one dossier.
///
/// Only the SHA-256 digest of the token is stored; see
/// [`crate::db::query::guest_token::hash_token`].
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::guest_token)]
#[diesel(check_for_backend(Pg))]
pub struct GuestToken {
    pub id: i32,
    pub dossier_id: i32,
    pub token_hash: String,
    pub email: String,
    /// One of `upload`, `view`, `upload_view`; anything else grants nothing.
    pub rights: String,
    pub last_access_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
