use diesel::prelude::*;

use crate::db::schema;

/// One denied access attempt, as written to `access_audit_log`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::access_audit_log)]
pub struct NewAccessAuditEntry<'a> {
    pub id: uuid::Uuid,
    pub dossier_id: i32,
    pub client_ip: &'a str,
    pub user_agent: &'a str,
    pub reason: &'a str,
    pub extra: Option<serde_json::Value>,
}
