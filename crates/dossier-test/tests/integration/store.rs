//! Postgres repositories behind the resolver.
//!
//! Each test checks out its own database through [`TestDb`]; see the helpers
//! module for how databases are provisioned and when these tests are skipped.

use std::sync::Arc;

use dossier_test::access::{
    AccessResolver, AuditRepository, Credentials, DenialReason, DenialRecord,
    DossierAccessRepository, GuestTokenRepository, PgAccessStore, PrincipalType,
    StaticAuthenticationService,
};

use super::helpers::*;

fn pg_store(test_db: &TestDb) -> Arc<PgAccessStore> {
    Arc::new(PgAccessStore::new(Arc::new(test_db.pool())))
}

#[test_log::test(tokio::test)]
async fn owner_shared_and_stranger_are_told_apart() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let dossier_id = test_db.seed_dossier(OWNER).await.expect("seed dossier");
    test_db
        .seed_share(dossier_id, SHARED_USER)
        .await
        .expect("seed share");
    let store = pg_store(&test_db);

    assert!(store.is_owner(dossier_id, OWNER).await.expect("query"));
    assert!(!store.is_owner(dossier_id, SHARED_USER).await.expect("query"));
    assert!(!store.is_owner(dossier_id, STRANGER).await.expect("query"));

    assert!(
        store
            .has_shared_access(dossier_id, SHARED_USER)
            .await
            .expect("query")
    );
    assert!(
        !store
            .has_shared_access(dossier_id, STRANGER)
            .await
            .expect("query")
    );
    assert!(
        !store
            .has_shared_access(DossierId(dossier_id.get() + 1), SHARED_USER)
            .await
            .expect("query")
    );
}

#[test_log::test(tokio::test)]
async fn uppercase_token_finds_row_stored_from_lowercase() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let dossier_id = test_db.seed_dossier(OWNER).await.expect("seed dossier");
    let guest_id = test_db
        .seed_guest_token(GUEST_TOKEN, dossier_id, "guest@example.nl", "upload_view")
        .await
        .expect("seed guest token");
    let store = pg_store(&test_db);

    let record = store
        .find_by_token(&GUEST_TOKEN.to_ascii_uppercase())
        .await
        .expect("query")
        .expect("token should be found regardless of case");

    assert_eq!(record.id, guest_id);
    assert_eq!(record.dossier_id, dossier_id);
    assert_eq!(record.email, "guest@example.nl");
    assert_eq!(record.rights, "upload_view");
    assert_eq!(record.last_access_at, None);
}

#[test_log::test(tokio::test)]
async fn unknown_token_is_none() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let dossier_id = test_db.seed_dossier(OWNER).await.expect("seed dossier");
    test_db
        .seed_guest_token(GUEST_TOKEN, dossier_id, "guest@example.nl", "view")
        .await
        .expect("seed guest token");
    let store = pg_store(&test_db);

    let record = store.find_by_token(OTHER_GUEST_TOKEN).await.expect("query");
    assert_eq!(record, None);
}

#[test_log::test(tokio::test)]
async fn touch_sets_last_access() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let dossier_id = test_db.seed_dossier(OWNER).await.expect("seed dossier");
    let guest_id = test_db
        .seed_guest_token(GUEST_TOKEN, dossier_id, "guest@example.nl", "view")
        .await
        .expect("seed guest token");
    let store = pg_store(&test_db);

    let before = chrono::Utc::now();
    store.touch_last_access(guest_id).await.expect("touch");

    let last_access = test_db
        .guest_last_access(guest_id)
        .await
        .expect("query")
        .expect("last_access_at should be set");
    assert!(last_access >= before - chrono::Duration::seconds(5));
}

#[test_log::test(tokio::test)]
async fn denial_is_written_with_jsonb_extra() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let store = pg_store(&test_db);
    let extra = serde_json::json!({ "token_dossier_id": 5, "requested_dossier_id": 7 });

    store
        .record_denial(&DenialRecord {
            dossier_id: DossierId(7),
            client_ip: "203.0.113.9",
            user_agent: "integration-test",
            reason: DenialReason::GuestTokenDossierMismatch,
            extra: Some(&extra),
        })
        .await
        .expect("insert audit row");

    let rows = test_db.audit_rows().await.expect("audit rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].dossier_id, 7);
    assert_eq!(rows[0].client_ip, "203.0.113.9");
    assert_eq!(rows[0].user_agent, "integration-test");
    assert_eq!(rows[0].reason, "guest_token_dossier_mismatch");
    assert_eq!(rows[0].extra, Some(extra));
}

#[test_log::test(tokio::test)]
async fn resolver_over_postgres_grants_and_audits() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let dossier_id = test_db.seed_dossier(OWNER).await.expect("seed dossier");
    let other_dossier = test_db.seed_dossier(STRANGER).await.expect("seed dossier");
    let guest_id = test_db
        .seed_guest_token(GUEST_TOKEN, other_dossier, "guest@example.nl", "view")
        .await
        .expect("seed guest token");

    let store = pg_store(&test_db);
    let authn = StaticAuthenticationService::new().with_token(OWNER_JWT, OWNER);
    let resolver = AccessResolver::new(Arc::new(authn), store.clone(), store.clone(), store);

    let ctx = resolver
        .resolve(
            &Credentials::anonymous().with_bearer_token(OWNER_JWT),
            dossier_id,
        )
        .await
        .expect("resolve")
        .expect("owner should be granted");
    assert_eq!(ctx.principal_type(), PrincipalType::Owner);
    assert!(test_db.audit_rows().await.expect("audit rows").is_empty());

    let denial = resolver
        .resolve(
            &Credentials::anonymous().with_guest_token(GUEST_TOKEN),
            dossier_id,
        )
        .await
        .expect("resolve")
        .expect_err("token bound to another dossier");
    assert_eq!(denial.reason(), DenialReason::GuestTokenDossierMismatch);

    let rows = test_db.audit_rows().await.expect("audit rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].dossier_id, dossier_id.get());
    assert_eq!(rows[0].reason, "guest_token_dossier_mismatch");
    let extra = rows[0].extra.as_ref().expect("mismatch carries ids");
    assert_eq!(extra["token_dossier_id"], other_dossier.get());
    assert_eq!(extra["requested_dossier_id"], dossier_id.get());

    assert_eq!(
        test_db.guest_last_access(guest_id).await.expect("query"),
        None,
        "a mismatched token must not be touched"
    );
}
