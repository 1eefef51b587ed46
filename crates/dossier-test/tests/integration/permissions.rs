//! Permission checks on a resolved context.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn owner_holds_manage() {
    let app = TestApp::seeded();

    let res = TestRequest::get(&permission_path("7", "manage"))
        .bearer(OWNER_JWT)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        res.json(),
        serde_json::json!({
            "success": true,
            "data": { "permission": "manage", "granted": true }
        })
    );
}

#[test_log::test(tokio::test)]
async fn shared_user_cannot_invite() {
    let app = TestApp::seeded();

    let _res = TestRequest::get(&permission_path("7", "invite"))
        .bearer(SHARED_JWT)
        .send(&app.service)
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .assert_error("Onvoldoende rechten voor deze actie");
}

#[test_log::test(tokio::test)]
async fn view_guest_can_download_but_not_upload() {
    let app = TestApp::seeded();
    app.store
        .insert_guest_token(GUEST_TOKEN, DossierId(7), "guest@example.nl", "view");

    let _res = TestRequest::get(&permission_path("7", "download"))
        .guest_token(GUEST_TOKEN)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    let _res = TestRequest::get(&permission_path("7", "upload"))
        .guest_token(GUEST_TOKEN)
        .send(&app.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn guest_with_unknown_rights_holds_nothing() {
    let app = TestApp::seeded();
    app.store
        .insert_guest_token(GUEST_TOKEN, DossierId(7), "guest@example.nl", "admin");

    let res = TestRequest::get(&access_path("7"))
        .guest_token(GUEST_TOKEN)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(res.json()["data"]["permissions"], serde_json::json!([]));

    let _res = TestRequest::get(&permission_path("7", "view"))
        .guest_token(GUEST_TOKEN)
        .send(&app.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn unknown_permission_name_is_400() {
    let app = TestApp::seeded();

    let _res = TestRequest::get(&permission_path("7", "teleport"))
        .bearer(OWNER_JWT)
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Onbekende permissie");
}

#[test_log::test(tokio::test)]
async fn permission_check_still_requires_access() {
    let app = TestApp::seeded();

    let _res = TestRequest::get(&permission_path("7", "view"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
