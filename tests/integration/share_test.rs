//! Integration tests for sharing files and folders between users.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::{self, entry_id, TestApp, TEST_PASSWORD};

/// Register an owner and a grantee and return their tokens and ids.
async fn two_users(app: &TestApp) -> (String, String, Uuid, Uuid) {
    let (owner_id, _) = app.register("owner@shelf.test", TEST_PASSWORD).await;
    let (grantee_id, _) = app.register("grantee@shelf.test", TEST_PASSWORD).await;
    let owner = app.login("owner@shelf.test", TEST_PASSWORD).await;
    let grantee = app.login("grantee@shelf.test", TEST_PASSWORD).await;
    (owner, grantee, owner_id, grantee_id)
}

#[tokio::test]
async fn test_file_share_grants_download() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, grantee, _, grantee_id) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "shared.txt", b"for you").await;
    let file_id = entry_id(&uploaded);

    let share = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({
                "target_kind": "file",
                "target_id": file_id,
                "grantee_id": grantee_id,
                "permission": "read",
            })),
            Some(&owner),
        )
        .await;
    assert_eq!(share.status, StatusCode::OK, "{:?}", share.body);
    assert_eq!(share.body["data"]["permission"].as_str().unwrap(), "read");

    let (status, body) = app
        .request_bytes(
            "GET",
            &format!("/api/objects/{file_id}/download"),
            Some(&grantee),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"for you");
}

#[tokio::test]
async fn test_unshared_entry_is_forbidden() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, grantee, _, _) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "private.txt", b"mine").await;
    let file_id = entry_id(&uploaded);

    let response = app
        .request(
            "GET",
            &format!("/api/objects/{file_id}/download"),
            None,
            Some(&grantee),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_read_share_does_not_allow_update() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, grantee, _, grantee_id) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "readonly.txt", b"look").await;
    let file_id = entry_id(&uploaded);

    app.request(
        "POST",
        "/api/shares",
        Some(serde_json::json!({
            "target_kind": "file",
            "target_id": file_id,
            "grantee_id": grantee_id,
            "permission": "read",
        })),
        Some(&owner),
    )
    .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/objects/{file_id}"),
            Some(serde_json::json!({ "name": "hijacked.txt" })),
            Some(&grantee),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_write_share_allows_update() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, grantee, _, grantee_id) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "draft.txt", b"wip").await;
    let file_id = entry_id(&uploaded);

    app.request(
        "POST",
        "/api/shares",
        Some(serde_json::json!({
            "target_kind": "file",
            "target_id": file_id,
            "grantee_id": grantee_id,
            "permission": "write",
        })),
        Some(&owner),
    )
    .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/objects/{file_id}"),
            Some(serde_json::json!({ "name": "edited.txt" })),
            Some(&grantee),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["name"].as_str().unwrap(), "edited.txt");
}

#[tokio::test]
async fn test_folder_share_covers_children() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, grantee, _, grantee_id) = two_users(&app).await;

    let folder = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "prefix": "/project" })),
            Some(&owner),
        )
        .await;
    let folder_id = entry_id(&folder);

    let uploaded = app
        .upload_file(&owner, "/project/notes", "deep.txt", b"nested")
        .await;
    let file_id = entry_id(&uploaded);

    app.request(
        "POST",
        "/api/shares",
        Some(serde_json::json!({
            "target_kind": "folder",
            "target_id": folder_id,
            "grantee_id": grantee_id,
            "permission": "read",
        })),
        Some(&owner),
    )
    .await;

    let (status, body) = app
        .request_bytes(
            "GET",
            &format!("/api/objects/{file_id}/download"),
            Some(&grantee),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"nested");
}

#[tokio::test]
async fn test_share_with_yourself() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, _, owner_id, _) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "solo.txt", b"me").await;
    let file_id = entry_id(&uploaded);

    let response = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({
                "target_kind": "file",
                "target_id": file_id,
                "grantee_id": owner_id,
                "permission": "read",
            })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_share_with_unknown_grantee() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, _, _, _) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "lost.txt", b"nobody").await;
    let file_id = entry_id(&uploaded);

    let response = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({
                "target_kind": "file",
                "target_id": file_id,
                "grantee_id": "00000000-0000-0000-0000-999999999999",
                "permission": "read",
            })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_share_kind_must_match_entry() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, _, _, grantee_id) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "plain.txt", b"file").await;
    let file_id = entry_id(&uploaded);

    let response = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({
                "target_kind": "folder",
                "target_id": file_id,
                "grantee_id": grantee_id,
                "permission": "read",
            })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_share() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, _, _, grantee_id) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "twice.txt", b"again").await;
    let file_id = entry_id(&uploaded);

    let body = serde_json::json!({
        "target_kind": "file",
        "target_id": file_id,
        "grantee_id": grantee_id,
        "permission": "read",
    });

    let first = app
        .request("POST", "/api/shares", Some(body.clone()), Some(&owner))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("POST", "/api/shares", Some(body), Some(&owner))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_revoke_share_removes_access() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, grantee, _, grantee_id) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "loaned.txt", b"temp").await;
    let file_id = entry_id(&uploaded);

    let share = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({
                "target_kind": "file",
                "target_id": file_id,
                "grantee_id": grantee_id,
                "permission": "read",
            })),
            Some(&owner),
        )
        .await;
    let share_id = entry_id(&share);

    let revoked = app
        .request("DELETE", &format!("/api/shares/{share_id}"), None, Some(&owner))
        .await;
    assert_eq!(revoked.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/objects/{file_id}/download"),
            None,
            Some(&grantee),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let owned = app.request("GET", "/api/shares", None, Some(&owner)).await;
    assert_eq!(owned.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_received_shares_listing() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let (owner, grantee, owner_id, grantee_id) = two_users(&app).await;

    let uploaded = app.upload_file(&owner, "/", "gift.txt", b"present").await;
    let file_id = entry_id(&uploaded);

    app.request(
        "POST",
        "/api/shares",
        Some(serde_json::json!({
            "target_kind": "file",
            "target_id": file_id,
            "grantee_id": grantee_id,
            "permission": "read",
        })),
        Some(&owner),
    )
    .await;

    let received = app
        .request("GET", "/api/shares/received", None, Some(&grantee))
        .await;

    assert_eq!(received.status, StatusCode::OK);
    let items = received.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0]["owner_id"].as_str().unwrap(),
        owner_id.to_string()
    );
    assert_eq!(
        items[0]["target_id"].as_str().unwrap(),
        file_id.to_string()
    );

    // Nothing shows on the owner's received side.
    let owner_received = app
        .request("GET", "/api/shares/received", None, Some(&owner))
        .await;
    assert_eq!(owner_received.body["data"].as_array().unwrap().len(), 0);
}
