//! Integration tests for public access links.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::{self, entry_id, TEST_PASSWORD};

#[tokio::test]
async fn test_public_link_downloads_without_auth() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("publisher@shelf.test", TEST_PASSWORD).await;
    let token = app.login("publisher@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&token, "/", "open.txt", b"anyone").await;
    let file_id = entry_id(&uploaded);

    let link = app
        .request(
            "POST",
            "/api/links",
            Some(serde_json::json!({ "entry_id": file_id, "expires_in_seconds": 3600 })),
            Some(&token),
        )
        .await;
    assert_eq!(link.status, StatusCode::OK, "{:?}", link.body);
    let link_id = entry_id(&link);
    assert_eq!(
        link.body["data"]["url"].as_str().unwrap(),
        format!("http://localhost:8080/api/links/{link_id}")
    );

    let (status, body) = app
        .request_bytes("GET", &format!("/api/links/{link_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"anyone");
}

#[tokio::test]
async fn test_expired_link_is_gone() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("expirer@shelf.test", TEST_PASSWORD).await;
    let token = app.login("expirer@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&token, "/", "stale.txt", b"old").await;
    let file_id = entry_id(&uploaded);

    let link = app
        .request(
            "POST",
            "/api/links",
            Some(serde_json::json!({ "entry_id": file_id, "expires_in_seconds": 3600 })),
            Some(&token),
        )
        .await;
    let link_id = entry_id(&link);

    sqlx::query("UPDATE access_links SET expires_at = NOW() - INTERVAL '1 minute' WHERE id = $1")
        .bind(link_id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to expire link");

    let response = app
        .request("GET", &format!("/api/links/{link_id}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::GONE);
}

#[tokio::test]
async fn test_link_rejects_nonpositive_expiry() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("hasty@shelf.test", TEST_PASSWORD).await;
    let token = app.login("hasty@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&token, "/", "now.txt", b"quick").await;
    let file_id = entry_id(&uploaded);

    let response = app
        .request(
            "POST",
            "/api/links",
            Some(serde_json::json!({ "entry_id": file_id, "expires_in_seconds": 0 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_link_requires_file_ownership() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("author@shelf.test", TEST_PASSWORD).await;
    app.register("passerby@shelf.test", TEST_PASSWORD).await;
    let author = app.login("author@shelf.test", TEST_PASSWORD).await;
    let passerby = app.login("passerby@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&author, "/", "guarded.txt", b"no").await;
    let file_id = entry_id(&uploaded);

    let response = app
        .request(
            "POST",
            "/api/links",
            Some(serde_json::json!({ "entry_id": file_id, "expires_in_seconds": 3600 })),
            Some(&passerby),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_revoked_link_is_not_found() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("retractor@shelf.test", TEST_PASSWORD).await;
    let token = app.login("retractor@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&token, "/", "recalled.txt", b"oops").await;
    let file_id = entry_id(&uploaded);

    let link = app
        .request(
            "POST",
            "/api/links",
            Some(serde_json::json!({ "entry_id": file_id, "expires_in_seconds": 3600 })),
            Some(&token),
        )
        .await;
    let link_id = entry_id(&link);

    let revoked = app
        .request("DELETE", &format!("/api/links/{link_id}"), None, Some(&token))
        .await;
    assert_eq!(revoked.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/links/{link_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_owner_revokes_link() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("holder@shelf.test", TEST_PASSWORD).await;
    app.register("meddler@shelf.test", TEST_PASSWORD).await;
    let holder = app.login("holder@shelf.test", TEST_PASSWORD).await;
    let meddler = app.login("meddler@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&holder, "/", "held.txt", b"keep").await;
    let file_id = entry_id(&uploaded);

    let link = app
        .request(
            "POST",
            "/api/links",
            Some(serde_json::json!({ "entry_id": file_id, "expires_in_seconds": 3600 })),
            Some(&holder),
        )
        .await;
    let link_id = entry_id(&link);

    let response = app
        .request(
            "DELETE",
            &format!("/api/links/{link_id}"),
            None,
            Some(&meddler),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_links_listed_per_entry() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("curator@shelf.test", TEST_PASSWORD).await;
    let token = app.login("curator@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&token, "/", "listed.txt", b"links").await;
    let file_id = entry_id(&uploaded);

    let mut created: Vec<Uuid> = Vec::new();
    for expires in [600, 7200] {
        let link = app
            .request(
                "POST",
                "/api/links",
                Some(serde_json::json!({ "entry_id": file_id, "expires_in_seconds": expires })),
                Some(&token),
            )
            .await;
        created.push(entry_id(&link));
    }

    let listing = app
        .request(
            "GET",
            &format!("/api/objects/{file_id}/links"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(listing.status, StatusCode::OK);
    let items = listing.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        let id = Uuid::parse_str(item["id"].as_str().unwrap()).unwrap();
        assert!(created.contains(&id));
    }
}
