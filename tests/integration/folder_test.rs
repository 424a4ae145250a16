//! Integration tests for folder operations on the virtual filesystem.

use axum::http::StatusCode;

use crate::helpers::{self, TEST_PASSWORD};

#[tokio::test]
async fn test_create_folder_normalizes_prefix() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("maker@shelf.test", TEST_PASSWORD).await;
    let token = app.login("maker@shelf.test", TEST_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "prefix": "docs/reports" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["prefix"].as_str().unwrap(), "/docs/reports/");
    assert_eq!(data["name"].as_str().unwrap(), "reports");
    assert_eq!(data["is_folder"].as_bool().unwrap(), true);
}

#[tokio::test]
async fn test_create_duplicate_folder() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("dupfolder@shelf.test", TEST_PASSWORD).await;
    let token = app.login("dupfolder@shelf.test", TEST_PASSWORD).await;

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let response = app
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "prefix": "/docs" })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, expected);
    }
}

#[tokio::test]
async fn test_list_empty_root() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("empty@shelf.test", TEST_PASSWORD).await;
    let token = app.login("empty@shelf.test", TEST_PASSWORD).await;

    let response = app.request("GET", "/api/folders", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["folders"].as_array().unwrap().len(), 0);
    assert_eq!(data["files"].as_array().unwrap().len(), 0);
    assert_eq!(data["breadcrumbs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_listing_partitions_files_and_subfolders() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("lister@shelf.test", TEST_PASSWORD).await;
    let token = app.login("lister@shelf.test", TEST_PASSWORD).await;

    app.upload_file(&token, "/docs", "a.txt", b"alpha").await;
    app.upload_file(&token, "/docs/notes", "b.txt", b"beta")
        .await;

    // Intermediate folders were never created explicitly, yet both
    // levels list as if they had been.
    let root = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.body["data"]["folders"], serde_json::json!(["docs"]));
    assert_eq!(root.body["data"]["files"].as_array().unwrap().len(), 0);

    let docs = app
        .request("GET", "/api/folders?prefix=/docs", None, Some(&token))
        .await;
    assert_eq!(docs.status, StatusCode::OK);
    let data = &docs.body["data"];
    assert_eq!(data["folders"], serde_json::json!(["notes"]));
    let files = data["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"].as_str().unwrap(), "a.txt");
    assert_eq!(data["breadcrumbs"], serde_json::json!(["docs"]));
}

#[tokio::test]
async fn test_rename_folder_moves_subtree() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("renamer@shelf.test", TEST_PASSWORD).await;
    let token = app.login("renamer@shelf.test", TEST_PASSWORD).await;

    app.request(
        "POST",
        "/api/folders",
        Some(serde_json::json!({ "prefix": "/docs" })),
        Some(&token),
    )
    .await;
    app.upload_file(&token, "/docs", "a.txt", b"alpha").await;

    let response = app
        .request(
            "PUT",
            "/api/folders/rename",
            Some(serde_json::json!({ "prefix": "/docs", "new_name": "papers" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["new_prefix"].as_str().unwrap(), "/papers/");
    assert_eq!(data["renamed"].as_u64().unwrap(), 2);

    let old = app
        .request("GET", "/api/folders?prefix=/docs", None, Some(&token))
        .await;
    assert_eq!(old.body["data"]["files"].as_array().unwrap().len(), 0);

    let new = app
        .request("GET", "/api/folders?prefix=/papers", None, Some(&token))
        .await;
    assert_eq!(new.body["data"]["files"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_into_occupied_prefix() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("collider@shelf.test", TEST_PASSWORD).await;
    let token = app.login("collider@shelf.test", TEST_PASSWORD).await;

    for prefix in ["/a", "/b"] {
        app.request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "prefix": prefix })),
            Some(&token),
        )
        .await;
    }

    let response = app
        .request(
            "PUT",
            "/api/folders/rename",
            Some(serde_json::json!({ "prefix": "/a", "new_name": "b" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_folder_counts_subtree() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("remover@shelf.test", TEST_PASSWORD).await;
    let token = app.login("remover@shelf.test", TEST_PASSWORD).await;

    app.request(
        "POST",
        "/api/folders",
        Some(serde_json::json!({ "prefix": "/stuff" })),
        Some(&token),
    )
    .await;
    app.upload_file(&token, "/stuff", "a.txt", b"alpha").await;
    app.upload_file(&token, "/stuff/deep", "b.txt", b"beta")
        .await;

    let response = app
        .request("DELETE", "/api/folders?prefix=/stuff", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["count"].as_u64().unwrap(), 3);

    let listing = app
        .request("GET", "/api/folders?prefix=/stuff", None, Some(&token))
        .await;
    assert_eq!(listing.body["data"]["files"].as_array().unwrap().len(), 0);
    assert_eq!(listing.body["data"]["folders"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_folder_requires_prefix() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("noprefix@shelf.test", TEST_PASSWORD).await;
    let token = app.login("noprefix@shelf.test", TEST_PASSWORD).await;

    let response = app
        .request("DELETE", "/api/folders", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_folder() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("ghost@shelf.test", TEST_PASSWORD).await;
    let token = app.login("ghost@shelf.test", TEST_PASSWORD).await;

    let response = app
        .request("DELETE", "/api/folders?prefix=/nothing", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_folders_are_scoped_per_user() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("alice@shelf.test", TEST_PASSWORD).await;
    app.register("bob@shelf.test", TEST_PASSWORD).await;
    let alice = app.login("alice@shelf.test", TEST_PASSWORD).await;
    let bob = app.login("bob@shelf.test", TEST_PASSWORD).await;

    app.upload_file(&alice, "/private", "secret.txt", b"mine")
        .await;

    let listing = app.request("GET", "/api/folders", None, Some(&bob)).await;
    assert_eq!(listing.body["data"]["folders"].as_array().unwrap().len(), 0);
    assert_eq!(listing.body["data"]["files"].as_array().unwrap().len(), 0);
}
