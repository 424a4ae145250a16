//! Integration tests for the tag catalog, search and the activity feed.

use axum::http::StatusCode;
use chrono::{Duration, SecondsFormat, Utc};

use crate::helpers::{self, entry_id, TEST_PASSWORD};

#[tokio::test]
async fn test_tag_catalog_roundtrip() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("curator@shelf.test", TEST_PASSWORD).await;
    let token = app.login("curator@shelf.test", TEST_PASSWORD).await;

    let created = app
        .request(
            "POST",
            "/api/tags",
            Some(serde_json::json!({ "name": "projects" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    assert_eq!(created.body["data"]["name"].as_str().unwrap(), "projects");
    let tag_id = entry_id(&created);

    let listing = app.request("GET", "/api/tags", None, Some(&token)).await;
    let names: Vec<&str> = listing.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"projects"));

    let deleted = app
        .request("DELETE", &format!("/api/tags/{tag_id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let listing = app.request("GET", "/api/tags", None, Some(&token)).await;
    let names: Vec<&str> = listing.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"projects"));
}

#[tokio::test]
async fn test_duplicate_tag_name() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("repeat@shelf.test", TEST_PASSWORD).await;
    let token = app.login("repeat@shelf.test", TEST_PASSWORD).await;

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let response = app
            .request(
                "POST",
                "/api/tags",
                Some(serde_json::json!({ "name": "unique" })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, expected);
    }
}

#[tokio::test]
async fn test_search_by_tag_is_user_scoped() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("tagger@shelf.test", TEST_PASSWORD).await;
    app.register("other@shelf.test", TEST_PASSWORD).await;
    let tagger = app.login("tagger@shelf.test", TEST_PASSWORD).await;
    let other = app.login("other@shelf.test", TEST_PASSWORD).await;

    let uploaded = app.upload_file(&tagger, "/", "tagged.txt", b"find me").await;
    let id = entry_id(&uploaded);
    app.request(
        "PUT",
        &format!("/api/objects/{id}"),
        Some(serde_json::json!({ "tags": ["fiscal"] })),
        Some(&tagger),
    )
    .await;

    let hits = app
        .request("GET", "/api/search/by-tag?tag=fiscal", None, Some(&tagger))
        .await;
    assert_eq!(hits.status, StatusCode::OK);
    let items = hits.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"].as_str().unwrap(), "tagged.txt");

    // The catalog is shared but search only surfaces your own entries.
    let empty = app
        .request("GET", "/api/search/by-tag?tag=fiscal", None, Some(&other))
        .await;
    assert_eq!(empty.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_by_keyword_matches_name_and_description() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("finder@shelf.test", TEST_PASSWORD).await;
    let token = app.login("finder@shelf.test", TEST_PASSWORD).await;

    let uploaded = app
        .upload_file(&token, "/docs", "quarterly-report.pdf", b"numbers")
        .await;
    let id = entry_id(&uploaded);
    app.request(
        "PUT",
        &format!("/api/objects/{id}"),
        Some(serde_json::json!({ "description": "board meeting minutes" })),
        Some(&token),
    )
    .await;

    let by_name = app
        .request("GET", "/api/search/by-keyword?q=REPORT", None, Some(&token))
        .await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert_eq!(by_name.body["data"].as_array().unwrap().len(), 1);

    let by_description = app
        .request("GET", "/api/search/by-keyword?q=minutes", None, Some(&token))
        .await;
    assert_eq!(by_description.body["data"].as_array().unwrap().len(), 1);

    let nothing = app
        .request("GET", "/api/search/by-keyword?q=zebra", None, Some(&token))
        .await;
    assert_eq!(nothing.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_by_date_range() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("historian@shelf.test", TEST_PASSWORD).await;
    let token = app.login("historian@shelf.test", TEST_PASSWORD).await;

    app.upload_file(&token, "/", "dated.txt", b"today").await;

    let hour_ago = (Utc::now() - Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let hour_ahead = (Utc::now() + Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Secs, true);

    let inside = app
        .request(
            "GET",
            &format!("/api/search/by-date?from={hour_ago}&to={hour_ahead}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(inside.status, StatusCode::OK, "{:?}", inside.body);
    assert_eq!(inside.body["data"].as_array().unwrap().len(), 1);

    let tomorrow = (Utc::now() + Duration::days(1)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let later = (Utc::now() + Duration::days(2)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let outside = app
        .request(
            "GET",
            &format!("/api/search/by-date?from={tomorrow}&to={later}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(outside.body["data"].as_array().unwrap().len(), 0);

    let reversed = app
        .request(
            "GET",
            &format!("/api/search/by-date?from={hour_ahead}&to={hour_ago}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(reversed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activity_feed_paginates() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("busy@shelf.test", TEST_PASSWORD).await;
    let token = app.login("busy@shelf.test", TEST_PASSWORD).await;

    for name in ["one.txt", "two.txt", "three.txt"] {
        app.upload_file(&token, "/", name, b"data").await;
    }

    let first = app
        .request("GET", "/api/activity?page=1&per_page=2", None, Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let data = &first.body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["total"].as_i64().unwrap(), 3);
    assert_eq!(data["page"].as_u64().unwrap(), 1);
    assert_eq!(data["per_page"].as_u64().unwrap(), 2);

    let second = app
        .request("GET", "/api/activity?page=2&per_page=2", None, Some(&token))
        .await;
    assert_eq!(second.body["data"]["items"].as_array().unwrap().len(), 1);
}
