//! Integration tests for registration, login and token lifecycle.

use axum::http::StatusCode;

use crate::helpers::{self, TEST_PASSWORD};

#[tokio::test]
async fn test_register_returns_session() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "walker@shelf.test",
                "name": "Walker",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert!(data["access_token"].as_str().is_some());
    assert!(data["refresh_token"].as_str().is_some());
    assert_eq!(data["user"]["email"].as_str().unwrap(), "walker@shelf.test");
    assert_eq!(data["user"]["name"].as_str().unwrap(), "Walker");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("dupe@shelf.test", TEST_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "dupe@shelf.test",
                "name": "Dupe",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_email_case_insensitive() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("Mixed@Shelf.Test", TEST_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "mixed@shelf.test",
                "name": "Mixed",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_weak_password() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "weak@shelf.test",
                "name": "Weak",
                "password": "password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("login@shelf.test", TEST_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "login@shelf.test",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].as_str().is_some());
    assert!(response.body["data"]["refresh_token"].as_str().is_some());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("victim@shelf.test", TEST_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "victim@shelf.test",
                "password": "not-the-password-1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@shelf.test",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "rotate@shelf.test",
                "name": "Rotate",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;
    let old_refresh = response.body["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": old_refresh })),
            None,
        )
        .await;

    assert_eq!(refreshed.status, StatusCode::OK, "{:?}", refreshed.body);
    let new_refresh = refreshed.body["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, old_refresh);

    // The replaced token no longer matches the stored one.
    let replayed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": old_refresh })),
            None,
        )
        .await;

    assert_eq!(replayed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "leaver@shelf.test",
                "name": "Leaver",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;
    let refresh_token = response.body["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let logout = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;

    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_authenticated() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    app.register("me@shelf.test", TEST_PASSWORD).await;
    let token = app.login("me@shelf.test", TEST_PASSWORD).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["email"].as_str().unwrap(),
        "me@shelf.test"
    );
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
