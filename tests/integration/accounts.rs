//! Integration tests for local accounts.

mod helpers;

use axum::http::{StatusCode, header};
use serde_json::json;

use helpers::TestApp;

const PASSWORD: &str = "Sup3r-secret";

async fn register(app: &TestApp, username: &str, email: &str) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/account/register",
        Some(json!({
            "username": username,
            "email": email,
            "password": PASSWORD,
            "confirmPassword": PASSWORD,
        })),
        None,
    )
    .await
}

#[tokio::test]
async fn test_register_creates_user_with_root() {
    let app = TestApp::new().await;
    let response = register(&app, "carol_1", " Carol@Example.com ").await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.message(), "Register successfully.");
    assert_eq!(response.data()["user"]["username"], "carol_1");
    assert_eq!(response.data()["user"]["email"], "carol@example.com");

    // The issued token works against the gate and carol starts with a root.
    let token = response.data()["token"].as_str().expect("token");
    let response = app.request("GET", "/api/folders", None, Some(token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()[0]["name"], "My Drive");
}

#[tokio::test]
async fn test_register_reports_taken_fields() {
    let app = TestApp::new().await;
    // alice is seeded with username "alice".
    let response = register(&app, "alice", "alice@example.com").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["fields"]["username"], "Username is been used.");
    assert_eq!(response.body["fields"]["email"], "The email is been used.");
    assert_eq!(app.count("users").await, 2);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/account/register",
            Some(json!({
                "username": "no spaces",
                "email": "nope",
                "password": "",
                "confirmPassword": "x",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields = &response.body["fields"];
    assert_eq!(
        fields["username"],
        "Username must only contain alphanumeric and underline characters."
    );
    assert_eq!(fields["email"], "The email must be in the correct format.");
    assert_eq!(fields["password"], "The password is required.");
    assert_eq!(
        fields["confirmPassword"],
        "The confirmation password is not the same as the password."
    );

    let response = app
        .request(
            "POST",
            "/api/account/register",
            Some(json!({
                "username": "dave",
                "email": "dave@example.com",
                "password": "weakpass",
                "confirmPassword": "weakpass",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["fields"]["password"]
            .as_str()
            .expect("password message")
            .starts_with("The password must contain")
    );
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;
    register(&app, "carol", "carol@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/account/login",
            Some(json!({ "email": "CAROL@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Login successfully.");
    assert!(response.data()["token"].is_string());

    for (email, password) in [
        ("carol@example.com", "Wrong-pass1"),
        ("nobody@example.com", PASSWORD),
        // Seeded without a local password.
        ("alice@example.com", PASSWORD),
    ] {
        let response = app
            .request(
                "POST",
                "/api/account/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{email}");
        assert_eq!(response.message(), "The account could not be found.");
    }
}

#[tokio::test]
async fn test_login_validation() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/account/login", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["fields"]["email"], "The email is required.");
    assert_eq!(response.body["fields"]["password"], "The password is required.");
}

#[tokio::test]
async fn test_current_user_is_not_cached() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/account/user", None, Some(&app.alice.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Get user info successfully.");
    assert_eq!(response.data()["id"], app.alice.user.id.to_string());
    assert_eq!(response.data()["email"], "alice@example.com");
    assert_eq!(
        response.headers.get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
        Some(&b"no-store"[..])
    );
}
