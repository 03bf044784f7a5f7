//! Integration tests for sharing files between users.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

async fn share(app: &TestApp, file_id: &str, email: &str) -> helpers::TestResponse {
    app.request(
        "POST",
        &format!("/api/files/{file_id}/sharers"),
        Some(json!({ "email": email })),
        Some(&app.alice.token),
    )
    .await
}

#[tokio::test]
async fn test_share_file() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;

    let response = share(&app, &id, "  Bob@Example.com ").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Create file sharer successfully.");
    let data = response.data();
    assert_eq!(data["newShare"]["sharer"]["email"], "bob@example.com");
    assert_eq!(data["newShare"]["sharer"]["id"], app.bob.user.id.to_string());
    assert_eq!(
        data["currentFolder"]["files"][0]["sharers"][0]["sharer"]["email"],
        "bob@example.com"
    );
    // Sharing endpoints return the current folder only.
    assert!(data.get("parentFolder").is_none());
}

#[tokio::test]
async fn test_share_rejects_self_duplicate_and_unknown() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;
    assert_eq!(share(&app, &id, "bob@example.com").await.status, StatusCode::CREATED);

    for email in ["alice@example.com", "bob@example.com", "nobody@example.com"] {
        let response = share(&app, &id, email).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{email}");
        assert_eq!(response.message(), "email is invalid.");
        assert_eq!(response.body["fields"]["email"], "email is invalid.");
    }
    assert_eq!(app.count("file_sharers").await, 1);
}

#[tokio::test]
async fn test_share_validates_email() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;

    let response = share(&app, &id, "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["fields"]["email"], "The email is required.");

    let response = share(&app, &id, "bob-at-example").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["fields"]["email"],
        "The email must be in the correct format."
    );
}

#[tokio::test]
async fn test_share_foreign_file_is_not_found() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.bob, &app.bob.root_id(), "b.txt").await;

    let response = share(&app, &id, "bob@example.com").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "File could not been found.");
}

#[tokio::test]
async fn test_shared_files_listing() {
    let app = TestApp::new().await;
    let first = app.upload_text(&app.alice, &app.alice.root_id(), "first.txt").await;
    let second = app.upload_text(&app.alice, &app.alice.root_id(), "second.txt").await;
    share(&app, &first, "bob@example.com").await;
    share(&app, &second, "bob@example.com").await;

    let response = app
        .request("GET", "/api/sharedFiles", None, Some(&app.bob.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Get shared files successfully.");
    let items = response.data().as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["file"]["name"], "first.txt");
    assert_eq!(items[1]["file"]["name"], "second.txt");
    assert_eq!(items[0]["file"]["owner"]["email"], "alice@example.com");
    assert_eq!(items[0]["file"]["type"], "text/plain");
    assert!(items[0]["sharedAt"].is_string());

    let response = app
        .request("GET", "/api/sharedFiles", None, Some(&app.alice.token))
        .await;
    assert!(response.data().as_array().expect("array").is_empty());
}

#[tokio::test]
async fn test_owner_removes_sharer() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;
    share(&app, &id, "bob@example.com").await;
    let bob_id = app.bob.user.id;

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{id}/sharers/{bob_id}"),
            None,
            Some(&app.alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Delete file sharer successfully.");
    assert!(
        response.data()["currentFolder"]["files"][0]["sharers"]
            .as_array()
            .expect("sharers")
            .is_empty()
    );

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{id}/sharers/{bob_id}"),
            None,
            Some(&app.alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Sharer could not been found.");
}

#[tokio::test]
async fn test_sharee_leaves_shared_file() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;
    share(&app, &id, "bob@example.com").await;

    let response = app
        .request("DELETE", &format!("/api/sharedFiles/{id}"), None, Some(&app.bob.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Delete shared file successfully.");
    assert!(response.body.get("data").is_none());
    assert_eq!(app.count("file_sharers").await, 0);

    let response = app
        .request("DELETE", &format!("/api/sharedFiles/{id}"), None, Some(&app.bob.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Shared file could not been found.");
}
