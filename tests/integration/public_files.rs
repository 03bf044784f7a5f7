//! Integration tests for anonymous public links.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

use helpers::TestApp;

async fn publish(app: &TestApp, file_id: &str) -> String {
    let response = app
        .request("POST", &format!("/api/files/{file_id}/public"), None, Some(&app.alice.token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.data()["publicFileId"]
        .as_str()
        .expect("public id")
        .to_string()
}

#[tokio::test]
async fn test_create_public_link() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;

    let response = app
        .request("POST", &format!("/api/files/{id}/public"), None, Some(&app.alice.token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Create public file successfully.");
    let public_id = response.data()["publicFileId"].as_str().expect("id");
    assert_eq!(
        response.data()["currentFolder"]["files"][0]["public"]["id"],
        public_id
    );
}

#[tokio::test]
async fn test_second_link_conflicts() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;
    publish(&app, &id).await;

    let response = app
        .request("POST", &format!("/api/files/{id}/public"), None, Some(&app.alice.token))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Public file already exists.");
    assert_eq!(app.count("public_files").await, 1);
}

#[tokio::test]
async fn test_only_owner_can_publish() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;

    let response = app
        .request("POST", &format!("/api/files/{id}/public"), None, Some(&app.bob.token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "File could not been found.");
}

#[tokio::test]
async fn test_anonymous_read() {
    let app = TestApp::new().await;
    let root = app.alice.root_id();
    let id = app.upload_text(&app.alice, &root, "a.txt").await;
    let public_id = publish(&app, &id).await;

    let response = app
        .request("GET", &format!("/api/public/{public_id}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Get public file successfully.");
    let data = response.data();
    assert_eq!(data["id"], public_id);
    assert_eq!(data["name"], "a.txt");
    assert_eq!(data["size"], 5);
    assert_eq!(data["type"], "text/plain");
    assert!(data["createdAt"].is_string());
    assert_eq!(data["url"], format!("memory://{root}/{id}?ttl=60"));

    let response = app
        .request("GET", &format!("/api/public/{public_id}/download-url"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Get Public file download url successfully.");
    assert_eq!(response.data()["url"], format!("memory://{root}/{id}?ttl=60"));
}

#[tokio::test]
async fn test_missing_public_link() {
    let app = TestApp::new().await;
    let missing = Uuid::new_v4();

    let response = app
        .request("GET", &format!("/api/public/{missing}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Public file could not been found.");

    let response = app
        .request("GET", &format!("/api/public/{missing}/download-url"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.message(),
        "The public file you are looking for could not be found."
    );
}

#[tokio::test]
async fn test_delete_public_link() {
    let app = TestApp::new().await;
    let id = app.upload_text(&app.alice, &app.alice.root_id(), "a.txt").await;
    let public_id = publish(&app, &id).await;
    let path = format!("/api/public/{public_id}");

    // Deleting requires the owner.
    let response = app.request("DELETE", &path, None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let response = app.request("DELETE", &path, None, Some(&app.bob.token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Public file could not been found.");

    let response = app.request("DELETE", &path, None, Some(&app.alice.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Delete public file successfully.");
    assert!(response.data()["currentFolder"]["files"][0]["public"].is_null());
    assert!(response.data().get("parentFolder").is_none());

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
