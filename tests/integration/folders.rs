//! Integration tests for folder CRUD and the recursive delete.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_list_folders_contains_root() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/folders", None, Some(&app.alice.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Get all folders successfully.");
    let folders = response.data().as_array().expect("array");
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["name"], "My Drive");
    assert!(folders[0]["parent"].is_null());
}

#[tokio::test]
async fn test_create_subfolder_returns_views() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "  Photos  ", "folderId": app.alice.root_id() })),
            Some(&app.alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Create subfolder successfully.");
    let data = response.data();
    assert_eq!(data["newFolder"]["name"], "Photos");
    assert_eq!(data["currentFolder"]["id"], app.alice.root_id());
    assert_eq!(data["currentFolder"]["subfolders"][0]["name"], "Photos");
    assert_eq!(data["currentFolder"]["subfolders"][0]["_count"]["files"], 0);
    // The root has no parent view.
    assert!(data.get("parentFolder").is_none());
}

#[tokio::test]
async fn test_create_folder_validation() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "x".repeat(201) })),
            Some(&app.alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["fields"]["name"],
        "Folder name must be less then 200 letters."
    );
    assert_eq!(response.body["fields"]["folderId"], "Parent folder id is required.");
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_create_folder_under_foreign_parent() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "x", "folderId": app.bob.root_id() })),
            Some(&app.alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Parent folder could not been found.");
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::new().await;
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/folders")
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", app.alice.token))
        .body(axum::body::Body::from("{\"name\":"))
        .expect("request");

    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Payloads are invalid.");
}

#[tokio::test]
async fn test_get_folder_view() {
    let app = TestApp::new().await;
    let docs = app.create_folder(&app.alice, &app.alice.root_id(), "Docs").await;
    app.upload_text(&app.alice, &docs, "a.txt").await;

    let response = app
        .request("GET", &format!("/api/folders/{docs}"), None, Some(&app.alice.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Get folder successfully.");
    assert_eq!(response.data()["parent"]["name"], "My Drive");
    assert_eq!(response.data()["files"][0]["name"], "a.txt");

    let response = app
        .request("GET", &format!("/api/folders/{docs}"), None, Some(&app.bob.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Folder could not been found.");

    let response = app
        .request("GET", "/api/folders/not-a-uuid", None, Some(&app.alice.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = TestApp::new().await;
    let docs = app.create_folder(&app.alice, &app.alice.root_id(), "Docs").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{docs}"),
            Some(json!({ "name": "Papers" })),
            Some(&app.alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Update folder successfully.");
    assert_eq!(response.data()["currentFolder"]["name"], "Papers");
    assert_eq!(response.data()["parentFolder"]["id"], app.alice.root_id());
}

#[tokio::test]
async fn test_root_cannot_be_renamed_or_deleted() {
    let app = TestApp::new().await;
    let root = app.alice.root_id();

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{root}"),
            Some(json!({ "name": "Mine" })),
            Some(&app.alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", &format!("/api/folders/{root}"), None, Some(&app.alice.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Folder could not been found.");
    assert_eq!(app.count("folders").await, 2);
}

#[tokio::test]
async fn test_recursive_delete_removes_exact_subtree() {
    let app = TestApp::new().await;
    let root = app.alice.root_id();

    // F/S/X plus an untouched sibling with its own file.
    let f = app.create_folder(&app.alice, &root, "F").await;
    let s = app.create_folder(&app.alice, &f, "S").await;
    let deep = app.create_folder(&app.alice, &s, "Deep").await;
    let sibling = app.create_folder(&app.alice, &root, "Keep").await;
    let x = app.upload_text(&app.alice, &s, "x.txt").await;
    app.upload_text(&app.alice, &f, "top.txt").await;
    app.upload_text(&app.alice, &sibling, "kept.txt").await;

    app.request(
        "POST",
        &format!("/api/files/{x}/sharers"),
        Some(json!({ "email": "bob@example.com" })),
        Some(&app.alice.token),
    )
    .await;
    app.request("POST", &format!("/api/files/{x}/public"), None, Some(&app.alice.token))
        .await;

    let folders_before = app.count("folders").await;
    let files_before = app.count("files").await;

    let response = app
        .request("DELETE", &format!("/api/folders/{f}"), None, Some(&app.alice.token))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.message(), "Delete folder successfully.");
    // F, S and Deep are gone; the root view keeps the sibling only.
    assert_eq!(app.count("folders").await, folders_before - 3);
    assert_eq!(app.count("files").await, files_before - 2);
    assert_eq!(app.count("file_sharers").await, 0);
    assert_eq!(app.count("public_files").await, 0);

    let subfolders = response.data()["currentFolder"]["subfolders"]
        .as_array()
        .expect("subfolders");
    assert_eq!(subfolders.len(), 1);
    assert_eq!(subfolders[0]["id"], sibling);

    // One prefix delete per folder that held files.
    let mut cleared = app.storage.prefix_deletes();
    cleared.sort();
    let mut expected = vec![f.clone(), s.clone()];
    expected.sort();
    assert_eq!(cleared, expected);
    assert!(!cleared.contains(&deep));
    assert_eq!(app.storage.object_count(), 1);
}

#[tokio::test]
async fn test_delete_leaf_folder_without_files() {
    let app = TestApp::new().await;
    let f = app.create_folder(&app.alice, &app.alice.root_id(), "F").await;
    let s = app.create_folder(&app.alice, &f, "S").await;

    let response = app
        .request("DELETE", &format!("/api/folders/{s}"), None, Some(&app.alice.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["currentFolder"]["id"], f);
    assert!(app.storage.prefix_deletes().is_empty());
}

#[tokio::test]
async fn test_delete_with_stale_folder_ids_conflicts() {
    let app = TestApp::new().await;
    let f = app.create_folder(&app.alice, &app.alice.root_id(), "F").await;
    let s = app.create_folder(&app.alice, &f, "S").await;
    app.upload_text(&app.alice, &s, "x.txt").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{f}"),
            Some(json!({ "folderIds": [] })),
            Some(&app.alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Folder contents have changed, please refresh.");
    assert_eq!(app.count("files").await, 1);

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{f}"),
            Some(json!({ "folderIds": [s] })),
            Some(&app.alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.count("files").await, 0);
}

#[tokio::test]
async fn test_delete_folder_ids_ignore_case() {
    let app = TestApp::new().await;
    let f = app.create_folder(&app.alice, &app.alice.root_id(), "F").await;
    app.upload_text(&app.alice, &f, "x.txt").await;
    let upper = f.to_uppercase();

    let response = app
        .request("GET", &format!("/api/folders/{upper}"), None, Some(&app.alice.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{f}"),
            Some(json!({ "folderIds": [upper, "not-a-uuid"] })),
            Some(&app.alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{f}"),
            Some(json!({ "folderIds": [upper] })),
            Some(&app.alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(app.count("files").await, 0);
}

#[tokio::test]
async fn test_delete_rejects_non_string_folder_ids() {
    let app = TestApp::new().await;
    let f = app.create_folder(&app.alice, &app.alice.root_id(), "F").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{f}"),
            Some(json!({ "folderIds": [f, 7] })),
            Some(&app.alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["fields"]["folderIds[1]"], "Folder id must be string");
    assert_eq!(app.count("folders").await, 3);
}

#[tokio::test]
async fn test_delete_foreign_folder_is_not_found() {
    let app = TestApp::new().await;
    let f = app.create_folder(&app.alice, &app.alice.root_id(), "F").await;

    let response = app
        .request("DELETE", &format!("/api/folders/{f}"), None, Some(&app.bob.token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.count("folders").await, 3);
}
