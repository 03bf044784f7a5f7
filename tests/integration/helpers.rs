//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use filehub_api::{AppState, build_app};
use filehub_auth::jwt::JwtEncoder;
use filehub_core::config::AppConfig;
use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::traits::storage::StorageProvider;
use filehub_database::DatabasePool;
use filehub_database::repositories::UserRepository;
use filehub_entity::folder::Folder;
use filehub_entity::user::{CreateUser, User};

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory storage that records uploads, deletes and prefix deletes.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    objects: Mutex<BTreeMap<String, Bytes>>,
    puts: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    prefix_deletes: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl RecordingStorage {
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().expect("lock").contains_key(key)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("lock").len()
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().expect("lock").len()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().expect("lock").clone()
    }

    pub fn prefix_deletes(&self) -> Vec<String> {
        self.prefix_deletes.lock().expect("lock").clone()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::storage("storage unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StorageProvider for RecordingStorage {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }

    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> AppResult<()> {
        self.check()?;
        self.puts.lock().expect("lock").push(key.to_string());
        self.objects.lock().expect("lock").insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.deletes.lock().expect("lock").push(key.to_string());
        self.check()?;
        self.objects.lock().expect("lock").remove(key);
        Ok(())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> AppResult<u64> {
        self.prefix_deletes.lock().expect("lock").push(prefix.to_string());
        self.check()?;
        let namespace = format!("{prefix}/");
        let mut objects = self.objects.lock().expect("lock");
        let before = objects.len();
        objects.retain(|key, _| !key.starts_with(&namespace));
        Ok((before - objects.len()) as u64)
    }

    async fn signed_download_url(&self, key: &str, ttl: Duration) -> AppResult<String> {
        self.check()?;
        Ok(format!("memory://{key}?ttl={}", ttl.as_secs()))
    }
}

/// A seeded user with a valid bearer token.
pub struct TestUser {
    pub user: User,
    pub root: Folder,
    pub token: String,
}

impl TestUser {
    pub fn root_id(&self) -> String {
        self.root.id.to_string()
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database for direct queries
    pub db: DatabasePool,
    /// Storage mock shared with the router
    pub storage: Arc<RecordingStorage>,
    /// Application config
    pub config: AppConfig,
    pub alice: TestUser,
    pub bob: TestUser,
}

/// Status and parsed JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application with users alice and bob.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();

        let db = DatabasePool::in_memory().await.expect("open database");
        db.migrate().await.expect("migrate");

        let storage = Arc::new(RecordingStorage::default());
        let state = AppState::build(
            Arc::new(config.clone()),
            db.clone(),
            Arc::clone(&storage) as Arc<dyn StorageProvider>,
        );
        let router = build_app(state);

        let users = UserRepository::new(db.pool().clone());
        let encoder = JwtEncoder::new(&config.auth);
        let alice = seed(&users, &encoder, "alice@example.com", "alice").await;
        let bob = seed(&users, &encoder, "bob@example.com", "bob").await;

        Self {
            router,
            db,
            storage,
            config,
            alice,
            bob,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body)).expect("build request"))
            .await
    }

    /// Upload `data` as the multipart part `file` into a folder.
    pub async fn upload(&self, token: &str, folder_id: &str, name: &str, data: &[u8]) -> TestResponse {
        let boundary = "filehub-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
                 Content-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/folders/{folder_id}/files"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("build request");

        self.send(req).await
    }

    /// Uploads a small text file and returns its id.
    pub async fn upload_text(&self, user: &TestUser, folder_id: &str, name: &str) -> String {
        let response = self.upload(&user.token, folder_id, name, b"hello").await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        response.data()["currentFolder"]["files"]
            .as_array()
            .and_then(|files| files.iter().find(|f| f["name"] == name))
            .and_then(|f| f["id"].as_str())
            .expect("uploaded file in current folder")
            .to_string()
    }

    /// Creates a subfolder and returns its id.
    pub async fn create_folder(&self, user: &TestUser, parent_id: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "folderId": parent_id })),
                Some(&user.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        response.data()["newFolder"]["id"]
            .as_str()
            .expect("new folder id")
            .to_string()
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Counts rows of a table directly.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.db.pool())
            .await
            .expect("count rows")
    }

    /// A token for a user id that was never registered.
    pub fn token_for(&self, user_id: Uuid) -> String {
        JwtEncoder::new(&self.config.auth)
            .issue(user_id)
            .expect("issue token")
    }
}

async fn seed(users: &UserRepository, encoder: &JwtEncoder, email: &str, username: &str) -> TestUser {
    let (user, root) = users
        .create_with_root(CreateUser {
            email: email.to_string(),
            username: Some(username.to_string()),
            password_hash: None,
        })
        .await
        .expect("seed user");
    let token = encoder.issue(user.id).expect("issue token");

    TestUser { user, root, token }
}
