//! Shared fixtures for service unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::traits::storage::StorageProvider;
use filehub_database::DatabasePool;
use filehub_database::repositories::{
    FileRepository, FolderRepository, PublicFileRepository, SharerRepository, UserRepository,
};
use filehub_entity::folder::Folder;
use filehub_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// In-memory storage that records every call.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    objects: Mutex<BTreeMap<String, Bytes>>,
    puts: Mutex<Vec<String>>,
    prefix_deletes: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl RecordingStorage {
    /// Make every later call fail.
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

/// A migrated database with two users, "alice" and "bob".
pub struct Fixture {
    pub storage: Arc<RecordingStorage>,
    pub users: Arc<UserRepository>,
    pub folders: Arc<FolderRepository>,
    pub files: Arc<FileRepository>,
    pub sharers: Arc<SharerRepository>,
    pub public_files: Arc<PublicFileRepository>,
    pub alice: User,
    pub alice_root: Folder,
    pub bob: User,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = DatabasePool::in_memory().await.expect("open");
        db.migrate().await.expect("migrate");
        let pool = db.pool().clone();

        let users = Arc::new(UserRepository::new(pool.clone()));
        let (alice, alice_root) = seed(&users, "alice@example.com").await;
        let (bob, _) = seed(&users, "bob@example.com").await;

        Self {
            storage: Arc::new(RecordingStorage::default()),
            folders: Arc::new(FolderRepository::new(pool.clone())),
            files: Arc::new(FileRepository::new(pool.clone())),
            sharers: Arc::new(SharerRepository::new(pool.clone())),
            public_files: Arc::new(PublicFileRepository::new(pool)),
            users,
            alice,
            alice_root,
            bob,
        }
    }

    pub fn alice_ctx(&self) -> RequestContext {
        RequestContext::from(&self.alice)
    }

    pub fn bob_ctx(&self) -> RequestContext {
        RequestContext::from(&self.bob)
    }
}

async fn seed(users: &UserRepository, email: &str) -> (User, Folder) {
    users
        .create_with_root(CreateUser {
            email: email.to_string(),
            username: None,
            password_hash: None,
        })
        .await
        .expect("seed user")
}
