//! Local accounts: registration, login and the authenticated profile.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use filehub_auth::jwt::JwtEncoder;
use filehub_auth::password::{PasswordHasher, PasswordValidator, WEAK_PASSWORD};
use filehub_core::FieldErrors;
use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_database::repositories::UserRepository;
use filehub_database::repositories::user::{EMAIL_TAKEN, USERNAME_TAKEN};
use filehub_entity::user::{CreateUser, User, UserProfile};

const USER_NOT_FOUND: &str = "User could not been found.";
const ACCOUNT_NOT_FOUND: &str = "The account could not be found.";

/// Registration input that already passed format validation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    /// Lowercased email.
    pub email: String,
    pub password: String,
}

/// A freshly issued token and the user it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// HS256 bearer token.
    pub token: String,
    pub user: UserProfile,
}

/// Handles local account registration and login.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
        }
    }

    /// Registers a user with a "My Drive" root and signs them in.
    ///
    /// Taken usernames, taken emails and weak passwords are reported
    /// together as field errors.
    pub async fn register(&self, input: Registration) -> AppResult<AuthSession> {
        let mut fields = FieldErrors::new();
        if self.user_repo.find_by_username(&input.username).await?.is_some() {
            fields.insert("username".to_string(), USERNAME_TAKEN.to_string());
        }
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            fields.insert("email".to_string(), EMAIL_TAKEN.to_string());
        }
        if !self.validator.is_strong(&input.password) {
            fields.insert("password".to_string(), WEAK_PASSWORD.to_string());
        }
        if !fields.is_empty() {
            return Err(AppError::fields(fields));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let (user, root) = self
            .user_repo
            .create_with_root(CreateUser {
                email: input.email,
                username: Some(input.username),
                password_hash: Some(password_hash),
            })
            .await?;

        info!(user_id = %user.id, root_id = %root.id, "User registered");

        self.session_for(&user)
    }

    /// Signs in with email and password.
    ///
    /// Unknown emails, accounts without a local password and wrong
    /// passwords are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication(ACCOUNT_NOT_FOUND))?;

        let verified = match user.password_hash.as_deref() {
            Some(hash) => self.hasher.verify_password(password, hash)?,
            None => false,
        };
        if !verified {
            debug!(user_id = %user.id, "Login rejected");
            return Err(AppError::authentication(ACCOUNT_NOT_FOUND));
        }

        info!(user_id = %user.id, "User logged in");
        self.session_for(&user)
    }

    /// Resolves the subject of a verified token to its user.
    pub async fn find_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    fn session_for(&self, user: &User) -> AppResult<AuthSession> {
        Ok(AuthSession {
            token: self.encoder.issue(user.id)?,
            user: user.profile(),
        })
    }
}
