//! Password policy for local accounts.

use filehub_core::config::AuthConfig;

/// Message shown when a password fails the policy.
pub const WEAK_PASSWORD: &str = "The password must contain one or more numbers, special symbols, lowercase and uppercase characters, and at least 8 characters.";

/// Checks new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Whether the password has the minimum length and at least one
    /// lowercase letter, uppercase letter, digit and symbol.
    pub fn is_strong(&self, password: &str) -> bool {
        password.chars().count() >= self.min_length
            && password.chars().any(char::is_lowercase)
            && password.chars().any(char::is_uppercase)
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    }
}
