//! Request DTOs with validation.
//!
//! String fields are trimmed on the way in; a missing or `null` string
//! becomes empty so the "required" rule reports it.

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidateEmail, ValidationError};

use filehub_core::FieldErrors;

const NAME_MAX_LETTERS: usize = 200;

/// POST /api/folders
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolderRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "folder_name"))]
    pub name: String,
    #[serde(default, rename = "folderId", deserialize_with = "trimmed")]
    #[validate(custom(function = "parent_folder_id"))]
    pub folder_id: String,
}

/// PATCH /api/folders/{id}
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameFolderRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "folder_name"))]
    pub name: String,
}

/// DELETE /api/folders/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteFolderRequest {
    /// The client's view of which subtree folders hold files.
    #[serde(default, rename = "folderIds")]
    pub folder_ids: Option<Vec<serde_json::Value>>,
}

impl DeleteFolderRequest {
    /// Returns the ids as strings, or one field error per non-string element.
    pub fn string_ids(&self) -> Result<Option<Vec<String>>, FieldErrors> {
        let Some(values) = &self.folder_ids else {
            return Ok(None);
        };

        let mut ids = Vec::with_capacity(values.len());
        let mut errors = FieldErrors::new();
        for (index, value) in values.iter().enumerate() {
            match value.as_str() {
                Some(id) => ids.push(id.to_string()),
                None => {
                    errors.insert(
                        format!("folderIds[{index}]"),
                        "Folder id must be string".to_string(),
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(Some(ids))
        } else {
            Err(errors)
        }
    }
}

/// PATCH /api/files/{id}
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameFileRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "file_name"))]
    pub name: String,
}

/// POST /api/files/{id}/sharers
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShareFileRequest {
    #[serde(default, deserialize_with = "lowercased")]
    #[validate(custom(function = "email"))]
    pub email: String,
}

/// POST /api/account/register
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "username"))]
    pub username: String,
    #[serde(default, deserialize_with = "lowercased")]
    #[validate(custom(function = "email"))]
    pub email: String,
    #[serde(default, deserialize_with = "raw")]
    #[validate(custom(function = "password"))]
    pub password: String,
    #[serde(default, deserialize_with = "raw")]
    pub confirm_password: String,
}

impl RegisterRequest {
    /// Field-level checks, including the password confirmation.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        };

        if self.confirm_password.is_empty() {
            errors.insert(
                "confirmPassword".to_string(),
                "The confirm password is required.".to_string(),
            );
        } else if self.confirm_password != self.password {
            errors.insert(
                "confirmPassword".to_string(),
                "The confirmation password is not the same as the password.".to_string(),
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// POST /api/account/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lowercased")]
    #[validate(custom(function = "email"))]
    pub email: String,
    #[serde(default, deserialize_with = "raw")]
    #[validate(custom(function = "password"))]
    pub password: String,
}

/// Flattens validator output into `{field: first message}` with camelCase keys.
pub fn field_errors(errors: &validator::ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let message = errs.iter().find_map(|e| e.message.as_ref())?;
            Some((camel_case(&field), message.to_string()))
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .unwrap_or_default())
}

fn lowercased<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    trimmed(deserializer).map(|s| s.to_lowercase())
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn invalid(code: &'static str, message: String) -> Result<(), ValidationError> {
    Err(ValidationError::new(code).with_message(message.into()))
}

fn name_rules(value: &str, kind: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        invalid("required", format!("{kind} name is required."))
    } else if value.chars().count() > NAME_MAX_LETTERS {
        invalid(
            "length",
            format!("{kind} name must be less then {NAME_MAX_LETTERS} letters."),
        )
    } else {
        Ok(())
    }
}

fn folder_name(value: &str) -> Result<(), ValidationError> {
    name_rules(value, "Folder")
}

fn file_name(value: &str) -> Result<(), ValidationError> {
    name_rules(value, "File")
}

fn parent_folder_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        invalid("required", "Parent folder id is required.".to_string())
    } else {
        Ok(())
    }
}

fn email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        invalid("required", "The email is required.".to_string())
    } else if !value.validate_email() {
        invalid("email", "The email must be in the correct format.".to_string())
    } else {
        Ok(())
    }
}

fn password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        invalid("required", "The password is required.".to_string())
    } else {
        Ok(())
    }
}

fn username(value: &str) -> Result<(), ValidationError> {
    let letters = value.chars().count();
    if value.is_empty() {
        invalid("required", "Username is required.".to_string())
    } else if !(4..=25).contains(&letters) {
        invalid("length", "Username must be between 4 and 25 letters.".to_string())
    } else if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        invalid(
            "charset",
            "Username must only contain alphanumeric and underline characters.".to_string(),
        )
    } else {
        Ok(())
    }
}
