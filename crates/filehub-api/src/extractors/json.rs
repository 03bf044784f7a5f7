//! JSON body extractors.

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use validator::Validate;

use filehub_core::error::AppError;
use filehub_service::file::FILE_TOO_LARGE;

use crate::dto::request::field_errors;
use crate::error::ApiError;

const INVALID_PAYLOAD: &str = "Payloads are invalid.";

/// Deserializes a JSON body. An empty body is read as `{}`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::payload_too_large(FILE_TOO_LARGE)
            } else {
                AppError::bad_request(INVALID_PAYLOAD)
            }
        })?;

        parse_body(&bytes).map(JsonBody).map_err(ApiError::from)
    }
}

/// A [`JsonBody`] that also passes `validator` checks.
///
/// Failures are reported as field errors keyed by the JSON field name.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| AppError::fields(field_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        bytes
    };
    serde_json::from_slice(body).map_err(|_| AppError::bad_request(INVALID_PAYLOAD))
}
