//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using
//! the validator crate. Malformed JSON and failed validation are both
//! rejected as `400` in the regular API error shape.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// A JSON extractor that also validates the request body
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct TtsRequest {
///     #[validate(length(min = 1, message = "text cannot be empty"))]
///     text: String,
/// }
///
/// async fn handler(ValidatedJson(req): ValidatedJson<TtsRequest>) {
///     // req is validated
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value.validate().map_err(|e| {
            let mut errors: Vec<String> = e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        error.message.as_ref().map_or_else(
                            || format!("{field}: {}", error.code),
                            ToString::to_string,
                        )
                    })
                })
                .collect();
            errors.sort();

            ApiError::BadRequest(errors.join("; "))
        })?;

        Ok(Self(value))
    }
}
