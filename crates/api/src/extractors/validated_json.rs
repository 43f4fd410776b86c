//! Validated JSON extractor.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// JSON extractor that automatically validates the payload.
///
/// An unreadable body rejects with `AppError::MalformedBody`; a parsed but
/// invalid one with `AppError::Validation` listing every offending field.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected request body: {}", e.body_text());
            AppError::MalformedBody
        })?;

        value
            .validate()
            .map_err(|e| AppError::Validation(collect_violations(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Keep the first message reported for each field.
fn collect_violations(errors: &validator::ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|error| error.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            (field.to_string(), message)
        })
        .collect()
}
