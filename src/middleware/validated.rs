use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::error::ApiError;

/// A request body type accepted through `ValidatedJson`.
pub trait InputBody: DeserializeOwned + Validate {
    /// Reject unusable bodies with 422 instead of 400
    const UNPROCESSABLE: bool = false;
}

/// Required text must hold something besides whitespace; the services store
/// trimmed values.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// JSON body that has been deserialized and passed its `validator` rules.
/// Rejections are rendered as `ApiError`s with fixed messages.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

fn reject<T: InputBody>(message: String) -> ApiError {
    if T::UNPROCESSABLE {
        ApiError::unprocessable(message)
    } else {
        ApiError::validation(message)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: InputBody,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            let message = match rejection {
                JsonRejection::JsonDataError(_) => "request body has missing or mistyped fields",
                JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
                JsonRejection::MissingJsonContentType(_) => "expected a JSON request body",
                _ => "could not read request body",
            };
            reject::<T>(message.to_string())
        })?;

        value
            .validate()
            .map_err(|errors| reject::<T>(format!("invalid request body: {}", errors)))?;
        Ok(ValidatedJson(value))
    }
}
