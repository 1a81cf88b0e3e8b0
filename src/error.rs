//! API error taxonomy and its HTTP mapping.
//!
//! Every error body is `{"message": …}`. Validation failures surface with
//! the raw validator message under a 500, matching the reference contract,
//! which does not distinguish them from infrastructure failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Field-constraint violation; message goes back verbatim.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Unknown id; the string is the collection's display name.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Something went wrong")]
    Store(#[from] StoreError),
    #[error("Something went wrong")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            // Faithful to the reference contract: validator messages ride
            // a 500, not a 4xx.
            ApiError::Validation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::MissingPassword => StatusCode::BAD_REQUEST,
            ApiError::InvalidPassword => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(err) = &self {
            tracing::error!(error = %err, "store failure");
        }
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation(ValidationError("Please provide a title".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::NotFound("Blog").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidPassword.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn not_found_message_names_the_collection() {
        assert_eq!(ApiError::NotFound("Retreat").to_string(), "Retreat not found");
        assert_eq!(ApiError::DuplicateEmail.to_string(), "User already exists");
    }
}
