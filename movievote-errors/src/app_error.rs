use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to message, in a stable order for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Not found")]
    NotFound,

    #[error("Login required")]
    Unauthorized,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }

    /// Field errors for inline rendering; empty unless this is a validation error.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            Self::Validation { field, message } => {
                FieldErrors::single(field.clone(), message.clone())
            }
            _ => FieldErrors::new(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation { message, .. } => message,
            Self::NotFound => "That movie could not be found.",
            Self::Unauthorized => "Please log in first.",
            Self::Auth(_) => "Login failed. Please try again.",
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                "Something went wrong on our side. Please try again later."
            }
        }
    }
}

mod http_impl {
    use super::{AppError, FieldErrors};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    #[derive(serde::Serialize)]
    struct ValidationResponse {
        errors: FieldErrors,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let (status, message) = match &self {
                AppError::Validation { .. } => {
                    let body = ValidationResponse {
                        errors: self.field_errors(),
                    };
                    return (StatusCode::BAD_REQUEST, Json(body)).into_response();
                }
                AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
                AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
                AppError::Auth(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
                AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                    tracing::error!("{}", self);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        self.user_message().to_string(),
                    )
                }
            };
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}
