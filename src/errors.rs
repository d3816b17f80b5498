use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::BookingStatus;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("booking id already exists: {0}")]
    DuplicateId(String),

    #[error("no booking ids left for prefix {0}")]
    IdsExhausted(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("cannot move booking {id} from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // underlying driver errors only compare by kind
            (Self::Database(_), Self::Database(_)) => true,
            (Self::Serialization(_), Self::Serialization(_)) => true,
            (Self::Config(a), Self::Config(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::DuplicateId(a), Self::DuplicateId(b)) => a == b,
            (Self::IdsExhausted(a), Self::IdsExhausted(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (
                Self::InvalidTransition { id, from, to },
                Self::InvalidTransition {
                    id: id2,
                    from: from2,
                    to: to2,
                },
            ) => id == id2 && from == from2 && to == to2,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateId(_) => StatusCode::CONFLICT,
            AppError::IdsExhausted(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
