use super::form::ActionError;
use crate::tasks::errors::TaskError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message shown for any storage failure; details only go to the log.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Status code plus error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            GENERIC_ERROR_MESSAGE,
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TaskError> for ApiErrorResponse {
    fn from(error: TaskError) -> Self {
        let message = error.to_string();
        match error {
            TaskError::NotFound(_) => Self::not_found(message),
            TaskError::EmptyText => Self::bad_request("EMPTY_TASK", message),
            TaskError::IdsExhausted => Self::new(StatusCode::CONFLICT, "IDS_EXHAUSTED", message),
            TaskError::Storage(e) => {
                tracing::error!(target: "http", error = %e, "Task storage failure");
                Self::internal_error()
            }
        }
    }
}

impl From<ActionError> for ApiErrorResponse {
    fn from(error: ActionError) -> Self {
        let message = error.to_string();
        match error {
            ActionError::UnknownAction => Self::bad_request("UNKNOWN_ACTION", message),
        }
    }
}
