use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use remote_action_core::ApiError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of a `ToggleLock` call, or of server setup.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub error_type: String,
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ServiceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Api(ApiError::RequestConstruction(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Api(ApiError::Transport(_)) => StatusCode::BAD_GATEWAY,
            ServiceError::Api(ApiError::Decode(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::InvalidArgument(_) => "invalid_argument",
            ServiceError::Configuration(_) => "configuration_error",
            ServiceError::Api(e) => e.kind(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: status.as_u16(),
            message: self.to_string(),
            error_type: self.error_type().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
