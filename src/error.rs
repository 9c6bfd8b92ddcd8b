use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
///
/// Every variant represents an unhandled per-request fault: the pipeline
/// converts all of them to a uniform 500 response at the containment boundary.
/// An admission denial is not an error and never goes through this type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Decision service error: {0}")]
    Admission(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        // Per-request faults are uniformly contained as server errors.
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Error category for logs and programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Admission(_) => "DECISION_SERVICE_ERROR",
            AppError::Reqwest(_) => "HTTP_CLIENT_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    pub fn log(&self) {
        tracing::error!(
            error = %self,
            error_code = %self.error_code(),
            status = %self.status_code().as_u16(),
            "Unhandled fault in request pipeline"
        );
    }

    pub fn admission(msg: impl Into<String>) -> Self {
        AppError::Admission(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let status = self.status_code();

        // Internal details stay in the logs, not in the response body
        let body = json!({
            "error": "Internal server error",
            "error_code": self.error_code(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_faults_map_to_500() {
        let errors = [
            AppError::admission("timeout"),
            AppError::internal("boom"),
            AppError::config("bad"),
        ];
        for error in errors {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn error_codes_are_distinct() {
        assert_ne!(
            AppError::admission("x").error_code(),
            AppError::internal("x").error_code()
        );
    }
}
