//! @ai:module:intent Error taxonomy for the analysis pipeline and its HTTP mapping
//! @ai:module:layer domain
//! @ai:module:public_api AnalysisError, Result
//! @ai:module:stateless true

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

/// @ai:intent Unified error type for every stage of an analysis request
///            The Display text is the plain-text body sent to the client
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid request body")]
    BadRequest(#[source] serde_json::Error),

    #[error("Could not create temp file")]
    StorageCreate(#[source] std::io::Error),

    #[error("Could not write code to file")]
    StorageWrite(#[source] std::io::Error),

    #[error("Clang-tidy failed: {reason}")]
    AnalyzerUnavailable { reason: String },

    #[error("Clang-tidy failed: timed out after {}ms", .0.as_millis())]
    AnalyzerTimeout(Duration),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// @ai:intent HTTP status the error maps to
    /// @ai:effects pure
    pub fn status(&self) -> StatusCode {
        match self {
            AnalysisError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AnalysisError::StorageCreate(_)
            | AnalysisError::StorageWrite(_)
            | AnalysisError::AnalyzerUnavailable { .. }
            | AnalysisError::AnalyzerTimeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        match std::error::Error::source(&self) {
            Some(source) => tracing::error!("{self}: {source}"),
            None => tracing::error!("{self}"),
        }

        (self.status(), self.to_string()).into_response()
    }
}
