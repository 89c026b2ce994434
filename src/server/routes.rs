//! @ai:module:intent HTTP handlers for the analysis API
//! @ai:module:layer presentation
//! @ai:module:public_api analyze, health, HealthResponse
//! @ai:module:depends_on service, analyzer, error
//! @ai:module:stateless true

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::error::AnalysisError;
use crate::service::{AnalysisResponse, AnalysisService};

/// @ai:intent POST /api/analyze: decode the body, lint the code, return the envelope
/// @ai:post errors render as plain text with the status from AnalysisError::status
/// @ai:effects fs:write, io
pub async fn analyze<A: Analyzer>(
    State(service): State<AnalysisService<A>>,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, AnalysisError> {
    let response = service.handle_body(&body).await?;
    Ok(Json(response))
}

/// @ai:intent GET /health: liveness and crate version
/// @ai:effects pure
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// @ai:intent Body of the health endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
