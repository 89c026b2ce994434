//! @ai:module:intent Analysis pipeline: decode, scratch file, analyze, parse, encode
//! @ai:module:layer application
//! @ai:module:public_api AnalysisService, AnalysisRequest, AnalysisResponse, decode_request
//! @ai:module:depends_on analyzer, scratch, diagnostics
//! @ai:module:stateless true

use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::diagnostics::{parse_diagnostics, Diagnostic};
use crate::error::{AnalysisError, Result};
use crate::scratch::ScratchFile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Message attached to every successful analysis.
pub const SUCCESS_MESSAGE: &str = "Code analyzed successfully";

/// @ai:intent Inbound request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub code: String,
}

/// @ai:intent Successful analysis envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub results: Vec<Diagnostic>,
    pub message: String,
}

impl AnalysisResponse {
    /// @ai:intent Wrap diagnostics with the fixed success message
    /// @ai:effects pure
    pub fn success(results: Vec<Diagnostic>) -> Self {
        Self {
            results,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// @ai:intent Decode a raw request body; content type is not inspected
/// @ai:effects pure
pub fn decode_request(body: &[u8]) -> Result<AnalysisRequest> {
    serde_json::from_slice(body).map_err(AnalysisError::BadRequest)
}

/// @ai:intent Runs the scratch-file, analyzer and parser stages for one request
pub struct AnalysisService<A: Analyzer> {
    analyzer: Arc<A>,
    scratch_dir: Option<PathBuf>,
}

impl<A: Analyzer> Clone for AnalysisService<A> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            scratch_dir: self.scratch_dir.clone(),
        }
    }
}

impl<A: Analyzer> AnalysisService<A> {
    /// @ai:intent Create a service around an analyzer
    /// @ai:effects pure
    pub fn new(analyzer: A, config: &AnalyzerConfig) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    /// @ai:intent Analyze a C snippet and return its diagnostics
    /// @ai:post the scratch file is removed on every return path
    /// @ai:effects fs:write, io
    pub async fn analyze(&self, code: String) -> Result<AnalysisResponse> {
        let scratch_dir = self.scratch_dir.clone();
        let scratch = tokio::task::spawn_blocking(move || {
            ScratchFile::create(scratch_dir.as_deref(), &code)
        })
        .await
        .map_err(|e| AnalysisError::StorageWrite(std::io::Error::other(e)))??;

        let run = self.analyzer.run(scratch.path()).await?;
        let results = parse_diagnostics(&run.output_text());

        tracing::info!(
            "Analyzed {} ({} bytes of output, {}): {} diagnostics",
            scratch.path().display(),
            run.output.len(),
            run.status,
            results.len()
        );

        Ok(AnalysisResponse::success(results))
    }

    /// @ai:intent Decode a raw body and analyze it
    /// @ai:effects fs:write, io
    pub async fn handle_body(&self, body: &[u8]) -> Result<AnalysisResponse> {
        let request = decode_request(body)?;
        self.analyze(request.code).await
    }
}
