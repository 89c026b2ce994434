//! @ai:module:intent HTTP service that lints C snippets with an external analyzer
//! @ai:module:layer application
//! @ai:module:public_api config, analyzer, diagnostics, error, output, scratch, server, service, toolchain
//!
//! # c-lint-api
//!
//! Accepts C source over `POST /api/analyze`, writes it to a scratch `.c`
//! file, runs `clang-tidy` against it and returns the warnings and errors
//! as JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use c_lint_api::{AnalysisService, ClangTidy, ServiceConfig};
//!
//! # async fn run() -> Result<(), c_lint_api::AnalysisError> {
//! let config = ServiceConfig::default();
//! let service = AnalysisService::new(ClangTidy::new(config.analyzer.clone()), &config.analyzer);
//! let response = service.analyze("int main(){int x;return 0;}".to_string()).await?;
//! println!("{}", response.results.len());
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod scratch;
pub mod server;
pub mod service;
pub mod toolchain;

pub use analyzer::{Analyzer, AnalyzerRun, ClangTidy};
pub use config::{AnalyzerConfig, ServerConfig, ServiceConfig};
pub use diagnostics::{parse_diagnostics, Diagnostic};
pub use error::{AnalysisError, Result};
pub use output::{format_diagnostics, OutputFormat};
pub use scratch::ScratchFile;
pub use server::{create_router, shutdown_signal, AnalysisServer, ServerHandle};
pub use service::{decode_request, AnalysisRequest, AnalysisResponse, AnalysisService};
pub use toolchain::{ToolchainStatus, ToolchainValidator};
