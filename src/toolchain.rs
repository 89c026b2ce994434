//! @ai:module:intent Check that the configured analyzer binary can run
//! @ai:module:layer infrastructure
//! @ai:module:public_api ToolchainValidator, ToolchainStatus
//! @ai:module:stateless true

use crate::config::AnalyzerConfig;
use std::process::{Command, Stdio};

/// @ai:intent Result of checking the analyzer binary
#[derive(Debug)]
pub struct ToolchainStatus {
    pub program: String,
    pub available: bool,
    /// First line of `--version` output when the tool ran
    pub version: Option<String>,
    pub install_hint: &'static str,
}

/// @ai:intent Validates that the analyzer is installed
pub struct ToolchainValidator;

impl ToolchainValidator {
    /// @ai:intent Get install hint for a tool
    /// @ai:effects pure
    fn get_install_hint(tool: &str) -> &'static str {
        let name = std::path::Path::new(tool)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(tool);

        match name {
            "clang-tidy" => {
                "Install clang-tidy: apt install clang-tidy, brew install llvm, or https://releases.llvm.org/"
            }
            _ => "Check tool documentation for installation instructions",
        }
    }

    /// @ai:intent Run `<tool> --version` and return its first line on success
    /// @ai:effects io
    fn query_version(tool: &str) -> Option<String> {
        Command::new(tool)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .ok()
            .filter(|output| output.status.success())
            .map(|output| {
                String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .unwrap_or_default()
                    .to_string()
            })
    }

    /// @ai:intent Check the configured analyzer and return its status
    /// @ai:effects io
    pub fn validate(config: &AnalyzerConfig) -> ToolchainStatus {
        let version = Self::query_version(&config.program);

        ToolchainStatus {
            program: config.program.clone(),
            available: version.is_some(),
            version,
            install_hint: Self::get_install_hint(&config.program),
        }
    }

    /// @ai:intent Log a warning when the analyzer is missing
    /// @ai:effects io
    pub fn log_warnings(status: &ToolchainStatus) {
        if status.available {
            tracing::info!(
                "Using analyzer '{}' ({})",
                status.program,
                status.version.as_deref().unwrap_or("unknown version")
            );
        } else {
            tracing::warn!(
                "Analyzer '{}' not found - analysis requests will fail. {}",
                status.program,
                status.install_hint
            );
        }
    }
}
