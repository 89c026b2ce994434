//! @ai:module:intent Configuration structs for the analysis service
//! @ai:module:layer infrastructure
//! @ai:module:public_api ServiceConfig, ServerConfig, AnalyzerConfig
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "c-lint-api.toml";

/// @ai:intent Main configuration for the service
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

/// @ai:intent Listener configuration
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// @ai:intent External analyzer invocation settings
///            Command line is: program tool_args.. <file> -- -std=<language_standard> compiler_args..
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default)]
    pub tool_args: Vec<String>,
    #[serde(default = "default_language_standard")]
    pub language_standard: String,
    #[serde(default)]
    pub compiler_args: Vec<String>,
    /// Deadline for one analyzer run; 0 disables it
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Directory for scratch files; system temp dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            tool_args: Vec::new(),
            language_standard: default_language_standard(),
            compiler_args: Vec::new(),
            timeout_ms: default_timeout_ms(),
            scratch_dir: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_program() -> String {
    "clang-tidy".to_string()
}

fn default_language_standard() -> String {
    "c11".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl ServerConfig {
    /// @ai:intent Address string suitable for TcpListener::bind
    /// @ai:effects pure
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AnalyzerConfig {
    /// @ai:intent Execution deadline for one analyzer run, None when timeout_ms is 0
    /// @ai:effects pure
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// @ai:intent Full argument list passed to the analyzer for a given source file
    /// @ai:effects pure
    pub fn command_args(&self, source: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> =
            self.tool_args.iter().map(Into::into).collect();
        args.push(source.as_os_str().to_owned());
        args.push("--".into());
        args.push(format!("-std={}", self.language_standard).into());
        args.extend(self.compiler_args.iter().map(Into::into));
        args
    }
}

impl ServiceConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Load the given file, else the default file if present, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);

                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
