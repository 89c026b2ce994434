//! @ai:module:intent CLI entry point: serve the analysis API or analyze a local file
//! @ai:module:layer presentation
//! @ai:module:depends_on server, service, config, toolchain, output

use anyhow::{Context, Result};
use c_lint_api::{
    format_diagnostics, shutdown_signal, AnalysisServer, AnalysisService, ClangTidy, OutputFormat,
    ServiceConfig, ToolchainValidator,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "c-lint-api")]
#[command(author, version, about = "HTTP API that runs clang-tidy over submitted C code")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Analyze a local C file and print the diagnostics
    Analyze {
        /// Path to the C source file
        file: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Check that the configured analyzer is installed
    Check {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "c-lint-api.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("c_lint_api=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { config: None }) {
        Commands::Serve { config } => serve(config).await,
        Commands::Analyze {
            file,
            config,
            format,
        } => analyze(file, config, format.into()).await,
        Commands::Check { config } => check(config),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Run the HTTP server until Ctrl-C or SIGTERM
/// @ai:effects network, fs:write, io
async fn serve(config_path: Option<PathBuf>) -> Result<ExitCode> {
    let config = ServiceConfig::load_or_default(config_path.as_deref())?;

    let status = ToolchainValidator::validate(&config.analyzer);
    ToolchainValidator::log_warnings(&status);

    let service = AnalysisService::new(ClangTidy::new(config.analyzer.clone()), &config.analyzer);
    let handle = AnalysisServer::new(config.server.clone(), service)
        .start()
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr()))?;

    shutdown_signal().await;
    handle.stop().await?;

    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Analyze one file through the same pipeline as the HTTP endpoint
/// @ai:effects fs:read, fs:write, io
async fn analyze(
    file: PathBuf,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let config = ServiceConfig::load_or_default(config_path.as_deref())?;
    let code = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let service = AnalysisService::new(ClangTidy::new(config.analyzer.clone()), &config.analyzer);

    match service.analyze(code).await {
        Ok(response) => {
            println!("{}", format_diagnostics(&response, format));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::from(2))
        }
    }
}

/// @ai:intent Report whether the analyzer can be executed
/// @ai:effects io
fn check(config_path: Option<PathBuf>) -> Result<ExitCode> {
    let config = ServiceConfig::load_or_default(config_path.as_deref())?;
    let status = ToolchainValidator::validate(&config.analyzer);

    if status.available {
        println!(
            "{}: {}",
            status.program,
            status.version.as_deref().unwrap_or("available")
        );
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{} not found. {}", status.program, status.install_hint);
        Ok(ExitCode::FAILURE)
    }
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<ExitCode> {
    let config = ServiceConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(ExitCode::SUCCESS)
}
