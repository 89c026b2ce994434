//! @ai:module:intent Run the external static analyzer against a source file
//! @ai:module:layer infrastructure
//! @ai:module:public_api Analyzer, AnalyzerRun, ClangTidy
//! @ai:module:stateless true

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use std::future::Future;
use std::io::Read;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// @ai:intent Raw capture of one analyzer execution
#[derive(Debug, Clone)]
pub struct AnalyzerRun {
    /// stdout and stderr through one pipe, in write order
    pub output: Vec<u8>,
    pub status: ExitStatus,
}

impl AnalyzerRun {
    /// @ai:intent Captured output as text, replacing invalid UTF-8
    /// @ai:effects pure
    pub fn output_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// @ai:intent Trait for analyzers that lint a single file on disk
pub trait Analyzer: Send + Sync + 'static {
    /// @ai:intent Analyze the file at `source` once, with no retry
    fn run(&self, source: &Path) -> impl Future<Output = Result<AnalyzerRun>> + Send;
}

/// @ai:intent clang-tidy (or a drop-in replacement) invoked as a subprocess
#[derive(Debug, Clone)]
pub struct ClangTidy {
    config: AnalyzerConfig,
}

impl ClangTidy {
    /// @ai:intent Create an invoker from analyzer settings
    /// @ai:effects pure
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

impl Analyzer for ClangTidy {
    /// @ai:intent Run the analyzer under the configured deadline
    /// @ai:post output holds stdout and stderr in the order the tool wrote them
    /// @ai:post non-zero exit with output is Ok; non-zero exit without output is AnalyzerUnavailable
    /// @ai:effects io
    async fn run(&self, source: &Path) -> Result<AnalyzerRun> {
        let (mut reader, writer) = std::io::pipe().map_err(unavailable)?;
        let stderr_writer = writer.try_clone().map_err(unavailable)?;

        let mut command = Command::new(&self.config.program);
        command
            .args(self.config.command_args(source))
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);

        tracing::debug!("Running {:?}", command.as_std());

        let spawned = command.spawn();
        // The command keeps the parent's write ends open until dropped; the reader needs EOF.
        drop(command);
        let mut child = spawned.map_err(unavailable)?;

        let capture = tokio::task::spawn_blocking(move || {
            let mut output = Vec::new();
            reader.read_to_end(&mut output).map(|_| output)
        });

        let finished = async {
            let status = child.wait().await?;
            let output = capture.await.map_err(std::io::Error::other)??;
            Ok::<_, std::io::Error>((status, output))
        };

        // Dropping `finished` on timeout releases `child`, and kill_on_drop kills it.
        let (status, output) = match self.config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, finished).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        "{} exceeded {}ms on {}",
                        self.config.program,
                        limit.as_millis(),
                        source.display()
                    );
                    return Err(AnalysisError::AnalyzerTimeout(limit));
                }
            },
            None => finished.await,
        }
        .map_err(unavailable)?;

        if !status.success() && output.is_empty() {
            return Err(AnalysisError::AnalyzerUnavailable {
                reason: describe_exit(status),
            });
        }

        Ok(AnalyzerRun { output, status })
    }
}

fn unavailable(e: std::io::Error) -> AnalysisError {
    AnalysisError::AnalyzerUnavailable {
        reason: e.to_string(),
    }
}

/// @ai:intent Render an exit status as `exit status N`, or the platform text for signals
/// @ai:effects pure
fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {code}"),
        None => status.to_string(),
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Analyzer config running an inline shell script; `$1` is the scratch file.
    fn script(body: &str, timeout_ms: u64) -> AnalyzerConfig {
        AnalyzerConfig {
            program: "sh".to_string(),
            tool_args: vec!["-c".to_string(), body.to_string(), "sh".to_string()],
            timeout_ms,
            ..Default::default()
        }
    }

    fn source_file() -> tempfile::NamedTempFile {
        tempfile::Builder::new().suffix(".c").tempfile().unwrap()
    }

    #[tokio::test]
    async fn test_passes_file_and_standard_flag() {
        let source = source_file();
        let analyzer = ClangTidy::new(script(r#"echo "$@""#, 5_000));

        let run = analyzer.run(source.path()).await.unwrap();
        assert!(run.status.success());
        assert_eq!(
            run.output_text().trim(),
            format!("{} -- -std=c11", source.path().display())
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_with_output_is_not_failure() {
        let source = source_file();
        let analyzer = ClangTidy::new(script(
            r#"echo "$1:5:10: warning: unused variable 'x'"; exit 1"#,
            5_000,
        ));

        let run = analyzer.run(source.path()).await.unwrap();
        assert!(!run.status.success());
        assert!(run.output_text().contains("warning: unused variable 'x'"));
    }

    #[tokio::test]
    async fn test_streams_interleave_in_write_order() {
        let source = source_file();
        let analyzer = ClangTidy::new(script(
            "echo 'a.c:1:1: warning: FIRST' >&2; echo 'a.c:2:2: warning: SECOND'; echo 'a.c:3:3: error: THIRD' >&2",
            5_000,
        ));

        let run = analyzer.run(source.path()).await.unwrap();
        assert_eq!(
            run.output_text(),
            "a.c:1:1: warning: FIRST\na.c:2:2: warning: SECOND\na.c:3:3: error: THIRD\n"
        );

        let descriptions: Vec<String> = crate::diagnostics::parse_diagnostics(&run.output_text())
            .into_iter()
            .map(|d| d.description)
            .collect();
        assert_eq!(
            descriptions,
            vec!["warning: FIRST", "warning: SECOND", "error: THIRD"]
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_output_is_unavailable() {
        let source = source_file();
        let analyzer = ClangTidy::new(script("exit 3", 5_000));

        let err = analyzer.run(source.path()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::AnalyzerUnavailable { .. }));
        assert_eq!(err.to_string(), "Clang-tidy failed: exit status 3");
    }

    #[tokio::test]
    async fn test_zero_exit_without_output_is_ok() {
        let source = source_file();
        let analyzer = ClangTidy::new(script("exit 0", 5_000));

        let run = analyzer.run(source.path()).await.unwrap();
        assert!(run.output.is_empty());
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let source = source_file();
        let analyzer = ClangTidy::new(AnalyzerConfig {
            program: "nonexistent_analyzer_xyz".to_string(),
            ..Default::default()
        });

        let err = analyzer.run(source.path()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::AnalyzerUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_deadline_kills_hung_analyzer() {
        let source = source_file();
        let analyzer = ClangTidy::new(script("exec sleep 10", 100));

        let started = std::time::Instant::now();
        let err = analyzer.run(source.path()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::AnalyzerTimeout(_)));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_zero_timeout_runs_without_deadline() {
        let source = source_file();
        let analyzer = ClangTidy::new(script("sleep 0.2; echo 'a.c:1:1: warning: late'", 0));

        let run = analyzer.run(source.path()).await.unwrap();
        assert!(run.output_text().contains("warning: late"));
    }
}
