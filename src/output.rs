//! @ai:module:intent Format analysis results for the CLI (text, JSON)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_diagnostics
//! @ai:module:depends_on service, diagnostics
//! @ai:module:stateless true

use crate::diagnostics::Diagnostic;
use crate::service::AnalysisResponse;
use colored::Colorize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format an analysis response as a string
/// @ai:effects pure
pub fn format_diagnostics(response: &AnalysisResponse, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(response).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(response).unwrap_or_default(),
        OutputFormat::Text => format_diagnostics_text(response),
    }
}

/// @ai:intent Format an analysis response as human-readable text
/// @ai:effects pure
fn format_diagnostics_text(response: &AnalysisResponse) -> String {
    let mut output = String::new();

    for diagnostic in &response.results {
        output.push_str(&format!(
            "{} {}\n",
            diagnostic.location.dimmed(),
            highlight(diagnostic)
        ));
    }

    let errors = count_prefixed(&response.results, "error");
    let warnings = count_prefixed(&response.results, "warning");

    if !response.results.is_empty() {
        output.push('\n');
    }

    if errors > 0 {
        output.push_str(&format!(
            "{}, {}\n",
            count_label(errors, "error").red().bold(),
            count_label(warnings, "warning").yellow()
        ));
    } else if warnings > 0 {
        output.push_str(&format!(
            "{} {}\n",
            "OK".green().bold(),
            count_label(warnings, "warning").yellow()
        ));
    } else {
        output.push_str(&format!("{} No issues found\n", "OK".green().bold()));
    }

    output
}

/// @ai:intent Colour the severity word at the start of a description
/// @ai:effects pure
fn highlight(diagnostic: &Diagnostic) -> String {
    let description = diagnostic.description.as_str();

    if let Some(rest) = description.strip_prefix("error:") {
        format!("{}{}", "error:".red().bold(), rest)
    } else if let Some(rest) = description.strip_prefix("warning:") {
        format!("{}{}", "warning:".yellow().bold(), rest)
    } else {
        description.to_string()
    }
}

/// @ai:intent `1 warning`, `2 warnings`, `0 errors`
/// @ai:effects pure
fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn count_prefixed(results: &[Diagnostic], severity: &str) -> usize {
    results
        .iter()
        .filter(|d| {
            d.description
                .strip_prefix(severity)
                .is_some_and(|rest| rest.starts_with(':'))
        })
        .count()
}
