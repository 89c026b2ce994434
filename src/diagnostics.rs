//! @ai:module:intent Turn analyzer text output into structured diagnostics
//! @ai:module:layer domain
//! @ai:module:public_api Diagnostic, parse_diagnostics
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent One warning or error reported by the analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// `<line>:<column>` as printed by the analyzer; the file segment is dropped
    #[serde(rename = "line")]
    pub location: String,
    pub description: String,
}

/// @ai:intent Parse analyzer output into diagnostics, keeping input order
/// @ai:post every result came from a line containing "warning" or "error" with >= 3 colons
/// @ai:example ("/tmp/a.c:5:10: warning: unused variable 'x'") -> [{location: "5:10", description: "warning: unused variable 'x'"}]
/// @ai:edge_cases "error" inside a file path also qualifies the line
/// @ai:effects pure
pub fn parse_diagnostics(output: &str) -> Vec<Diagnostic> {
    output
        .split('\n')
        .filter(|line| is_diagnostic_line(line))
        .filter_map(parse_line)
        .collect()
}

/// @ai:intent Substring check deciding whether a line is worth splitting
/// @ai:effects pure
fn is_diagnostic_line(line: &str) -> bool {
    line.contains("warning") || line.contains("error")
}

/// @ai:intent Split `file:line:col: message` on the first three colons
/// @ai:effects pure
fn parse_line(line: &str) -> Option<Diagnostic> {
    let mut parts = line.splitn(4, ':');
    let _file = parts.next()?;
    let line_no = parts.next()?;
    let column = parts.next()?;
    let message = parts.next()?;

    Some(Diagnostic {
        location: format!("{line_no}:{column}"),
        description: message.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diag(location: &str, description: &str) -> Diagnostic {
        Diagnostic {
            location: location.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_parse_single_warning() {
        let result = parse_diagnostics("/tmp/abc123.c:5:10: warning: unused variable 'x'");
        assert_eq!(result, vec![diag("5:10", "warning: unused variable 'x'")]);
    }

    #[test]
    fn test_parse_clang_tidy_transcript() {
        let output = "\
/tmp/analysis-Xy12.c:1:16: warning: Value stored to 'x' during its initialization is never read [clang-analyzer-deadcode.DeadStores]
    1 | int main(){int x=1;return 0;}
      |                ^
/tmp/analysis-Xy12.c:1:16: note: Value stored to 'x' during its initialization is never read
/tmp/analysis-Xy12.c:3:1: error: unknown type name 'foo' [clang-diagnostic-error]
1 warning and 1 error generated.
Error while processing /tmp/analysis-Xy12.c.
";
        let result = parse_diagnostics(output);
        assert_eq!(
            result,
            vec![
                diag(
                    "1:16",
                    "warning: Value stored to 'x' during its initialization is never read [clang-analyzer-deadcode.DeadStores]"
                ),
                diag("3:1", "error: unknown type name 'foo' [clang-diagnostic-error]"),
            ]
        );
    }

    #[test]
    fn test_lines_without_keyword_never_produce_diagnostics() {
        let output = "a.c:1:2: note: something\nx:y:z:w\nplain text line\n";
        assert!(parse_diagnostics(output).is_empty());
    }

    #[test]
    fn test_lines_with_fewer_than_three_colons_are_dropped() {
        let output = "warning\nerror: only one colon\na.c:3: warning two colons\n";
        assert!(parse_diagnostics(output).is_empty());
    }

    #[test]
    fn test_colons_in_message_are_preserved() {
        let result = parse_diagnostics("f.c:7:3: error: expected ':' after 'case'");
        assert_eq!(result, vec![diag("7:3", "error: expected ':' after 'case'")]);
    }

    #[test]
    fn test_keyword_match_is_case_sensitive() {
        assert!(parse_diagnostics("f.c:1:1: Warning: capitalised").is_empty());
        assert!(parse_diagnostics("f.c:1:1: ERROR: shouting").is_empty());
    }

    #[test]
    fn test_keyword_in_path_qualifies_line() {
        let result = parse_diagnostics("/srv/errors/a.c:2:4: note: candidate here");
        assert_eq!(result, vec![diag("2:4", "note: candidate here")]);
    }

    #[test]
    fn test_description_is_trimmed_and_crlf_tolerated() {
        let result = parse_diagnostics("a.c:9:1:   warning: trailing   \r\n");
        assert_eq!(result, vec![diag("9:1", "warning: trailing")]);
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_diagnostics("").is_empty());
    }

    #[test]
    fn test_serializes_location_as_line() {
        let json = serde_json::to_value(diag("5:10", "warning: x")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "line": "5:10", "description": "warning: x" })
        );
    }
}
