//! Testing utilities
//!
//! Helpers shared by the unit tests and the integration tests in `tests/`:
//!
//! - [analyze]: lex and analyze a source, panicking on fatal errors
//! - [edits_of]: run a single rule against an analysis
//! - [scope_kinds]: the kind of every scope, in document order
//! - [assert_formats]: format with the given rules and compare the output
//! - [assert_text_eq]: the comparison on its own, naming blank-line and line-ending differences

use crate::pipeline::edits::Edit;
use crate::pipeline::{Analysis, Formatter};
use crate::rules::Rule;
use crate::scoping::ScopeKind;

pub fn analyze(source: &str) -> Analysis {
    match Formatter::new().analyze(source) {
        Ok(analysis) => analysis,
        Err(error) => panic!("failed to analyze {source:?}: {error}"),
    }
}

pub fn edits_of(rule: &dyn Rule, analysis: &Analysis) -> Vec<Edit> {
    rule.edits(&analysis.context())
}

pub fn scope_kinds(source: &str) -> Vec<ScopeKind> {
    analyze(source).scopes.iter().map(|(_, scope)| scope.kind).collect()
}

/// Format `input` with `rules` and assert the output equals `expected` exactly, and that no
/// rule was dropped.
pub fn assert_formats(rules: &[&str], input: &str, expected: &str) {
    let formatted = match Formatter::new().format(input, rules) {
        Ok(formatted) => formatted,
        Err(error) => panic!("failed to format {input:?}: {error}"),
    };
    assert!(
        formatted.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        formatted.diagnostics
    );
    assert_text_eq(expected, &formatted.output);
}

/// Assert that two strings are equal, explaining each differing line on failure.
///
/// Formatting only moves line breaks, so the report calls out blank lines and CRLF/LF
/// differences by name instead of printing two near-identical lines.
pub fn assert_text_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }

    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    let mut report = vec![format!(
        "blank lines: expected {}, found {}",
        blank_lines(&expected_lines),
        blank_lines(&actual_lines)
    )];

    for line in 0..expected_lines.len().max(actual_lines.len()) {
        let note = match (expected_lines.get(line), actual_lines.get(line)) {
            (Some(exp), Some(act)) if exp == act => continue,
            (Some(exp), Some(act)) => describe(exp, act),
            (Some(exp), None) => format!("missing {exp:?}"),
            (None, Some(act)) => format!("unexpected trailing {act:?}"),
            (None, None) => continue,
        };
        report.push(format!("line {}: {note}", line + 1));
    }

    panic!(
        "text differs\n{}\n\nexpected:\n{expected}\n\nactual:\n{actual}",
        report.join("\n")
    );
}

fn blank_lines(lines: &[&str]) -> usize {
    lines.iter().filter(|line| line.trim().is_empty()).count()
}

fn describe(expected: &str, actual: &str) -> String {
    let ending = |line: &str| if line.ends_with('\r') { "CRLF" } else { "LF" };
    let (exp, act) = (expected.trim_end_matches('\r'), actual.trim_end_matches('\r'));
    if exp == act {
        format!("expected {} line ending, found {}", ending(expected), ending(actual))
    } else if exp.trim().is_empty() {
        format!("expected a blank line, found {act:?}")
    } else if act.trim().is_empty() {
        format!("unexpected blank line, expected {exp:?}")
    } else {
        format!("expected {exp:?}, found {act:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_passes() {
        assert_text_eq("a\n\nb", "a\n\nb");
    }

    #[test]
    #[should_panic(expected = "line 2: expected a blank line, found \"b\"")]
    fn test_missing_blank_line_is_named() {
        assert_text_eq("a\n\nb", "a\nb");
    }

    #[test]
    #[should_panic(expected = "line 2: unexpected blank line")]
    fn test_extra_blank_line_is_named() {
        assert_text_eq("a\nb", "a\n\nb");
    }

    #[test]
    #[should_panic(expected = "line 1: expected CRLF line ending, found LF")]
    fn test_line_ending_difference_is_named() {
        assert_text_eq("a\r\nb", "a\nb");
    }

    #[test]
    #[should_panic(expected = "blank lines: expected 2, found 1")]
    fn test_blank_line_counts_are_summarized() {
        assert_text_eq("{\n\n\n}", "{\n\n}");
    }

    #[test]
    fn test_scope_kinds() {
        assert_eq!(
            scope_kinds("struct A {\n    func b() {}\n}"),
            vec![ScopeKind::TypeDeclaration, ScopeKind::FunctionBody]
        );
    }
}
