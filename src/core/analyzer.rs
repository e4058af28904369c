//! Per-kind content analysis
//!
//! These are line scanners, not parsers. The counts are deliberately naive
//! substring heuristics and must stay that way: callers rely on the exact
//! arithmetic (see the tests below).

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

use super::record::FileKind;
use crate::error::{MonitorError, MonitorResult};

/// Metrics derived from a text file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextMetrics {
    pub line_count: usize,
    /// Spaces per line plus one, summed. Over-counts runs of spaces.
    pub word_count: usize,
    /// Line lengths in bytes, terminators excluded
    pub char_count: usize,
}

/// Metrics derived from a program source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgramMetrics {
    pub line_count: usize,
    /// Lines containing `"class "`
    pub class_count: usize,
    /// Lines containing `"void "` or any `(`
    pub method_count: usize,
}

/// Kind-specific payload attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Metrics {
    None,
    Text(TextMetrics),
    Program(ProgramMetrics),
}

pub fn analyze_text(content: &str) -> TextMetrics {
    let mut metrics = TextMetrics::default();

    for line in content.lines() {
        metrics.line_count += 1;
        metrics.word_count += line.matches(' ').count() + 1;
        metrics.char_count += line.len();
    }

    metrics
}

pub fn analyze_program(content: &str) -> ProgramMetrics {
    let mut metrics = ProgramMetrics::default();

    for line in content.lines() {
        metrics.line_count += 1;
        if line.contains("class ") {
            metrics.class_count += 1;
        }
        // One hit per line even when both triggers match
        if line.contains("void ") || line.contains('(') {
            metrics.method_count += 1;
        }
    }

    metrics
}

/// Run the analyzer for `kind` against the file at `path`.
///
/// Generic and Image files are metadata-only and never opened. Content is
/// decoded lossily so only I/O failures surface as errors.
pub fn analyze(kind: FileKind, path: &Path) -> MonitorResult<Metrics> {
    let read = || -> MonitorResult<String> {
        let bytes = fs::read(path).map_err(|e| MonitorError::file(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    };

    match kind {
        FileKind::Generic | FileKind::Image => Ok(Metrics::None),
        FileKind::Text => Ok(Metrics::Text(analyze_text(&read()?))),
        FileKind::Program => Ok(Metrics::Program(analyze_program(&read()?))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_metrics_follow_the_space_heuristic() {
        // One single space and one double space: three spaces, plus one.
        let metrics = analyze_text("a b  c");
        assert_eq!(metrics.line_count, 1);
        assert_eq!(metrics.char_count, 6);
        assert_eq!(metrics.word_count, 4);
    }

    #[test]
    fn test_text_metrics_multiline() {
        let metrics = analyze_text("hello world\nsecond line here\n");
        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.word_count, 5);
        assert_eq!(metrics.char_count, 11 + 16);
    }

    #[test]
    fn test_empty_content_has_no_lines() {
        assert_eq!(analyze_text(""), TextMetrics::default());
        assert_eq!(analyze_program(""), ProgramMetrics::default());
    }

    #[test]
    fn test_empty_line_still_counts_a_word() {
        let metrics = analyze_text("\n\n");
        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.word_count, 2);
        assert_eq!(metrics.char_count, 0);
    }

    #[test]
    fn test_program_metrics() {
        let metrics = analyze_program("class Foo {\n  void bar() {}\n}");
        assert_eq!(metrics.line_count, 3);
        assert_eq!(metrics.class_count, 1);
        assert_eq!(metrics.method_count, 1);
    }

    #[test]
    fn test_program_heuristic_misfires_on_parentheses_and_comments() {
        let source = "// this class is fake\nint x = (1 + 2);\nif (x) {}\n";
        let metrics = analyze_program(source);
        assert_eq!(metrics.class_count, 1);
        assert_eq!(metrics.method_count, 2);
    }

    #[test]
    fn test_analyze_skips_content_for_images() {
        let metrics = analyze(FileKind::Image, Path::new("/definitely/not/here.png")).unwrap();
        assert_eq!(metrics, Metrics::None);
    }

    #[test]
    fn test_analyze_reports_unreadable_text() {
        let err = analyze(FileKind::Text, Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, MonitorError::File { .. }));
    }
}
