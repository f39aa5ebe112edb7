//! Diagnostics collected while loading and checking transformer data.
//!
//! Record files and parameter tables are external data; problems in them
//! are collected here instead of aborting the whole load:
//!
//! - Severity levels (Warning, Error)
//! - Categories for grouping issues (parse, validation, coverage, ...)
//! - Optional entity references (e.g., "T-1001", "Large Power(Cycle Time)")
//! - Optional line numbers for file-based operations
//!
//! # Example
//!
//! ```
//! use tts_core::diagnostics::Diagnostics;
//!
//! let mut diag = Diagnostics::new();
//! diag.add_warning_with_entity("coverage", "no value for codes 44", "Large Power(Cycle Time)");
//! diag.add_error_at_line("parse", "row has no transformer identifier", 7);
//!
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.error_count(), 1);
//! ```

use serde::Serialize;

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unusual but the operation continued (e.g., unparseable cell left empty)
    Warning,
    /// The record or table entry cannot be used as-is
    Error,
}

/// A single diagnostic issue
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    /// Category for grouping (e.g., "parse", "validation", "coverage")
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Transformer identifier or table category the issue refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl DiagnosticIssue {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            line: None,
            entity: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(f, "[{}:{}] {}", severity, self.category, self.message)?;

        if let Some(entity) = &self.entity {
            write!(f, " ({})", entity)?;
        }
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }

        Ok(())
    }
}

/// Collection of diagnostic issues for an operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    pub fn add_warning_at_line(&mut self, category: &str, message: &str, line: usize) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_line(line));
    }

    pub fn add_warning_with_entity(&mut self, category: &str, message: &str, entity: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_entity(entity));
    }

    pub fn add_error_at_line(&mut self, category: &str, message: &str, line: usize) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message).with_line(line));
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Merge another diagnostics into this one
    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    pub fn summary(&self) -> String {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match (self.warning_count(), self.error_count()) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => format!("{} warning{}", w, plural(w)),
            (0, e) => format!("{} error{}", e, plural(e)),
            (w, e) => format!("{} warning{}, {} error{}", w, plural(w), e, plural(e)),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

/// Row counters for a record-file load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub rows: usize,
    pub records: usize,
    pub skipped_rows: usize,
    /// Cells that could not be parsed and were left absent
    pub blanked_values: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_counts() {
        let mut diag = Diagnostics::new();
        diag.add_warning_with_entity("coverage", "category is missing", "EHV Power(Cycle Time)");
        diag.add_error_at_line("parse", "row has no transformer identifier", 4);
        diag.add_warning_at_line("header", "duplicate column", 1);

        assert_eq!(diag.warning_count(), 2);
        assert_eq!(diag.error_count(), 1);
        assert!(diag.has_issues());
        assert!(diag.has_errors());
    }

    #[test]
    fn test_diagnostics_serialization() {
        let mut diag = Diagnostics::new();
        diag.add_warning_at_line("parse", "MVA 'abc' is not a number", 12);
        diag.add(
            DiagnosticIssue::new(Severity::Error, "validation", "BIL rating is missing")
                .with_entity("T-77"),
        );

        let json = serde_json::to_string_pretty(&diag).unwrap();
        assert!(json.contains("\"warning\""));
        assert!(json.contains("\"line\": 12"));
        assert!(json.contains("\"entity\": \"T-77\""));
    }

    #[test]
    fn test_diagnostic_issue_display() {
        let issue = DiagnosticIssue::new(Severity::Error, "coverage", "code 44 missing")
            .with_entity("Large Power(Cycle Time)")
            .with_line(3);

        let display = format!("{}", issue);
        assert!(display.starts_with("[error:coverage] code 44 missing"));
        assert!(display.contains("(Large Power(Cycle Time))"));
        assert!(display.ends_with("at line 3"));
    }

    #[test]
    fn test_diagnostics_summary() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.summary(), "No issues");

        diag.add_warning_at_line("parse", "warning", 2);
        assert_eq!(diag.summary(), "1 warning");

        diag.add_error_at_line("parse", "error", 3);
        assert_eq!(diag.summary(), "1 warning, 1 error");

        diag.add_warning_with_entity("coverage", "another warning", "Bushing");
        assert_eq!(diag.summary(), "2 warnings, 1 error");
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut diag = Diagnostics::new();
        diag.add_warning_at_line("parse", "parse warning", 2);

        let mut other = Diagnostics::new();
        other.add_warning_with_entity("coverage", "coverage warning", "Bushing");
        other.add_error_at_line("parse", "parse error", 5);

        diag.merge(other);
        let categories: Vec<_> = diag.issues.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(categories, vec!["parse", "coverage", "parse"]);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.warning_count(), 2);
    }
}
