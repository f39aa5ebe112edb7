//! Compare engine output against labeled exports.
//!
//! Labeled files carry `Transformer Type` and `Winding Type` columns filled in
//! by hand; the test-code column doubles as the after-test label. A row
//! counts as correct when every label it carries agrees with the engine.
//! Rows the engine rejects, or rows without type or winding labels, are
//! skipped.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tts_core::{ClassificationEngine, ClassificationResult, WindingType};
use tts_io::LoadedRow;

/// Winding labels read like `3 Winding` or `2-winding`; any `3` means three windings.
pub fn winding_from_label(label: &str) -> WindingType {
    if label.contains('3') {
        WindingType::ThreeWinding
    } else {
        WindingType::TwoWinding
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowOutcome {
    pub id: String,
    pub line: usize,
    pub expected_type: Option<String>,
    pub expected_winding: Option<String>,
    pub expected_after_test: Option<bool>,
    pub predicted: Option<ClassificationResult>,
    /// `None` when the label is absent or the row was skipped
    pub type_match: Option<bool>,
    pub winding_match: Option<bool>,
    pub after_test_match: Option<bool>,
    pub error: Option<String>,
}

impl RowOutcome {
    pub fn is_skipped(&self) -> bool {
        self.predicted.is_none() || (self.type_match.is_none() && self.winding_match.is_none())
    }

    pub fn is_correct(&self) -> bool {
        !self.is_skipped()
            && self.type_match != Some(false)
            && self.winding_match != Some(false)
            && self.after_test_match != Some(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub rows: Vec<RowOutcome>,
    /// Rows actually compared
    pub total: usize,
    pub correct: usize,
    pub skipped: usize,
    pub type_correct: usize,
    pub winding_correct: usize,
    pub after_test_correct: usize,
}

impl EvaluationReport {
    /// Percentage of compared rows that were fully correct.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &RowOutcome> {
        self.rows
            .iter()
            .filter(|row| !row.is_skipped() && !row.is_correct())
    }
}

fn non_empty(label: &Option<String>) -> Option<&str> {
    label.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn evaluate_row(row: &LoadedRow, engine: &ClassificationEngine) -> RowOutcome {
    let expected_type = non_empty(&row.labels.transformer_type);
    let expected_winding = non_empty(&row.labels.winding_type);
    let mut outcome = RowOutcome {
        id: row.record.id.clone(),
        line: row.line,
        expected_type: expected_type.map(str::to_string),
        expected_winding: expected_winding.map(str::to_string),
        expected_after_test: row.labels.after_test_required,
        predicted: None,
        type_match: None,
        winding_match: None,
        after_test_match: None,
        error: None,
    };

    match engine.classify(&row.record) {
        Ok(result) => {
            outcome.type_match = expected_type
                .map(|label| label.eq_ignore_ascii_case(result.transformer_type.as_str()));
            outcome.winding_match =
                expected_winding.map(|label| winding_from_label(label) == result.winding_type);
            outcome.after_test_match = row
                .labels
                .after_test_required
                .map(|expected| expected == result.after_test_required);
            outcome.predicted = Some(result);
        }
        Err(err) => {
            debug!(id = %row.record.id, "skipping unclassifiable row: {err}");
            outcome.error = Some(err.to_string());
        }
    }
    outcome
}

pub fn evaluate_rows(rows: &[LoadedRow], engine: &ClassificationEngine) -> EvaluationReport {
    let mut report = EvaluationReport::default();
    for row in rows {
        let outcome = evaluate_row(row, engine);
        if outcome.is_skipped() {
            report.skipped += 1;
        } else {
            report.total += 1;
            if outcome.is_correct() {
                report.correct += 1;
            }
            if outcome.type_match == Some(true) {
                report.type_correct += 1;
            }
            if outcome.winding_match == Some(true) {
                report.winding_correct += 1;
            }
            if outcome.after_test_match == Some(true) {
                report.after_test_correct += 1;
            }
        }
        report.rows.push(outcome);
    }
    info!(
        total = report.total,
        correct = report.correct,
        skipped = report.skipped,
        "evaluation finished"
    );
    report
}
