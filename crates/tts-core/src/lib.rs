//! # tts-core: Transformer Test Scheduling Core
//!
//! Deterministic classification of power transformers and the test-schedule
//! estimates derived from that classification.
//!
//! ## Pipeline
//!
//! ```text
//! TransformerRecord ─► ClassificationEngine ─► ClassificationResult
//!                                                   │
//!                      ParameterTable ─► resolve ◄──┘
//!                                           │
//!                          per-category ScheduleEstimate ─► aggregate ─► TotalEstimate
//! ```
//!
//! Every stage is a pure function of its inputs. The [`ParameterTable`] is
//! loaded once and shared read-only; nothing here performs I/O.
//!
//! ## Quick Start
//!
//! ```
//! use tts_core::*;
//!
//! let record = TransformerRecord::new("T-1001", 30.0, 500.0).with_winding_config(true);
//!
//! let mut table = ParameterTable::new();
//! table.insert("Medium Power(Cycle Time)", "43", 12.0);
//! table.insert("Medium Power(Labor Hours)", "43", 6.0);
//!
//! let assessment = classify_and_estimate(&record, &table).unwrap();
//! assert_eq!(assessment.classification.transformer_type, TransformerType::Medium);
//! assert_eq!(assessment.classification.winding_type, WindingType::ThreeWinding);
//! assert_eq!(assessment.total, TotalEstimate::Unavailable);
//! ```
//!
//! ## Modules
//!
//! - [`classify`] - tiered transformer-type rules, winding type, after-test flag
//! - [`codes`] - declarative parameter-code selection tables
//! - [`table`] - sparse `(category, code) -> value` parameter table
//! - [`resolve`] - code selection plus one table lookup per category and metric
//! - [`estimate`] - typed "unavailable" values and the all-or-nothing aggregator
//! - [`source`] - collaborator traits for record and table backends

use serde::{Deserialize, Serialize};

pub mod classify;
pub mod codes;
pub mod diagnostics;
pub mod error;
pub mod estimate;
pub mod pipeline;
pub mod resolve;
pub mod source;
pub mod table;
pub mod units;

pub use classify::{
    classify, ClassificationEngine, ClassificationResult, ConservatorPolicy, RuleMatch,
    TransformerType, WindingType,
};
pub use codes::{category_key, CodeSelector, Metric, ParamCode, TestCategory};
pub use diagnostics::{DiagnosticIssue, Diagnostics, LoadStats, Severity};
pub use error::{TtsError, TtsResult};
pub use estimate::{aggregate, Estimate, ScheduleEstimate, TotalEstimate};
pub use pipeline::{classify_and_estimate, Assessment};
pub use resolve::{resolve, CategoryEstimate};
pub use source::{InMemoryRecords, RecordSource, TableSource};
pub use table::ParameterTable;
pub use units::{Kilovolts, MegavoltAmperes};

/// Normalized attributes of one transformer.
///
/// MVA and BIL are optional so that a source row with an empty cell can be
/// represented faithfully; the classifier rejects such records with
/// [`TtsError::Validation`] instead of reading the gap as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformerRecord {
    pub id: String,
    pub mva: Option<MegavoltAmperes>,
    pub bil: Option<Kilovolts>,
    pub is_auto: bool,
    pub has_conservator: bool,
    /// TV or YV winding connection present
    pub winding_config: bool,
    /// Test codes contain the "ALL TESTS" marker
    pub all_tests: bool,
    pub series_parallel: bool,
    pub before_impulse: bool,
    /// Nameplate marker, e.g. "NP"
    pub nameplate: String,
    pub on_cover: String,
}

impl TransformerRecord {
    /// Record with both ratings present and every flag cleared.
    pub fn new(id: impl Into<String>, mva: f64, bil: f64) -> Self {
        Self {
            id: id.into(),
            mva: Some(MegavoltAmperes(mva)),
            bil: Some(Kilovolts(bil)),
            ..Self::default()
        }
    }

    pub fn with_auto(mut self, is_auto: bool) -> Self {
        self.is_auto = is_auto;
        self
    }

    pub fn with_conservator(mut self, has_conservator: bool) -> Self {
        self.has_conservator = has_conservator;
        self
    }

    pub fn with_winding_config(mut self, present: bool) -> Self {
        self.winding_config = present;
        self
    }

    pub fn with_all_tests(mut self, present: bool) -> Self {
        self.all_tests = present;
        self
    }

    pub fn with_series_parallel(mut self, series_parallel: bool) -> Self {
        self.series_parallel = series_parallel;
        self
    }

    pub fn with_before_impulse(mut self, before_impulse: bool) -> Self {
        self.before_impulse = before_impulse;
        self
    }

    pub fn with_nameplate(mut self, marker: impl Into<String>) -> Self {
        self.nameplate = marker.into();
        self
    }

    pub fn with_on_cover(mut self, value: impl Into<String>) -> Self {
        self.on_cover = value.into();
        self
    }

    /// Both ratings, or a validation error naming the first one that is
    /// missing, negative or not finite.
    pub fn ratings(&self) -> TtsResult<(MegavoltAmperes, Kilovolts)> {
        let mva = self
            .mva
            .ok_or_else(|| self.invalid("MVA rating is missing"))?;
        if !mva.is_valid_rating() {
            return Err(self.invalid(&format!("MVA rating {} is not a valid rating", mva.value())));
        }
        let bil = self
            .bil
            .ok_or_else(|| self.invalid("BIL rating is missing"))?;
        if !bil.is_valid_rating() {
            return Err(self.invalid(&format!("BIL rating {} is not a valid rating", bil.value())));
        }
        Ok((mva, bil))
    }

    fn invalid(&self, message: &str) -> TtsError {
        TtsError::Validation(format!("{} (transformer '{}')", message, self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = TransformerRecord::new("T-1", 40.0, 780.0)
            .with_auto(true)
            .with_conservator(true)
            .with_nameplate("NP")
            .with_on_cover("B");

        assert_eq!(record.id, "T-1");
        assert!(record.is_auto);
        assert!(record.has_conservator);
        assert!(!record.winding_config);
        assert_eq!(record.nameplate, "NP");
        assert_eq!(record.on_cover, "B");
    }

    #[test]
    fn test_ratings_present() {
        let (mva, bil) = TransformerRecord::new("T-1", 95.0, 900.0).ratings().unwrap();
        assert_eq!(mva, MegavoltAmperes(95.0));
        assert_eq!(bil, Kilovolts(900.0));
    }

    #[test]
    fn test_missing_ratings_are_validation_errors() {
        let mut record = TransformerRecord::new("T-2", 95.0, 900.0);
        record.mva = None;
        let err = record.ratings().unwrap_err();
        assert!(matches!(err, TtsError::Validation(_)));
        assert!(err.to_string().contains("MVA rating is missing"));
        assert!(err.to_string().contains("T-2"));

        let mut record = TransformerRecord::new("T-3", 95.0, 900.0);
        record.bil = None;
        let err = record.ratings().unwrap_err();
        assert!(err.to_string().contains("BIL rating is missing"));
    }

    #[test]
    fn test_negative_rating_rejected() {
        let record = TransformerRecord::new("T-4", -1.0, 900.0);
        assert!(matches!(record.ratings(), Err(TtsError::Validation(_))));

        let record = TransformerRecord::new("T-5", 10.0, f64::NAN);
        assert!(matches!(record.ratings(), Err(TtsError::Validation(_))));
    }
}
