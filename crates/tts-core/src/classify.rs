//! Tiered transformer classification.
//!
//! Transformer type is decided by the first matching rule:
//!
//! 1. **EHV**: MVA > 90, or BIL is 1150/1300 kV
//! 2. **Large**: conservator present and BIL ≥ 750 kV, with MVA ≥ 36 for
//!    autotransformers or MVA ≥ 60 otherwise
//! 3. **Medium**: everything else
//!
//! Winding type and the after-test flag are evaluated independently of the
//! transformer type. Comparisons are exact; nothing is rounded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{TransformerRecord, TtsError, TtsResult};

/// Strictly above this MVA a transformer is EHV.
pub const EHV_MVA_ABOVE: f64 = 90.0;
/// BIL levels (kV) that make a transformer EHV on their own.
pub const EHV_BIL_LEVELS: [f64; 2] = [1150.0, 1300.0];
pub const LARGE_AUTO_MVA_MIN: f64 = 36.0;
pub const LARGE_OTHER_MVA_MIN: f64 = 60.0;
pub const LARGE_BIL_MIN: f64 = 750.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransformerType {
    Medium,
    Large,
    #[serde(rename = "EHV")]
    Ehv,
}

impl TransformerType {
    pub const ALL: [TransformerType; 3] = [
        TransformerType::Medium,
        TransformerType::Large,
        TransformerType::Ehv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransformerType::Medium => "Medium",
            TransformerType::Large => "Large",
            TransformerType::Ehv => "EHV",
        }
    }
}

impl fmt::Display for TransformerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindingType {
    #[serde(rename = "Two-Winding")]
    TwoWinding,
    #[serde(rename = "Three-Winding")]
    ThreeWinding,
}

impl WindingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindingType::TwoWinding => "Two-Winding",
            WindingType::ThreeWinding => "Three-Winding",
        }
    }
}

impl fmt::Display for WindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which transformer-type rule fired; kept on the result for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMatch {
    EhvMva,
    EhvBil,
    LargeAuto,
    LargeOther,
    Medium,
}

impl RuleMatch {
    pub fn describe(&self) -> &'static str {
        match self {
            RuleMatch::EhvMva => "MVA > 90",
            RuleMatch::EhvBil => "BIL in {1150, 1300}",
            RuleMatch::LargeAuto => "auto, conservator, MVA >= 36, BIL >= 750",
            RuleMatch::LargeOther => "conservator, MVA >= 60, BIL >= 750",
            RuleMatch::Medium => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub transformer_type: TransformerType,
    pub winding_type: WindingType,
    pub after_test_required: bool,
    pub rule: RuleMatch,
}

/// How conservator presence interacts with the EHV rule.
///
/// Large always requires a conservator; only the EHV side varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConservatorPolicy {
    /// EHV is decided by MVA and BIL alone.
    #[default]
    Ignore,
    /// EHV additionally requires that no conservator is fitted.
    ExcludeEhv,
}

impl ConservatorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConservatorPolicy::Ignore => "ignore",
            ConservatorPolicy::ExcludeEhv => "exclude-ehv",
        }
    }
}

impl FromStr for ConservatorPolicy {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(ConservatorPolicy::Ignore),
            "exclude-ehv" | "exclude_ehv" => Ok(ConservatorPolicy::ExcludeEhv),
            other => Err(TtsError::Config(format!(
                "unknown conservator policy '{}' (expected 'ignore' or 'exclude-ehv')",
                other
            ))),
        }
    }
}

impl fmt::Display for ConservatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule engine parameterized by the conservator policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationEngine {
    pub policy: ConservatorPolicy,
}

impl ClassificationEngine {
    pub fn new(policy: ConservatorPolicy) -> Self {
        Self { policy }
    }

    /// Classify one record.
    ///
    /// Fails only with [`TtsError::Validation`] when MVA or BIL is missing
    /// or invalid; every well-formed record maps to exactly one result.
    pub fn classify(&self, record: &TransformerRecord) -> TtsResult<ClassificationResult> {
        let (mva, bil) = record.ratings()?;
        let (transformer_type, rule) = self.transformer_type(
            mva.value(),
            bil.value(),
            record.is_auto,
            record.has_conservator,
        );
        let winding_type = if record.winding_config && !record.is_auto {
            WindingType::ThreeWinding
        } else {
            WindingType::TwoWinding
        };

        debug!(
            id = %record.id,
            transformer_type = %transformer_type,
            winding_type = %winding_type,
            rule = rule.describe(),
            "classified transformer"
        );

        Ok(ClassificationResult {
            transformer_type,
            winding_type,
            after_test_required: record.all_tests,
            rule,
        })
    }

    fn transformer_type(
        &self,
        mva: f64,
        bil: f64,
        is_auto: bool,
        has_conservator: bool,
    ) -> (TransformerType, RuleMatch) {
        let ehv_eligible = match self.policy {
            ConservatorPolicy::Ignore => true,
            ConservatorPolicy::ExcludeEhv => !has_conservator,
        };
        if ehv_eligible {
            if mva > EHV_MVA_ABOVE {
                return (TransformerType::Ehv, RuleMatch::EhvMva);
            }
            if EHV_BIL_LEVELS.contains(&bil) {
                return (TransformerType::Ehv, RuleMatch::EhvBil);
            }
        }

        if has_conservator && bil >= LARGE_BIL_MIN {
            if is_auto && mva >= LARGE_AUTO_MVA_MIN {
                return (TransformerType::Large, RuleMatch::LargeAuto);
            }
            if !is_auto && mva >= LARGE_OTHER_MVA_MIN {
                return (TransformerType::Large, RuleMatch::LargeOther);
            }
        }

        (TransformerType::Medium, RuleMatch::Medium)
    }
}

/// Classify with the default [`ConservatorPolicy::Ignore`] policy.
pub fn classify(record: &TransformerRecord) -> TtsResult<ClassificationResult> {
    ClassificationEngine::default().classify(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mva: f64, bil: f64) -> TransformerRecord {
        TransformerRecord::new("T", mva, bil)
    }

    #[test]
    fn test_ehv_by_mva() {
        let result = classify(&record(95.0, 900.0)).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Ehv);
        assert_eq!(result.rule, RuleMatch::EhvMva);
        assert_eq!(result.winding_type, WindingType::TwoWinding);
        assert!(!result.after_test_required);
    }

    #[test]
    fn test_mva_boundary_is_strict() {
        let result = classify(&record(90.0, 900.0)).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Medium);

        let result = classify(&record(90.0, 900.0).with_conservator(true)).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Large);
    }

    #[test]
    fn test_ehv_by_bil() {
        for bil in [1150.0, 1300.0] {
            let result = classify(&record(10.0, bil)).unwrap();
            assert_eq!(result.transformer_type, TransformerType::Ehv);
            assert_eq!(result.rule, RuleMatch::EhvBil);
        }
        // Close but not a listed level
        let result = classify(&record(10.0, 1150.5)).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Medium);
    }

    #[test]
    fn test_large_auto_boundaries_inclusive() {
        let base = record(36.0, 750.0).with_auto(true).with_conservator(true);
        let result = classify(&base).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Large);
        assert_eq!(result.rule, RuleMatch::LargeAuto);

        let below = record(35.9, 750.0).with_auto(true).with_conservator(true);
        assert_eq!(
            classify(&below).unwrap().transformer_type,
            TransformerType::Medium
        );

        let low_bil = record(40.0, 749.0).with_auto(true).with_conservator(true);
        assert_eq!(
            classify(&low_bil).unwrap().transformer_type,
            TransformerType::Medium
        );
    }

    #[test]
    fn test_large_other_requires_sixty() {
        let at_threshold = record(60.0, 750.0).with_conservator(true);
        let result = classify(&at_threshold).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Large);
        assert_eq!(result.rule, RuleMatch::LargeOther);

        let auto_threshold_only = record(40.0, 750.0).with_conservator(true);
        assert_eq!(
            classify(&auto_threshold_only).unwrap().transformer_type,
            TransformerType::Medium
        );
    }

    #[test]
    fn test_large_requires_conservator() {
        let result = classify(&record(70.0, 900.0)).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Medium);
        assert_eq!(result.rule, RuleMatch::Medium);
    }

    #[test]
    fn test_conservator_irrelevant_to_ehv_by_default() {
        let result = classify(&record(120.0, 900.0).with_conservator(true)).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Ehv);
    }

    #[test]
    fn test_exclude_ehv_policy() {
        let engine = ClassificationEngine::new(ConservatorPolicy::ExcludeEhv);

        let with_conservator = record(120.0, 900.0).with_conservator(true);
        let result = engine.classify(&with_conservator).unwrap();
        assert_eq!(result.transformer_type, TransformerType::Large);

        let without = record(120.0, 900.0);
        assert_eq!(
            engine.classify(&without).unwrap().transformer_type,
            TransformerType::Ehv
        );

        let high_bil_small = record(20.0, 1300.0).with_conservator(true);
        assert_eq!(
            engine.classify(&high_bil_small).unwrap().transformer_type,
            TransformerType::Medium
        );
    }

    #[test]
    fn test_winding_type_rules() {
        let three = record(30.0, 500.0).with_winding_config(true);
        assert_eq!(
            classify(&three).unwrap().winding_type,
            WindingType::ThreeWinding
        );

        let auto = record(30.0, 500.0).with_winding_config(true).with_auto(true);
        assert_eq!(classify(&auto).unwrap().winding_type, WindingType::TwoWinding);

        let none = record(30.0, 500.0);
        assert_eq!(classify(&none).unwrap().winding_type, WindingType::TwoWinding);
    }

    #[test]
    fn test_after_test_pass_through() {
        let result = classify(&record(200.0, 1300.0).with_all_tests(true)).unwrap();
        assert!(result.after_test_required);
        let result = classify(&record(1.0, 100.0)).unwrap();
        assert!(!result.after_test_required);
    }

    #[test]
    fn test_missing_rating_fails_validation() {
        let mut rec = record(30.0, 500.0);
        rec.bil = None;
        assert!(matches!(classify(&rec), Err(TtsError::Validation(_))));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "ignore".parse::<ConservatorPolicy>().unwrap(),
            ConservatorPolicy::Ignore
        );
        assert_eq!(
            "Exclude-EHV".parse::<ConservatorPolicy>().unwrap(),
            ConservatorPolicy::ExcludeEhv
        );
        assert!(matches!(
            "sometimes".parse::<ConservatorPolicy>(),
            Err(TtsError::Config(_))
        ));
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&TransformerType::Ehv).unwrap();
        assert_eq!(json, "\"EHV\"");
        let json = serde_json::to_string(&WindingType::ThreeWinding).unwrap();
        assert_eq!(json, "\"Three-Winding\"");
        let json = serde_json::to_string(&ConservatorPolicy::ExcludeEhv).unwrap();
        assert_eq!(json, "\"exclude-ehv\"");
    }
}
