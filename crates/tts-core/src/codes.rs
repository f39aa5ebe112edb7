//! Parameter-code selection tables.
//!
//! Each test category picks one parameter code from a small declarative
//! table keyed on the flags it depends on. The tables are exhaustive over
//! their keys, so every selector resolves to exactly one code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ClassificationResult, TransformerRecord, TransformerType, WindingType};

/// Nameplate marker that selects the dedicated bushing code.
pub const NAMEPLATE_MARKER: &str = "NP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestCategory {
    #[serde(rename = "Cap/DF")]
    CapDf,
    #[serde(rename = "Core Loss")]
    CoreLoss,
    Bushing,
}

impl TestCategory {
    pub const ALL: [TestCategory; 3] = [
        TestCategory::CapDf,
        TestCategory::CoreLoss,
        TestCategory::Bushing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::CapDf => "Cap/DF",
            TestCategory::CoreLoss => "Core Loss",
            TestCategory::Bushing => "Bushing",
        }
    }

    /// The code this category uses for `selector`.
    pub fn select_code(self, selector: &CodeSelector) -> Option<ParamCode> {
        let code = match self {
            TestCategory::CapDf => CAP_DF_CODES
                .iter()
                .find(|(winding, after_test, _)| {
                    *winding == selector.winding_type && *after_test == selector.after_test_required
                })
                .map(|(_, _, code)| *code),
            TestCategory::CoreLoss => CORE_LOSS_CODES
                .iter()
                .find(|(before_impulse, series_parallel, _)| {
                    *before_impulse == selector.before_impulse
                        && *series_parallel == selector.series_parallel
                })
                .map(|(_, _, code)| *code),
            TestCategory::Bushing => BUSHING_CODES
                .iter()
                .find(|(nameplate, winding, _)| {
                    *nameplate == selector.nameplate_marked
                        && winding.map_or(true, |w| w == selector.winding_type)
                })
                .map(|(_, _, code)| *code),
        };
        code.map(ParamCode)
    }

    /// Every code the category can ever select.
    pub fn selectable_codes(self) -> Vec<ParamCode> {
        let codes: Vec<u16> = match self {
            TestCategory::CapDf => CAP_DF_CODES.iter().map(|row| row.2).collect(),
            TestCategory::CoreLoss => CORE_LOSS_CODES.iter().map(|row| row.2).collect(),
            TestCategory::Bushing => BUSHING_CODES.iter().map(|row| row.2).collect(),
        };
        codes.into_iter().map(ParamCode).collect()
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// (winding type, after test required) -> code
const CAP_DF_CODES: [(WindingType, bool, u16); 4] = [
    (WindingType::TwoWinding, false, 42),
    (WindingType::TwoWinding, true, 44),
    (WindingType::ThreeWinding, false, 43),
    (WindingType::ThreeWinding, true, 45),
];

// (before impulse, series/parallel) -> code
const CORE_LOSS_CODES: [(bool, bool, u16); 4] = [
    (false, false, 95),
    (false, true, 97),
    (true, false, 96),
    (true, true, 98),
];

// (nameplate marked "NP", winding type or any) -> code
const BUSHING_CODES: [(bool, Option<WindingType>, u16); 3] = [
    (true, None, 50),
    (false, Some(WindingType::TwoWinding), 51),
    (false, Some(WindingType::ThreeWinding), 52),
];

/// Schedule metric stored per category in the parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Cycle Time")]
    CycleTime,
    #[serde(rename = "Labor Hours")]
    LaborHours,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::CycleTime, Metric::LaborHours];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::CycleTime => "Cycle Time",
            Metric::LaborHours => "Labor Hours",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter-table category key, e.g. `"Medium Power(Cycle Time)"`.
pub fn category_key(transformer_type: TransformerType, metric: Metric) -> String {
    format!("{} Power({})", transformer_type, metric)
}

/// Small integer key into a parameter-table category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamCode(u16);

impl ParamCode {
    #[inline]
    pub fn new(value: u16) -> Self {
        ParamCode(value)
    }
    #[inline]
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ParamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The flags that drive code selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSelector {
    pub winding_type: WindingType,
    pub after_test_required: bool,
    pub series_parallel: bool,
    pub before_impulse: bool,
    /// Nameplate marker is exactly "NP" (after trimming)
    pub nameplate_marked: bool,
}

impl CodeSelector {
    pub fn new(classification: &ClassificationResult, record: &TransformerRecord) -> Self {
        Self {
            winding_type: classification.winding_type,
            after_test_required: classification.after_test_required,
            series_parallel: record.series_parallel,
            before_impulse: record.before_impulse,
            nameplate_marked: record.nameplate.trim() == NAMEPLATE_MARKER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(winding_type: WindingType) -> CodeSelector {
        CodeSelector {
            winding_type,
            after_test_required: false,
            series_parallel: false,
            before_impulse: false,
            nameplate_marked: false,
        }
    }

    fn code(category: TestCategory, sel: &CodeSelector) -> u16 {
        category.select_code(sel).unwrap().value()
    }

    #[test]
    fn test_cap_df_codes() {
        let mut sel = selector(WindingType::TwoWinding);
        assert_eq!(code(TestCategory::CapDf, &sel), 42);
        sel.after_test_required = true;
        assert_eq!(code(TestCategory::CapDf, &sel), 44);
        sel.winding_type = WindingType::ThreeWinding;
        assert_eq!(code(TestCategory::CapDf, &sel), 45);
        sel.after_test_required = false;
        assert_eq!(code(TestCategory::CapDf, &sel), 43);
    }

    #[test]
    fn test_core_loss_codes() {
        let mut sel = selector(WindingType::TwoWinding);
        assert_eq!(code(TestCategory::CoreLoss, &sel), 95);
        sel.series_parallel = true;
        assert_eq!(code(TestCategory::CoreLoss, &sel), 97);
        sel.before_impulse = true;
        assert_eq!(code(TestCategory::CoreLoss, &sel), 98);
        sel.series_parallel = false;
        assert_eq!(code(TestCategory::CoreLoss, &sel), 96);
    }

    #[test]
    fn test_bushing_codes() {
        let mut sel = selector(WindingType::TwoWinding);
        assert_eq!(code(TestCategory::Bushing, &sel), 51);
        sel.winding_type = WindingType::ThreeWinding;
        assert_eq!(code(TestCategory::Bushing, &sel), 52);
        sel.nameplate_marked = true;
        assert_eq!(code(TestCategory::Bushing, &sel), 50);
        sel.winding_type = WindingType::TwoWinding;
        assert_eq!(code(TestCategory::Bushing, &sel), 50);
    }

    #[test]
    fn test_every_selector_resolves() {
        for winding_type in [WindingType::TwoWinding, WindingType::ThreeWinding] {
            for mask in 0..16u8 {
                let sel = CodeSelector {
                    winding_type,
                    after_test_required: mask & 1 != 0,
                    series_parallel: mask & 2 != 0,
                    before_impulse: mask & 4 != 0,
                    nameplate_marked: mask & 8 != 0,
                };
                for category in TestCategory::ALL {
                    assert!(category.select_code(&sel).is_some(), "{category} {sel:?}");
                }
            }
        }
    }

    #[test]
    fn test_nameplate_marker_is_exact() {
        let classification = ClassificationResult {
            transformer_type: TransformerType::Medium,
            winding_type: WindingType::TwoWinding,
            after_test_required: false,
            rule: crate::RuleMatch::Medium,
        };
        let record = TransformerRecord::new("T", 10.0, 200.0).with_nameplate(" NP ");
        assert!(CodeSelector::new(&classification, &record).nameplate_marked);

        let record = TransformerRecord::new("T", 10.0, 200.0).with_nameplate("np");
        assert!(!CodeSelector::new(&classification, &record).nameplate_marked);
    }

    #[test]
    fn test_category_key() {
        assert_eq!(
            category_key(TransformerType::Medium, Metric::CycleTime),
            "Medium Power(Cycle Time)"
        );
        assert_eq!(
            category_key(TransformerType::Ehv, Metric::LaborHours),
            "EHV Power(Labor Hours)"
        );
    }

    #[test]
    fn test_selectable_codes() {
        let codes: Vec<u16> = TestCategory::Bushing
            .selectable_codes()
            .iter()
            .map(ParamCode::value)
            .collect();
        assert_eq!(codes, vec![50, 51, 52]);
    }
}
