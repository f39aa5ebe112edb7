//! Parameter resolution: classification plus record flags to per-category
//! schedule estimates.

use serde::{Deserialize, Serialize};

use crate::codes::{CodeSelector, Metric, ParamCode, TestCategory};
use crate::estimate::ScheduleEstimate;
use crate::{ClassificationResult, ParameterTable, TransformerRecord};

/// Selected code and resolved schedule for one test category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryEstimate {
    pub category: TestCategory,
    pub code: Option<ParamCode>,
    pub schedule: ScheduleEstimate,
}

/// Resolve all three test categories, in [`TestCategory::ALL`] order.
///
/// Each (category, metric) pair costs exactly one table lookup. A missing
/// value degrades only that category; there are no fallback codes.
pub fn resolve(
    classification: &ClassificationResult,
    record: &TransformerRecord,
    table: &ParameterTable,
) -> Vec<CategoryEstimate> {
    let selector = CodeSelector::new(classification, record);
    TestCategory::ALL
        .iter()
        .map(|&category| {
            let code = category.select_code(&selector);
            let schedule = match code {
                Some(code) => ScheduleEstimate {
                    cycle_time: table.lookup(
                        classification.transformer_type,
                        Metric::CycleTime,
                        code,
                    ),
                    labor_hours: table.lookup(
                        classification.transformer_type,
                        Metric::LaborHours,
                        code,
                    ),
                },
                None => ScheduleEstimate::unavailable(),
            };
            CategoryEstimate {
                category,
                code,
                schedule,
            }
        })
        .collect()
}
