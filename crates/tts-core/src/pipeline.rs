//! The single entry point callers use: classify, resolve, aggregate.

use serde::{Deserialize, Serialize};

use crate::estimate::{aggregate, TotalEstimate};
use crate::resolve::{resolve, CategoryEstimate};
use crate::{ClassificationEngine, ClassificationResult, ParameterTable, TransformerRecord, TtsResult};

/// Everything derived for one transformer in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub classification: ClassificationResult,
    pub categories: Vec<CategoryEstimate>,
    pub total: TotalEstimate,
}

impl ClassificationEngine {
    /// Classify `record`, resolve its three test categories against `table`
    /// and aggregate them.
    pub fn assess(
        &self,
        record: &TransformerRecord,
        table: &ParameterTable,
    ) -> TtsResult<Assessment> {
        let classification = self.classify(record)?;
        let categories = resolve(&classification, record, table);
        let total = aggregate(&categories);
        Ok(Assessment {
            id: record.id.clone(),
            classification,
            categories,
            total,
        })
    }
}

/// [`ClassificationEngine::assess`] with the default conservator policy.
pub fn classify_and_estimate(
    record: &TransformerRecord,
    table: &ParameterTable,
) -> TtsResult<Assessment> {
    ClassificationEngine::default().assess(record, table)
}
