//! Sparse parameter table.
//!
//! Maps a category key such as `"Large Power(Cycle Time)"` to a map of
//! parameter code (as a string) to value. Absent keys and JSON `null`
//! values both read back as [`Estimate::Unavailable`], never as zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codes::{category_key, Metric, ParamCode};
use crate::estimate::Estimate;
use crate::{TransformerType, TtsResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterTable {
    categories: BTreeMap<String, BTreeMap<String, Option<f64>>>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the nested JSON object form.
    ///
    /// ```
    /// use tts_core::{Estimate, Metric, ParamCode, ParameterTable, TransformerType};
    ///
    /// let table = ParameterTable::from_json_str(
    ///     r#"{"Medium Power(Cycle Time)": {"42": 10, "43": null}}"#,
    /// ).unwrap();
    /// let cycle = table.lookup(TransformerType::Medium, Metric::CycleTime, ParamCode::new(42));
    /// assert_eq!(cycle, Estimate::Value(10.0));
    /// let gap = table.lookup(TransformerType::Medium, Metric::CycleTime, ParamCode::new(43));
    /// assert_eq!(gap, Estimate::Unavailable);
    /// ```
    pub fn from_json_str(data: &str) -> TtsResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn insert(&mut self, category: impl Into<String>, code: impl Into<String>, value: f64) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(code.into(), Some(value));
    }

    /// One table access for a (transformer type, metric, code) triple.
    pub fn lookup(
        &self,
        transformer_type: TransformerType,
        metric: Metric,
        code: ParamCode,
    ) -> Estimate {
        let key = category_key(transformer_type, metric);
        let value = self
            .categories
            .get(&key)
            .and_then(|codes| codes.get(&code.to_string()))
            .copied()
            .flatten();
        Estimate::from_option(value)
    }

    /// True when the category holds a non-null value for `code`.
    pub fn contains(&self, category: &str, code: ParamCode) -> bool {
        self.categories
            .get(category)
            .and_then(|codes| codes.get(&code.to_string()))
            .is_some_and(Option::is_some)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_present_and_missing() {
        let mut table = ParameterTable::new();
        table.insert("Large Power(Cycle Time)", "42", 18.5);

        assert_eq!(
            table.lookup(TransformerType::Large, Metric::CycleTime, ParamCode::new(42)),
            Estimate::Value(18.5)
        );
        assert_eq!(
            table.lookup(TransformerType::Large, Metric::CycleTime, ParamCode::new(44)),
            Estimate::Unavailable
        );
        assert_eq!(
            table.lookup(TransformerType::Large, Metric::LaborHours, ParamCode::new(42)),
            Estimate::Unavailable
        );
        assert_eq!(
            table.lookup(TransformerType::Ehv, Metric::CycleTime, ParamCode::new(42)),
            Estimate::Unavailable
        );
    }

    #[test]
    fn test_zero_is_a_value() {
        let mut table = ParameterTable::new();
        table.insert("Medium Power(Labor Hours)", "95", 0.0);
        assert_eq!(
            table.lookup(TransformerType::Medium, Metric::LaborHours, ParamCode::new(95)),
            Estimate::Value(0.0)
        );
    }

    #[test]
    fn test_json_round_trip_keeps_nulls() {
        let json = r#"{"EHV Power(Cycle Time)":{"50":4.0,"51":null}}"#;
        let table = ParameterTable::from_json_str(json).unwrap();
        assert!(table.contains("EHV Power(Cycle Time)", ParamCode::new(50)));
        assert!(!table.contains("EHV Power(Cycle Time)", ParamCode::new(51)));
        assert_eq!(table.len(), 1);

        let out = serde_json::to_string(&table).unwrap();
        assert_eq!(out, json);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ParameterTable::from_json_str(r#"{"Medium Power(Cycle Time)": 3}"#).unwrap_err();
        assert!(matches!(err, crate::TtsError::Parse(_)));
    }
}
