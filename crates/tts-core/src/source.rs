//! Collaborator seams for the record store and the parameter-table loader.
//!
//! Backends live in `tts-io`; [`InMemoryRecords`] is the reference
//! implementation and what file-backed sources hold after loading.

use std::collections::HashMap;

use crate::{ParameterTable, TransformerRecord, TtsError, TtsResult};

/// Resolves a transformer identifier to its record.
pub trait RecordSource: Send + Sync {
    /// Returns [`TtsError::NotFound`] when no record has this identifier.
    fn lookup_record(&self, id: &str) -> TtsResult<TransformerRecord>;
}

/// Loads the full parameter table once, at startup.
pub trait TableSource {
    fn load_parameter_table(&self) -> TtsResult<ParameterTable>;
}

/// Records indexed by trimmed identifier, kept in source order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    records: Vec<TransformerRecord>,
    index: HashMap<String, usize>,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. Returns false (and keeps the first record) if the
    /// identifier is already present.
    pub fn push(&mut self, record: TransformerRecord) -> bool {
        let key = record.id.trim().to_string();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.records.len());
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[TransformerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<TransformerRecord> for InMemoryRecords {
    fn from_iter<I: IntoIterator<Item = TransformerRecord>>(iter: I) -> Self {
        let mut records = InMemoryRecords::new();
        for record in iter {
            records.push(record);
        }
        records
    }
}

impl RecordSource for InMemoryRecords {
    fn lookup_record(&self, id: &str) -> TtsResult<TransformerRecord> {
        self.index
            .get(id.trim())
            .map(|&idx| self.records[idx].clone())
            .ok_or_else(|| TtsError::not_found(id.trim()))
    }
}

impl TableSource for ParameterTable {
    fn load_parameter_table(&self) -> TtsResult<ParameterTable> {
        Ok(self.clone())
    }
}
