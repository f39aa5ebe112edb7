use serde::{Deserialize, Serialize};
use tts_core::{Assessment, TransformerRecord};
use tts_io::RecordFile;

/// One transformer queued for classification.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub job_id: String,
    /// Line in the source file, when the job came from one
    pub line: Option<usize>,
    pub record: TransformerRecord,
}

/// Outcome of one job as written to the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJobRecord {
    pub job_id: String,
    pub line: Option<usize>,
    pub status: String,
    pub error: Option<String>,
    pub assessment: Option<Assessment>,
}

impl BatchJobRecord {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

pub fn jobs_from_file(file: &RecordFile) -> Vec<BatchJob> {
    file.rows
        .iter()
        .map(|row| BatchJob {
            job_id: row.record.id.clone(),
            line: Some(row.line),
            record: row.record.clone(),
        })
        .collect()
}
