pub mod evaluate;
pub mod job;
pub mod manifest;
pub mod runner;

pub use evaluate::{evaluate_rows, winding_from_label, EvaluationReport, RowOutcome};
pub use job::{jobs_from_file, BatchJob, BatchJobRecord};
pub use manifest::{load_batch_manifest, write_batch_manifest, BatchManifest};
pub use runner::{run_batch, BatchRunnerConfig, BatchSummary};
