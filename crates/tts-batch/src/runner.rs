use crate::job::{BatchJob, BatchJobRecord};
use crate::manifest::{write_batch_manifest, BatchManifest};
use anyhow::{Context, Result};
use chrono::Utc;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tts_core::{ClassificationEngine, ParameterTable};

/// Runner settings for one batch classification pass.
pub struct BatchRunnerConfig {
    pub jobs: Vec<BatchJob>,
    /// Read-only table shared by every worker
    pub table: Arc<ParameterTable>,
    pub engine: ClassificationEngine,
    pub output_root: PathBuf,
    /// Worker count; 0 means one per CPU
    pub threads: usize,
}

/// Summary returned after the run so callers can report counts and the manifest location.
pub struct BatchSummary {
    pub success: usize,
    pub failure: usize,
    pub complete_totals: usize,
    pub manifest_path: PathBuf,
    pub jobs: Vec<BatchJobRecord>,
}

pub fn run_batch(config: &BatchRunnerConfig) -> Result<BatchSummary> {
    fs::create_dir_all(&config.output_root).with_context(|| {
        format!(
            "creating batch output root '{}'",
            config.output_root.display()
        )
    })?;

    let thread_count = if config.threads == 0 {
        num_cpus::get()
    } else {
        config.threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .context("building Rayon thread pool for batch runs")?;

    info!(
        jobs = config.jobs.len(),
        threads = thread_count,
        policy = %config.engine.policy,
        "starting batch classification"
    );

    // par_iter + collect keeps input order
    let job_records: Vec<BatchJobRecord> = pool.install(|| {
        config
            .jobs
            .par_iter()
            .map(|job| run_job(job, &config.engine, &config.table))
            .collect()
    });

    let success = job_records.iter().filter(|record| record.is_ok()).count();
    let failure = job_records.len() - success;
    let complete_totals = job_records
        .iter()
        .filter_map(|record| record.assessment.as_ref())
        .filter(|assessment| assessment.total.is_complete())
        .count();

    let manifest = BatchManifest {
        created_at: Utc::now(),
        policy: config.engine.policy.to_string(),
        num_jobs: job_records.len(),
        success,
        failure,
        complete_totals,
        jobs: job_records.clone(),
    };
    let manifest_path = config.output_root.join("batch_manifest.json");
    write_batch_manifest(&manifest_path, &manifest)?;
    info!(
        success,
        failure,
        manifest = %manifest_path.display(),
        "batch classification finished"
    );

    Ok(BatchSummary {
        success,
        failure,
        complete_totals,
        manifest_path,
        jobs: job_records,
    })
}

fn run_job(job: &BatchJob, engine: &ClassificationEngine, table: &ParameterTable) -> BatchJobRecord {
    let (status, error, assessment) = match engine.assess(&job.record, table) {
        Ok(assessment) => ("ok".to_string(), None, Some(assessment)),
        Err(err) => {
            warn!(job = %job.job_id, "batch job failed: {err}");
            ("error".to_string(), Some(err.to_string()), None)
        }
    };
    BatchJobRecord {
        job_id: job.job_id.clone(),
        line: job.line,
        status,
        error,
        assessment,
    }
}
