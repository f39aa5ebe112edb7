use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tabwriter::TabWriter;
use tts_batch::{jobs_from_file, run_batch, BatchRunnerConfig, BatchSummary};
use tts_core::{ClassificationEngine, ConservatorPolicy};
use tts_io::{load_parameter_table, read_record_file};

pub fn handle(
    records: &Path,
    table: &Path,
    out: &Path,
    threads: usize,
    policy: ConservatorPolicy,
) -> Result<()> {
    let file = read_record_file(records)?;
    let table = load_parameter_table(table)?;
    let config = BatchRunnerConfig {
        jobs: jobs_from_file(&file),
        table: Arc::new(table),
        engine: ClassificationEngine::new(policy),
        output_root: out.to_path_buf(),
        threads,
    };
    let summary = run_batch(&config)?;
    print_batch_summary(&summary)
}

fn print_batch_summary(summary: &BatchSummary) -> Result<()> {
    println!(
        "Classified {} records: {} ok, {} failed, {} with complete totals",
        summary.jobs.len(),
        summary.success,
        summary.failure,
        summary.complete_totals
    );
    println!("Manifest: {}", summary.manifest_path.display());

    if summary.failure > 0 {
        println!();
        println!("Failed records:");
        let mut writer = TabWriter::new(io::stdout());
        for job in summary.jobs.iter().filter(|j| !j.is_ok()) {
            let line = job
                .line
                .map(|line| line.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                writer,
                "  {}\tline {}\t{}",
                job.job_id,
                line,
                job.error.as_deref().unwrap_or("unknown error")
            )?;
        }
        writer.flush()?;
    }
    Ok(())
}
