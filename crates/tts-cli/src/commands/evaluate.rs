use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tabwriter::TabWriter;
use tts_batch::{evaluate_rows, EvaluationReport};
use tts_cli::OutputFormat;
use tts_core::{ClassificationEngine, ConservatorPolicy};
use tts_io::read_record_file;

use crate::commands::util::print_json;

pub fn handle(records: &Path, policy: ConservatorPolicy, format: OutputFormat) -> Result<()> {
    let file = read_record_file(records)?;
    let report = evaluate_rows(&file.rows, &ClassificationEngine::new(policy));
    match format {
        OutputFormat::Json => print_json(&json!({
            "accuracy": report.accuracy(),
            "report": report,
        })),
        OutputFormat::Table => print_report(&report),
    }
}

fn print_report(report: &EvaluationReport) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    if report.mismatches().next().is_some() {
        writeln!(writer, "ID\tLINE\tEXPECTED\tPREDICTED")?;
        for row in report.mismatches() {
            let expected = format!(
                "{} / {}",
                row.expected_type.as_deref().unwrap_or("-"),
                row.expected_winding.as_deref().unwrap_or("-")
            );
            let predicted = row
                .predicted
                .map(|p| format!("{} / {}", p.transformer_type, p.winding_type))
                .unwrap_or_default();
            writeln!(writer, "{}\t{}\t{}\t{}", row.id, row.line, expected, predicted)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "Total evaluated\t{}", report.total)?;
    writeln!(writer, "Correct\t{}", report.correct)?;
    writeln!(writer, "Type correct\t{}", report.type_correct)?;
    writeln!(writer, "Winding correct\t{}", report.winding_correct)?;
    writeln!(writer, "After test correct\t{}", report.after_test_correct)?;
    writeln!(writer, "Skipped\t{}", report.skipped)?;
    writeln!(writer, "Accuracy\t{:.2}%", report.accuracy())?;
    writer.flush()?;
    Ok(())
}
