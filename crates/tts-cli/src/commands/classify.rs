use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tabwriter::TabWriter;
use tracing::info;
use tts_cli::OutputFormat;
use tts_core::{
    Assessment, ClassificationEngine, ConservatorPolicy, RecordSource, TableSource, TotalEstimate,
};
use tts_io::{CsvRecordSource, JsonTableSource};

use crate::commands::util::print_json;

pub fn handle(
    id: &str,
    records: &Path,
    table: &Path,
    policy: ConservatorPolicy,
    format: OutputFormat,
) -> Result<()> {
    let source = CsvRecordSource::open(records)?;
    let table = JsonTableSource::new(table).load_parameter_table()?;
    let record = source.lookup_record(id)?;
    info!(id = %record.id, %policy, "classifying transformer");

    let assessment = ClassificationEngine::new(policy).assess(&record, &table)?;
    match format {
        OutputFormat::Json => print_json(&assessment),
        OutputFormat::Table => print_assessment(&assessment),
    }
}

fn print_assessment(assessment: &Assessment) -> Result<()> {
    let classification = &assessment.classification;
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "Transformer\t{}", assessment.id)?;
    writeln!(
        writer,
        "Type\t{} ({})",
        classification.transformer_type,
        classification.rule.describe()
    )?;
    writeln!(writer, "Winding\t{}", classification.winding_type)?;
    writeln!(
        writer,
        "After test\t{}",
        if classification.after_test_required { "yes" } else { "no" }
    )?;
    writeln!(writer)?;
    writeln!(writer, "CATEGORY\tCODE\tCYCLE TIME\tLABOR HOURS")?;
    for category in &assessment.categories {
        let code = category
            .code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            category.category, code, category.schedule.cycle_time, category.schedule.labor_hours
        )?;
    }
    match assessment.total {
        TotalEstimate::Complete {
            cycle_time,
            labor_hours,
        } => writeln!(writer, "TOTAL\t\t{}\t{}", cycle_time, labor_hours)?,
        TotalEstimate::Unavailable => writeln!(writer, "TOTAL\t\tunavailable\tunavailable")?,
    }
    writer.flush()?;
    Ok(())
}
