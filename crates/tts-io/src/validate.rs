//! Dataset checks for record files and parameter tables.
//!
//! Nothing here changes how records are classified; it reports data that
//! would fail classification or produce unavailable estimates.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tracing::info;
use tts_core::{
    category_key, DiagnosticIssue, Diagnostics, Metric, ParameterTable, Severity, TestCategory,
    TransformerType,
};

use crate::records::{read_record_file, RecordFile};
use crate::table::load_parameter_table;

/// Rating problems in loaded rows.
///
/// Missing or negative MVA/BIL is an error (classification will refuse the
/// record). A BIL outside the standard levels is only a warning.
pub fn validate_records(file: &RecordFile) -> Diagnostics {
    let mut diag = Diagnostics::new();
    for row in &file.rows {
        let record = &row.record;
        if let Err(err) = record.ratings() {
            diag.add(
                DiagnosticIssue::new(Severity::Error, "validation", err.to_string())
                    .with_entity(record.id.as_str())
                    .with_line(row.line),
            );
            continue;
        }
        if let Some(bil) = record.bil {
            if !bil.is_standard_bil() {
                diag.add(
                    DiagnosticIssue::new(
                        Severity::Warning,
                        "validation",
                        format!("BIL {} is not a standard insulation level", bil),
                    )
                    .with_entity(record.id.as_str())
                    .with_line(row.line),
                );
            }
        }
    }
    diag
}

/// Coverage of the parameter table against every code the selection
/// tables can produce.
pub fn validate_table(table: &ParameterTable) -> Diagnostics {
    let mut diag = Diagnostics::new();
    let mut expected = HashSet::new();

    for transformer_type in TransformerType::ALL {
        for metric in Metric::ALL {
            let key = category_key(transformer_type, metric);
            let missing_codes: Vec<_> = TestCategory::ALL
                .iter()
                .flat_map(|category| category.selectable_codes())
                .filter(|code| !table.contains(&key, *code))
                .collect();
            if !table.category_names().any(|name| name == key) {
                diag.add_warning_with_entity("coverage", "category is missing", &key);
            } else if !missing_codes.is_empty() {
                let missing: Vec<String> = missing_codes.iter().map(|c| c.to_string()).collect();
                diag.add_warning_with_entity(
                    "coverage",
                    &format!("no value for codes {}", missing.join(", ")),
                    &key,
                );
            }
            expected.insert(key);
        }
    }

    for name in table.category_names() {
        if !expected.contains(name) {
            diag.add_warning_with_entity("coverage", "unrecognized category", name);
        }
    }
    diag
}

/// Load a record file and, optionally, a parameter table and run every
/// check. Load-time diagnostics are included.
pub fn validate_dataset(records: &Path, table: Option<&Path>) -> Result<Diagnostics> {
    let file = read_record_file(records)?;
    let mut diag = file.diagnostics.clone();
    diag.merge(validate_records(&file));

    if let Some(table_path) = table {
        let table = load_parameter_table(table_path)?;
        diag.merge(validate_table(&table));
    }

    info!(
        records = %records.display(),
        "validation finished: {}",
        diag.summary()
    );
    Ok(diag)
}
