use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;
use tts_io::validate_dataset;

pub fn handle(records: &Path, table: Option<&Path>) -> Result<()> {
    info!("Validating records {}", records.display());
    let diagnostics = validate_dataset(records, table)?;
    for issue in &diagnostics.issues {
        println!("{issue}");
    }
    println!("{}", diagnostics.summary());
    if diagnostics.has_errors() {
        bail!(
            "validation found {} error(s) in '{}'",
            diagnostics.error_count(),
            records.display()
        );
    }
    Ok(())
}
