//! JSON parameter-table loading.
//!
//! ```json
//! {
//!   "Medium Power(Cycle Time)": {"42": 10, "43": 12.5},
//!   "Medium Power(Labor Hours)": {"42": 5, "43": null}
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use tts_core::{ParameterTable, TableSource, TtsError, TtsResult};

/// Load and parse a parameter table file.
pub fn load_parameter_table(path: impl AsRef<Path>) -> Result<ParameterTable> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading parameter table '{}'", path.display()))?;
    let table = ParameterTable::from_json_str(&data)
        .with_context(|| format!("parsing parameter table '{}'", path.display()))?;
    info!(
        path = %path.display(),
        categories = table.len(),
        "loaded parameter table"
    );
    Ok(table)
}

/// [`TableSource`] reading a JSON file each time it is asked to load.
#[derive(Debug, Clone)]
pub struct JsonTableSource {
    path: PathBuf,
}

impl JsonTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for JsonTableSource {
    fn load_parameter_table(&self) -> TtsResult<ParameterTable> {
        let data = fs::read_to_string(&self.path)?;
        ParameterTable::from_json_str(&data).map_err(|err| {
            TtsError::Parse(format!(
                "parameter table '{}': {}",
                self.path.display(),
                err
            ))
        })
    }
}
