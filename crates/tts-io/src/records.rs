//! Transformer records from CSV exports.
//!
//! Accepts the long column headers of the order database export
//! (`OrderCode`, `Auto(Yes/No)`, `YV/TV Present (...)`, ...) as well as
//! short snake-case headers. Unknown columns are ignored.
//!
//! ```csv
//! OrderCode,MVA,BIL,Auto(Yes/No),Conservator,YV/TV Present (Connection_YV or Connection_TV key exists in DB),After Test Required (keyword After All Tests exists in DB)
//! T-1001,40,780,Yes,Yes,Yes,Yes
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};
use tts_core::{
    DiagnosticIssue, Diagnostics, InMemoryRecords, Kilovolts, LoadStats, MegavoltAmperes,
    RecordSource, Severity, TransformerRecord, TtsResult,
};

/// Marker in the test-code column that means an after test is required.
pub const ALL_TESTS_MARKER: &str = "ALL TESTS";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    #[serde(rename = "OrderCode", alias = "id", alias = "ID", alias = "Transformer ID")]
    id: Option<String>,
    #[serde(rename = "MVA", alias = "mva")]
    mva: Option<String>,
    #[serde(rename = "BIL", alias = "bil")]
    bil: Option<String>,
    #[serde(rename = "Auto(Yes/No)", alias = "auto", alias = "Auto")]
    auto: Option<String>,
    #[serde(rename = "Conservator", alias = "conservator")]
    conservator: Option<String>,
    #[serde(
        rename = "YV/TV Present (Connection_YV or Connection_TV key exists in DB)",
        alias = "yv/tv",
        alias = "YV/TV",
        alias = "Winding Config"
    )]
    winding_config: Option<String>,
    #[serde(
        rename = "After Test Required (keyword After All Tests exists in DB)",
        alias = "test_codes",
        alias = "Test Codes"
    )]
    test_codes: Option<String>,
    #[serde(rename = "Series/Parallel", alias = "series_parallel")]
    series_parallel: Option<String>,
    #[serde(rename = "Before Impulse", alias = "before_impulse")]
    before_impulse: Option<String>,
    #[serde(rename = "Nameplate", alias = "nameplate")]
    nameplate: Option<String>,
    #[serde(rename = "On Cover", alias = "on_cover")]
    on_cover: Option<String>,
    #[serde(rename = "Transformer Type", alias = "transformer_type")]
    transformer_type: Option<String>,
    #[serde(rename = "Winding Type", alias = "winding_type")]
    winding_type: Option<String>,
}

// Every header each RawRow field accepts; keep in step with the serde attributes.
const COLUMN_NAMES: [(&str, &[&str]); 13] = [
    ("id", &["OrderCode", "id", "ID", "Transformer ID"]),
    ("MVA", &["MVA", "mva"]),
    ("BIL", &["BIL", "bil"]),
    ("auto", &["Auto(Yes/No)", "auto", "Auto"]),
    ("conservator", &["Conservator", "conservator"]),
    (
        "winding config",
        &[
            "YV/TV Present (Connection_YV or Connection_TV key exists in DB)",
            "yv/tv",
            "YV/TV",
            "Winding Config",
        ],
    ),
    (
        "test codes",
        &[
            "After Test Required (keyword After All Tests exists in DB)",
            "test_codes",
            "Test Codes",
        ],
    ),
    ("series/parallel", &["Series/Parallel", "series_parallel"]),
    ("before impulse", &["Before Impulse", "before_impulse"]),
    ("nameplate", &["Nameplate", "nameplate"]),
    ("on cover", &["On Cover", "on_cover"]),
    ("transformer type", &["Transformer Type", "transformer_type"]),
    ("winding type", &["Winding Type", "winding_type"]),
];

fn column_field(header: &str) -> Option<&'static str> {
    COLUMN_NAMES
        .iter()
        .find(|(_, names)| names.contains(&header))
        .map(|(field, _)| *field)
}

/// Blank out headers that name a field an earlier column already supplies,
/// so serde sees each field once. The first column wins.
fn dedupe_headers(headers: &csv::StringRecord, diagnostics: &mut Diagnostics) -> csv::StringRecord {
    let mut seen: Vec<(&'static str, String)> = Vec::new();
    let mut deduped = csv::StringRecord::new();
    for header in headers.iter() {
        match column_field(header) {
            Some(field) => {
                if let Some((_, first)) = seen.iter().find(|(f, _)| *f == field) {
                    diagnostics.add_warning_at_line(
                        "header",
                        &format!(
                            "column '{}' duplicates '{}' ({}); only the first is read",
                            header, first, field
                        ),
                        1,
                    );
                    deduped.push_field("");
                } else {
                    seen.push((field, header.to_string()));
                    deduped.push_field(header);
                }
            }
            None => deduped.push_field(header),
        }
    }
    deduped
}

/// Expected classification carried by labeled exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowLabels {
    pub transformer_type: Option<String>,
    pub winding_type: Option<String>,
    /// Normalized test-code column, when the row fills it in
    pub after_test_required: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct LoadedRow {
    /// 1-based line in the source file
    pub line: usize,
    pub record: TransformerRecord,
    pub labels: RowLabels,
}

/// Everything read from one record file.
#[derive(Debug, Clone, Default)]
pub struct RecordFile {
    /// Rows with a usable, unique identifier, in file order
    pub rows: Vec<LoadedRow>,
    pub diagnostics: Diagnostics,
    pub stats: LoadStats,
}

impl RecordFile {
    pub fn records(&self) -> impl Iterator<Item = &TransformerRecord> {
        self.rows.iter().map(|row| &row.record)
    }
}

/// `yes`, `true`, `y` or `1`, ignoring case and surrounding whitespace.
pub fn normalize_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "y" | "1"
    )
}

/// Connection keys that mark a tertiary or auxiliary winding.
const WINDING_KEYS: [&str; 2] = ["TV", "YV"];
const NEGATIONS: [&str; 5] = ["N", "NO", "NOT", "NONE", "FALSE"];

/// Winding-config column: a yes-value, or a TV/YV connection key such as
/// `Connection_TV`. Keys only count as whole tokens, and any negating token
/// ("No TV") clears the flag.
pub fn winding_config_flag(value: &str) -> bool {
    if normalize_flag(value) {
        return true;
    }
    let tokens: Vec<String> = value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_uppercase)
        .collect();
    tokens.iter().any(|t| WINDING_KEYS.contains(&t.as_str()))
        && !tokens.iter().any(|t| NEGATIONS.contains(&t.as_str()))
}

/// Test-code column: a yes-value or the literal "ALL TESTS" marker.
pub fn test_code_flag(value: &str) -> bool {
    normalize_flag(value) || value.contains(ALL_TESTS_MARKER)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_rating(
    column: &str,
    value: Option<String>,
    id: &str,
    line: usize,
    file: &mut RecordFile,
) -> Option<f64> {
    let text = non_empty(value)?;
    match text.parse::<f64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            file.diagnostics.add(
                DiagnosticIssue::new(
                    Severity::Warning,
                    "parse",
                    format!("{} '{}' is not a number; treated as missing", column, text),
                )
                .with_entity(id)
                .with_line(line),
            );
            file.stats.blanked_values += 1;
            None
        }
    }
}

/// Read records from any CSV reader (headers required).
pub fn read_records<R: Read>(reader: R) -> Result<RecordFile> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);
    let mut file = RecordFile::default();
    let headers = dedupe_headers(
        csv_reader.headers().context("reading record CSV headers")?,
        &mut file.diagnostics,
    );
    let mut seen = std::collections::HashSet::new();

    for result in csv_reader.records() {
        let row = result.context("reading record CSV row")?;
        file.stats.rows += 1;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(file.stats.rows + 1);

        let raw: RawRow = match row.deserialize(Some(&headers)) {
            Ok(raw) => raw,
            Err(err) => {
                file.diagnostics
                    .add_error_at_line("parse", &format!("malformed row: {}", err), line);
                file.stats.skipped_rows += 1;
                continue;
            }
        };

        let Some(id) = non_empty(raw.id.clone()) else {
            file.diagnostics
                .add_error_at_line("parse", "row has no transformer identifier", line);
            file.stats.skipped_rows += 1;
            continue;
        };
        if !seen.insert(id.clone()) {
            file.diagnostics.add(
                DiagnosticIssue::new(
                    Severity::Error,
                    "validation",
                    "duplicate transformer identifier; first occurrence kept",
                )
                .with_entity(id.as_str())
                .with_line(line),
            );
            file.stats.skipped_rows += 1;
            continue;
        }

        let mva = parse_rating("MVA", raw.mva, &id, line, &mut file);
        let bil = parse_rating("BIL", raw.bil, &id, line, &mut file);
        let flag = |value: &Option<String>| value.as_deref().is_some_and(normalize_flag);

        let record = TransformerRecord {
            mva: mva.map(MegavoltAmperes),
            bil: bil.map(Kilovolts),
            is_auto: flag(&raw.auto),
            has_conservator: flag(&raw.conservator),
            winding_config: raw.winding_config.as_deref().is_some_and(winding_config_flag),
            all_tests: raw.test_codes.as_deref().is_some_and(test_code_flag),
            series_parallel: flag(&raw.series_parallel),
            before_impulse: flag(&raw.before_impulse),
            nameplate: non_empty(raw.nameplate).unwrap_or_default(),
            on_cover: non_empty(raw.on_cover).unwrap_or_default(),
            id,
        };

        file.rows.push(LoadedRow {
            line,
            record,
            labels: RowLabels {
                transformer_type: non_empty(raw.transformer_type),
                winding_type: non_empty(raw.winding_type),
                after_test_required: non_empty(raw.test_codes).map(|v| test_code_flag(&v)),
            },
        });
    }

    file.stats.records = file.rows.len();
    Ok(file)
}

/// Read a record CSV from disk.
pub fn read_record_file(path: impl AsRef<Path>) -> Result<RecordFile> {
    let path = path.as_ref();
    let handle =
        File::open(path).with_context(|| format!("opening record file '{}'", path.display()))?;
    let file = read_records(handle)
        .with_context(|| format!("reading record file '{}'", path.display()))?;
    info!(
        path = %path.display(),
        rows = file.stats.rows,
        records = file.stats.records,
        "loaded transformer records"
    );
    if file.diagnostics.has_issues() {
        warn!(
            path = %path.display(),
            "record file: {}",
            file.diagnostics.summary()
        );
    }
    Ok(file)
}

/// [`RecordSource`] backed by a CSV file loaded once at open.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
    records: InMemoryRecords,
    diagnostics: Diagnostics,
}

impl CsvRecordSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = read_record_file(path)?;
        Ok(Self::from_file(path, file))
    }

    pub fn from_file(path: impl Into<PathBuf>, file: RecordFile) -> Self {
        let records = file.rows.into_iter().map(|row| row.record).collect();
        Self {
            path: path.into(),
            records,
            diagnostics: file.diagnostics,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[TransformerRecord] {
        self.records.records()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl RecordSource for CsvRecordSource {
    fn lookup_record(&self, id: &str) -> TtsResult<TransformerRecord> {
        debug!(id, path = %self.path.display(), "looking up transformer record");
        self.records.lookup_record(id)
    }
}
