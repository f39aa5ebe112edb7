//! # tts-io: Record and Parameter-Table Backends
//!
//! File-backed implementations of the two collaborators the core consumes:
//!
//! - [`records::CsvRecordSource`] implements [`tts_core::RecordSource`] over a
//!   transformer CSV export
//! - [`table::JsonTableSource`] implements [`tts_core::TableSource`] over the
//!   nested JSON parameter table
//!
//! Loading is tolerant: bad cells and rows are reported through
//! [`tts_core::Diagnostics`] and the rest of the file is still usable.
//! [`validate`] runs the dataset checks behind `tts-cli validate`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tts_core::{classify_and_estimate, RecordSource};
//! use tts_io::{records::CsvRecordSource, table::load_parameter_table};
//!
//! fn main() -> anyhow::Result<()> {
//!     let source = CsvRecordSource::open("data/updated_data.csv")?;
//!     let table = load_parameter_table("data/parameters.json")?;
//!     let record = source.lookup_record("T-1001")?;
//!     let assessment = classify_and_estimate(&record, &table)?;
//!     println!("{}", assessment.classification.transformer_type);
//!     Ok(())
//! }
//! ```

pub mod records;
pub mod table;
pub mod validate;

pub use records::{read_record_file, read_records, CsvRecordSource, LoadedRow, RecordFile, RowLabels};
pub use table::{load_parameter_table, JsonTableSource};
pub use validate::{validate_dataset, validate_records, validate_table};
