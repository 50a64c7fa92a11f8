//! # hsdash-ingest
//!
//! Spreadsheet ingestion for the hsdash dashboard generator.
//!
//! This crate provides:
//! - Workbook loading and per-sheet normalization (calamine-backed)
//! - Aggregation of normalized sheets into a [`SessionSet`]
//! - The reading-list sub-pipeline for the secondary book workbook
//! - Lenient time/date parsing for hand-entered spreadsheet values
//!
//! ## Example
//!
//! ```rust,ignore
//! use hsdash_ingest::load_workbook;
//!
//! let set = load_workbook("activity_log.xlsx".as_ref())?;
//! println!("{} subjects, {:.1} hours", set.subjects.len(), set.total_hours());
//! ```

pub mod aggregate;
pub mod books;
pub mod sheet;
pub mod timeparse;

use std::path::Path;

use hsdash_core::{BookList, SessionSet};
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },
}

/// Load one activity workbook and aggregate every sheet into a `SessionSet`.
///
/// If any sheet references a reading-list workbook, that file is loaded too
/// and its book tables attached to the result.
pub fn load_workbook(path: &Path) -> Result<SessionSet, IngestError> {
    aggregate::load(path)
}

/// Load a reading-list workbook on its own: one `BookList` per sheet.
pub fn load_book_lists(path: &Path) -> Result<Vec<BookList>, IngestError> {
    books::load(path)
}
