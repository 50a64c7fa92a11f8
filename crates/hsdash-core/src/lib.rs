//! # hsdash-core
//!
//! Core domain model and shared helpers for the hsdash dashboard generator.
//!
//! This crate provides:
//! - Domain types: `SessionSet`, `SubjectSummary`, `DayBlock`, `BookList`
//! - The chart palette and percentage arithmetic shared by the widgets
//! - The `Renderer` trait implemented by every chart/table backend
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use hsdash_core::{DayBlock, Session, SessionSet, SubjectSummary, palette_color};
//!
//! let session = Session {
//!     date: NaiveDate::from_ymd_opt(2023, 9, 18).unwrap(),
//!     start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     end: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
//!     hours: 1.5,
//!     description: Some("Fractions".into()),
//! };
//!
//! let mut set = SessionSet::new();
//! let mut math = SubjectSummary::new("Math", palette_color(0));
//! math.push(DayBlock::from_session(&session, palette_color(0), "Math"));
//! set.subjects.push(math);
//! assert_eq!(set.total_hours(), 1.5);
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Palette
// ============================================================================

/// Categorical chart palette, one color per subject sheet.
///
/// Subjects beyond the palette length wrap around to the start.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color for the i-th subject sheet. Wraps when the subject count exceeds
/// the palette length.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Percentage of `total` that `value` represents, rounded to two decimals.
///
/// A zero or negative total yields 0.0 rather than a division error.
pub fn percentage(value: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    (value / total * 100.0 * 100.0).round() / 100.0
}

// ============================================================================
// Sessions and day-blocks
// ============================================================================

/// One normalized study session: a retained spreadsheet row with its
/// duration already computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Duration in fractional hours (`end - start`).
    pub hours: f64,
    pub description: Option<String>,
}

/// A session reshaped for timeline rendering: pre-formatted labels, the
/// subject's palette color, and the subject name itself travel with the row
/// so hover tooltips need no further lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayBlock {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`
    pub date_label: String,
    pub start: NaiveTime,
    /// `hh:mm AM/PM`
    pub start_label: String,
    pub end: NaiveTime,
    /// `hh:mm AM/PM`
    pub end_label: String,
    pub hours: f64,
    pub color: String,
    pub subject: String,
    pub description: Option<String>,
}

impl DayBlock {
    /// Reshape a session for the timeline, stamping the sheet's color and
    /// subject label onto the row.
    pub fn from_session(session: &Session, color: &str, subject: &str) -> Self {
        Self {
            date: session.date,
            date_label: session.date.format("%Y-%m-%d").to_string(),
            start: session.start,
            start_label: session.start.format("%I:%M %p").to_string(),
            end: session.end,
            end_label: session.end.format("%I:%M %p").to_string(),
            hours: session.hours,
            color: color.to_string(),
            subject: subject.to_string(),
            description: session.description.clone(),
        }
    }
}

/// Everything derived from a single subject sheet: the sheet name, its
/// positional palette color, the summed hours, and one day-block per
/// retained row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub subject: String,
    pub color: String,
    pub total_hours: f64,
    pub blocks: Vec<DayBlock>,
}

impl SubjectSummary {
    pub fn new(subject: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            color: color.into(),
            total_hours: 0.0,
            blocks: Vec::new(),
        }
    }

    /// Append a day-block and fold its hours into the subject total.
    pub fn push(&mut self, block: DayBlock) {
        self.total_hours += block.hours;
        self.blocks.push(block);
    }
}

// ============================================================================
// Side-channel tables
// ============================================================================

/// Accumulated curricula table. Three parallel columns; one course label per
/// sheet followed by blank placeholders so the Course column stays aligned
/// with the material rows beneath it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Curricula {
    pub courses: Vec<String>,
    pub materials: Vec<String>,
    pub isbns: Vec<String>,
}

impl Curricula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Append one sheet's materials: the course label once, then a blank
    /// placeholder per remaining material row. The ISBN column is truncated
    /// or blank-padded to exactly the material count so the table stays
    /// rectangular.
    ///
    /// A sheet with no surviving material rows contributes nothing.
    pub fn push_sheet(&mut self, course: &str, materials: Vec<String>, isbns: Vec<String>) {
        if materials.is_empty() {
            return;
        }
        let count = materials.len();
        self.courses.push(course.to_string());
        self.courses
            .extend(std::iter::repeat(String::new()).take(count - 1));
        self.materials.extend(materials);
        let mut isbns = isbns;
        isbns.resize(count, String::new());
        self.isbns.extend(isbns);
    }
}

/// One reading-level observation, paired with the date of the row it came
/// from. Points keep their source row order; they are never re-sorted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelPoint {
    pub level: f64,
    pub date: NaiveDate,
}

/// Reading-level trend data from a single sheet. Each sheet that carries the
/// column replaces the previous series wholesale (last sheet wins).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingLevelSeries {
    pub points: Vec<LevelPoint>,
}

impl ReadingLevelSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Scalar student configuration discovered in the first data row of any
/// sheet. Once a value is set it is never overwritten by a later sheet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: Option<String>,
    pub grade: Option<String>,
    /// Path to the reading-list workbook, if any sheet referenced one.
    pub reading_list: Option<String>,
}

impl StudentInfo {
    /// Set-once: record a value only if none is present yet and the new
    /// value is non-blank text.
    pub fn record_name(&mut self, value: &str) {
        record_once(&mut self.name, value);
    }

    pub fn record_grade(&mut self, value: &str) {
        record_once(&mut self.grade, value);
    }

    pub fn record_reading_list(&mut self, value: &str) {
        record_once(&mut self.reading_list, value);
    }
}

fn record_once(slot: &mut Option<String>, value: &str) {
    let trimmed = value.trim();
    if slot.is_none() && !trimmed.is_empty() {
        *slot = Some(trimmed.to_string());
    }
}

// ============================================================================
// Reading-list books
// ============================================================================

/// One book from the reading-list workbook. Blank strings stand in for
/// missing author/language/isbn/level cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    /// 1-based position within the sheet, synthesized at load time.
    pub index: usize,
    pub title: String,
    pub author: String,
    pub language: String,
    pub isbn: String,
    pub level: String,
}

/// One sheet of the reading-list workbook. The rendered table only gets a
/// Level column when the sheet supplied at least one non-blank level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookList {
    pub sheet: String,
    pub books: Vec<BookEntry>,
    pub has_levels: bool,
}

// ============================================================================
// SessionSet
// ============================================================================

/// The full aggregated view of one workbook: every subject sheet folded
/// together, plus the optional side-channel tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSet {
    /// One entry per sheet, in workbook order.
    pub subjects: Vec<SubjectSummary>,
    /// Earliest session date across all sheets.
    pub min_date: Option<NaiveDate>,
    /// Latest session date across all sheets.
    pub max_date: Option<NaiveDate>,
    pub curricula: Curricula,
    pub reading_level: Option<ReadingLevelSeries>,
    pub student: StudentInfo,
    pub book_lists: Vec<BookList>,
}

impl SessionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sheet's date bounds into the workbook-level range. Strict
    /// comparisons, so ties keep the earliest-seen bound.
    pub fn observe_dates(&mut self, oldest: NaiveDate, newest: NaiveDate) {
        match self.min_date {
            Some(current) if oldest >= current => {}
            _ => self.min_date = Some(oldest),
        }
        match self.max_date {
            Some(current) if newest <= current => {}
            _ => self.max_date = Some(newest),
        }
    }

    /// Replace the reading-level series. Deliberately last-wins: each sheet
    /// that carries the column overwrites whatever came before, unlike the
    /// curricula table which accumulates.
    pub fn replace_reading_level(&mut self, series: ReadingLevelSeries) {
        if !series.is_empty() {
            self.reading_level = Some(series);
        }
    }

    /// Sum of hours across every subject.
    pub fn total_hours(&self) -> f64 {
        self.subjects.iter().map(|s| s.total_hours).sum()
    }

    /// Subject names in sheet order.
    pub fn subject_labels(&self) -> Vec<&str> {
        self.subjects.iter().map(|s| s.subject.as_str()).collect()
    }

    /// Per-subject hour totals, aligned with `subject_labels`.
    pub fn subject_hours(&self) -> Vec<f64> {
        self.subjects.iter().map(|s| s.total_hours).collect()
    }

    /// True when no sheet contributed a single retained session.
    pub fn is_empty(&self) -> bool {
        self.subjects.iter().all(|s| s.blocks.is_empty())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering. Every chart and table widget turns an aggregated
/// `SessionSet` into one output fragment.
pub trait Renderer {
    type Output;

    fn render(&self, data: &SessionSet) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
