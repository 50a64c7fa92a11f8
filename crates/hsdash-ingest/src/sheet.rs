//! Per-sheet normalization.
//!
//! Wraps one calamine cell range with case-insensitive header lookup and
//! typed cell accessors, and produces the cleaned session rows the
//! aggregator folds together.
//!
//! The drop policy is two-staged: rows missing a required cell (end time,
//! start time, date - checked in that order) are dropped first; rows whose
//! values are present but unparseable are dropped when duration cannot be
//! computed. Neither case is an error.

use calamine::{Data, DataType, Range};
use chrono::{NaiveDate, NaiveTime};

use hsdash_core::Session;

use crate::timeparse;

/// One raw sheet: the subject name, the cell range, and the lower-cased
/// header row.
pub struct SheetTable {
    name: String,
    headers: Vec<String>,
    range: Range<Data>,
}

/// The result of normalizing a sheet.
///
/// `kept` is every data row that survived the required-field drop, in
/// source order; the optional-column extractors (materials, reading level,
/// student config) operate on these. `sessions` is the subset whose date
/// and times also parsed, paired with the source row index.
pub struct NormalizedSheet {
    pub kept: Vec<usize>,
    pub sessions: Vec<(usize, Session)>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, range: Range<Data>) -> Self {
        let headers = match range.rows().next() {
            Some(row) => row
                .iter()
                .map(|cell| match cell {
                    Data::String(s) => s.trim().to_lowercase(),
                    other => other.to_string().trim().to_lowercase(),
                })
                .collect(),
            None => Vec::new(),
        };
        Self {
            name: name.into(),
            headers,
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of data rows (excluding the header row).
    pub fn data_rows(&self) -> usize {
        self.range.height().saturating_sub(1)
    }

    /// Case-insensitive column lookup; first match wins.
    pub fn column(&self, header: &str) -> Option<usize> {
        let wanted = header.to_lowercase();
        self.headers.iter().position(|h| *h == wanted)
    }

    /// Raw cell at (data row, column). Row 0 is the first row below the
    /// header.
    fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.range.get((row + 1, col))
    }

    /// True when the cell is absent, empty, or whitespace-only text.
    pub fn is_blank(&self, row: usize, col: usize) -> bool {
        match self.cell(row, col) {
            None | Some(Data::Empty) => true,
            Some(Data::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// Cell as display text; `None` when blank. Numeric cells format
    /// without a trailing `.0` so ISBNs entered as numbers survive intact.
    pub fn text(&self, row: usize, col: usize) -> Option<String> {
        match self.cell(row, col)? {
            Data::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Data::Float(f) => {
                if f.fract() == 0.0 {
                    Some(format!("{}", *f as i64))
                } else {
                    Some(f.to_string())
                }
            }
            Data::Int(i) => Some(i.to_string()),
            Data::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Cell as text, but only for genuine text cells. Used for the student
    /// configuration scalars, where a numeric cell does not count.
    pub fn string_cell(&self, row: usize, col: usize) -> Option<String> {
        match self.cell(row, col)? {
            Data::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        }
    }

    /// Cell as a number, accepting numeric text.
    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        match self.cell(row, col)? {
            Data::Float(f) => Some(*f),
            Data::Int(i) => Some(*i as f64),
            Data::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Cell as a date: native date cells directly, text through the lenient
    /// parser.
    pub fn date(&self, row: usize, col: usize) -> Option<NaiveDate> {
        let cell = self.cell(row, col)?;
        match cell {
            Data::String(s) => timeparse::parse_date(s),
            _ => cell.as_date(),
        }
    }

    /// Cell as a time-of-day: native time cells directly, text through the
    /// lenient parser.
    pub fn time(&self, row: usize, col: usize) -> Option<NaiveTime> {
        let cell = self.cell(row, col)?;
        match cell {
            Data::String(s) => timeparse::parse_time(s),
            _ => cell.as_time(),
        }
    }

    /// Normalize the sheet into retained rows and parsed sessions.
    ///
    /// Returns an empty result when any required column (date, start time,
    /// end time) is missing entirely.
    pub fn normalize(&self) -> NormalizedSheet {
        let empty = NormalizedSheet {
            kept: Vec::new(),
            sessions: Vec::new(),
        };

        let (Some(date_col), Some(start_col), Some(end_col)) = (
            self.column("date"),
            self.column("start time"),
            self.column("end time"),
        ) else {
            tracing::debug!(sheet = %self.name, "required columns absent, skipping sheet");
            return empty;
        };
        let desc_col = self.column("description");

        let mut kept = Vec::new();
        let mut sessions = Vec::new();

        for row in 0..self.data_rows() {
            if self.is_blank(row, end_col)
                || self.is_blank(row, start_col)
                || self.is_blank(row, date_col)
            {
                continue;
            }
            kept.push(row);

            let (Some(date), Some(start), Some(end)) = (
                self.date(row, date_col),
                self.time(row, start_col),
                self.time(row, end_col),
            ) else {
                // Present but unparseable: duration is undefined, so the
                // row cannot contribute to blocks or sums.
                tracing::debug!(sheet = %self.name, row, "unparseable date or time, row excluded");
                continue;
            };

            let hours = end.signed_duration_since(start).num_seconds() as f64 / 3600.0;
            sessions.push((
                row,
                Session {
                    date,
                    start,
                    end,
                    hours,
                    description: desc_col.and_then(|c| self.text(row, c)),
                },
            ));
        }

        NormalizedSheet { kept, sessions }
    }
}
