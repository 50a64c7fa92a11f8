//! Workbook aggregation.
//!
//! Folds each normalized sheet into the running [`SessionSet`]: per-subject
//! totals and day-blocks, the workbook-level date range, the curricula
//! table, the set-once student configuration, and the per-sheet
//! reading-level series.

use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};

use hsdash_core::{
    palette_color, DayBlock, LevelPoint, ReadingLevelSeries, SessionSet, SubjectSummary,
};

use crate::sheet::{NormalizedSheet, SheetTable};
use crate::{books, IngestError};

/// Load one activity workbook and fold every sheet, in workbook order, into
/// a `SessionSet`. Runs the reading-list sub-pipeline afterwards if any
/// sheet supplied a path.
pub fn load(path: &Path) -> Result<SessionSet, IngestError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names();

    let mut set = SessionSet::new();
    for (index, name) in sheet_names.iter().enumerate() {
        let range = workbook.worksheet_range(name)?;
        let table = SheetTable::new(name.clone(), range);
        fold_sheet(&mut set, &table, index);
    }
    // The workbook handle is released before any derived data is used.
    drop(workbook);

    if let Some(list_path) = set.student.reading_list.clone() {
        tracing::debug!(path = %list_path, "loading reading-list workbook");
        set.book_lists = books::load(Path::new(&list_path))?;
    }

    Ok(set)
}

/// Fold one sheet into the session set. `index` is the sheet's position in
/// the workbook and selects its palette color.
fn fold_sheet(set: &mut SessionSet, table: &SheetTable, index: usize) {
    let color = palette_color(index);
    let normalized = table.normalize();

    let mut summary = SubjectSummary::new(table.name(), color);
    for (_, session) in &normalized.sessions {
        summary.push(DayBlock::from_session(session, color, table.name()));
    }

    let dates = normalized.sessions.iter().map(|(_, s)| s.date);
    if let (Some(oldest), Some(newest)) = (dates.clone().min(), dates.max()) {
        set.observe_dates(oldest, newest);
    }

    extract_curricula(set, table, &normalized);
    extract_student_config(set, table, &normalized);
    extract_reading_level(set, table, &normalized);

    // Every sheet appears in the totals, even one that kept no rows.
    set.subjects.push(summary);
}

// =============================================================================
// Optional-column extractors
// =============================================================================

/// Accumulate this sheet's materials into the curricula table. The ISBN
/// column is read positionally from the top of the retained rows and cut to
/// the material count.
fn extract_curricula(set: &mut SessionSet, table: &SheetTable, normalized: &NormalizedSheet) {
    let Some(materials_col) = table.column("materials") else {
        return;
    };

    let materials: Vec<String> = normalized
        .kept
        .iter()
        .filter_map(|&row| table.text(row, materials_col))
        .collect();

    let isbns: Vec<String> = match table.column("isbn") {
        Some(isbn_col) => normalized
            .kept
            .iter()
            .take(materials.len())
            .map(|&row| table.text(row, isbn_col).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    set.curricula.push_sheet(table.name(), materials, isbns);
}

/// Read the student configuration scalars from the first retained row.
/// Only genuine text cells count, and a value set by an earlier sheet is
/// never overwritten.
fn extract_student_config(set: &mut SessionSet, table: &SheetTable, normalized: &NormalizedSheet) {
    let Some(&first) = normalized.kept.first() else {
        return;
    };

    if let Some(col) = table.column("grade") {
        if let Some(value) = table.string_cell(first, col) {
            set.student.record_grade(&value);
        }
    }
    if let Some(col) = table.column("name") {
        if let Some(value) = table.string_cell(first, col) {
            set.student.record_name(&value);
        }
    }
    if let Some(col) = table.column("reading list") {
        if let Some(value) = table.string_cell(first, col) {
            set.student.record_reading_list(&value);
        }
    }
}

/// Pair this sheet's reading-level values with their rows' dates. A sheet
/// that carries the column replaces the previous series wholesale.
fn extract_reading_level(set: &mut SessionSet, table: &SheetTable, normalized: &NormalizedSheet) {
    let Some(level_col) = table.column("reading level") else {
        return;
    };
    let Some(date_col) = table.column("date") else {
        return;
    };

    let points: Vec<LevelPoint> = normalized
        .kept
        .iter()
        .filter_map(|&row| {
            let level = table.number(row, level_col)?;
            let date = table.date(row, date_col)?;
            Some(LevelPoint { level, date })
        })
        .collect();

    set.replace_reading_level(ReadingLevelSeries { points });
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Range};
    use chrono::NaiveDate;
    use hsdash_core::PALETTE;
    use pretty_assertions::assert_eq;

    fn table(name: &str, rows: &[&[&str]]) -> SheetTable {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width.max(1) - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    range.set_value((r as u32, c as u32), Data::String((*value).to_string()));
                }
            }
        }
        SheetTable::new(name, range)
    }

    fn basic_sheet(name: &str) -> SheetTable {
        table(
            name,
            &[
                &["date", "start time", "end time"],
                &["2023-09-18", "9:00 AM", "10:30 AM"],
                &["2023-09-20", "1:00 PM", "2:00 PM"],
            ],
        )
    }

    #[test]
    fn sheets_get_positional_palette_colors() {
        let mut set = SessionSet::new();
        fold_sheet(&mut set, &basic_sheet("Math"), 0);
        fold_sheet(&mut set, &basic_sheet("Science"), 1);

        assert_eq!(set.subjects[0].color, PALETTE[0]);
        assert_eq!(set.subjects[1].color, PALETTE[1]);
        assert!(set.subjects[0].blocks.iter().all(|b| b.color == PALETTE[0]));
    }

    #[test]
    fn totals_and_date_range_fold_across_sheets() {
        let mut set = SessionSet::new();
        fold_sheet(&mut set, &basic_sheet("Math"), 0);
        assert_eq!(set.subjects[0].total_hours, 2.5);
        assert_eq!(set.min_date, NaiveDate::from_ymd_opt(2023, 9, 18));
        assert_eq!(set.max_date, NaiveDate::from_ymd_opt(2023, 9, 20));
    }

    #[test]
    fn empty_sheet_still_contributes_a_zero_subject() {
        let mut set = SessionSet::new();
        fold_sheet(&mut set, &table("Art", &[&["notes"], &["sketching"]]), 0);
        assert_eq!(set.subjects.len(), 1);
        assert_eq!(set.subjects[0].total_hours, 0.0);
        assert!(set.subjects[0].blocks.is_empty());
        assert_eq!(set.min_date, None);
    }

    #[test]
    fn curricula_reads_isbns_positionally_from_the_top() {
        // Material cells sit on rows 1 and 2, but the ISBN slice is taken
        // from the top of the retained rows, exactly two entries.
        let mut set = SessionSet::new();
        let t = table(
            "History",
            &[
                &["date", "start time", "end time", "materials", "isbn"],
                &["2023-09-18", "9:00", "10:00", "", "111"],
                &["2023-09-19", "9:00", "10:00", "Atlas", "222"],
                &["2023-09-20", "9:00", "10:00", "Timeline Book", ""],
            ],
        );
        fold_sheet(&mut set, &t, 0);

        assert_eq!(set.curricula.courses, vec!["History", ""]);
        assert_eq!(set.curricula.materials, vec!["Atlas", "Timeline Book"]);
        assert_eq!(set.curricula.isbns, vec!["111", "222"]);
    }

    #[test]
    fn curricula_without_isbn_column_gets_blanks() {
        let mut set = SessionSet::new();
        let t = table(
            "Latin",
            &[
                &["date", "start time", "end time", "materials"],
                &["2023-09-18", "9:00", "10:00", "Wheelock"],
            ],
        );
        fold_sheet(&mut set, &t, 0);
        assert_eq!(set.curricula.isbns, vec![""]);
    }

    #[test]
    fn student_config_comes_from_first_retained_row_only() {
        let mut set = SessionSet::new();
        let t = table(
            "Math",
            &[
                &["date", "start time", "end time", "name", "grade"],
                &["", "9:00", "10:00", "Ignored", "Ignored"],
                &["2023-09-18", "9:00", "10:00", "Ada", "4th"],
                &["2023-09-19", "9:00", "10:00", "Grace", "5th"],
            ],
        );
        fold_sheet(&mut set, &t, 0);
        // Row with missing date is not retained, so row 2 is "first".
        assert_eq!(set.student.name.as_deref(), Some("Ada"));
        assert_eq!(set.student.grade.as_deref(), Some("4th"));
    }

    #[test]
    fn reading_level_is_replaced_by_the_last_sheet_that_has_it() {
        let mut set = SessionSet::new();
        let first = table(
            "Reading",
            &[
                &["date", "start time", "end time", "reading level"],
                &["2023-01-01", "9:00", "10:00", "2.5"],
            ],
        );
        let second = table(
            "Phonics",
            &[
                &["date", "start time", "end time", "reading level"],
                &["2023-02-01", "9:00", "10:00", "3.0"],
                &["2023-03-01", "9:00", "10:00", ""],
                &["2023-04-01", "9:00", "10:00", "3.5"],
            ],
        );
        let third = table(
            "Math",
            &[
                &["date", "start time", "end time"],
                &["2023-05-01", "9:00", "10:00"],
            ],
        );

        fold_sheet(&mut set, &first, 0);
        fold_sheet(&mut set, &second, 1);
        fold_sheet(&mut set, &third, 2);

        let series = set.reading_level.as_ref().unwrap();
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].level, 3.0);
        assert_eq!(series.points[1].level, 3.5);
        assert_eq!(
            series.points[1].date,
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
        );
    }
}
