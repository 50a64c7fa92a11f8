//! End-to-end ingestion tests against real xlsx files.
//!
//! Fixtures are written with rust_xlsxwriter into a temp dir, then loaded
//! back through the public ingest API.

use std::path::{Path, PathBuf};

use hsdash_core::PALETTE;
use hsdash_ingest::{load_book_lists, load_workbook, IngestError};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{Workbook, Worksheet};
use tempfile::TempDir;

fn write_rows(sheet: &mut Worksheet, rows: &[&[&str]]) {
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .write_string(r as u32, c as u16, *value)
                    .expect("write cell");
            }
        }
    }
}

fn write_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).expect("sheet name");
        write_rows(sheet, rows);
    }
    workbook.save(path).expect("save fixture workbook");
}

fn fixture(dir: &TempDir, name: &str, sheets: &[(&str, &[&[&str]])]) -> PathBuf {
    let path = dir.path().join(name);
    write_workbook(&path, sheets);
    path
}

#[test]
fn single_sheet_workbook_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "log.xlsx",
        &[(
            "Math",
            &[
                &["Date", "Start Time", "End Time", "Description"],
                &["2023-09-18", "9:00 AM", "10:30 AM", "Fractions"],
                &["2023-09-19", "1:00 PM", "2:00 PM", "Decimals"],
                // Missing end time: dropped
                &["2023-09-20", "1:00 PM", "", "Review"],
            ],
        )],
    );

    let set = load_workbook(&path).unwrap();

    assert_eq!(set.subjects.len(), 1);
    let math = &set.subjects[0];
    assert_eq!(math.subject, "Math");
    assert_eq!(math.total_hours, 2.5);
    assert_eq!(math.blocks.len(), 2);
    assert!(math.blocks.iter().all(|b| b.color == PALETTE[0]));

    assert_eq!(math.blocks[0].date_label, "2023-09-18");
    assert_eq!(math.blocks[0].start_label, "09:00 AM");
    assert_eq!(math.blocks[1].start_label, "01:00 PM");
    assert_eq!(math.blocks[1].description.as_deref(), Some("Decimals"));

    assert_eq!(set.min_date.unwrap().to_string(), "2023-09-18");
    assert_eq!(set.max_date.unwrap().to_string(), "2023-09-19");
    assert_eq!(set.total_hours(), 2.5);
}

#[test]
fn unparseable_times_are_excluded_not_zeroed() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "log.xlsx",
        &[(
            "Science",
            &[
                &["date", "start time", "end time"],
                &["2023-09-18", "13:00", "14:00"],
                // Ambiguous: 24-hour value with seconds and meridiem
                &["2023-09-19", "13:00:00 PM", "14:00"],
            ],
        )],
    );

    let set = load_workbook(&path).unwrap();
    assert_eq!(set.subjects[0].total_hours, 1.0);
    assert_eq!(set.subjects[0].blocks.len(), 1);
}

#[test]
fn multi_sheet_workbook_aggregates_in_order() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "log.xlsx",
        &[
            (
                "Math",
                &[
                    &["date", "start time", "end time", "name", "materials", "isbn"],
                    &["2023-09-18", "9:00 AM", "10:00 AM", "Ada", "Saxon 7/6", "978-1591413196"],
                    &["2023-09-19", "9:00 AM", "11:00 AM", "", "Flashcards", ""],
                ],
            ),
            (
                "Reading",
                &[
                    &["date", "start time", "end time", "name", "grade", "reading level"],
                    &["2023-08-01", "8:00 AM", "9:00 AM", "Grace", "4th Grade", "3.1"],
                    &["2023-10-01", "8:00 AM", "9:00 AM", "", "", "3.4"],
                ],
            ),
        ],
    );

    let set = load_workbook(&path).unwrap();

    // Sheet order and positional colors
    assert_eq!(set.subject_labels(), vec!["Math", "Reading"]);
    assert_eq!(set.subjects[0].color, PALETTE[0]);
    assert_eq!(set.subjects[1].color, PALETTE[1]);
    assert_eq!(set.subject_hours(), vec![3.0, 2.0]);

    // Date range spans both sheets
    assert_eq!(set.min_date.unwrap().to_string(), "2023-08-01");
    assert_eq!(set.max_date.unwrap().to_string(), "2023-10-01");

    // First non-empty name wins (Math sheet comes first)
    assert_eq!(set.student.name.as_deref(), Some("Ada"));
    assert_eq!(set.student.grade.as_deref(), Some("4th Grade"));

    // Curricula: one course label, then a blank per extra material
    assert_eq!(set.curricula.courses, vec!["Math", ""]);
    assert_eq!(set.curricula.materials, vec!["Saxon 7/6", "Flashcards"]);
    assert_eq!(set.curricula.isbns, vec!["978-1591413196", ""]);

    // Reading level from the Reading sheet, in source row order
    let series = set.reading_level.as_ref().unwrap();
    assert_eq!(series.points.len(), 2);
    assert_eq!(series.points[0].level, 3.1);
    assert_eq!(series.points[1].level, 3.4);
}

#[test]
fn reading_list_workbook_is_loaded_through_the_referenced_path() {
    let dir = TempDir::new().unwrap();
    let books_path = fixture(
        &dir,
        "books.xlsx",
        &[
            (
                "Adults",
                &[
                    &["Title", "Author", "Language", "ISBN", "Level"],
                    &["Basic Economics", "Thomas Sowell", "English", "978-0465081387", "Advanced"],
                    &["The Law", "Frederic Bastiat", "English", "978-1612930121", "Intermediate"],
                ],
            ),
            (
                "Kids",
                &[
                    &["Title", "Author", "Language", "ISBN"],
                    &["Jane and the King", "Jenny Phillips", "English", "978-1951097493"],
                ],
            ),
        ],
    );

    let log_path = fixture(
        &dir,
        "log.xlsx",
        &[(
            "Reading",
            &[
                &["date", "start time", "end time", "reading list"],
                &["2023-09-18", "9:00 AM", "10:00 AM", books_path.to_str().unwrap()],
            ],
        )],
    );

    let set = load_workbook(&log_path).unwrap();
    assert_eq!(
        set.student.reading_list.as_deref(),
        books_path.to_str()
    );

    assert_eq!(set.book_lists.len(), 2);
    let adults = &set.book_lists[0];
    assert_eq!(adults.sheet, "Adults");
    assert!(adults.has_levels);
    assert_eq!(adults.books.len(), 2);
    assert_eq!(adults.books[0].index, 1);
    assert_eq!(adults.books[1].index, 2);
    assert_eq!(adults.books[1].title, "The Law");

    let kids = &set.book_lists[1];
    assert!(!kids.has_levels);
    assert_eq!(kids.books[0].author, "Jenny Phillips");
}

#[test]
fn reading_list_without_title_column_fails_hard() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "books.xlsx",
        &[("Broken", &[&["Author"], &["Nobody"]])],
    );

    let err = load_book_lists(&path).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingColumn { ref column, .. } if column == "title"
    ));
}

#[test]
fn sheet_without_required_columns_is_empty_but_harmless() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "log.xlsx",
        &[
            (
                "Notes",
                &[&["topic", "comment"], &["birds", "saw a heron"]],
            ),
            (
                "Math",
                &[
                    &["date", "start time", "end time"],
                    &["2023-09-18", "9:00 AM", "10:00 AM"],
                ],
            ),
        ],
    );

    let set = load_workbook(&path).unwrap();
    assert_eq!(set.subjects.len(), 2);
    assert_eq!(set.subjects[0].total_hours, 0.0);
    assert!(set.subjects[0].blocks.is_empty());
    assert_eq!(set.subjects[1].total_hours, 1.0);
}
