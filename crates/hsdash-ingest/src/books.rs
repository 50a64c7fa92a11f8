//! Reading-list sub-pipeline.
//!
//! Loads the secondary workbook referenced by a `reading list` cell and
//! extracts one book table per sheet. `title` is the only hard requirement;
//! author/language/isbn fall back to blank strings, and the Level column
//! only exists for sheets that supply at least one non-blank level.

use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};

use hsdash_core::{BookEntry, BookList};

use crate::sheet::SheetTable;
use crate::IngestError;

/// Load a reading-list workbook: one `BookList` per sheet, in workbook
/// order.
pub fn load(path: &Path) -> Result<Vec<BookList>, IngestError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names();

    let mut lists = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = workbook.worksheet_range(name)?;
        let table = SheetTable::new(name.clone(), range);
        lists.push(book_list(&table)?);
    }
    Ok(lists)
}

fn book_list(table: &SheetTable) -> Result<BookList, IngestError> {
    let title_col = table
        .column("title")
        .ok_or_else(|| IngestError::MissingColumn {
            sheet: table.name().to_string(),
            column: "title".to_string(),
        })?;
    let author_col = table.column("author");
    let language_col = table.column("language");
    let isbn_col = table.column("isbn");
    let level_col = table.column("level");

    let mut books = Vec::with_capacity(table.data_rows());
    let mut has_levels = false;

    for row in 0..table.data_rows() {
        let text_or_blank =
            |col: Option<usize>| col.and_then(|c| table.text(row, c)).unwrap_or_default();

        let level = text_or_blank(level_col);
        if !level.is_empty() {
            has_levels = true;
        }

        books.push(BookEntry {
            index: row + 1,
            title: text_or_blank(Some(title_col)),
            author: text_or_blank(author_col),
            language: text_or_blank(language_col),
            isbn: text_or_blank(isbn_col),
            level,
        });
    }

    Ok(BookList {
        sheet: table.name().to_string(),
        books,
        has_levels,
    })
}
