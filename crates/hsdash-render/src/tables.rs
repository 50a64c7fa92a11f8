//! HTML table fragments: the curricula table and the per-sheet
//! reading-list tables.

use hsdash_core::{BookList, Curricula};

use crate::html_escape;

/// Render the accumulated curricula as an HTML table with the fixed
/// Course / Materials / ISBN column order.
pub fn curricula_table(curricula: &Curricula) -> String {
    let mut rows = String::new();
    for ((course, material), isbn) in curricula
        .courses
        .iter()
        .zip(&curricula.materials)
        .zip(&curricula.isbns)
    {
        rows.push_str(&format!(
            "            <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(course),
            html_escape(material),
            html_escape(isbn)
        ));
    }

    format!(
        r#"<table class="curricula">
    <thead>
        <tr><th>Course</th><th>Materials</th><th>ISBN</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
</table>"#
    )
}

/// Render one HTML table per reading-list sheet. The Level column is only
/// present for sheets that supplied a level.
pub fn book_list_tables(lists: &[BookList]) -> String {
    let mut html = String::new();
    for list in lists {
        html.push_str(&book_table(list));
        html.push('\n');
    }
    html
}

fn book_table(list: &BookList) -> String {
    let mut header = String::from("<tr><th>#</th><th>Title</th><th>Author</th><th>Language</th><th>ISBN</th>");
    if list.has_levels {
        header.push_str("<th>Level</th>");
    }
    header.push_str("</tr>");

    let mut rows = String::new();
    for book in &list.books {
        rows.push_str(&format!(
            "            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            book.index,
            html_escape(&book.title),
            html_escape(&book.author),
            html_escape(&book.language),
            html_escape(&book.isbn)
        ));
        if list.has_levels {
            rows.push_str(&format!("<td>{}</td>", html_escape(&book.level)));
        }
        rows.push_str("</tr>\n");
    }

    format!(
        r#"<div class="book-list">
    <h3>{title}</h3>
    <table>
        <thead>
            {header}
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
</div>"#,
        title = html_escape(&list.sheet),
        header = header,
        rows = rows,
    )
}
