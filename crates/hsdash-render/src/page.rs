//! Standalone HTML dashboard assembly.
//!
//! One section per input workbook (charts, totals, optional tables behind a
//! grade accordion), wrapped in a self-contained document with inline CSS.

use hsdash_core::{palette_color, RenderError, Renderer, SessionSet};

use crate::tables::{book_list_tables, curricula_table};
use crate::{html_escape, BarChart, DayTimeline, DonutChart, RangeStrip, ReadingLevelChart};

/// Dashboard page renderer: owns one configured instance of each widget.
#[derive(Clone, Debug, Default)]
pub struct DashboardPage {
    pub bar: BarChart,
    pub donut: DonutChart,
    pub timeline: DayTimeline,
    pub strip: RangeStrip,
    pub level: ReadingLevelChart,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one full document. Each workbook becomes its own section, in
    /// argument order; the page header carries the student name when any
    /// workbook supplied one.
    pub fn render_all(&self, sets: &[SessionSet]) -> Result<String, RenderError> {
        if sets.is_empty() {
            return Err(RenderError::InvalidData("no workbooks to render".into()));
        }

        let mut content = String::new();
        let mut student_name: Option<&str> = None;
        for set in sets {
            content.push_str(&self.render_section(set)?);
            if let Some(name) = set.student.name.as_deref() {
                student_name = Some(name);
            }
        }

        let heading = match student_name {
            Some(name) => format!("{}'s Homeschool Dashboard", name),
            None => "Homeschool Dashboard".to_string(),
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Homeschool Dashboard</title>
        <style>
{css}
        </style>
    </head>
    <body>
        <header>
            <h1>{heading}</h1>
        </header>
        <div class="main-wrapper">
{content}
        </div>
        <script>
{js}
        </script>
    </body>
</html>
"#,
            css = page_css(),
            heading = html_escape(&heading),
            content = content,
            js = ACCORDION_JS,
        ))
    }

    /// One workbook's section: the chart grid behind its grade accordion.
    fn render_section(&self, set: &SessionSet) -> Result<String, RenderError> {
        let bar = self.bar.render(set)?;
        let donut = self.donut.render(set)?;
        let timeline = self.timeline.render(set)?;
        let strip = self.strip.render(set)?;

        let total_hours = format!(
            "<p><strong>{:.2}</strong><br/>total hours taught</p>",
            set.total_hours()
        );

        // Optional row: curricula and/or reading level, half-width each
        let mut optional_row = String::new();
        if !set.curricula.is_empty() || set.reading_level.is_some() {
            optional_row.push_str("<div class=\"row\">\n");
            if !set.curricula.is_empty() {
                optional_row.push_str(&format!(
                    "    <div class=\"grid-half\">\n{}\n    </div>\n",
                    curricula_table(&set.curricula)
                ));
            }
            if set.reading_level.as_ref().is_some_and(|s| !s.is_empty()) {
                optional_row.push_str(&format!(
                    "    <div class=\"grid-half\">\n{}\n    </div>\n",
                    self.level.render(set)?
                ));
            }
            optional_row.push_str("</div>\n");
        }

        let book_row = if set.book_lists.is_empty() {
            String::new()
        } else {
            format!(
                "<div class=\"row\">\n    <div class=\"grid-full\">\n{}\n    </div>\n</div>\n",
                book_list_tables(&set.book_lists)
            )
        };

        Ok(format!(
            r#"<button class="accordion">
    {grade}
</button>
<div class="panel">
<div class="row">
    <div class="grid-large-third">
        {bar}
    </div>
    <div class="grid-large-third">
        {donut}
    </div>
    <div class="grid-small-slice color-box">
        {total_hours}
    </div>
</div>
<div class="row">
    <div class="grid-full">
        {timeline}
        {strip}
    </div>
</div>
{optional_row}{book_row}</div>
"#,
            grade = html_escape(set.student.grade.as_deref().unwrap_or("")),
            bar = bar,
            donut = donut,
            total_hours = total_hours,
            timeline = timeline,
            strip = strip,
            optional_row = optional_row,
            book_row = book_row,
        ))
    }
}

impl Renderer for DashboardPage {
    type Output = String;

    fn render(&self, data: &SessionSet) -> Result<String, RenderError> {
        self.render_all(std::slice::from_ref(data))
    }
}

/// Page stylesheet. The color box picks its background from the shared
/// chart palette.
fn page_css() -> String {
    format!(
        r#"body {{
    margin: 0;
    padding: 0;
    font-family: Helvetica, Arial, sans-serif;
}}
.main-wrapper {{
    padding: 1em 1em 3em 1em;
}}
header {{
    background: #555555;
    color: #ffffff;
    text-align: center;
    padding: 1em;
}}
svg {{
    max-width: 100%;
    height: auto;
}}
table {{
    width: 100%;
    border-collapse: collapse;
    font-size: 0.9em;
}}
th, td {{
    text-align: left;
    padding: 0.4em 0.6em;
    border-bottom: 1px solid #e0e0e0;
}}
.color-box {{
    height: 100%;
    background: {accent};
    color: #fff;
    text-align: center;
    font-size: 1.4em;
    padding: 2em;
    margin-top: 28px;
    box-sizing: border-box;
}}
.accordion {{
    background-color: #eee;
    cursor: pointer;
    padding: 18px;
    width: 100%;
    border: none;
    outline: none;
    text-align: center;
    font-size: 1.25em;
    color: #555555;
    font-weight: bold;
    transition: 0.9s;
}}
.accordion:hover {{
    background-color: #ccc;
}}
.panel:first-of-type,
.panel.active-panel {{
    max-height: none;
}}
.panel,
.panel.active-panel:first-of-type {{
    max-height: 0;
    overflow: hidden;
    transition: max-height 0.9s ease-out;
    border-bottom: 1px solid #ffffff;
}}
@media (min-width: 1200px) {{
    .row {{
        display: grid;
        grid-template-columns: repeat(12, 1fr);
        grid-template-rows: 1fr auto;
        column-gap: 0.75em;
    }}
    .grid-half {{
        grid-column: auto / span 6;
    }}
    .grid-full {{
        grid-column: auto / span 12;
    }}
    .grid-large-third {{
        grid-column: auto / span 5;
    }}
    .grid-small-slice {{
        grid-column: auto / span 2;
    }}
}}"#,
        accent = palette_color(1)
    )
}

const ACCORDION_JS: &str = r#"var acc = document.getElementsByClassName("accordion");
var i;

for (i = 0; i < acc.length; i++) {
    acc[i].addEventListener("click", function() {
        this.classList.toggle("active");
        var panel = this.nextElementSibling;
        panel.classList.toggle("active-panel");
        if (panel.style.maxHeight) {
            panel.style.maxHeight = null;
        }
    });
}"#;
