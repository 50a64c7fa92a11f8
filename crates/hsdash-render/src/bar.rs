//! Bar chart of total hours per subject.

use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

use hsdash_core::{RenderError, Renderer, SessionSet};

use crate::{ChartTheme, COLUMN_HEIGHT};

/// SVG bar chart renderer configuration
#[derive(Clone, Debug)]
pub struct BarChart {
    /// Total width in pixels
    pub width: u32,
    /// Total height in pixels
    pub height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Width reserved for the y-axis labels
    pub axis_width: u32,
    pub title: String,
    pub theme: ChartTheme,
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            width: 600,
            height: COLUMN_HEIGHT,
            padding: 24,
            axis_width: 48,
            title: "Hours".into(),
            theme: ChartTheme::default(),
        }
    }
}

impl BarChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Configure chart height
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    fn chart_left(&self) -> f64 {
        (self.padding + self.axis_width) as f64
    }

    fn chart_width(&self) -> f64 {
        (self.width - self.padding * 2 - self.axis_width) as f64
    }

    /// Vertical span available for the bars, leaving room for the title
    /// above and the subject labels below.
    fn chart_height(&self) -> f64 {
        (self.height - self.padding * 2 - 48) as f64
    }

    fn chart_top(&self) -> f64 {
        (self.padding + 24) as f64
    }
}

impl Renderer for BarChart {
    type Output = String;

    fn render(&self, data: &SessionSet) -> Result<String, RenderError> {
        if data.subjects.is_empty() {
            return Err(RenderError::InvalidData("no subjects to chart".into()));
        }

        let hours = data.subject_hours();
        let max_hours = hours.iter().cloned().fold(0.0_f64, f64::max);
        // Flat data still renders; bars just have zero height.
        let scale = if max_hours > 0.0 {
            self.chart_height() / max_hours
        } else {
            0.0
        };

        let baseline = self.chart_top() + self.chart_height();
        let slot = self.chart_width() / data.subjects.len() as f64;
        let bar_width = slot * 0.9;

        let mut document = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0, 0, self.width, self.height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.theme.background_color.as_str());
        document = document.add(background);

        let title = Text::new(self.title.as_str())
            .set("x", self.padding)
            .set("y", self.padding - 6)
            .set("font-family", self.theme.font_family.as_str())
            .set("font-size", self.theme.font_size + 3)
            .set("font-weight", "bold")
            .set("fill", self.theme.text_color.as_str());
        document = document.add(title);

        // y axis: gridlines and labels from 0 up to the max value
        let mut axis = Group::new().set("class", "axis");
        let intervals = 4;
        for i in 0..=intervals {
            let value = max_hours * i as f64 / intervals as f64;
            let y = baseline - value * scale;

            let line = Line::new()
                .set("x1", self.chart_left())
                .set("y1", y)
                .set("x2", self.chart_left() + self.chart_width())
                .set("y2", y)
                .set("stroke", self.theme.grid_color.as_str())
                .set("stroke-width", 1);
            axis = axis.add(line);

            let label = Text::new(format!("{value:.1}"))
                .set("x", self.chart_left() - 6.0)
                .set("y", y + 4.0)
                .set("font-family", self.theme.font_family.as_str())
                .set("font-size", self.theme.font_size - 1)
                .set("fill", self.theme.text_color.as_str())
                .set("text-anchor", "end");
            axis = axis.add(label);
        }
        document = document.add(axis);

        // One bar per subject, filled with the subject's palette color
        for (i, subject) in data.subjects.iter().enumerate() {
            let x = self.chart_left() + slot * i as f64 + (slot - bar_width) / 2.0;
            let bar_height = subject.total_hours * scale;

            let bar = Rectangle::new()
                .set("x", x)
                .set("y", baseline - bar_height)
                .set("width", bar_width)
                .set("height", bar_height)
                .set("stroke", "white")
                .set("fill", subject.color.as_str());
            document = document.add(bar);

            let label = Text::new(subject.subject.as_str())
                .set("x", x + bar_width / 2.0)
                .set("y", baseline + 18.0)
                .set("font-family", self.theme.font_family.as_str())
                .set("font-size", self.theme.font_size)
                .set("fill", self.theme.text_color.as_str())
                .set("text-anchor", "middle");
            document = document.add(label);
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("failed to write SVG: {e}")))?;
        String::from_utf8(output).map_err(|e| RenderError::Format(format!("invalid UTF-8: {e}")))
    }
}
