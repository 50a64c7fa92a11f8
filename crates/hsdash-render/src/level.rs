//! Reading-level trend line.

use svg::node::element::{Circle, Polyline, Rectangle, Text};
use svg::Document;

use hsdash_core::{palette_color, RenderError, Renderer, SessionSet};

use crate::{ChartTheme, COLUMN_HEIGHT};

/// SVG reading-level chart renderer configuration
#[derive(Clone, Debug)]
pub struct ReadingLevelChart {
    /// Total width in pixels
    pub width: u32,
    /// Total height in pixels
    pub height: u32,
    /// Padding around the chart
    pub padding: u32,
    pub title: String,
    pub theme: ChartTheme,
}

impl Default for ReadingLevelChart {
    fn default() -> Self {
        Self {
            width: 600,
            height: COLUMN_HEIGHT,
            padding: 32,
            title: "Reading Level".into(),
            theme: ChartTheme::default(),
        }
    }
}

impl ReadingLevelChart {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for ReadingLevelChart {
    type Output = String;

    fn render(&self, data: &SessionSet) -> Result<String, RenderError> {
        let series = data
            .reading_level
            .as_ref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RenderError::InvalidData("no reading-level data".into()))?;

        let points = &series.points;
        let min_date = points.iter().map(|p| p.date).min().unwrap_or_default();
        let max_date = points.iter().map(|p| p.date).max().unwrap_or_default();
        let min_level = points.iter().map(|p| p.level).fold(f64::INFINITY, f64::min);
        let max_level = points
            .iter()
            .map(|p| p.level)
            .fold(f64::NEG_INFINITY, f64::max);

        let chart_left = (self.padding + 36) as f64;
        let chart_width = (self.width - self.padding * 2 - 36) as f64;
        let chart_top = (self.padding + 12) as f64;
        let chart_height = (self.height - self.padding * 2 - 12) as f64;

        let day_span = (max_date - min_date).num_days().max(1) as f64;
        let level_span = (max_level - min_level).max(0.5);

        let x_of = |p: &hsdash_core::LevelPoint| {
            chart_left + (p.date - min_date).num_days() as f64 / day_span * chart_width
        };
        let y_of = |p: &hsdash_core::LevelPoint| {
            chart_top + (max_level - p.level) / level_span * chart_height
        };

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
            .set("y", self.padding - 8)
            .set("font-family", self.theme.font_family.as_str())
            .set("font-size", self.theme.font_size + 3)
            .set("font-weight", "bold")
            .set("fill", self.theme.text_color.as_str());
        document = document.add(title);

        // Level bounds on the left; the date axis stays unlabeled
        for (value, p_y) in [(max_level, chart_top), (min_level, chart_top + chart_height)] {
            let label = Text::new(format!("{value:.1}"))
                .set("x", chart_left - 8.0)
                .set("y", p_y + 4.0)
                .set("font-family", self.theme.font_family.as_str())
                .set("font-size", self.theme.font_size - 1)
                .set("fill", self.theme.text_color.as_str())
                .set("text-anchor", "end");
            document = document.add(label);
        }

        // Connect observations in source row order, not date order
        let path: Vec<String> = points
            .iter()
            .map(|p| format!("{:.1},{:.1}", x_of(p), y_of(p)))
            .collect();
        let line = Polyline::new()
            .set("points", path.join(" "))
            .set("fill", "none")
            .set("stroke", palette_color(1))
            .set("stroke-width", 2);
        document = document.add(line);

        for point in points {
            let dot = Circle::new()
                .set("cx", x_of(point))
                .set("cy", y_of(point))
                .set("r", 3)
                .set("fill", palette_color(0));
            document = document.add(dot);
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("failed to write SVG: {e}")))?;
        String::from_utf8(output).map_err(|e| RenderError::Format(format!("invalid UTF-8: {e}")))
    }
}
