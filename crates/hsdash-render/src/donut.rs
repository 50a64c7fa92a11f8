//! Donut chart of each subject's share of total hours.

use std::f64::consts::PI;

use svg::node::element::path::Data as PathData;
use svg::node::element::{Circle, Path, Rectangle, Text};
use svg::Document;

use hsdash_core::{percentage, RenderError, Renderer, SessionSet};

use crate::{ChartTheme, COLUMN_HEIGHT};

/// SVG donut chart renderer configuration
#[derive(Clone, Debug)]
pub struct DonutChart {
    /// Total width in pixels
    pub width: u32,
    /// Total height in pixels
    pub height: u32,
    /// Inner radius as a fraction of the outer radius
    pub inner_fraction: f64,
    pub title: String,
    pub theme: ChartTheme,
}

impl Default for DonutChart {
    fn default() -> Self {
        Self {
            width: 600,
            height: COLUMN_HEIGHT,
            inner_fraction: 0.43,
            title: "Classes".into(),
            theme: ChartTheme::default(),
        }
    }
}

impl DonutChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Per-subject share of the total, rounded the same way the legend
    /// displays it.
    fn percentages(data: &SessionSet) -> Vec<f64> {
        let total = data.total_hours();
        data.subject_hours()
            .iter()
            .map(|&h| percentage(h, total))
            .collect()
    }

    /// One annular wedge from `a0` to `a1` (radians, counterclockwise from
    /// the positive x axis).
    fn wedge(cx: f64, cy: f64, r_inner: f64, r_outer: f64, a0: f64, a1: f64) -> PathData {
        let point = |r: f64, a: f64| (cx + r * a.cos(), cy - r * a.sin());
        let large_arc = i32::from(a1 - a0 > PI);

        let (x0, y0) = point(r_outer, a0);
        let (x1, y1) = point(r_outer, a1);
        let (x2, y2) = point(r_inner, a1);
        let (x3, y3) = point(r_inner, a0);

        PathData::new()
            .move_to((x0, y0))
            .elliptical_arc_to((r_outer, r_outer, 0, large_arc, 0, x1, y1))
            .line_to((x2, y2))
            .elliptical_arc_to((r_inner, r_inner, 0, large_arc, 1, x3, y3))
            .close()
    }
}

impl Renderer for DonutChart {
    type Output = String;

    fn render(&self, data: &SessionSet) -> Result<String, RenderError> {
        if data.subjects.is_empty() {
            return Err(RenderError::InvalidData("no subjects to chart".into()));
        }
        if data.total_hours() <= 0.0 {
            return Err(RenderError::InvalidData(
                "no logged hours to apportion".into(),
            ));
        }

        let percentages = Self::percentages(data);

        // Cumulative angles; wedge i spans angles[i]..angles[i + 1].
        let mut angles = vec![0.0_f64];
        let mut running = 0.0;
        for pct in &percentages {
            running += pct;
            angles.push(running / 100.0 * 2.0 * PI);
        }

        let legend_height = 28.0;
        let cx = self.width as f64 / 2.0;
        let cy = (self.height as f64 - legend_height + 20.0) / 2.0;
        let r_outer = (self.height as f64 - legend_height) / 2.0 - 30.0;
        let r_inner = r_outer * self.inner_fraction;

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
            .set("x", 24)
            .set("y", 20)
            .set("font-family", self.theme.font_family.as_str())
            .set("font-size", self.theme.font_size + 3)
            .set("font-weight", "bold")
            .set("fill", self.theme.text_color.as_str());
        document = document.add(title);

        for (i, subject) in data.subjects.iter().enumerate() {
            let sweep = angles[i + 1] - angles[i];
            if sweep <= 0.0 {
                continue;
            }

            // A single wedge covering the whole circle degenerates as an
            // arc; draw it as a stroked ring instead.
            if sweep >= 2.0 * PI - 1e-6 {
                let ring = Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", (r_inner + r_outer) / 2.0)
                    .set("fill", "none")
                    .set("stroke", subject.color.as_str())
                    .set("stroke-width", r_outer - r_inner);
                document = document.add(ring);
                continue;
            }

            let path = Path::new()
                .set("d", Self::wedge(cx, cy, r_inner, r_outer, angles[i], angles[i + 1]))
                .set("fill", subject.color.as_str())
                .set("stroke", "white")
                .set("stroke-width", 1);
            document = document.add(path);
        }

        // Legend row with the rounded share next to each label
        let mut x = 24.0;
        let legend_y = self.height as f64 - 10.0;
        for (subject, pct) in data.subjects.iter().zip(&percentages) {
            let swatch = Rectangle::new()
                .set("x", x)
                .set("y", legend_y - 10.0)
                .set("width", 12)
                .set("height", 12)
                .set("fill", subject.color.as_str());
            document = document.add(swatch);

            let label = format!("{} ({pct:.2}%)", subject.subject);
            let advance = 20.0 + label.len() as f64 * 7.0;
            let text = Text::new(label)
                .set("x", x + 16.0)
                .set("y", legend_y)
                .set("font-family", self.theme.font_family.as_str())
                .set("font-size", self.theme.font_size - 1)
                .set("fill", self.theme.text_color.as_str());
            document = document.add(text);
            x += advance;
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("failed to write SVG: {e}")))?;
        String::from_utf8(output).map_err(|e| RenderError::Format(format!("invalid UTF-8: {e}")))
    }
}
