//! Day timeline: logged sessions plotted as date x time-of-day segments.
//!
//! The primary view shows the most recent 30 days; the companion
//! [`RangeStrip`] spans the whole workbook date range and marks where the
//! primary window sits within it.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use svg::node::element::{Line, Rectangle, Text};
use svg::Document;

use hsdash_core::{RenderError, Renderer, SessionSet};

use crate::{ChartTheme, COLUMN_HEIGHT};

/// Primary timeline renderer configuration
#[derive(Clone, Debug)]
pub struct DayTimeline {
    /// Total width in pixels
    pub width: u32,
    /// Total height in pixels
    pub height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Width reserved for the hour labels
    pub axis_width: u32,
    /// Days shown in the default window, counted back from the newest date
    pub window_days: i64,
    /// Stroke width of one session segment
    pub segment_width: u32,
    pub theme: ChartTheme,
}

impl Default for DayTimeline {
    fn default() -> Self {
        Self {
            width: 1100,
            height: COLUMN_HEIGHT,
            padding: 24,
            axis_width: 64,
            window_days: 30,
            segment_width: 8,
            theme: ChartTheme::default(),
        }
    }
}

impl DayTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the default window length
    pub fn window_days(mut self, days: i64) -> Self {
        self.window_days = days;
        self
    }

    fn chart_left(&self) -> f64 {
        (self.padding + self.axis_width) as f64
    }

    fn chart_width(&self) -> f64 {
        (self.width - self.padding * 2 - self.axis_width) as f64
    }

    fn chart_top(&self) -> f64 {
        (self.padding + 18) as f64
    }

    fn chart_height(&self) -> f64 {
        (self.height - self.padding * 2 - 42) as f64
    }

    /// Calculate pixels per day based on date range
    fn pixels_per_day(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let days = (end - start).num_days().max(1) as f64;
        self.chart_width() / days
    }

    /// Convert a date to x position
    fn date_to_x(&self, date: NaiveDate, window_start: NaiveDate, px_per_day: f64) -> f64 {
        let days = (date - window_start).num_days() as f64;
        self.chart_left() + days * px_per_day
    }

    /// Convert a time of day to y position; midnight at the top.
    fn time_to_y(&self, time: NaiveTime) -> f64 {
        let fraction = time.num_seconds_from_midnight() as f64 / 86_400.0;
        self.chart_top() + fraction * self.chart_height()
    }
}

impl Renderer for DayTimeline {
    type Output = String;

    fn render(&self, data: &SessionSet) -> Result<String, RenderError> {
        let (Some(_), Some(max_date)) = (data.min_date, data.max_date) else {
            return Err(RenderError::InvalidData("no dated sessions".into()));
        };

        let window_start = max_date - Duration::days(self.window_days);
        let px_per_day = self.pixels_per_day(window_start, max_date);

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

        // Hour gridlines and labels, every three hours
        for hour in (0_u32..=24).step_by(3) {
            let y = self.chart_top() + hour as f64 / 24.0 * self.chart_height();

            let line = Line::new()
                .set("x1", self.chart_left())
                .set("y1", y)
                .set("x2", self.chart_left() + self.chart_width())
                .set("y2", y)
                .set("stroke", self.theme.grid_color.as_str())
                .set("stroke-width", 1);
            document = document.add(line);

            if hour < 24 {
                let meridiem = if hour < 12 { "AM" } else { "PM" };
                let display = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                let label = Text::new(format!("{display:02}:00 {meridiem}"))
                    .set("x", self.chart_left() - 8.0)
                    .set("y", y + 4.0)
                    .set("font-family", self.theme.font_family.as_str())
                    .set("font-size", self.theme.font_size - 1)
                    .set("fill", self.theme.text_color.as_str())
                    .set("text-anchor", "end");
                document = document.add(label);
            }
        }

        // Date ticks across the top of the window
        let total_days = (max_date - window_start).num_days();
        let interval = if total_days <= 14 { 1 } else { 7 };
        let mut current = window_start;
        while current <= max_date {
            let x = self.date_to_x(current, window_start, px_per_day);

            let tick = Line::new()
                .set("x1", x)
                .set("y1", self.chart_top() - 4.0)
                .set("x2", x)
                .set("y2", self.chart_top() + self.chart_height())
                .set("stroke", self.theme.grid_color.as_str())
                .set("stroke-width", 1);
            document = document.add(tick);

            let label = Text::new(current.format("%b %d").to_string())
                .set("x", x)
                .set("y", self.chart_top() - 8.0)
                .set("font-family", self.theme.font_family.as_str())
                .set("font-size", self.theme.font_size - 1)
                .set("fill", self.theme.text_color.as_str())
                .set("text-anchor", "middle");
            document = document.add(label);

            current += Duration::days(interval);
        }

        // One colored segment per session inside the window
        for subject in &data.subjects {
            for block in &subject.blocks {
                if block.date < window_start || block.date > max_date {
                    continue;
                }
                let x = self.date_to_x(block.date, window_start, px_per_day);
                let segment = Line::new()
                    .set("class", "session")
                    .set("x1", x)
                    .set("y1", self.time_to_y(block.start))
                    .set("x2", x)
                    .set("y2", self.time_to_y(block.end))
                    .set("stroke", block.color.as_str())
                    .set("stroke-width", self.segment_width)
                    .set("stroke-linecap", "round");
                document = document.add(segment);
            }
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("failed to write SVG: {e}")))?;
        String::from_utf8(output).map_err(|e| RenderError::Format(format!("invalid UTF-8: {e}")))
    }
}

/// Context strip spanning the full date range, with the primary window
/// marked. A static rendering of the original's range slider.
#[derive(Clone, Debug)]
pub struct RangeStrip {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    /// Must match the primary timeline's window to mark it correctly
    pub window_days: i64,
    pub theme: ChartTheme,
}

impl Default for RangeStrip {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 80,
            padding: 12,
            window_days: 30,
            theme: ChartTheme::default(),
        }
    }
}

impl RangeStrip {
    pub fn new() -> Self {
        Self::default()
    }

    fn strip_width(&self) -> f64 {
        (self.width - self.padding * 2) as f64
    }
}

impl Renderer for RangeStrip {
    type Output = String;

    fn render(&self, data: &SessionSet) -> Result<String, RenderError> {
        let (Some(min_date), Some(max_date)) = (data.min_date, data.max_date) else {
            return Err(RenderError::InvalidData("no dated sessions".into()));
        };

        let days = (max_date - min_date).num_days().max(1) as f64;
        let px_per_day = self.strip_width() / days;
        let date_to_x = |date: NaiveDate| {
            self.padding as f64 + (date - min_date).num_days() as f64 * px_per_day
        };

        let mut document = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0, 0, self.width, self.height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", "#efefef");
        document = document.add(background);

        // Shade the span the primary timeline displays
        let window_start = (max_date - Duration::days(self.window_days)).max(min_date);
        let overlay_x = date_to_x(window_start);
        let overlay = Rectangle::new()
            .set("x", overlay_x)
            .set("y", 0)
            .set("width", date_to_x(max_date) - overlay_x)
            .set("height", self.height)
            .set("fill", "#cccccc");
        document = document.add(overlay);

        // Every session as a small mark at its date
        let strip_top = self.padding as f64;
        let strip_height = (self.height - self.padding * 2) as f64;
        for subject in &data.subjects {
            for block in &subject.blocks {
                let x = date_to_x(block.date);
                let fraction = block.start.num_seconds_from_midnight() as f64 / 86_400.0;
                let y = strip_top + fraction * strip_height;
                let mark = Line::new()
                    .set("x1", x)
                    .set("y1", y - 2.0)
                    .set("x2", x)
                    .set("y2", y + 2.0)
                    .set("stroke", block.color.as_str())
                    .set("stroke-width", 2);
                document = document.add(mark);
            }
        }

        // Range bound labels
        for (date, anchor, x) in [
            (min_date, "start", date_to_x(min_date) + 2.0),
            (max_date, "end", date_to_x(max_date) - 2.0),
        ] {
            let text = Text::new(date.format("%b %d, %Y").to_string())
                .set("x", x)
                .set("y", self.height - 4)
                .set("font-family", self.theme.font_family.as_str())
                .set("font-size", self.theme.font_size - 2)
                .set("fill", self.theme.text_color.as_str())
                .set("text-anchor", if anchor == "start" { "start" } else { "end" });
            document = document.add(text);
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("failed to write SVG: {e}")))?;
        String::from_utf8(output).map_err(|e| RenderError::Format(format!("invalid UTF-8: {e}")))
    }
}
