//! Bar chart of average improvement per track on a fixed [-10, 10] axis.
//!
//! Drawing goes through [`DrawSurface`], so the same renderer feeds the SVG
//! shown in the dashboard and the recording surface used in tests.

use std::fmt::Write as _;

use crate::{
    analytics::stats::SessionStats,
    core::{catalog::TrackCatalog, format::format_improvement},
};

pub const AXIS_MIN: f64 = -10.0;
pub const AXIS_MAX: f64 = 10.0;
const GRID_STEP: f64 = 5.0;

const AXIS_COLOR: &str = "#93a4b8";
const GRID_COLOR: &str = "#1f2a37";
const ZERO_COLOR: &str = "#3b556d";
const TICK_COLOR: &str = "#c9d6e7";
const BAR_COLOR: &str = "#1d4ed8";
const LABEL_COLOR: &str = "#e8eef6";

/// Minimal 2D drawing API the chart needs.
pub trait DrawSurface {
    fn clear(&mut self);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str);
    fn text(&mut self, x: f64, y: f64, size_px: f64, fill: &str, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub max_bar_width: f64,
    /// Share of each category slot occupied by its bar.
    pub bar_fill: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 320.0,
            padding_left: 60.0,
            padding_right: 24.0,
            padding_top: 20.0,
            padding_bottom: 50.0,
            max_bar_width: 140.0,
            bar_fill: 0.6,
        }
    }
}

impl ChartLayout {
    fn plot_width(&self) -> f64 {
        (self.width - self.padding_left - self.padding_right).max(0.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - self.padding_top - self.padding_bottom).max(0.0)
    }

    /// Vertical pixel position of an axis value (clamped to the axis range).
    pub fn y_for(&self, value: f64) -> f64 {
        let value = value.clamp(AXIS_MIN, AXIS_MAX);
        let h = self.plot_height();
        self.padding_top + h - ((value - AXIS_MIN) / (AXIS_MAX - AXIS_MIN)) * h
    }
}

/// Draw one bar per catalog track. `stats` is only read.
pub fn render_chart<S: DrawSurface>(
    surface: &mut S,
    stats: &SessionStats,
    catalog: &TrackCatalog,
    layout: &ChartLayout,
) {
    surface.clear();

    let left = layout.padding_left;
    let top = layout.padding_top;
    let w = layout.plot_width();
    let h = layout.plot_height();

    surface.line((left, top), (left, top + h), AXIS_COLOR);
    surface.line((left, top + h), (left + w, top + h), AXIS_COLOR);

    let mut tick = AXIS_MIN;
    while tick <= AXIS_MAX {
        let y = layout.y_for(tick);
        surface.line((left, y), (left + w, y), GRID_COLOR);
        surface.text(18.0, y + 4.0, 12.0, TICK_COLOR, &format!("{tick:.0}"));
        tick += GRID_STEP;
    }

    let y_zero = layout.y_for(0.0);
    surface.line((left, y_zero), (left + w, y_zero), ZERO_COLOR);

    let tracks = catalog.tracks();
    if tracks.is_empty() {
        return;
    }
    let gap = w / tracks.len() as f64;
    let bar_width = layout.max_bar_width.min(gap * layout.bar_fill);

    for (i, track) in tracks.iter().enumerate() {
        let value = stats.average_improvement(&track.category);
        let x = left + i as f64 * gap + (gap - bar_width) / 2.0;
        let y_value = layout.y_for(value);
        let y = y_value.min(y_zero);
        let bar_height = (y_zero - y_value).abs();

        surface.fill_rect(x, y, bar_width, bar_height, BAR_COLOR);

        let label_y = if value < 0.0 {
            y + bar_height + 16.0
        } else {
            y - 8.0
        };
        surface.text(x + 6.0, label_y, 13.0, LABEL_COLOR, &format_improvement(value));
        surface.text(x + 6.0, top + h + 30.0, 14.0, LABEL_COLOR, &track.label);
    }
}

/// Accumulates SVG markup; [`SvgSurface::finish`] yields the document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 {w} {h}' width='100%' role='img' font-family='system-ui, sans-serif'>{body}</svg>",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str) {
        let _ = write!(
            self.body,
            "<line x1='{:.1}' y1='{:.1}' x2='{:.1}' y2='{:.1}' stroke='{stroke}' stroke-width='1'/>",
            from.0, from.1, to.0, to.1
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        let _ = write!(
            self.body,
            "<rect x='{x:.1}' y='{y:.1}' width='{width:.1}' height='{height:.1}' fill='{fill}'/>"
        );
    }

    fn text(&mut self, x: f64, y: f64, size_px: f64, fill: &str, text: &str) {
        let _ = write!(
            self.body,
            "<text x='{x:.1}' y='{y:.1}' font-size='{size_px}' fill='{fill}'>{}</text>",
            escape_xml(text)
        );
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the chart to standalone SVG markup.
pub fn chart_svg(stats: &SessionStats, catalog: &TrackCatalog, layout: &ChartLayout) -> String {
    let mut surface = SvgSurface::new(layout.width, layout.height);
    render_chart(&mut surface, stats, catalog, layout);
    surface.finish()
}
