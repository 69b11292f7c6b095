//! SVG line charts of temperature series.
//!
//! Each chart draws every series as a polyline over a shared time axis, with a
//! legend naming the series. The plotted window is either derived from the data
//! (with a 5% margin) or fixed with [`LineChart::with_x_range`] and
//! [`LineChart::with_y_range`]. Anything outside the window is clipped.

use crate::scenarios::Series;
use log::info;
use radex_core::errors::RadexResult;
use radex_core::timeseries::{FloatValue, Time};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

const PALETTE: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];
const MARKERS: [Marker; 5] = [
    Marker::Circle,
    Marker::TriangleRight,
    Marker::TriangleDown,
    Marker::Star,
    Marker::Square,
];

/// Markers are only drawn when a series has at most this many visible points.
const MAX_MARKED_POINTS: usize = 80;

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 70.0;

/// Chart dimensions and the window of the zoomed chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Width in pixels.
    /// Default: 1200
    pub width: u32,

    /// Height in pixels.
    /// Default: 700
    pub height: u32,

    /// Time window of the zoomed chart (s).
    /// Default: [0.1, 0.102]
    pub zoom_time: [Time; 2],

    /// Temperature window of the zoomed chart (K).
    /// Default: [950.0, 1000.0]
    pub zoom_temperature: [FloatValue; 2],
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            zoom_time: [0.1, 0.102],
            zoom_temperature: [950.0, 1000.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Marker {
    Circle,
    TriangleRight,
    TriangleDown,
    Star,
    Square,
}

impl Marker {
    fn write_svg<W: Write>(
        &self,
        out: &mut W,
        x: f64,
        y: f64,
        colour: &str,
    ) -> std::io::Result<()> {
        let r = 4.0;
        match self {
            Marker::Circle => writeln!(
                out,
                "<circle cx='{:.2}' cy='{:.2}' r='{}' fill='{}'/>",
                x, y, r, colour
            ),
            Marker::Square => writeln!(
                out,
                "<rect x='{:.2}' y='{:.2}' width='{}' height='{}' fill='{}'/>",
                x - r,
                y - r,
                2.0 * r,
                2.0 * r,
                colour
            ),
            Marker::TriangleRight => polygon(
                out,
                &[(x + r, y), (x - r, y - r), (x - r, y + r)],
                colour,
            ),
            Marker::TriangleDown => polygon(
                out,
                &[(x, y + r), (x - r, y - r), (x + r, y - r)],
                colour,
            ),
            Marker::Star => {
                let points: Vec<(f64, f64)> = (0..10)
                    .map(|i| {
                        let radius = if i % 2 == 0 { r * 1.3 } else { r * 0.55 };
                        let angle = -std::f64::consts::FRAC_PI_2
                            + i as f64 * std::f64::consts::PI / 5.0;
                        (x + radius * angle.cos(), y + radius * angle.sin())
                    })
                    .collect();
                polygon(out, &points, colour)
            }
        }
    }
}

fn polygon<W: Write>(out: &mut W, points: &[(f64, f64)], colour: &str) -> std::io::Result<()> {
    let points: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect();
    writeln!(
        out,
        "<polygon points='{}' fill='{}'/>",
        points.join(" "),
        colour
    )
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Round step between ticks so that roughly `target` ticks span `span`.
fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick positions inside `[min, max]` and the number of decimals to print them with.
fn ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, usize) {
    let step = nice_step(max - min, target);
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    // Tolerate rounding so that window edges on a tick keep their tick
    let first = (min / step - 1e-9).ceil();
    let last = (max / step + 1e-9).floor();

    let ticks = (0..=(last - first) as i64)
        .map(|i| (first + i as f64) * step)
        .collect();
    (ticks, decimals)
}

/// Data range padded by 5% on both sides.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let margin = 0.05 * (max - min);
    (min - margin, max + margin)
}

/// A line chart of one or more series over a shared x-axis.
#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    series: Vec<Series<'a>>,
    x_label: String,
    y_label: String,
    x_range: (f64, f64),
    y_range: (f64, f64),
    width: u32,
    height: u32,
}

impl<'a> LineChart<'a> {
    /// Temperature-over-time chart of `series`, windowed to the full data range.
    pub fn new(series: Vec<Series<'a>>, settings: &ChartSettings) -> Self {
        let x_range = padded_range(series.iter().flat_map(|s| s.times.iter().copied()));
        let y_range = padded_range(series.iter().flat_map(|s| s.values.iter().copied()));
        Self {
            series,
            x_label: "Time [s]".to_string(),
            y_label: "Temperature [K]".to_string(),
            x_range,
            y_range,
            width: settings.width,
            height: settings.height,
        }
    }

    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = (min, max);
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = (min, max);
        self
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    fn plot_width(&self) -> f64 {
        self.width as f64 - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        self.height as f64 - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x_of(&self, v: f64) -> f64 {
        let (min, max) = self.x_range;
        MARGIN_LEFT + (v - min) / (max - min) * self.plot_width()
    }

    fn y_of(&self, v: f64) -> f64 {
        let (min, max) = self.y_range;
        MARGIN_TOP + (1.0 - (v - min) / (max - min)) * self.plot_height()
    }

    fn in_window(&self, x: f64, y: f64) -> bool {
        x >= self.x_range.0 && x <= self.x_range.1 && y >= self.y_range.0 && y <= self.y_range.1
    }

    /// Write the chart as an SVG document.
    pub fn render<W: Write>(&self, out: &mut W) -> RadexResult<()> {
        let (width, height) = (self.width, self.height);
        let (plot_w, plot_h) = (self.plot_width(), self.plot_height());

        writeln!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'>"
        )?;
        writeln!(
            out,
            "<rect x='0' y='0' width='{width}' height='{height}' fill='#ffffff'/>"
        )?;
        writeln!(
            out,
            "<defs><clipPath id='plot-area'><rect x='{}' y='{}' width='{:.2}' height='{:.2}'/></clipPath></defs>",
            MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h
        )?;

        self.render_axes(out)?;

        for (i, series) in self.series.iter().enumerate() {
            let colour = PALETTE[i % PALETTE.len()];
            let points: Vec<(f64, f64)> = series
                .times
                .iter()
                .zip(series.values.iter())
                .filter(|(t, v)| t.is_finite() && v.is_finite())
                .map(|(t, v)| (*t, *v))
                .collect();
            let path: Vec<String> = points
                .iter()
                .map(|(t, v)| format!("{:.2},{:.2}", self.x_of(*t), self.y_of(*v)))
                .collect();
            writeln!(
                out,
                "<polyline clip-path='url(#plot-area)' fill='none' stroke='{}' stroke-width='1.5' points='{}'/>",
                colour,
                path.join(" ")
            )?;

            let visible: Vec<&(f64, f64)> = points
                .iter()
                .filter(|(t, v)| self.in_window(*t, *v))
                .collect();
            if visible.len() <= MAX_MARKED_POINTS {
                let marker = MARKERS[i % MARKERS.len()];
                for (t, v) in visible {
                    marker.write_svg(out, self.x_of(*t), self.y_of(*v), colour)?;
                }
            }
        }

        self.render_legend(out)?;
        writeln!(out, "</svg>")?;
        Ok(())
    }

    fn render_axes<W: Write>(&self, out: &mut W) -> RadexResult<()> {
        let (plot_w, plot_h) = (self.plot_width(), self.plot_height());
        let bottom = MARGIN_TOP + plot_h;

        let (x_ticks, x_decimals) = ticks(self.x_range.0, self.x_range.1, 8);
        for tick in x_ticks {
            let x = self.x_of(tick);
            writeln!(
                out,
                "<line x1='{:.2}' y1='{}' x2='{:.2}' y2='{:.2}' stroke='#e5e7eb' stroke-width='1'/>",
                x, MARGIN_TOP, x, bottom
            )?;
            writeln!(
                out,
                "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-family='sans-serif' font-size='13' fill='#374151'>{:.*}</text>",
                x,
                bottom + 20.0,
                x_decimals,
                tick
            )?;
        }

        let (y_ticks, y_decimals) = ticks(self.y_range.0, self.y_range.1, 8);
        for tick in y_ticks {
            let y = self.y_of(tick);
            writeln!(
                out,
                "<line x1='{}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='#e5e7eb' stroke-width='1'/>",
                MARGIN_LEFT,
                y,
                MARGIN_LEFT + plot_w,
                y
            )?;
            writeln!(
                out,
                "<text x='{:.2}' y='{:.2}' text-anchor='end' font-family='sans-serif' font-size='13' fill='#374151'>{:.*}</text>",
                MARGIN_LEFT - 8.0,
                y + 4.0,
                y_decimals,
                tick
            )?;
        }

        writeln!(
            out,
            "<rect x='{}' y='{}' width='{:.2}' height='{:.2}' fill='none' stroke='#111827' stroke-width='1'/>",
            MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h
        )?;
        writeln!(
            out,
            "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-family='sans-serif' font-size='15' fill='#111827'>{}</text>",
            MARGIN_LEFT + plot_w / 2.0,
            bottom + 50.0,
            xml_escape(&self.x_label)
        )?;
        let y_mid = MARGIN_TOP + plot_h / 2.0;
        writeln!(
            out,
            "<text x='25' y='{:.2}' text-anchor='middle' transform='rotate(-90 25 {:.2})' font-family='sans-serif' font-size='15' fill='#111827'>{}</text>",
            y_mid,
            y_mid,
            xml_escape(&self.y_label)
        )?;
        Ok(())
    }

    fn render_legend<W: Write>(&self, out: &mut W) -> RadexResult<()> {
        let row_h = 22.0;
        let box_w = 230.0;
        let box_h = 12.0 + row_h * self.series.len() as f64;
        let x0 = MARGIN_LEFT + self.plot_width() - box_w - 12.0;
        let y0 = MARGIN_TOP + 12.0;

        writeln!(
            out,
            "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='#ffffff' fill-opacity='0.85' stroke='#d1d5db'/>",
            x0, y0, box_w, box_h
        )?;

        for (i, series) in self.series.iter().enumerate() {
            let colour = PALETTE[i % PALETTE.len()];
            let yc = y0 + 6.0 + row_h * (i as f64 + 0.5);
            writeln!(
                out,
                "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-width='1.5'/>",
                x0 + 10.0,
                yc,
                x0 + 40.0,
                yc,
                colour
            )?;
            MARKERS[i % MARKERS.len()].write_svg(out, x0 + 25.0, yc, colour)?;
            writeln!(
                out,
                "<text x='{:.2}' y='{:.2}' font-family='sans-serif' font-size='13' fill='#111827'>{}</text>",
                x0 + 50.0,
                yc + 4.0,
                xml_escape(series.label)
            )?;
        }
        Ok(())
    }

    pub fn write_svg(&self, path: &Path) -> RadexResult<()> {
        let mut out = BufWriter::new(fs::File::create(path)?);
        self.render(&mut out)?;
        out.flush()?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(chart: &LineChart) -> String {
        let mut buffer = Vec::new();
        chart.render(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_nice_ticks() {
        let (values, decimals) = ticks(0.0, 0.2, 8);
        assert_eq!(decimals, 2);
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 0.0);
        assert!((values[4] - 0.2).abs() < 1e-12);

        let (values, decimals) = ticks(0.1, 0.102, 8);
        assert_eq!(decimals, 4);
        assert_eq!(values.len(), 5);
        assert!((values[0] - 0.1).abs() < 1e-12);

        let (values, decimals) = ticks(950.0, 1000.0, 8);
        assert_eq!(decimals, 0);
        assert_eq!(values.first().copied(), Some(950.0));
        assert_eq!(values.last().copied(), Some(1000.0));
    }

    #[test]
    fn test_padded_range() {
        let (min, max) = padded_range([0.0, 10.0].into_iter());
        assert!((min + 0.5).abs() < 1e-12);
        assert!((max - 10.5).abs() < 1e-12);

        assert_eq!(padded_range([3.0].into_iter()), (2.5, 3.5));
        assert_eq!(padded_range([f64::NAN].into_iter()), (0.0, 1.0));
    }

    #[test]
    fn test_labels_are_escaped() {
        let times = [0.0, 1.0];
        let values = [1.0, 2.0];
        let series = vec![Series {
            label: "A <&> B",
            times: &times,
            values: &values,
        }];
        let svg = render(&LineChart::new(series, &ChartSettings::default()));

        assert!(svg.contains("A &lt;&amp;&gt; B"));
        assert!(svg.contains("Time [s]"));
        assert!(svg.contains("Temperature [K]"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_markers_only_for_sparse_windows() {
        let times: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let values: Vec<f64> = times.iter().map(|t| 2.0 * t).collect();
        let series = vec![Series {
            label: "line",
            times: &times,
            values: &values,
        }];

        let full = LineChart::new(series.clone(), &ChartSettings::default());
        // One circle in the legend, none on the 1000-point line
        assert_eq!(render(&full).matches("<circle").count(), 1);

        let zoomed = full.with_x_range(10.0, 20.0).with_y_range(0.0, 100.0);
        // Points 10..=20 have values 20..=40, all inside the window
        assert_eq!(render(&zoomed).matches("<circle").count(), 1 + 11);
    }
}
