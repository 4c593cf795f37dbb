//! SVG charts and diagram images.
//!
//! A small writer with linear axes and a legend. Series are drawn as lines,
//! dashed lines or points. Output is plain SVG text built with `fmt::Write`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use grover_search::{OscillationSeries, PowerLawFit, ScalingRecord};

const PALETTE: [&str; 6] = [
    "#1f77b4", "#d62728", "#2ca02c", "#ff7f0e", "#9467bd", "#8c564b",
];

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 170.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICKS: u32 = 5;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Line,
    Dashed,
    Points,
}

/// One named data series.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub mark: Mark,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            points,
            mark,
        }
    }
}

/// A 2-D chart with linear axes.
#[derive(Debug, Clone)]
pub struct Chart {
    title: String,
    x_label: String,
    y_label: String,
    width: f64,
    height: f64,
    y_range: Option<(f64, f64)>,
    series: Vec<Series>,
}

impl Chart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            width: 800.0,
            height: 500.0,
            y_range: None,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Pin the y axis instead of fitting it to the data.
    #[must_use]
    pub fn y_range(mut self, lo: f64, hi: f64) -> Self {
        self.y_range = Some((lo, hi));
        self
    }

    #[must_use]
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn num_series(&self) -> usize {
        self.series.len()
    }

    fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_lo, mut x_hi, mut y_lo, mut y_hi) = (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for &(x, y) in points {
            x_lo = x_lo.min(x);
            x_hi = x_hi.max(x);
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }
        if !x_lo.is_finite() {
            (x_lo, x_hi, y_lo, y_hi) = (0.0, 1.0, 0.0, 1.0);
        }
        if let Some(range) = self.y_range {
            (y_lo, y_hi) = range;
        } else {
            y_lo = y_lo.min(0.0);
        }
        (widen(x_lo, x_hi), widen(y_lo, y_hi))
    }

    /// Render the chart as an SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = SvgWriter::new(self.width, self.height);
        let ((x_lo, x_hi), (y_lo, y_hi)) = self.bounds();
        let plot_w = self.width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = self.height - MARGIN_TOP - MARGIN_BOTTOM;
        let sx = |x: f64| MARGIN_LEFT + (x - x_lo) / (x_hi - x_lo) * plot_w;
        let sy = |y: f64| MARGIN_TOP + plot_h - (y - y_lo) / (y_hi - y_lo) * plot_h;

        svg.text(self.width / 2.0, 28.0, "middle", 18, &self.title);
        svg.rect(MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h, "#333");

        for i in 0..=TICKS {
            let t = f64::from(i) / f64::from(TICKS);
            let x = x_lo + t * (x_hi - x_lo);
            let y = y_lo + t * (y_hi - y_lo);
            let px = sx(x);
            let py = sy(y);
            svg.line(px, MARGIN_TOP + plot_h, px, MARGIN_TOP + plot_h + 5.0);
            svg.text(px, MARGIN_TOP + plot_h + 20.0, "middle", 12, &tick_label(x));
            svg.line(MARGIN_LEFT - 5.0, py, MARGIN_LEFT, py);
            svg.text(MARGIN_LEFT - 8.0, py + 4.0, "end", 12, &tick_label(y));
        }

        svg.text(
            MARGIN_LEFT + plot_w / 2.0,
            self.height - 15.0,
            "middle",
            14,
            &self.x_label,
        );
        svg.vertical_text(20.0, MARGIN_TOP + plot_h / 2.0, 14, &self.y_label);

        for (i, series) in self.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let mapped: Vec<(f64, f64)> =
                series.points.iter().map(|&(x, y)| (sx(x), sy(y))).collect();
            match series.mark {
                Mark::Line => svg.polyline(&mapped, color, None),
                Mark::Dashed => svg.polyline(&mapped, color, Some("6,4")),
                Mark::Points => {
                    for &(x, y) in &mapped {
                        svg.circle(x, y, 4.0, color);
                    }
                }
            }

            #[allow(clippy::cast_precision_loss)]
            let ly = MARGIN_TOP + 10.0 + 22.0 * i as f64;
            let lx = self.width - MARGIN_RIGHT + 15.0;
            match series.mark {
                Mark::Points => svg.circle(lx + 10.0, ly, 4.0, color),
                Mark::Line => svg.polyline(&[(lx, ly), (lx + 20.0, ly)], color, None),
                Mark::Dashed => svg.polyline(&[(lx, ly), (lx + 20.0, ly)], color, Some("6,4")),
            }
            svg.text(lx + 28.0, ly + 4.0, "start", 12, &series.name);
        }

        svg.finish()
    }

    /// Write the SVG document to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_svg())
            .with_context(|| format!("Failed to write chart: {}", path.display()))
    }
}

/// Success probability against `k`, one line per marked-set size.
#[allow(clippy::cast_precision_loss)]
pub fn oscillation_chart(series: &[OscillationSeries]) -> Chart {
    let n = series.first().map_or(0, |s| s.num_qubits);
    series.iter().fold(
        Chart::new(format!("Grover oscillations (n = {n})"))
            .x_label("iterations k")
            .y_label("success probability")
            .y_range(0.0, 1.0),
        |chart, s| {
            let points = s
                .points
                .iter()
                .map(|p| (p.k as f64, p.success_probability))
                .collect();
            chart.series(Series::new(format!("M = {}", s.marked.len()), points, Mark::Line))
        },
    )
}

/// Iterations against `√N`, points per marked-set size plus fitted curves.
#[allow(clippy::cast_precision_loss)]
pub fn scaling_chart(records: &[ScalingRecord], fits: &[(u64, PowerLawFit)]) -> Chart {
    let mut sizes: Vec<u64> = records.iter().map(|r| r.num_marked).collect();
    sizes.sort_unstable();
    sizes.dedup();

    let mut chart = Chart::new("Grover iteration scaling")
        .x_label("sqrt(N)")
        .y_label("iterations");
    for m in sizes {
        let points: Vec<(f64, f64)> = records
            .iter()
            .filter(|r| r.num_marked == m)
            .map(|r| (r.problem_size_sqrt, r.iterations as f64))
            .collect();
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        chart = chart.series(Series::new(format!("M = {m}"), points, Mark::Points));

        if let Some((_, fit)) = fits.iter().find(|(fm, _)| *fm == m) {
            let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if lo.is_finite() && hi > lo {
                let curve = (0..=20)
                    .map(|i| lo + (hi - lo) * f64::from(i) / 20.0)
                    .map(|x| (x, fit.predict(x)))
                    .collect();
                chart = chart.series(Series::new(
                    format!("fit M={m}: slope {:.2}", fit.slope),
                    curve,
                    Mark::Dashed,
                ));
            }
        }
    }
    chart
}

/// Wrap monospace text (a circuit diagram) in an SVG document.
#[allow(clippy::cast_precision_loss)]
pub fn text_svg(title: &str, text: &str) -> String {
    const CHAR_W: f64 = 8.4;
    const LINE_H: f64 = 17.0;

    let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let rows = text.lines().count();
    let width = (columns as f64 * CHAR_W + 40.0).max(200.0);
    let height = rows as f64 * LINE_H + 70.0;

    let mut svg = SvgWriter::new(width, height);
    svg.text(20.0, 28.0, "start", 16, title);
    for (i, line) in text.lines().enumerate() {
        svg.mono(20.0, 55.0 + i as f64 * LINE_H, line);
    }
    svg.finish()
}

/// Write [`text_svg`] output to `path`.
pub fn write_text_svg(path: &Path, title: &str, text: &str) -> Result<()> {
    fs::write(path, text_svg(title, text))
        .with_context(|| format!("Failed to write diagram: {}", path.display()))
}

fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo > f64::EPSILON {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn tick_label(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Accumulates SVG elements.
struct SvgWriter {
    output: String,
}

// Writing into a String cannot fail, so the fmt results are dropped.
impl SvgWriter {
    fn new(width: f64, height: f64) -> Self {
        let mut output = String::new();
        let _ = writeln!(
            output,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif">"#
        );
        let _ = writeln!(output, r#"<rect width="100%" height="100%" fill="white"/>"#);
        Self { output }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, stroke: &str) {
        let _ = writeln!(
            self.output,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="none" stroke="{stroke}"/>"#
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let _ = writeln!(
            self.output,
            r##"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="#333"/>"##
        );
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: &str, dash: Option<&str>) {
        if points.is_empty() {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect();
        let dash = dash.map_or(String::new(), |d| format!(r#" stroke-dasharray="{d}""#));
        let _ = writeln!(
            self.output,
            r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"{dash}/>"#,
            coords.join(" ")
        );
    }

    fn circle(&mut self, x: f64, y: f64, r: f64, color: &str) {
        let _ = writeln!(
            self.output,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="{r:.1}" fill="{color}"/>"#
        );
    }

    fn text(&mut self, x: f64, y: f64, anchor: &str, size: u32, text: &str) {
        let _ = writeln!(
            self.output,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{anchor}" font-size="{size}">{}</text>"#,
            escape(text)
        );
    }

    fn vertical_text(&mut self, x: f64, y: f64, size: u32, text: &str) {
        let _ = writeln!(
            self.output,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="{size}" transform="rotate(-90 {x:.1} {y:.1})">{}</text>"#,
            escape(text)
        );
    }

    fn mono(&mut self, x: f64, y: f64, text: &str) {
        let _ = writeln!(
            self.output,
            r#"<text x="{x:.1}" y="{y:.1}" font-family="monospace" font-size="14" xml:space="preserve">{}</text>"#,
            escape(text)
        );
    }

    fn finish(mut self) -> String {
        self.output.push_str("</svg>\n");
        self.output
    }
}
