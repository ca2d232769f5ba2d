//! PNG chart renderer drawing directly into an `image` buffer.
//!
//! Charts are plain geometry: axes, bars and polylines on a white canvas.
//! Titles and labels are not drawn; the file name carries the chart's identity.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::ports::renderer::{Chart, ChartKind, ChartRenderer, LineSeries};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 720;
const MARGIN: u32 = 48;
const PANEL_GAP: u32 = 32;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const PALETTE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];

/// Writes each chart as `<output_dir>/<file_stem>.png`.
pub struct PngChartRenderer {
    output_dir: PathBuf,
}

impl PngChartRenderer {
    /// Creates a renderer writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: &Path) -> Self {
        Self { output_dir: output_dir.to_path_buf() }
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, chart: &Chart) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        let mut canvas = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
        let area = Area { x: MARGIN, y: MARGIN, w: WIDTH - 2 * MARGIN, h: HEIGHT - 2 * MARGIN };

        match &chart.kind {
            ChartKind::Histogram { values, bins } => {
                let counts = histogram_counts(values, *bins);
                draw_columns(&mut canvas, area, &counts, PALETTE[0]);
            }
            ChartKind::Bars { values, .. } => draw_columns(&mut canvas, area, values, PALETTE[0]),
            ChartKind::StackedBars { segments, .. } => draw_stacked_rows(&mut canvas, area, segments),
            ChartKind::Lines { panels } => draw_panels(&mut canvas, area, panels),
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.png", chart.file_stem));
        canvas.save(&path)?;
        tracing::debug!(path = %path.display(), title = %chart.title, "Chart written");
        Ok(path)
    }
}

/// Counts `values` into `bins` equal-width bins spanning their range.
///
/// The last bin is closed on the right so the maximum is counted. When every
/// value is equal they all fall into the first bin.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn histogram_counts(values: &[f64], bins: usize) -> Vec<u64> {
    let bins = bins.max(1);
    let mut counts = vec![0_u64; bins];
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some(min) = finite.iter().copied().reduce(f64::min) else {
        return counts;
    };
    let max = finite.iter().copied().fold(min, f64::max);
    let width = (max - min) / bins as f64;

    for v in finite {
        let idx = if width > 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let raw = ((v - min) / width) as usize;
            raw.min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy)]
struct Area {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

fn draw_axes(canvas: &mut RgbImage, area: Area) {
    for step in 1..=4 {
        let y = area.y + area.h * step / 5;
        fill_rect(canvas, area.x, y, area.w, 1, GRID);
    }
    fill_rect(canvas, area.x, area.y + area.h, area.w, 2, AXIS);
    fill_rect(canvas, area.x, area.y, 2, area.h, AXIS);
}

fn draw_columns(canvas: &mut RgbImage, area: Area, heights: &[u64], color: Rgb<u8>) {
    draw_axes(canvas, area);
    let Some(&peak) = heights.iter().max() else {
        return;
    };
    if peak == 0 {
        return;
    }
    let slot = area.w / u32::try_from(heights.len()).unwrap_or(u32::MAX).max(1);
    let bar = (slot * 4 / 5).max(1);
    for (i, &h) in (0_u32..).zip(heights) {
        let bar_h = scale(h, peak, area.h);
        let x = area.x + 2 + i * slot + (slot - bar) / 2;
        fill_rect(canvas, x, area.y + area.h - bar_h, bar, bar_h, color);
    }
}

fn draw_stacked_rows(canvas: &mut RgbImage, area: Area, rows: &[Vec<u64>]) {
    draw_axes(canvas, area);
    let peak = rows.iter().map(|segs| segs.iter().sum::<u64>()).max().unwrap_or(0);
    if peak == 0 {
        return;
    }
    let slot = area.h / u32::try_from(rows.len()).unwrap_or(u32::MAX).max(1);
    let bar = (slot * 4 / 5).max(1);
    for (i, segments) in (0_u32..).zip(rows) {
        let y = area.y + i * slot + (slot - bar) / 2;
        let mut x = area.x + 2;
        for (s, &len) in segments.iter().enumerate() {
            let seg_w = scale(len, peak, area.w - 2);
            fill_rect(canvas, x, y, seg_w, bar, PALETTE[s % PALETTE.len()]);
            x += seg_w;
        }
    }
}

fn draw_panels(canvas: &mut RgbImage, area: Area, panels: &[Vec<LineSeries>]) {
    let count = u32::try_from(panels.len()).unwrap_or(u32::MAX).max(1);
    let panel_h = (area.h - PANEL_GAP * (count - 1)) / count;
    for (i, series) in (0_u32..).zip(panels) {
        let panel = Area { x: area.x, y: area.y + i * (panel_h + PANEL_GAP), w: area.w, h: panel_h };
        draw_axes(canvas, panel);
        let peak = series.iter().flat_map(|s| s.values.iter().copied()).fold(0.0_f64, f64::max);
        if peak <= 0.0 {
            continue;
        }
        for (s, line) in series.iter().enumerate() {
            draw_polyline(canvas, panel, &line.values, peak, PALETTE[s % PALETTE.len()]);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn draw_polyline(canvas: &mut RgbImage, area: Area, values: &[f64], peak: f64, color: Rgb<u8>) {
    let steps = values.len().saturating_sub(1).max(1) as f64;
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = f64::from(area.x) + i as f64 / steps * f64::from(area.w);
            let y = f64::from(area.y + area.h) - v.max(0.0) / peak * f64::from(area.h);
            (x, y)
        })
        .collect();

    if let [(x, y)] = points.as_slice() {
        fill_rect(canvas, *x as u32, *y as u32, 3, 3, color);
        return;
    }
    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        let n = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
        for k in 0..=n {
            let t = f64::from(k) / f64::from(n);
            let x = (x0 + (x1 - x0) * t) as u32;
            let y = (y0 + (y1 - y0) * t) as u32;
            fill_rect(canvas, x, y.saturating_sub(1), 2, 2, color);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scale(value: u64, peak: u64, span: u32) -> u32 {
    ((value as f64 / peak as f64) * f64::from(span)).round() as u32
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let (cw, ch) = canvas.dimensions();
    for py in y..y.saturating_add(h).min(ch) {
        for px in x..x.saturating_add(w).min(cw) {
            canvas.put_pixel(px, py, color);
        }
    }
}
