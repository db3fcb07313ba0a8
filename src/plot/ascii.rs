//! ASCII/Unicode charts for terminal output.
//!
//! Fixed-size character grids, kept deterministic so the output can be
//! compared against golden strings in tests.
//!
//! Chart elements:
//! - bar chart: `#` current wave, `-` previous wave
//! - line chart: `+` right direction, `x` wrong direction, `.` hard to say

use crate::domain::Locale;
use crate::period::format_chart_period;
use crate::report::change::format_percent;
use crate::report::chart::{ChartBar, DirectionChartPoint, SeriesKind, SeriesLegend};
use crate::report::format::truncate;

const CURRENT_MARK: char = '#';
const PREVIOUS_MARK: char = '-';
const MAX_LABEL: usize = 28;

/// Horizontal current-vs-previous bars, one pair of rows per entry.
///
/// `legend` is the (current, previous) caption printed under the chart.
pub fn render_bar_chart(bars: &[ChartBar], width: usize, legend: (&str, &str)) -> String {
    let width = width.max(10);
    let label_width = bars
        .iter()
        .map(|b| b.name.chars().count().min(MAX_LABEL))
        .max()
        .unwrap_or(0);

    let max_value = bars
        .iter()
        .flat_map(|b| [b.current, b.previous])
        .fold(0.0_f64, f64::max);
    let max_value = if max_value > 0.0 { max_value } else { 1.0 };

    let mut out = String::new();
    for bar in bars {
        let name = truncate(&bar.name, MAX_LABEL);
        let mut row = format!(
            "{name:<label_width$} |{} {}",
            bar_fill(bar.current, max_value, width, CURRENT_MARK),
            format_percent(bar.current),
        );
        if !bar.change_label.is_empty() {
            row.push_str(&format!("  {}", bar.change_label));
        }
        out.push_str(row.trim_end());
        out.push('\n');

        let row = format!(
            "{:<label_width$} |{} {}",
            "",
            bar_fill(bar.previous, max_value, width, PREVIOUS_MARK),
            format_percent(bar.previous),
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{CURRENT_MARK} {}  {PREVIOUS_MARK} {}\n", legend.0, legend.1));
    out
}

fn bar_fill(value: f64, max_value: f64, width: usize, mark: char) -> String {
    let len = map_x(value.max(0.0), 0.0, max_value, width + 1);
    std::iter::repeat_n(mark, len).collect()
}

/// Three-series line chart of the country-direction time series.
///
/// `caption` starts the header line, e.g. `Plot` or `Графік`.
pub fn render_line_chart(
    points: &[DirectionChartPoint],
    legend: &[SeriesLegend<'_>],
    locale: Locale,
    caption: &str,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let series: Vec<(char, &str, Vec<f64>)> = legend
        .iter()
        .map(|s| {
            let values: Vec<f64> = points.iter().map(|p| p.value(s.kind)).collect();
            (series_mark(s.kind), s.label, values)
        })
        .collect();

    let (y_min, y_max) = y_range(series.iter().flat_map(|(_, _, v)| v.iter().copied())).unwrap_or((0.0, 100.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (mark, _, values) in &series {
        draw_series(&mut grid, values, y_min, y_max, *mark);
    }

    let mut out = String::new();
    let first = points.first().map(|p| format_chart_period(&p.period, locale)).unwrap_or_default();
    let last = points.last().map(|p| format_chart_period(&p.period, locale)).unwrap_or_default();
    out.push_str(&format!("{caption}: {first}..{last} | y=[{y_min:.1}, {y_max:.1}]%\n"));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for (mark, label, _) in &series {
        out.push_str(&format!("{mark} {label}\n"));
    }

    out
}

fn series_mark(kind: SeriesKind) -> char {
    match kind {
        SeriesKind::RightDirection => '+',
        SeriesKind::WrongDirection => 'x',
        SeriesKind::HardToSay => '.',
    }
}

fn draw_series(grid: &mut [Vec<char>], values: &[f64], y_min: f64, y_max: f64, mark: char) {
    let height = grid.len();
    let width = grid[0].len();
    let last = values.len().saturating_sub(1) as f64;

    let mut prev = None;
    for (i, &v) in values.iter().enumerate() {
        let x = if last > 0.0 { map_x(i as f64, 0.0, last, width) } else { 0 };
        let y = map_y(v, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, mark),
            None => {
                if grid[y][x] == ' ' {
                    grid[y][x] = mark;
                }
            }
        }
        prev = Some((x, y));
    }
}

fn y_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for v in values {
        min_y = min_y.min(v);
        max_y = max_y.max(v);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && min_y == max_y {
        Some((min_y - 1.0, max_y + 1.0))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Never overwrites a filled cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
