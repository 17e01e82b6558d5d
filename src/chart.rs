use crate::models::WeightRecord;
use std::fmt::Write;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 240.0;
const PADDING_X: f64 = 48.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 20.0;
const TICKS: usize = 4;

/// Draws the weight history as an SVG line, one point per record in the
/// order they were recorded. Records with a non-finite weight are left out.
pub fn render_weight_chart(history: &[WeightRecord]) -> String {
    let points: Vec<&WeightRecord> = history.iter().filter(|r| r.weight.is_finite()).collect();
    if points.is_empty() {
        return format!(
            r#"<svg id="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Weight progress"><text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text></svg>"#
        );
    }

    let mut min = points.iter().map(|r| r.weight).fold(f64::INFINITY, f64::min);
    let mut max = points.iter().map(|r| r.weight).fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 1.0;
        max += 1.0;
    }

    let range = max - min;
    let x_step = if points.len() > 1 {
        (WIDTH - PADDING_X * 2.0) / (points.len() - 1) as f64
    } else {
        0.0
    };
    let scale_y = (HEIGHT - TOP - PADDING_Y) / range;
    let x = |index: usize| PADDING_X + index as f64 * x_step;
    let y = |value: f64| HEIGHT - PADDING_Y - (value - min) * scale_y;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg id="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Weight progress">"#
    );

    for tick in 0..=TICKS {
        let value = min + range * tick as f64 / TICKS as f64;
        let y_pos = y(value);
        let _ = write!(
            svg,
            r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y_pos:.2}" x2="{right}" y2="{y_pos:.2}" /><text class="chart-label" x="{label_x}" y="{label_y:.2}" text-anchor="end">{value}</text>"#,
            right = WIDTH - PADDING_X,
            label_x = PADDING_X - 10.0,
            label_y = y_pos + 4.0,
            value = format_axis_value(value),
        );
    }

    let path = points
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command} {:.2} {:.2}", x(index), y(record.weight))
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(svg, r#"<path class="chart-line" d="{path}" />"#);

    let label_every = if points.len() > 8 { points.len().div_ceil(8) } else { 1 };
    for (index, record) in points.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4"><title>{} : {}</title></circle>"#,
            x(index),
            y(record.weight),
            record.date,
            format_axis_value(record.weight),
        );
        if index % label_every == 0 {
            let _ = write!(
                svg,
                r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                x(index),
                HEIGHT - PADDING_Y + 18.0,
                record.date.format("%m-%d"),
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

fn format_axis_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
