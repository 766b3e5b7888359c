use crate::model::{ChartGeometry, LayoutPoint};
use crate::scene::{DrawCommand, Paint, Scene, Stroke, TextAnchor, TextBaseline};
use crate::theme::Theme;
use emosheet_core::AttributeScore;

/// Angle of axis `i` out of `count`: axis 0 points straight up, the rest follow clockwise
/// (screen coordinates, y down).
pub fn axis_angle(i: usize, count: usize) -> f64 {
    -std::f64::consts::FRAC_PI_2 + (i as f64) * (std::f64::consts::TAU / (count.max(1) as f64))
}

fn polar_xy(cx: f64, cy: f64, radius: f64, angle: f64) -> LayoutPoint {
    LayoutPoint {
        x: cx + radius * angle.cos(),
        y: cy + radius * angle.sin(),
    }
}

/// Polygon vertex for a score. The value is clamped to `0..=levels`; the label keeps the raw
/// value.
pub fn value_vertex(chart: &ChartGeometry, i: usize, count: usize, value: i64) -> LayoutPoint {
    let levels = f64::from(chart.levels.max(1));
    let v = (value as f64).clamp(0.0, levels);
    polar_xy(
        chart.center_x,
        chart.center_y,
        chart.radius / levels * v,
        axis_angle(i, count),
    )
}

pub fn draw_radar_chart(
    scene: &mut Scene,
    stats: &[AttributeScore],
    chart: &ChartGeometry,
    theme: &Theme,
) {
    let n = stats.len();
    if n == 0 {
        return;
    }
    let (cx, cy, radius) = (chart.center_x, chart.center_y, chart.radius);
    let levels = chart.levels.max(1);
    let grid = Stroke::solid(theme.sub_accent, 1.0);

    for level in 1..=levels {
        let r = radius / f64::from(levels) * f64::from(level);
        let points = (0..n).map(|i| polar_xy(cx, cy, r, axis_angle(i, n))).collect();
        scene.push(DrawCommand::Polygon {
            points,
            fill: None,
            stroke: Some(grid.clone()),
        });
    }

    let label_style = theme.sub_font(18.0).bold();
    for (i, stat) in stats.iter().enumerate() {
        let angle = axis_angle(i, n);
        let tip = polar_xy(cx, cy, radius, angle);
        scene.line(cx, cy, tip.x, tip.y, grid.clone());

        let label = polar_xy(cx, cy, radius + chart.label_offset, angle);
        scene.text_aligned(
            label.x,
            label.y,
            &format!("{} {}", stat.label, stat.value),
            &label_style,
            theme.text,
            TextAnchor::Middle,
            TextBaseline::Middle,
        );
    }

    let points = stats
        .iter()
        .enumerate()
        .map(|(i, s)| value_vertex(chart, i, n, s.value))
        .collect();
    scene.push(DrawCommand::Polygon {
        points,
        fill: Some(Paint::Solid(theme.chart_fill)),
        stroke: Some(Stroke::solid(theme.chart_line, 3.0)),
    });
}
