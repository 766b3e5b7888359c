//! Sheet geometry.
//!
//! Every region is derived from the canvas size and the constants below, once per render. The
//! regions cannot overlap as long as the canvas meets [`min_canvas_size`].

use crate::model::{
    ChartGeometry, LayoutPoint, LayoutRect, ResonanceGeometry, SheetLayout,
};
use crate::{Error, Result};

pub const PADDING: f64 = 50.0;
pub const LEFT_COLUMN_WIDTH: f64 = 500.0;
pub const PORTRAIT_WIDTH: f64 = 500.0;
pub const PORTRAIT_HEIGHT: f64 = 750.0;
/// Name + furigana, measured from the top padding to the portrait.
pub const NAME_BLOCK_HEIGHT: f64 = 150.0;
pub const FURIGANA_OFFSET: LayoutPoint = LayoutPoint { x: 5.0, y: 95.0 };

pub const CHART_BAND_HEIGHT: f64 = 350.0;
pub const SKILLS_BAND_HEIGHT: f64 = 400.0;
pub const BAND_GAP: f64 = 20.0;

pub const CHART_CENTER_OFFSET: LayoutPoint = LayoutPoint { x: 200.0, y: 175.0 };
pub const CHART_RADIUS: f64 = 140.0;
pub const CHART_LABEL_OFFSET: f64 = 25.0;
pub const CHART_LEVELS: u32 = 6;

pub const RESONANCE_OFFSET: LayoutPoint = LayoutPoint { x: 420.0, y: 50.0 };
pub const RESONANCE_WIDTH: f64 = 400.0;

/// The chart + resonance row is the widest fixed content of the right column.
pub const MIN_RIGHT_COLUMN_WIDTH: f64 = RESONANCE_OFFSET.x + RESONANCE_WIDTH;

pub const DEFAULT_CANVAS_WIDTH: f64 = 1500.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1000.0;

pub fn min_canvas_size() -> (f64, f64) {
    let width = PADDING + LEFT_COLUMN_WIDTH + PADDING + MIN_RIGHT_COLUMN_WIDTH + PADDING;
    let left = PADDING + NAME_BLOCK_HEIGHT + PORTRAIT_HEIGHT + PADDING;
    let right = PADDING + CHART_BAND_HEIGHT + BAND_GAP + SKILLS_BAND_HEIGHT + BAND_GAP + PADDING;
    (width, left.max(right))
}

pub fn compute_layout(canvas_width: f64, canvas_height: f64) -> Result<SheetLayout> {
    let (min_width, min_height) = min_canvas_size();
    let valid = canvas_width.is_finite()
        && canvas_height.is_finite()
        && canvas_width >= min_width
        && canvas_height >= min_height;
    if !valid {
        return Err(Error::CanvasTooSmall {
            width: canvas_width,
            height: canvas_height,
            min_width,
            min_height,
        });
    }

    let inner_height = canvas_height - PADDING * 2.0;
    let left_column = LayoutRect::new(PADDING, PADDING, LEFT_COLUMN_WIDTH, inner_height);
    let portrait = LayoutRect::new(
        PADDING,
        canvas_height - PADDING - PORTRAIT_HEIGHT,
        PORTRAIT_WIDTH,
        PORTRAIT_HEIGHT,
    );

    let right_x = left_column.right() + PADDING;
    let right_width = canvas_width - right_x - PADDING;
    let right_column = LayoutRect::new(right_x, PADDING, right_width, inner_height);

    let chart_band = LayoutRect::new(right_x, PADDING, right_width, CHART_BAND_HEIGHT);
    let skills_band = LayoutRect::new(
        right_x,
        chart_band.bottom() + BAND_GAP,
        right_width,
        SKILLS_BAND_HEIGHT,
    );
    let notes_y = skills_band.bottom() + BAND_GAP;
    let notes_band = LayoutRect::new(
        right_x,
        notes_y,
        right_width,
        (canvas_height - notes_y - PADDING).max(0.0),
    );

    let layout = SheetLayout {
        canvas_width,
        canvas_height,
        padding: PADDING,
        left_column,
        name: LayoutPoint {
            x: PADDING,
            y: PADDING,
        },
        furigana: LayoutPoint {
            x: PADDING + FURIGANA_OFFSET.x,
            y: PADDING + FURIGANA_OFFSET.y,
        },
        portrait,
        right_column,
        chart: ChartGeometry {
            center_x: right_x + CHART_CENTER_OFFSET.x,
            center_y: chart_band.y + CHART_CENTER_OFFSET.y,
            radius: CHART_RADIUS,
            label_offset: CHART_LABEL_OFFSET,
            levels: CHART_LEVELS,
        },
        resonance: ResonanceGeometry {
            x: right_x + RESONANCE_OFFSET.x,
            y: chart_band.y + RESONANCE_OFFSET.y,
            width: RESONANCE_WIDTH,
        },
        chart_band,
        skills_band,
        notes_band,
    };
    tracing::trace!(
        canvas_width,
        canvas_height,
        notes_height = layout.notes_band.height,
        "computed sheet layout"
    );
    Ok(layout)
}
