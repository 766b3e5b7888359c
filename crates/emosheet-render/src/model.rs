use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> LayoutPoint {
        LayoutPoint {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Grows (or shrinks, for negative values) the rect horizontally on both sides.
    pub fn inflate_x(&self, dx: f64) -> Self {
        Self::new(self.x - dx, self.y, self.width + dx * 2.0, self.height)
    }

    pub fn intersects(&self, other: &LayoutRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &LayoutRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Distance of axis labels beyond `radius`.
    pub label_offset: f64,
    /// Number of grid rings; also the value at the outer ring.
    pub levels: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonanceGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub padding: f64,
    pub left_column: LayoutRect,
    pub name: LayoutPoint,
    pub furigana: LayoutPoint,
    pub portrait: LayoutRect,
    pub right_column: LayoutRect,
    /// Band (a): radar chart + resonance block.
    pub chart_band: LayoutRect,
    pub chart: ChartGeometry,
    pub resonance: ResonanceGeometry,
    /// Band (b).
    pub skills_band: LayoutRect,
    /// Band (c): whatever height is left above the bottom padding.
    pub notes_band: LayoutRect,
}
