use crate::model::LayoutRect;
use serde::{Deserialize, Serialize};

/// A decoded portrait ready to embed: pixel size for placement plus an href (usually a
/// `data:` URI) for the `<image>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portrait {
    pub width: u32,
    pub height: u32,
    pub href: String,
}

impl Portrait {
    pub fn new(width: u32, height: u32, href: impl Into<String>) -> Self {
        Self {
            width,
            height,
            href: href.into(),
        }
    }

    /// Largest rect with the portrait's aspect ratio that fits inside `area`, centered on the
    /// short axis. Degenerate images fill the area.
    pub fn fit_in(&self, area: &LayoutRect) -> LayoutRect {
        if self.width == 0 || self.height == 0 {
            return *area;
        }
        let (iw, ih) = (f64::from(self.width), f64::from(self.height));
        let scale = (area.width / iw).min(area.height / ih);
        let (w, h) = (iw * scale, ih * scale);
        LayoutRect::new(
            area.x + (area.width - w) / 2.0,
            area.y + (area.height - h) / 2.0,
            w,
            h,
        )
    }
}
