//! Page geometry for OCR-recognized lines.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding rectangle of this box and another box.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = (self.x + self.width).max(other.x + other.width);
        let y2 = (self.y + self.height).max(other.y + other.height);
        BoundingBox::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// One OCR-recognized line of text on a scanned page.
///
/// Produced by the external OCR collaborator, consumed by the line
/// merger. Pages are printed in two columns; `column` is 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrLine {
    pub page_id: u32,
    pub column: u32,
    pub text: String,
    pub bbox: BoundingBox,
}
