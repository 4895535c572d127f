//! Reading per-volume OCR line CSV files.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

use super::geometry::{BoundingBox, OcrLine};

#[derive(Debug, Deserialize)]
struct OcrLineRow {
    #[serde(rename = "PageID")]
    page_id: u32,
    #[serde(rename = "Column")]
    column: u32,
    #[serde(rename = "X")]
    x: i32,
    #[serde(rename = "Y")]
    y: i32,
    #[serde(rename = "Width")]
    width: i32,
    #[serde(rename = "Height")]
    height: i32,
    #[serde(rename = "Text")]
    text: String,
}

/// Read the OCR lines of one volume, as persisted by the OCR stage
/// (columns: PageID, Column, X, Y, Width, Height, Text).
pub fn read_ocr_lines(path: &Path) -> Result<Vec<OcrLine>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut lines = Vec::new();
    for row in reader.deserialize() {
        let row: OcrLineRow = row?;
        lines.push(OcrLine {
            page_id: row.page_id,
            column: row.column,
            text: row.text,
            bbox: BoundingBox::new(row.x, row.y, row.width, row.height),
        });
    }
    Ok(lines)
}
