//! Reassembly of OCR line fragments into logical entry lines.
//!
//! The typesetter wraps long entries onto indented continuation
//! lines; OCR returns them as separate fragments. Continuations are
//! detected by horizontal offset from the column's left margin and
//! glued back, honoring hyphenation marks.

use crate::models::OcrLine;

use super::cleanup::cleanup_text;
use super::patterns::STRAY_INITIAL;

/// Glyphs marking a word continued on the next line.
const HYPHENATION_MARKS: [char; 3] = ['⸗', '-', '='];

/// Offset below which a line starts a new logical entry.
const NEW_ENTRY_INDENT: i32 = 70;

/// Offset beyond which a stray "A."-style fragment is dropped.
const STRAY_FRAGMENT_OFFSET: i32 = 200;

/// Merge OCR line fragments into logical entry lines.
///
/// All input lines must belong to the same page and column, sorted by
/// vertical position by the caller. Each output line is one candidate
/// address-book entry with cleaned text and the union of the
/// contributing boxes.
pub fn merge_lines(lines: &[OcrLine]) -> Vec<OcrLine> {
    let mut result: Vec<OcrLine> = Vec::new();
    if lines.is_empty() {
        return result;
    }
    assert!(
        lines.iter().all(|l| l.page_id == lines[0].page_id),
        "merge_lines: mixed page ids"
    );
    assert!(
        lines.iter().all(|l| l.column == lines[0].column),
        "merge_lines: mixed columns"
    );
    let column_x = lines.iter().map(|l| l.bbox.x).min().unwrap_or(0);
    for line in lines {
        let x = line.bbox.x - column_x;
        let text = cleanup_text(&line.text);
        if x > STRAY_FRAGMENT_OFFSET && STRAY_INITIAL.is_match(&line.text) {
            continue;
        }
        if x < NEW_ENTRY_INDENT || result.is_empty() {
            result.push(OcrLine {
                page_id: line.page_id,
                column: line.column,
                text,
                bbox: line.bbox,
            });
            continue;
        }
        let last = result.last_mut().unwrap();
        // "und"/"u." keeps its separating space even across a
        // hyphenation mark ("Metzgergasse 21 und 23").
        let sep = if text.starts_with("und") || text.starts_with("u.") {
            " "
        } else {
            ""
        };
        if last.text.ends_with(HYPHENATION_MARKS) {
            last.text.pop();
            last.text.push_str(sep);
            last.text.push_str(&text);
        } else {
            let joined = format!("{} {}", last.text, text);
            last.text = joined.split_whitespace().collect::<Vec<_>>().join(" ");
        }
        last.bbox = last.bbox.union(&line.bbox);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundingBox;
    use pretty_assertions::assert_eq;

    fn line(x: i32, y: i32, text: &str) -> OcrLine {
        OcrLine {
            page_id: 1,
            column: 1,
            text: text.to_string(),
            bbox: BoundingBox::new(x, y, 400, 20),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(merge_lines(&[]), Vec::<OcrLine>::new());
    }

    #[test]
    fn test_hyphenated_continuation_joins_without_space() {
        let merged = merge_lines(&[line(100, 10, "Schneide-"), line(180, 35, "rin")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Schneiderin");
        assert_eq!(merged[0].bbox, BoundingBox::new(100, 10, 480, 45));
    }

    #[test]
    fn test_plain_continuation_joins_with_space() {
        let merged = merge_lines(&[line(100, 10, "Adam, Wittwe,"), line(180, 35, "Aarberg. 63")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Adam, Wittwe, Aarberg. 63");
    }

    #[test]
    fn test_und_continuation_keeps_space_after_hyphen() {
        let merged = merge_lines(&[line(100, 10, "Metzg. 21⸗"), line(180, 35, "und 23")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Metzg. 21 und 23");
    }

    #[test]
    fn test_small_offset_starts_new_entry() {
        let merged = merge_lines(&[line(100, 10, "Meier Hans"), line(130, 35, "Muster Anna")]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "Meier Hans");
        assert_eq!(merged[1].text, "Muster Anna");
    }

    #[test]
    fn test_stray_initial_is_dropped() {
        let merged = merge_lines(&[line(100, 10, "Meier Hans"), line(340, 35, "A.")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Meier Hans");
    }

    #[test]
    fn test_continuation_text_is_cleaned() {
        let merged = merge_lines(&[line(100, 10, "Muster,"), line(180, 35, "Räfichgaffe 8 b")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Muster, Käfichgasse 8b");
    }

    #[test]
    #[should_panic(expected = "mixed page ids")]
    fn test_mixed_pages_panic() {
        let mut other = line(100, 10, "x");
        other.page_id = 2;
        merge_lines(&[line(100, 10, "a"), other]);
    }
}
