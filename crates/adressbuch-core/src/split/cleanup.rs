//! Character-level cleanup of raw OCR line text.

use super::patterns::{OCR_REPLACEMENTS, SPACE_AFTER_DOT, SPLIT_HOUSE_NUMBER};

/// Correct OCR artifacts in one raw line of text.
///
/// Replaces archaic letterforms and ligatures with modern
/// equivalents, converts trailing hyphenation glyphs to a plain
/// hyphen, restores spaces the OCR dropped after abbreviation dots,
/// rejoins house-number suffix letters, and finally applies a fixed
/// table of known misreads. Pure and deterministic.
pub fn cleanup_text(s: &str) -> String {
    let mut s = s.to_string();
    // Historic line-continuation marks at the end of a line.
    if s.ends_with(':') || s.ends_with('=') {
        s.pop();
        s.push('-');
    }
    let s = s.replace('ſ', "s").replace('ß', "ss").replace('⸗', "-");
    let s = SPACE_AFTER_DOT.replace_all(&s, ". ${1}");
    let s = SPLIT_HOUSE_NUMBER.replace_all(&s, |caps: &regex::Captures| caps[0].replace(' ', ""));
    let mut s = s.into_owned();
    for (from, to) in OCR_REPLACEMENTS {
        s = s.replace(from, to);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_long_s_and_sharp_s() {
        assert_eq!(cleanup_text("ſtraß⸗"), "strass-");
    }

    #[test]
    fn test_trailing_continuation_marks() {
        assert_eq!(cleanup_text("Schnei="), "Schnei-");
        assert_eq!(cleanup_text("Schnei:"), "Schnei-");
    }

    #[test]
    fn test_house_number_suffix() {
        assert_eq!(cleanup_text("Räfichgaffe 8 b"), "Käfichgasse 8b");
        assert_eq!(cleanup_text("Gasse 12 a,"), "Gasse 12a,");
    }

    #[test]
    fn test_space_after_dot() {
        assert_eq!(cleanup_text("Näh.Metzg. 21"), "Näh. Metzg. 21");
        assert_eq!(cleanup_text("Ag.33"), "Ag. 33");
    }

    #[test]
    fn test_known_misreads() {
        assert_eq!(cleanup_text("Bolwerk 5"), "Bollwerk 5");
        assert_eq!(cleanup_text("Mezg. 21"), "Metzg. 21");
    }

    #[test]
    fn test_idempotent_on_clean_ascii() {
        for s in ["Adam, Wittwe, Schneiderin,", "Muster Hans, Schreiner, Gasse 3"] {
            let once = cleanup_text(s);
            assert_eq!(cleanup_text(&once), once);
        }
    }
}
