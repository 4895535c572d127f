//! Pattern tables for OCR cleanup and field splitting.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // OCR drops the space after abbreviation dots: "Näh.,Ag." etc.
    pub static ref SPACE_AFTER_DOT: Regex = Regex::new(r"\.([0-9A-ZÄÖÜ])").unwrap();

    // House-number suffix letters get space-separated: "8 b" -> "8b".
    pub static ref SPLIT_HOUSE_NUMBER: Regex = Regex::new(r"[0-9] [a-z][,.]?").unwrap();

    // A split-off initial like "A." that must not start a new entry.
    pub static ref STRAY_INITIAL: Regex = Regex::new(r"^[A-Z]\.$").unwrap();

    // Address patterns: street + house number, with compound "und" forms.
    pub static ref STREET_NUMBER: Regex = Regex::new(r"^(.+) (\d+[a-t]?)\.?$").unwrap();
    pub static ref STREET_TWO_NUMBERS: Regex =
        Regex::new(r"^(.+) (\d+[a-t]?)\s?(u\.|und) (\d+[a-t]?)$").unwrap();
    pub static ref TWO_STREETS: Regex =
        Regex::new(r"^(.+) (\d+[a-t]?)\s?(u\.|und) (.+) (\d+[a-t]?)$").unwrap();
    pub static ref STREET_AND_POI: Regex =
        Regex::new(r"^(.+) (\d+[a-t]?)\s?(u\.|und)\s?(.+)$").unwrap();

    // "Mal. u. Gypser" style double occupations.
    pub static ref OCCUPATION_PAIR: Regex = Regex::new(r"^(.+) (u\.|und) (.+)$").unwrap();

    // Street + number split used when normalizing reviewed addresses.
    pub static ref ADDRESS_SPLIT: Regex = Regex::new(r"^(.+) (\d+[a-t]?)$").unwrap();

    // Abbreviated nobility particle inside names, e.g. "v. Bonstetten-de Vigneule".
    pub static ref VON_ABBREV: Regex = Regex::new(r"\bv\.").unwrap();
}

/// Known OCR misreads, collected empirically from the Bern volumes.
/// Applied in order after the character-level fixes.
pub const OCR_REPLACEMENTS: &[(&str, &str)] = &[
    ("..", ".,"),
    ("'", "’"),
    ("ẵ", "ä"),
    ("å", "ä"),
    ("Bolwerk", "Bollwerk"),
    ("Casinoplag", "Casinoplatz"),
    ("gaffe", "gasse"),
    ("I.", "J."),
    ("Igfr.", "Jgfr."),
    ("Inkg.", "Jnkg."),
    ("Junferng", "Junkerng"),
    ("Käshdir", "Käshdlr"),
    ("Megg", "Metzg"),
    ("Mezg", "Metzg"),
    ("Nabbenth", "Rabbenth"),
    ("Nent", "Rent"),
    ("Nevifor", "Revisor"),
    ("plazg", "platzg"),
    ("plaz ", "platz "),
    ("plagg", "platzg"),
    ("Räfich", "Käfich"),
    ("Regt.", "Negt."),
    ("Ressler", "Kessler"),
    ("SchauFlagg", "Schauplatzg"),
    ("Schlsfr", "Schlssr"),
    ("Schweft", "Schwest"),
];

/// Abbreviations marking a company entry, longest first so that
/// "& Cie." wins over "Cie." and "Compagnie" over "Comp.".
pub const COMPANY_ABBREVS: &[&str] = &[
    "Compagnie",
    "u. Comp.",
    "Gebrüder",
    "& Söhne",
    "u. Cie.",
    "Gebrüd.",
    "& Comp.",
    "& Sohn",
    "& Cie.",
    "Gebr.",
    "& Co.",
    "A.-G.",
    "& Cp.",
    "Comp.",
    "Cie.",
    "Co.",
    "AG",
];

/// Markers introducing a maiden name.
pub const MAIDEN_NAME_PREFIXES: &[&str] = &["geb.", "gb.", "geborne", "geborene"];

/// Nobility particles and their canonical spellings.
pub const NOBILITY_PREFIXES: &[(&str, &str)] = &[
    ("de", "de"),
    ("De", "de"),
    ("von", "von"),
    ("Von", "von"),
    ("v.", "von"),
    ("V.", "von"),
];

/// The canonical spelling of a nobility particle, if `word` is one.
pub fn nobility_particle(word: &str) -> Option<&'static str> {
    NOBILITY_PREFIXES
        .iter()
        .find(|(raw, _)| *raw == word)
        .map(|(_, canonical)| *canonical)
}
