//! Structured address-book entries and their review-sheet representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;

/// Grammatical gender, as implied by a title or a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a gender cell from a reference CSV ("M", "F", "W", ...).
    pub fn from_code(code: &str) -> Option<Gender> {
        match code.trim() {
            "M" | "m" => Some(Gender::Male),
            "F" | "f" | "W" | "w" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Family name extracted from the start of an entry line.
///
/// A lone dash in the name position is a print convention meaning
/// "same family name as the preceding entry"; the column-level caller
/// resolves it against a running lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyName {
    /// A literal name such as "Meier" or "von Büren".
    Literal(String),
    /// Dash sentinel: repeat the previous entry's family name.
    RepeatPrevious,
}

/// Source position of a record, for warning messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
    pub file: String,
    pub line: u64,
}

impl SourcePos {
    pub fn new(file: impl Into<String>, line: u64) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Review-sheet columns that validation can flag for human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Vorname,
    Ledigname,
    Adelsname,
    Titel,
    Beruf,
    Beruf2,
    Beruf3,
    Adresse,
    Adresse2,
    Adresse3,
    Arbeitsort,
    NichtZuweisbar,
}

impl Field {
    /// The CSV column header for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Vorname => "Vorname",
            Field::Ledigname => "Ledigname",
            Field::Adelsname => "Adelsname",
            Field::Titel => "Titel",
            Field::Beruf => "Beruf",
            Field::Beruf2 => "Beruf 2",
            Field::Beruf3 => "Beruf 3",
            Field::Adresse => "Adresse",
            Field::Adresse2 => "Adresse 2",
            Field::Adresse3 => "Adresse 3",
            Field::Arbeitsort => "Arbeitsort",
            Field::NichtZuweisbar => "nicht zuweisbar",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully segmented address-book entry for one person or company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBookEntry {
    /// Numeric identifier, assigned later in the review workflow.
    pub id: Option<u32>,
    pub page_id: u32,
    pub bbox: BoundingBox,
    pub family_name: String,
    pub given_name: String,
    pub maiden_name: String,
    pub nobility_name: String,
    /// Title, or the sentinel "[Firma]" for companies.
    pub title: String,
    pub occupations: Vec<String>,
    pub addresses: Vec<String>,
    pub workplace: String,
    /// Leftover text the splitter could not classify; surfaced for
    /// human review, never dropped.
    pub unrecognized: String,
}

impl AddressBookEntry {
    /// The fixed-column record used by validation and the review
    /// sheets. Absent fields become empty strings; at most three
    /// occupations and three addresses are kept.
    pub fn to_record(&self) -> EntryRecord {
        let nth = |v: &[String], i: usize| v.get(i).cloned().unwrap_or_default();
        EntryRecord {
            id: self.id.map(|id| format!("BAE-{id}")).unwrap_or_default(),
            scan: self.page_id.to_string(),
            position: format!(
                "{},{},{},{}",
                self.bbox.x, self.bbox.y, self.bbox.width, self.bbox.height
            ),
            name: self.family_name.clone(),
            given_name: self.given_name.clone(),
            maiden_name: self.maiden_name.clone(),
            nobility_name: self.nobility_name.clone(),
            title: self.title.clone(),
            occupation_1: nth(&self.occupations, 0),
            occupation_2: nth(&self.occupations, 1),
            occupation_3: nth(&self.occupations, 2),
            address_1: nth(&self.addresses, 0),
            address_2: nth(&self.addresses, 1),
            address_3: nth(&self.addresses, 2),
            workplace: self.workplace.clone(),
            remarks: String::new(),
            unrecognized: self.unrecognized.clone(),
        }
    }
}

/// The wide review-sheet record with the fixed German column set.
///
/// This is the shape written to review CSVs and read back from the
/// `reviewed` directory after human correction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Scan")]
    pub scan: String,
    #[serde(rename = "Position", default)]
    pub position: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Vorname")]
    pub given_name: String,
    #[serde(rename = "Ledigname")]
    pub maiden_name: String,
    #[serde(rename = "Adelsname")]
    pub nobility_name: String,
    #[serde(rename = "Titel")]
    pub title: String,
    #[serde(rename = "Beruf")]
    pub occupation_1: String,
    #[serde(rename = "Beruf 2")]
    pub occupation_2: String,
    #[serde(rename = "Beruf 3")]
    pub occupation_3: String,
    #[serde(rename = "Adresse")]
    pub address_1: String,
    #[serde(rename = "Adresse 2")]
    pub address_2: String,
    #[serde(rename = "Adresse 3")]
    pub address_3: String,
    #[serde(rename = "Arbeitsort")]
    pub workplace: String,
    #[serde(rename = "Bemerkungen", default)]
    pub remarks: String,
    #[serde(rename = "nicht zuweisbar", default)]
    pub unrecognized: String,
}

impl EntryRecord {
    /// Companies carry the sentinel title "[Firma]".
    pub fn is_company(&self) -> bool {
        self.title.contains("[Firma]")
    }

    pub fn occupations(&self) -> [&str; 3] {
        [&self.occupation_1, &self.occupation_2, &self.occupation_3]
    }

    pub fn addresses(&self) -> [&str; 3] {
        [&self.address_1, &self.address_2, &self.address_3]
    }
}
