//! Reference data tables for splitting and validation.
//!
//! The catalog is an explicit value object: loaded once from flat
//! CSV/line files, verified for referential integrity, then passed by
//! reference into [`Splitter`](crate::split::Splitter) and
//! [`Validator`](crate::validate::Validator). Tests construct it from
//! in-memory tables without touching the filesystem.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{CatalogError, Result};
use crate::models::Gender;

/// One scanned page of an address-book volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Publication date of the volume the page belongs to.
    pub date: NaiveDate,
    /// Printed page label, e.g. "62".
    pub label: String,
}

/// A known title with its canonical form and grammatical gender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub raw: String,
    pub normalized: String,
    pub gender: Option<Gender>,
}

/// Strip the exception suffixes used in the occupations table before
/// looking a code up in the official CH-ISCO-19 code list.
pub fn base_code(code: &str) -> &str {
    code.strip_suffix("-EX")
        .or_else(|| code.strip_suffix("-WI"))
        .unwrap_or(code)
}

/// Immutable reference data for one digitization run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    /// Scan id (as string) to page metadata.
    pub pages: HashMap<String, PageInfo>,
    pub family_names: HashSet<String>,
    /// Given name to its grammatical gender, where known.
    pub given_names: HashMap<String, Option<Gender>>,
    /// Raw nobility name to its cleaned-up form.
    pub nobility_names: HashMap<String, String>,
    /// Known titles, kept in longest-first order for prefix matching.
    pub titles: Vec<Title>,
    /// Occupation text to CH-ISCO-19 code ("*" when uncodable).
    pub occupations: HashMap<String, String>,
    /// Economic activity (Branche) to NOGA code.
    pub economic_activities: HashMap<String, String>,
    /// CH-ISCO-19 code to German label ("male | female").
    pub isco: HashMap<String, String>,
    /// NOGA code to German label.
    pub noga: HashMap<String, String>,
    /// Point of interest to its normalized form.
    pub pois: HashMap<String, String>,
    /// Street abbreviation to full street name.
    pub street_abbrevs: HashMap<String, String>,
    pub streets: HashSet<String>,
    /// Pre-1882 canonical address to its post-reform equivalent.
    pub address_reform: HashMap<String, String>,
}

impl ReferenceCatalog {
    /// Load all reference tables from a directory of flat files and
    /// verify their referential integrity. Fails fast on corrupted
    /// reference data.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut catalog = ReferenceCatalog {
            pages: load_pages(dir, "pages.csv")?,
            family_names: read_lines(dir, "family_names.txt")?,
            given_names: load_given_names(dir, "given_names.csv")?,
            nobility_names: load_keyed(
                dir,
                "nobility_names.csv",
                "Adelsname (Rohtext)",
                "Adelsname (bereinigt)",
            )?,
            titles: load_titles(dir, "titles.csv")?,
            occupations: load_keyed(dir, "occupations.csv", "Occupation", "CH-ISCO-19")?,
            economic_activities: load_keyed(
                dir,
                "economic_activities.csv",
                "Branche",
                "NOGA-Code",
            )?,
            isco: load_keyed(dir, "HCL_CH_ISCO_19_PROF_1_2_1_level_6.csv", "Code", "Name_de")?,
            noga: load_keyed(dir, "HCL_NOGA_level_5.csv", "Code", "Name_de")?,
            pois: load_keyed(dir, "pois.csv", "PointOfInterest", "Normalized")?,
            street_abbrevs: load_keyed(dir, "street_abbrevs.csv", "Abbreviation", "Street")?,
            streets: load_key_set(dir, "streets.csv", "Street")?,
            address_reform: load_keyed(
                dir,
                "address_reform_1882.csv",
                "Adresse (vor 1882)",
                "Adresse (nach 1882)",
            )?,
        };
        catalog.sort_titles();
        catalog.verify()?;
        Ok(catalog)
    }

    /// Check referential integrity across tables. Called by [`load`];
    /// tests building in-memory catalogs can call it directly.
    ///
    /// [`load`]: ReferenceCatalog::load
    pub fn verify(&self) -> std::result::Result<(), CatalogError> {
        for (abbrev, street) in &self.street_abbrevs {
            if !self.streets.contains(street) {
                return Err(CatalogError::UnknownStreet {
                    abbrev: abbrev.clone(),
                    street: street.clone(),
                });
            }
        }
        for (occupation, code) in &self.occupations {
            if code == "*" {
                continue;
            }
            if !self.isco.contains_key(base_code(code)) {
                return Err(CatalogError::UnknownIscoCode {
                    occupation: occupation.clone(),
                    code: code.clone(),
                });
            }
        }
        for (activity, code) in &self.economic_activities {
            if code.is_empty() {
                continue;
            }
            if !self.noga.contains_key(code.as_str()) {
                return Err(CatalogError::UnknownNogaCode {
                    activity: activity.clone(),
                    code: code.clone(),
                });
            }
        }
        Ok(())
    }

    /// Sort titles longest-first so that prefix matching prefers the
    /// most specific title ("Frau u. Tocht." before "Frau").
    pub fn sort_titles(&mut self) {
        self.titles
            .sort_by(|a, b| b.raw.chars().count().cmp(&a.raw.chars().count()).then_with(|| a.raw.cmp(&b.raw)));
    }

    /// Whether `s` names a street, directly or via abbreviation.
    pub fn is_street(&self, s: &str) -> bool {
        self.street_abbrevs.contains_key(s) || self.streets.contains(s)
    }

    /// The longest known title that `text` starts with, if any.
    pub fn match_title_prefix(&self, text: &str) -> Option<&Title> {
        self.titles.iter().find(|t| text.starts_with(t.raw.as_str()))
    }

    /// Exact lookup of a title by its raw form.
    pub fn title(&self, raw: &str) -> Option<&Title> {
        self.titles.iter().find(|t| t.raw == raw)
    }
}

/// A reference CSV file held as raw records, for column-based access.
struct CsvTable {
    file: String,
    headers: csv::StringRecord,
    rows: Vec<csv::StringRecord>,
}

impl CsvTable {
    fn read(dir: &Path, file: &str) -> std::result::Result<Self, CatalogError> {
        let path = dir.join(file);
        let mut reader = csv::Reader::from_path(&path).map_err(|e| CatalogError::Csv {
            file: file.to_string(),
            source: e,
        })?;
        let headers = reader
            .headers()
            .map_err(|e| CatalogError::Csv {
                file: file.to_string(),
                source: e,
            })?
            .clone();
        let mut rows = Vec::new();
        for row in reader.records() {
            rows.push(row.map_err(|e| CatalogError::Csv {
                file: file.to_string(),
                source: e,
            })?);
        }
        Ok(CsvTable {
            file: file.to_string(),
            headers,
            rows,
        })
    }

    fn column(&self, name: &str) -> std::result::Result<usize, CatalogError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CatalogError::MissingColumn {
                file: self.file.clone(),
                column: name.to_string(),
            })
    }

    fn try_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn read_lines(dir: &Path, file: &str) -> std::result::Result<HashSet<String>, CatalogError> {
    let path = dir.join(file);
    let content = fs::read_to_string(&path).map_err(|e| CatalogError::Io {
        file: file.to_string(),
        source: e,
    })?;
    Ok(content
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

fn load_keyed(
    dir: &Path,
    file: &str,
    key_col: &str,
    value_col: &str,
) -> std::result::Result<HashMap<String, String>, CatalogError> {
    let table = CsvTable::read(dir, file)?;
    let k = table.column(key_col)?;
    let v = table.column(value_col)?;
    let mut map = HashMap::new();
    for row in &table.rows {
        let key = row.get(k).unwrap_or("").to_string();
        let value = row.get(v).unwrap_or("").to_string();
        if map.insert(key.clone(), value).is_some() {
            return Err(CatalogError::DuplicateKey {
                file: file.to_string(),
                key,
            });
        }
    }
    Ok(map)
}

fn load_key_set(
    dir: &Path,
    file: &str,
    key_col: &str,
) -> std::result::Result<HashSet<String>, CatalogError> {
    let table = CsvTable::read(dir, file)?;
    let k = table.column(key_col)?;
    let mut set = HashSet::new();
    for row in &table.rows {
        let key = row.get(k).unwrap_or("").to_string();
        if !set.insert(key.clone()) {
            return Err(CatalogError::DuplicateKey {
                file: file.to_string(),
                key,
            });
        }
    }
    Ok(set)
}

fn load_pages(
    dir: &Path,
    file: &str,
) -> std::result::Result<HashMap<String, PageInfo>, CatalogError> {
    let table = CsvTable::read(dir, file)?;
    let id = table.column("PageID")?;
    let date = table.column("Date")?;
    let label = table.column("PageLabel")?;
    let mut pages = HashMap::new();
    for row in &table.rows {
        let key = row.get(id).unwrap_or("").to_string();
        let date_cell = row.get(date).unwrap_or("");
        let parsed =
            NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|_| CatalogError::InvalidDate {
                file: file.to_string(),
                value: date_cell.to_string(),
            })?;
        let info = PageInfo {
            date: parsed,
            label: row.get(label).unwrap_or("").to_string(),
        };
        if pages.insert(key.clone(), info).is_some() {
            return Err(CatalogError::DuplicateKey {
                file: file.to_string(),
                key,
            });
        }
    }
    Ok(pages)
}

fn load_given_names(
    dir: &Path,
    file: &str,
) -> std::result::Result<HashMap<String, Option<Gender>>, CatalogError> {
    let table = CsvTable::read(dir, file)?;
    let name = table.column("Name")?;
    let gender = table.try_column("Gender");
    let mut names = HashMap::new();
    for row in &table.rows {
        let key = row.get(name).unwrap_or("").to_string();
        let g = gender
            .and_then(|i| row.get(i))
            .and_then(Gender::from_code);
        if names.insert(key.clone(), g).is_some() {
            return Err(CatalogError::DuplicateKey {
                file: file.to_string(),
                key,
            });
        }
    }
    Ok(names)
}

fn load_titles(dir: &Path, file: &str) -> std::result::Result<Vec<Title>, CatalogError> {
    let table = CsvTable::read(dir, file)?;
    let title = table.column("Title")?;
    let normalized = table.column("Normalized")?;
    let gender = table.try_column("Gender");
    let mut titles: Vec<Title> = Vec::new();
    for row in &table.rows {
        let raw = row.get(title).unwrap_or("").to_string();
        if titles.iter().any(|t| t.raw == raw) {
            return Err(CatalogError::DuplicateKey {
                file: file.to_string(),
                key: raw,
            });
        }
        titles.push(Title {
            raw,
            normalized: row.get(normalized).unwrap_or("").to_string(),
            gender: gender.and_then(|i| row.get(i)).and_then(Gender::from_code),
        });
    }
    Ok(titles)
}
