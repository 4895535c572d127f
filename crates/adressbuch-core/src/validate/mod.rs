//! Cross-checking reviewed records against the reference tables and
//! normalizing them into the public release shape.
//!
//! The validator never rejects a record. Every finding is a warning
//! tied to a source position plus a set of flagged review columns;
//! the curator decides what to do with them. Normalization resolves
//! occupations to CH-ISCO-19 codes, company activities to NOGA codes,
//! addresses to their canonical street names, and pre-1882 addresses
//! additionally through the address-reform table.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;

use chrono::Datelike;
use tracing::warn;

use crate::catalog::{base_code, ReferenceCatalog};
use crate::error::{AdressbuchError, Result};
use crate::models::{
    CompanyRecord, EntryRecord, Field, Gender, PersonRecord, SourcePos, UnknownAddress,
};
use crate::split::patterns::VON_ABBREV;

/// Addresses in volumes published before this year run through the
/// address-reform mapping table.
pub const ADDRESS_REFORM_YEAR: i32 = 1882;

const ADDRESS_FIELDS: [Field; 3] = [Field::Adresse, Field::Adresse2, Field::Adresse3];
const OCCUPATION_FIELDS: [Field; 3] = [Field::Beruf, Field::Beruf2, Field::Beruf3];

/// Abbreviations spelled out when normalizing company names.
const COMPANY_WORDS: &[(&str, &str)] = &[
    ("v.", "von"),
    ("u.", "und"),
    ("Cie.", "Compagnie"),
    ("Comp.", "Compagnie"),
    ("Gebr.", "Gebrüder"),
    ("Gebrd.", "Gebrüder"),
    ("Schwst.", "Schwestern"),
    ("Töcht.", "Töchter"),
];

/// Validates reviewed records and accumulates statistics for the
/// run-level reports.
pub struct Validator<'a> {
    catalog: &'a ReferenceCatalog,
    num_warnings: u64,
    /// How often each known occupation was seen; unused table entries
    /// are reported so curators can prune them.
    occupation_counts: HashMap<String, u64>,
    missing_family_names: BTreeSet<String>,
    missing_given_names: BTreeSet<String>,
    missing_occupations: BTreeSet<String>,
    unknown_addresses: BTreeMap<String, UnknownAddress>,
}

impl<'a> Validator<'a> {
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self {
            catalog,
            num_warnings: 0,
            occupation_counts: HashMap::new(),
            missing_family_names: BTreeSet::new(),
            missing_given_names: BTreeSet::new(),
            missing_occupations: BTreeSet::new(),
            unknown_addresses: BTreeMap::new(),
        }
    }

    pub fn num_warnings(&self) -> u64 {
        self.num_warnings
    }

    fn warn(&mut self, pos: &SourcePos, scan: &str, msg: &str) {
        warn!("{pos}, Scan {scan}: {msg}");
        self.num_warnings += 1;
    }

    /// Check one reviewed record against the reference tables.
    ///
    /// Returns the set of review columns a curator should look at
    /// again. Warnings are logged with the record's source position.
    pub fn validate(&mut self, record: &EntryRecord, pos: &SourcePos) -> BTreeSet<Field> {
        let mut bad = BTreeSet::new();
        if record.name.is_empty() {
            self.warn(pos, &record.scan, "empty name");
            bad.insert(Field::Name);
        }
        self.validate_given_name(record, pos, &mut bad);
        self.validate_addresses(record, pos, &mut bad);
        if !record.unrecognized.is_empty() {
            self.warn(
                pos,
                &record.scan,
                &format!("unresolved text \"{}\"", record.unrecognized),
            );
            bad.insert(Field::NichtZuweisbar);
        }
        if record.is_company() {
            self.validate_company(record, pos, &mut bad);
        } else {
            self.validate_person(record, pos, &mut bad);
        }
        bad
    }

    fn validate_given_name(
        &mut self,
        record: &EntryRecord,
        pos: &SourcePos,
        bad: &mut BTreeSet<Field>,
    ) {
        if record.given_name.is_empty() {
            return;
        }
        for word in record.given_name.split_whitespace() {
            if !self.catalog.given_names.contains_key(word) {
                self.warn(
                    pos,
                    &record.scan,
                    &format!("unknown given name \"{}\"", record.given_name),
                );
                self.missing_given_names.insert(record.given_name.clone());
                bad.insert(Field::Vorname);
                return;
            }
        }
    }

    fn validate_addresses(
        &mut self,
        record: &EntryRecord,
        pos: &SourcePos,
        bad: &mut BTreeSet<Field>,
    ) {
        let addresses = record.addresses();
        if addresses[0].is_empty() && addresses[1..].iter().any(|a| !a.is_empty()) {
            self.warn(pos, &record.scan, "empty address #1");
            bad.insert(Field::Adresse);
        }
        for (i, addr) in addresses.iter().enumerate() {
            if addr.is_empty() {
                continue;
            }
            let (ok, _) = self.normalize_address(addr);
            if !ok {
                self.warn(pos, &record.scan, &format!("unknown address \"{addr}\""));
                bad.insert(ADDRESS_FIELDS[i]);
            }
        }
    }

    fn validate_company(
        &mut self,
        record: &EntryRecord,
        pos: &SourcePos,
        bad: &mut BTreeSet<Field>,
    ) {
        if record.title != "[Firma]" {
            self.warn(
                pos,
                &record.scan,
                "title should just be \"[Firma]\", move the rest to the name",
            );
            bad.insert(Field::Titel);
        }
        for (value, field) in [
            (&record.given_name, Field::Vorname),
            (&record.nobility_name, Field::Adelsname),
            (&record.maiden_name, Field::Ledigname),
            (&record.workplace, Field::Arbeitsort),
        ] {
            if !value.is_empty() {
                self.warn(pos, &record.scan, &format!("{field} should not be set on companies"));
                bad.insert(field);
            }
        }
        for (i, activity) in record.occupations().iter().enumerate() {
            if activity.is_empty() {
                continue;
            }
            if !self.catalog.economic_activities.contains_key(*activity) {
                self.warn(pos, &record.scan, &format!("unknown economic activity \"{activity}\""));
                bad.insert(OCCUPATION_FIELDS[i]);
            }
        }
    }

    fn validate_person(
        &mut self,
        record: &EntryRecord,
        pos: &SourcePos,
        bad: &mut BTreeSet<Field>,
    ) {
        if !record.nobility_name.is_empty()
            && !self.catalog.nobility_names.contains_key(&record.nobility_name)
        {
            self.warn(
                pos,
                &record.scan,
                &format!("unknown nobility name \"{}\"", record.nobility_name),
            );
            bad.insert(Field::Adelsname);
        }
        for (name, field) in [
            (&record.name, Field::Name),
            (&record.maiden_name, Field::Ledigname),
        ] {
            if name.is_empty() {
                continue;
            }
            let normalized = normalize_von(name);
            if !self.catalog.family_names.contains(&normalized) {
                self.warn(pos, &record.scan, &format!("unknown family name \"{name}\""));
                self.missing_family_names.insert(normalized);
                bad.insert(field);
            }
        }
        let title_gender = match self.catalog.title(&record.title) {
            Some(title) => title.gender,
            None => {
                if !record.title.is_empty() {
                    self.warn(pos, &record.scan, &format!("unknown title \"{}\"", record.title));
                    bad.insert(Field::Titel);
                }
                None
            }
        };
        for (i, occupation) in record.occupations().iter().enumerate() {
            if occupation.is_empty() {
                continue;
            }
            if self.catalog.occupations.contains_key(*occupation) {
                *self
                    .occupation_counts
                    .entry(occupation.to_string())
                    .or_default() += 1;
            } else {
                self.warn(pos, &record.scan, &format!("unknown occupation \"{occupation}\""));
                self.missing_occupations.insert(occupation.to_string());
                bad.insert(OCCUPATION_FIELDS[i]);
            }
        }
        // Mismatches are worth a look but are often legitimate, e.g.
        // a widow listed under her late husband's occupation.
        if let (Some(tg), Some(gg)) = (title_gender, self.given_name_gender(&record.given_name)) {
            if tg != gg {
                self.warn(
                    pos,
                    &record.scan,
                    &format!(
                        "gender of title \"{}\" does not match given name \"{}\"",
                        record.title, record.given_name
                    ),
                );
            }
        }
    }

    /// The gender implied by a given name, when all its words agree.
    fn given_name_gender(&self, given_name: &str) -> Option<Gender> {
        let genders: BTreeSet<Gender> = given_name
            .split_whitespace()
            .filter_map(|w| self.catalog.given_names.get(w).copied().flatten())
            .collect();
        if genders.len() == 1 {
            genders.into_iter().next()
        } else {
            None
        }
    }

    /// Resolve an address to its canonical form: expand street
    /// abbreviations, keep the house number, and pass points of
    /// interest through their normalized spelling.
    ///
    /// Returns whether the address was recognized; the canonical form
    /// falls back to the input when it was not.
    pub fn normalize_address(&self, addr: &str) -> (bool, String) {
        let catalog = self.catalog;
        // POIs first: "Kaserne" must not be parsed as a street.
        if let Some(normalized) = catalog.pois.get(addr) {
            return (true, normalized.clone());
        }
        if let Some(caps) = crate::split::patterns::ADDRESS_SPLIT.captures(addr) {
            let (street, num) = (&caps[1], &caps[2]);
            if let Some(full) = catalog.street_abbrevs.get(street) {
                return (true, format!("{full} {num}"));
            }
            if catalog.streets.contains(street) {
                return (true, format!("{street} {num}"));
            }
        }
        if catalog.streets.contains(addr) {
            return (true, addr.to_string());
        }
        if let Some(full) = catalog.street_abbrevs.get(addr) {
            return (true, full.clone());
        }
        (false, addr.to_string())
    }

    /// Normalize one reviewed person record into its release row.
    ///
    /// Fails only when the scan id is not in the pages table; all
    /// content findings were already reported by [`validate`].
    ///
    /// [`validate`]: Validator::validate
    pub fn normalize_person(&mut self, record: &EntryRecord) -> Result<PersonRecord> {
        debug_assert!(!record.is_company());
        let page = self
            .catalog
            .pages
            .get(&record.scan)
            .ok_or_else(|| AdressbuchError::UnknownScan(record.scan.clone()))?
            .clone();
        let year = page.date.year();
        let [pos_x, pos_y, pos_width, pos_height] = split_position(&record.position);
        let [a1, a2, a3] = record.addresses();
        let (address_1, address_1_pre_reform) = self.normalize_entry_address(a1, record, year);
        let (address_2, address_2_pre_reform) = self.normalize_entry_address(a2, record, year);
        let (address_3, address_3_pre_reform) = self.normalize_entry_address(a3, record, year);
        let [o1, o2, o3] = record.occupations();
        let (occupation_1_code, occupation_1_male, occupation_1_female) = self.isco_labels(o1);
        let (occupation_2_code, occupation_2_male, occupation_2_female) = self.isco_labels(o2);
        let (occupation_3_code, occupation_3_male, occupation_3_female) = self.isco_labels(o3);
        let title = self.catalog.title(&record.title);
        let gender = title
            .and_then(|t| t.gender)
            .or_else(|| self.given_name_gender(&record.given_name));
        Ok(PersonRecord {
            id: record.id.clone(),
            name: normalize_von(&record.name),
            given_name: record.given_name.clone(),
            gender: gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
            maiden_name: normalize_von(&record.maiden_name),
            nobility_name: self
                .catalog
                .nobility_names
                .get(&record.nobility_name)
                .cloned()
                .unwrap_or_else(|| record.nobility_name.clone()),
            title: title
                .map(|t| t.normalized.clone())
                .unwrap_or_else(|| record.title.clone()),
            address_1,
            address_2,
            address_3,
            workplace: record.workplace.clone(),
            occupation_1_code,
            occupation_1_male,
            occupation_1_female,
            occupation_2_code,
            occupation_2_male,
            occupation_2_female,
            occupation_3_code,
            occupation_3_male,
            occupation_3_female,
            name_raw: record.name.clone(),
            given_name_raw: record.given_name.clone(),
            maiden_name_raw: record.maiden_name.clone(),
            nobility_name_raw: record.nobility_name.clone(),
            title_raw: record.title.clone(),
            address_1_raw: record.address_1.clone(),
            address_2_raw: record.address_2.clone(),
            address_3_raw: record.address_3.clone(),
            address_1_pre_reform,
            address_2_pre_reform,
            address_3_pre_reform,
            occupation_1_raw: record.occupation_1.clone(),
            occupation_2_raw: record.occupation_2.clone(),
            occupation_3_raw: record.occupation_3.clone(),
            remarks: record.remarks.clone(),
            date: page.date.format("%Y-%m-%d").to_string(),
            page: page.label.clone(),
            scan: record.scan.clone(),
            pos_x,
            pos_y,
            pos_width,
            pos_height,
        })
    }

    /// Normalize one reviewed company record into its release row.
    pub fn normalize_company(&mut self, record: &EntryRecord) -> Result<CompanyRecord> {
        debug_assert!(record.is_company());
        let page = self
            .catalog
            .pages
            .get(&record.scan)
            .ok_or_else(|| AdressbuchError::UnknownScan(record.scan.clone()))?
            .clone();
        let year = page.date.year();
        let [pos_x, pos_y, pos_width, pos_height] = split_position(&record.position);
        let [a1, a2, a3] = record.addresses();
        let (address_1, address_1_pre_reform) = self.normalize_entry_address(a1, record, year);
        let (address_2, address_2_pre_reform) = self.normalize_entry_address(a2, record, year);
        let (address_3, address_3_pre_reform) = self.normalize_entry_address(a3, record, year);
        let [b1, b2, b3] = record.occupations();
        let (activity_1_code, activity_1_label) = self.noga_labels(b1);
        let (activity_2_code, activity_2_label) = self.noga_labels(b2);
        let (activity_3_code, activity_3_label) = self.noga_labels(b3);
        Ok(CompanyRecord {
            id: record.id.clone(),
            name: normalize_company_name(&record.name),
            address_1,
            address_2,
            address_3,
            activity_1_code,
            activity_1_label,
            activity_2_code,
            activity_2_label,
            activity_3_code,
            activity_3_label,
            name_raw: record.name.clone(),
            address_1_raw: record.address_1.clone(),
            address_2_raw: record.address_2.clone(),
            address_3_raw: record.address_3.clone(),
            address_1_pre_reform,
            address_2_pre_reform,
            address_3_pre_reform,
            activity_1_raw: record.occupation_1.clone(),
            activity_2_raw: record.occupation_2.clone(),
            activity_3_raw: record.occupation_3.clone(),
            remarks: record.remarks.clone(),
            date: page.date.format("%Y-%m-%d").to_string(),
            page: page.label.clone(),
            scan: record.scan.clone(),
            pos_x,
            pos_y,
            pos_width,
            pos_height,
        })
    }

    /// Canonicalize one address and, for pre-1882 volumes, map it to
    /// its post-reform equivalent. Unmappable pre-reform addresses
    /// are aggregated for the curator's report and leave the modern
    /// column empty.
    fn normalize_entry_address(
        &mut self,
        raw: &str,
        record: &EntryRecord,
        year: i32,
    ) -> (String, String) {
        if raw.is_empty() {
            return (String::new(), String::new());
        }
        let (_, canonical) = self.normalize_address(raw);
        if year >= ADDRESS_REFORM_YEAR {
            return (canonical, String::new());
        }
        match self.catalog.address_reform.get(&canonical) {
            Some(mapped) => (mapped.clone(), canonical),
            None => {
                self.record_unknown_address(&canonical, record, year);
                (String::new(), canonical)
            }
        }
    }

    fn record_unknown_address(&mut self, address: &str, record: &EntryRecord, year: i32) {
        let entry = self
            .unknown_addresses
            .entry(address.to_string())
            .or_insert_with(|| UnknownAddress {
                address: address.to_string(),
                count: 0,
                sample: record.name.clone(),
                sample_scan: record.scan.clone(),
                min_year: year,
                max_year: year,
            });
        entry.count += 1;
        entry.min_year = entry.min_year.min(year);
        entry.max_year = entry.max_year.max(year);
    }

    /// CH-ISCO-19 code and its gendered German labels for a known
    /// occupation. Uncodable occupations ("*") yield empty columns.
    fn isco_labels(&self, occupation: &str) -> (String, String, String) {
        let code = match self.catalog.occupations.get(occupation) {
            Some(code) if code != "*" => code.clone(),
            _ => return (String::new(), String::new(), String::new()),
        };
        let (male, female) = match self.catalog.isco.get(base_code(&code)) {
            Some(label) => match label.split_once(" | ") {
                Some((m, f)) => (m.to_string(), f.to_string()),
                None => (label.clone(), label.clone()),
            },
            None => (String::new(), String::new()),
        };
        (code, male, female)
    }

    /// NOGA code and label for a known economic activity.
    fn noga_labels(&self, activity: &str) -> (String, String) {
        let code = match self.catalog.economic_activities.get(activity) {
            Some(code) if !code.is_empty() => code.clone(),
            _ => return (String::new(), String::new()),
        };
        let label = self.catalog.noga.get(&code).cloned().unwrap_or_default();
        (code, label)
    }

    /// Write the run-level summary: reference-table entries never
    /// used, names and occupations missing from the tables, and the
    /// total warning count.
    pub fn report(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let mut unused: Vec<&str> = self
            .catalog
            .occupations
            .keys()
            .filter(|o| !self.occupation_counts.contains_key(*o))
            .map(String::as_str)
            .collect();
        unused.sort_unstable();
        if !unused.is_empty() {
            writeln!(out, "Unused occupations ({}):", unused.len())?;
            for occupation in unused {
                writeln!(out, "  {occupation}")?;
            }
        }
        report_block(out, "Missing family names", &self.missing_family_names)?;
        report_block(out, "Missing given names", &self.missing_given_names)?;
        report_block(out, "Missing occupations", &self.missing_occupations)?;
        writeln!(out, "{} warnings", self.num_warnings)
    }

    /// Write the aggregated unmappable pre-1882 addresses as CSV,
    /// most frequent first.
    pub fn report_unknown_addresses_before_1882(&self, out: &mut dyn io::Write) -> Result<()> {
        let mut rows: Vec<&UnknownAddress> = self.unknown_addresses.values().collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.address.cmp(&b.address)));
        let mut writer = csv::Writer::from_writer(out);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn report_block(
    out: &mut dyn io::Write,
    label: &str,
    entries: &BTreeSet<String>,
) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out, "{} ({}):", label, entries.len())?;
    for entry in entries {
        writeln!(out, "  {entry}")?;
    }
    Ok(())
}

/// Spell out the abbreviated nobility particle, "v. Büren" to
/// "von Büren".
fn normalize_von(name: &str) -> String {
    VON_ABBREV.replace_all(name, "von").into_owned()
}

/// Spell out common abbreviations in a company name, word by word.
fn normalize_company_name(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            COMPANY_WORDS
                .iter()
                .find(|(abbrev, _)| *abbrev == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a "x,y,width,height" position cell; malformed cells yield
/// empty columns.
fn split_position(position: &str) -> [String; 4] {
    let parts: Vec<&str> = position.split(',').collect();
    if parts.len() == 4 && parts.iter().all(|p| p.trim().parse::<i32>().is_ok()) {
        [
            parts[0].trim().to_string(),
            parts[1].trim().to_string(),
            parts[2].trim().to_string(),
            parts[3].trim().to_string(),
        ]
    } else {
        Default::default()
    }
}
