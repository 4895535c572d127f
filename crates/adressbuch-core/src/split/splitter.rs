//! Rule-ordered segmentation of entry lines into structured fields.
//!
//! One logical line is peeled apart in a fixed pipeline order:
//! name, company marker, maiden name, title, given name, addresses,
//! occupations. Each step is greedy; a segment claimed by one step is
//! gone for later steps, and there is no backtracking. Whatever
//! survives the pipeline lands in `unrecognized` for human review.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::ReferenceCatalog;
use crate::models::{AddressBookEntry, BoundingBox, FamilyName, OcrLine};

use super::merge::merge_lines;
use super::patterns::{
    nobility_particle, COMPANY_ABBREVS, MAIDEN_NAME_PREFIXES, NOBILITY_PREFIXES,
    OCCUPATION_PAIR, STREET_AND_POI, STREET_NUMBER, STREET_TWO_NUMBERS, TWO_STREETS,
};

/// Splits merged OCR lines into structured address-book entries,
/// using the reference catalog to recognize titles, given names,
/// streets, points of interest, and occupations.
pub struct Splitter<'a> {
    catalog: &'a ReferenceCatalog,
}

impl<'a> Splitter<'a> {
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self { catalog }
    }

    /// Split a batch of OCR lines, grouped by page and column.
    pub fn split(&self, lines: &[OcrLine]) -> Vec<AddressBookEntry> {
        let columns: BTreeSet<(u32, u32)> =
            lines.iter().map(|l| (l.page_id, l.column)).collect();
        let mut result = Vec::new();
        for (page_id, column) in columns {
            let col_lines: Vec<OcrLine> = lines
                .iter()
                .filter(|l| l.page_id == page_id && l.column == column)
                .cloned()
                .collect();
            result.extend(self.split_column(&col_lines));
        }
        result
    }

    /// Split the lines of one page column into entries.
    ///
    /// Tracks a running lemma so that the dash sentinel resolves to
    /// the previous entry's family name, and widens every entry box
    /// to the full column width so review crops line up.
    pub fn split_column(&self, lines: &[OcrLine]) -> Vec<AddressBookEntry> {
        let mut sorted: Vec<OcrLine> = lines.to_vec();
        sorted.sort_by_key(|l| l.bbox.y);
        let merged = merge_lines(&sorted);
        if merged.is_empty() {
            return Vec::new();
        }
        let min_x = merged.iter().map(|l| l.bbox.x).min().unwrap_or(0);
        let max_x = merged
            .iter()
            .map(|l| l.bbox.x + l.bbox.width)
            .max()
            .unwrap_or(0);
        let mut lemma = String::new();
        let mut result = Vec::new();
        for line in &merged {
            let (family, rest) = self.split_name(&line.text);
            let name = match family {
                FamilyName::RepeatPrevious => lemma.clone(),
                FamilyName::Literal(n) => {
                    // After "von Goumoens-von Tavel", the new lemma
                    // is "von Goumoens".
                    lemma = n.split('-').next().unwrap_or("").trim().to_string();
                    n
                }
            };
            let (company, rest) = self.split_company(&name, &rest);
            let (name, maiden_name, title, rest) = match company {
                Some(company) => (company, String::new(), "[Firma]".to_string(), rest),
                None => {
                    let (maiden_name, rest) = self.split_maiden_name(&rest);
                    let (title, rest) = self.split_title(&rest);
                    (name, maiden_name, title, rest)
                }
            };
            let (given_name, rest) = self.split_given_name(&rest);
            // The title sometimes follows the given name.
            let (title, rest) = if title.is_empty() {
                self.split_title(&rest)
            } else {
                (title, rest)
            };
            let (addresses, rest) = self.split_addresses(&rest);
            let (occupations, rest) = self.split_occupations(&rest);
            if !rest.is_empty() {
                debug!(page_id = line.page_id, "unrecognized remainder: {rest}");
            }
            result.push(AddressBookEntry {
                id: None,
                page_id: line.page_id,
                bbox: BoundingBox::new(min_x, line.bbox.y, max_x - min_x, line.bbox.height),
                family_name: name,
                given_name,
                maiden_name,
                nobility_name: String::new(),
                title,
                occupations,
                addresses,
                workplace: String::new(),
                unrecognized: rest,
            });
        }
        result
    }

    /// Peel the family name off the front of an entry line.
    ///
    /// Recognizes nobility particles ("von", "de" and their OCR
    /// variants), including double-barrelled noble names where the
    /// second word itself ends in a hyphenated particle. A lone dash
    /// becomes the repeat-previous sentinel.
    pub fn split_name(&self, text: &str) -> (FamilyName, String) {
        let mut segments = text.split(',');
        let first = segments.next().unwrap_or("").to_string();
        let n = first.replace(" -", "-").replace("- ", "-");
        let words: Vec<&str> = n.split_whitespace().collect();
        if words.is_empty() {
            let rest = join_segments(&[], segments);
            return (FamilyName::Literal(String::new()), rest);
        }
        let mut pos = 0;
        if nobility_particle(words[0]).is_some() {
            pos += 1;
        }
        if pos < words.len()
            && NOBILITY_PREFIXES
                .iter()
                .any(|(raw, _)| words[pos].ends_with(&format!("-{raw}")))
        {
            pos += 1;
        }
        let pos = pos.min(words.len() - 1);
        let mut words: Vec<String> = words.into_iter().map(str::to_string).collect();
        if let Some(canonical) = nobility_particle(&words[0]) {
            words[0] = canonical.to_string();
        }
        let name = words[..=pos].join(" ");
        let family = if matches!(name.as_str(), "-" | "–" | "—") {
            FamilyName::RepeatPrevious
        } else {
            FamilyName::Literal(name)
        };
        let trailing = words[pos + 1..].join(" ");
        let rest = join_segments(&[trailing], segments);
        (family, rest)
    }

    /// Absorb a company abbreviation at the start of the remainder
    /// into the name, marking the entry as a company.
    pub fn split_company(&self, name: &str, rest: &str) -> (Option<String>, String) {
        for abbrev in COMPANY_ABBREVS {
            if let Some(stripped) = rest.strip_prefix(abbrev) {
                let company = format!("{name} {abbrev}");
                let rest = stripped.strip_prefix(',').unwrap_or(stripped).trim();
                return (Some(company), rest.to_string());
            }
        }
        (None, rest.to_string())
    }

    /// Extract a maiden name introduced by "geb."/"geborne", taking
    /// two words when the first is a nobility particle.
    pub fn split_maiden_name(&self, text: &str) -> (String, String) {
        if !MAIDEN_NAME_PREFIXES.iter().any(|p| text.starts_with(p)) {
            return (String::new(), text.to_string());
        }
        let parts: Vec<&str> = text.split(',').collect();
        let words: Vec<&str> = parts[0].split_whitespace().skip(1).collect();
        if words.is_empty() {
            return (String::new(), text.to_string());
        }
        let (maiden_name, rest_words) = match nobility_particle(words[0]) {
            Some(nob) if words.len() >= 2 => (format!("{nob} {}", words[1]), &words[2..]),
            _ => (words[0].to_string(), &words[1..]),
        };
        let mut p: Vec<String> = Vec::new();
        if !rest_words.is_empty() {
            p.push(rest_words.join(" "));
        }
        p.extend(parts[1..].iter().map(|s| s.to_string()));
        let rest = p.iter().map(|x| x.trim()).collect::<Vec<_>>().join(", ");
        (maiden_name, rest)
    }

    /// Match a known title at the start of the remainder.
    pub fn split_title(&self, text: &str) -> (String, String) {
        if let Some(title) = self.catalog.match_title_prefix(text) {
            let rest = text[title.raw.len()..].trim();
            let rest = rest.strip_prefix(',').unwrap_or(rest).trim();
            return (title.raw.clone(), rest.to_string());
        }
        (String::new(), text.to_string())
    }

    /// Extract the leading comma-segment as a given name, but only if
    /// every word in it is a known given name. Partial recognition is
    /// not accepted.
    pub fn split_given_name(&self, text: &str) -> (String, String) {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        let first = parts[0];
        if !first.is_empty()
            && first
                .split_whitespace()
                .all(|w| self.catalog.given_names.contains_key(w))
        {
            return (first.to_string(), parts[1..].join(", "));
        }
        (String::new(), text.to_string())
    }

    /// Recognize addresses at the edges of the unresolved field list.
    /// Only the first and the last comma-segment are examined.
    pub fn split_addresses(&self, text: &str) -> (Vec<String>, String) {
        let mut parts: Vec<String> = text.split(',').map(|p| p.trim().to_string()).collect();
        let mut addrs = self.cleanup_address(&parts[0]);
        if !addrs.is_empty() {
            parts.remove(0);
        }
        if let Some(last) = parts.last() {
            let final_addrs = self.cleanup_address(last);
            if !final_addrs.is_empty() {
                parts.pop();
                addrs.extend(final_addrs);
            }
        }
        (addrs, parts.join(", "))
    }

    /// Parse one segment into zero or more addresses.
    ///
    /// A segment is an address only if the street resolves via the
    /// streets or street-abbreviations table, or if it is a known
    /// point of interest. Compound "und" forms yield two addresses.
    pub fn cleanup_address(&self, addr: &str) -> Vec<String> {
        let catalog = self.catalog;
        if catalog.pois.contains_key(addr) {
            return vec![addr.to_string()];
        }
        if let Some(caps) = STREET_NUMBER.captures(addr) {
            let (street, num) = (&caps[1], &caps[2]);
            if catalog.is_street(street) {
                return vec![format!("{street} {num}")];
            }
        }
        if let Some(caps) = STREET_TWO_NUMBERS.captures(addr) {
            let (street, num1, num2) = (&caps[1], &caps[2], &caps[4]);
            if catalog.is_street(street) {
                return vec![format!("{street} {num1}"), format!("{street} {num2}")];
            }
        }
        if let Some(caps) = TWO_STREETS.captures(addr) {
            let (s1, num1, s2, num2) = (&caps[1], &caps[2], &caps[4], &caps[5]);
            if catalog.is_street(s1) && catalog.is_street(s2) {
                return vec![format!("{s1} {num1}"), format!("{s2} {num2}")];
            }
        }
        if let Some(caps) = STREET_AND_POI.captures(addr) {
            let (s1, num1, poi) = (&caps[1], &caps[2], &caps[4]);
            if catalog.is_street(s1) && catalog.pois.contains_key(poi) {
                return vec![format!("{s1} {num1}"), poi.to_string()];
            }
        }
        Vec::new()
    }

    /// Match the remaining comma-segments against the occupations
    /// table, retrying with an appended period and expanding
    /// "X u. Y" pairs.
    pub fn split_occupations(&self, text: &str) -> (Vec<String>, String) {
        let occupations = &self.catalog.occupations;
        let mut found = Vec::new();
        let mut rest = Vec::new();
        for part in text.split(',').map(str::trim) {
            if occupations.contains_key(part) {
                found.push(part.to_string());
                continue;
            }
            // Sometimes OCR (or the typesetter) missed a final dot,
            // as in "Schneid".
            let dotted = format!("{part}.");
            if occupations.contains_key(&dotted) {
                found.push(dotted);
                continue;
            }
            if let Some(caps) = OCCUPATION_PAIR.captures(part) {
                let (p1, p2) = (&caps[1], &caps[3]);
                if occupations.contains_key(p1) && occupations.contains_key(p2) {
                    found.push(p1.to_string());
                    found.push(p2.to_string());
                    continue;
                }
            }
            rest.push(part.to_string());
        }
        (found, rest.join(", "))
    }
}

/// Join leading pieces and the remaining comma-segments back into a
/// comma-separated remainder, skipping empty pieces.
fn join_segments<'s>(leading: &'s [String], segments: impl Iterator<Item = &'s str>) -> String {
    leading
        .iter()
        .map(String::as_str)
        .chain(segments)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Title;
    use crate::models::Gender;
    use pretty_assertions::assert_eq;

    fn test_catalog() -> ReferenceCatalog {
        let mut catalog = ReferenceCatalog::default();
        for name in ["Anna", "Johann", "Rudolf", "M.", "H.", "J."] {
            catalog.given_names.insert(name.to_string(), None);
        }
        catalog.titles = vec![
            Title {
                raw: "Wittwe".to_string(),
                normalized: "Witwe".to_string(),
                gender: Some(Gender::Female),
            },
            Title {
                raw: "Dr.".to_string(),
                normalized: "Doktor".to_string(),
                gender: None,
            },
        ];
        catalog.sort_titles();
        for occ in ["Schneiderin", "Mal.", "Bärenw.", "Gypser", "Schreiner"] {
            catalog.occupations.insert(occ.to_string(), "*".to_string());
        }
        for street in ["Metzgergasse", "Aarbergergasse", "Brunngasse"] {
            catalog.streets.insert(street.to_string());
        }
        catalog
            .street_abbrevs
            .insert("Metzg.".to_string(), "Metzgergasse".to_string());
        catalog
            .street_abbrevs
            .insert("Aarberg.".to_string(), "Aarbergergasse".to_string());
        catalog
            .pois
            .insert("Bollwerk".to_string(), "Bollwerk".to_string());
        catalog
    }

    #[test]
    fn test_split_name_plain() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (name, rest) = splitter.split_name("Meier, M., Schneiderin");
        assert_eq!(name, FamilyName::Literal("Meier".to_string()));
        assert_eq!(rest, "M., Schneiderin");
    }

    #[test]
    fn test_split_name_nobility() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (name, rest) = splitter.split_name("v. Büren H., geb. v. Tavel");
        assert_eq!(name, FamilyName::Literal("von Büren".to_string()));
        assert_eq!(rest, "H., geb. v. Tavel");
    }

    #[test]
    fn test_split_name_double_barrelled_nobility() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (name, rest) = splitter.split_name("von Wagner-von Steiger, Rudolf");
        assert_eq!(
            name,
            FamilyName::Literal("von Wagner-von Steiger".to_string())
        );
        assert_eq!(rest, "Rudolf");
    }

    #[test]
    fn test_split_name_dash_sentinel() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (name, rest) = splitter.split_name("—, Johann, Schreiner");
        assert_eq!(name, FamilyName::RepeatPrevious);
        assert_eq!(rest, "Johann, Schreiner");
    }

    #[test]
    fn test_split_company() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (company, rest) = splitter.split_company("Buß", "& Cie., Parfümerie, Brückfeld");
        assert_eq!(company, Some("Buß & Cie.".to_string()));
        assert_eq!(rest, "Parfümerie, Brückfeld");
    }

    #[test]
    fn test_split_company_no_marker() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (company, rest) = splitter.split_company("Meier", "Johann, Schreiner");
        assert_eq!(company, None);
        assert_eq!(rest, "Johann, Schreiner");
    }

    #[test]
    fn test_split_maiden_name() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (maiden, rest) = splitter.split_maiden_name("geb. Müller, Schneiderin");
        assert_eq!(maiden, "Müller");
        assert_eq!(rest, "Schneiderin");
    }

    #[test]
    fn test_split_maiden_name_nobility() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (maiden, rest) = splitter.split_maiden_name("geb. v. Tavel, Metzg. 21");
        assert_eq!(maiden, "von Tavel");
        assert_eq!(rest, "Metzg. 21");
    }

    #[test]
    fn test_split_title_before_and_after_given_name() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (title, rest) = splitter.split_title("Wittwe, Schneiderin");
        assert_eq!(title, "Wittwe");
        assert_eq!(rest, "Schneiderin");
        let (title, rest) = splitter.split_title("Schneiderin, Metzg. 21");
        assert_eq!(title, "");
        assert_eq!(rest, "Schneiderin, Metzg. 21");
    }

    #[test]
    fn test_split_given_name_whole_segment_only() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (given, rest) = splitter.split_given_name("Johann Rudolf, Schreiner");
        assert_eq!(given, "Johann Rudolf");
        assert_eq!(rest, "Schreiner");
        // One unknown word rejects the whole segment.
        let (given, rest) = splitter.split_given_name("Johann Xaver, Schreiner");
        assert_eq!(given, "");
        assert_eq!(rest, "Johann Xaver, Schreiner");
    }

    #[test]
    fn test_cleanup_address_same_street_two_numbers() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        assert_eq!(
            splitter.cleanup_address("Metzg. 85 und 87"),
            vec!["Metzg. 85".to_string(), "Metzg. 87".to_string()]
        );
    }

    #[test]
    fn test_cleanup_address_unknown_street() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        assert_eq!(splitter.cleanup_address("Something 85"), Vec::<String>::new());
    }

    #[test]
    fn test_cleanup_address_two_streets() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        assert_eq!(
            splitter.cleanup_address("Metzg. 21 und Brunngasse 3"),
            vec!["Metzg. 21".to_string(), "Brunngasse 3".to_string()]
        );
    }

    #[test]
    fn test_cleanup_address_street_and_poi() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        assert_eq!(
            splitter.cleanup_address("Metzg. 21 und Bollwerk"),
            vec!["Metzg. 21".to_string(), "Bollwerk".to_string()]
        );
    }

    #[test]
    fn test_cleanup_address_number_suffix_letter() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        assert_eq!(
            splitter.cleanup_address("Brunngasse 8b."),
            vec!["Brunngasse 8b".to_string()]
        );
    }

    #[test]
    fn test_split_addresses_edges_only() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (addrs, rest) = splitter.split_addresses("Metzg. 21, Unbekannt, Aarberg. 63");
        assert_eq!(addrs, vec!["Metzg. 21".to_string(), "Aarberg. 63".to_string()]);
        assert_eq!(rest, "Unbekannt");
    }

    #[test]
    fn test_split_occupations() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (found, rest) = splitter.split_occupations("Mal., Bärenw.");
        assert_eq!(found, vec!["Mal.".to_string(), "Bärenw.".to_string()]);
        assert_eq!(rest, "");
    }

    #[test]
    fn test_split_occupations_missing_dot_and_pair() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (found, rest) = splitter.split_occupations("Mal u. Gypser, Bärenw");
        assert_eq!(
            found,
            vec!["Bärenw.".to_string()]
        );
        assert_eq!(rest, "Mal u. Gypser");
    }

    #[test]
    fn test_split_occupations_und_pair() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let (found, rest) = splitter.split_occupations("Mal. und Gypser");
        assert_eq!(found, vec!["Mal.".to_string(), "Gypser".to_string()]);
        assert_eq!(rest, "");
    }

    #[test]
    fn test_split_column_tracks_lemma() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let lines = vec![
            OcrLine {
                page_id: 1,
                column: 1,
                text: "Meier, Johann, Schreiner, Metzg. 21".to_string(),
                bbox: BoundingBox::new(100, 10, 400, 20),
            },
            OcrLine {
                page_id: 1,
                column: 1,
                text: "—, Anna, Schneiderin, Metzg. 21".to_string(),
                bbox: BoundingBox::new(100, 40, 400, 20),
            },
        ];
        let entries = splitter.split_column(&lines);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].family_name, "Meier");
        assert_eq!(entries[1].family_name, "Meier");
        assert_eq!(entries[1].given_name, "Anna");
        assert_eq!(entries[1].occupations, vec!["Schneiderin".to_string()]);
        assert_eq!(entries[1].addresses, vec!["Metzg. 21".to_string()]);
        assert_eq!(entries[1].unrecognized, "");
    }

    #[test]
    fn test_split_column_normalizes_box_width() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let lines = vec![
            OcrLine {
                page_id: 1,
                column: 1,
                text: "Meier, Johann".to_string(),
                bbox: BoundingBox::new(100, 10, 300, 20),
            },
            OcrLine {
                page_id: 1,
                column: 1,
                text: "Muster, Anna".to_string(),
                bbox: BoundingBox::new(110, 40, 400, 20),
            },
        ];
        let entries = splitter.split_column(&lines);
        assert_eq!(entries[0].bbox, BoundingBox::new(100, 10, 410, 20));
        assert_eq!(entries[1].bbox, BoundingBox::new(100, 40, 410, 20));
    }

    #[test]
    fn test_split_groups_by_page_and_column() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let mut lines = Vec::new();
        for (page, column, text) in [
            (2u32, 1u32, "Muster, Anna, Schneiderin"),
            (1, 2, "Meier, Johann, Schreiner"),
            (1, 1, "Adam, Wittwe, Schneiderin"),
        ] {
            lines.push(OcrLine {
                page_id: page,
                column,
                text: text.to_string(),
                bbox: BoundingBox::new(100, 10, 400, 20),
            });
        }
        let entries = splitter.split(&lines);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].family_name, "Adam");
        assert_eq!(entries[1].family_name, "Meier");
        assert_eq!(entries[2].family_name, "Muster");
    }

    #[test]
    fn test_split_column_merges_wrapped_entry() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let lines = vec![
            OcrLine {
                page_id: 1,
                column: 1,
                text: "Adam, Wittwe, Schneiderin,".to_string(),
                bbox: BoundingBox::new(100, 10, 400, 20),
            },
            OcrLine {
                page_id: 1,
                column: 1,
                text: "Aarberg. 63".to_string(),
                bbox: BoundingBox::new(180, 35, 200, 20),
            },
        ];
        let entries = splitter.split_column(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].family_name, "Adam");
        assert_eq!(entries[0].title, "Wittwe");
        assert_eq!(entries[0].occupations, vec!["Schneiderin".to_string()]);
        assert_eq!(entries[0].addresses, vec!["Aarberg. 63".to_string()]);
        assert_eq!(entries[0].unrecognized, "");
    }

    #[test]
    fn test_company_entry_skips_person_fields() {
        let catalog = test_catalog();
        let splitter = Splitter::new(&catalog);
        let lines = vec![OcrLine {
            page_id: 1,
            column: 1,
            text: "Buß & Cie., Metzg. 21".to_string(),
            bbox: BoundingBox::new(100, 10, 400, 20),
        }];
        let entries = splitter.split_column(&lines);
        assert_eq!(entries[0].family_name, "Buß & Cie.");
        assert_eq!(entries[0].title, "[Firma]");
        assert_eq!(entries[0].maiden_name, "");
        assert_eq!(entries[0].addresses, vec!["Metzg. 21".to_string()]);
    }
}
