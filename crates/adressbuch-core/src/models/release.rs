//! Wide-column records for the public release CSV files.

use serde::{Deserialize, Serialize};

/// One person row in the released Personen.csv.
///
/// Occupations are resolved to CH-ISCO-19 codes with gendered labels;
/// addresses are canonicalized, and for pre-1882 volumes additionally
/// mapped through the address-reform table. Raw source text is
/// preserved alongside every normalized field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Vorname")]
    pub given_name: String,
    #[serde(rename = "Geschlecht")]
    pub gender: String,
    #[serde(rename = "Ledigname")]
    pub maiden_name: String,
    #[serde(rename = "Adelsname")]
    pub nobility_name: String,
    #[serde(rename = "Titel")]
    pub title: String,
    #[serde(rename = "Adresse 1")]
    pub address_1: String,
    #[serde(rename = "Adresse 2")]
    pub address_2: String,
    #[serde(rename = "Adresse 3")]
    pub address_3: String,
    #[serde(rename = "Arbeitsort")]
    pub workplace: String,
    #[serde(rename = "Beruf 1 (CH-ISCO-19)")]
    pub occupation_1_code: String,
    #[serde(rename = "Beruf 1 (CH-ISCO-19, männliche Bezeichnung)")]
    pub occupation_1_male: String,
    #[serde(rename = "Beruf 1 (CH-ISCO-19, weibliche Bezeichnung)")]
    pub occupation_1_female: String,
    #[serde(rename = "Beruf 2 (CH-ISCO-19)")]
    pub occupation_2_code: String,
    #[serde(rename = "Beruf 2 (CH-ISCO-19, männliche Bezeichnung)")]
    pub occupation_2_male: String,
    #[serde(rename = "Beruf 2 (CH-ISCO-19, weibliche Bezeichnung)")]
    pub occupation_2_female: String,
    #[serde(rename = "Beruf 3 (CH-ISCO-19)")]
    pub occupation_3_code: String,
    #[serde(rename = "Beruf 3 (CH-ISCO-19, männliche Bezeichnung)")]
    pub occupation_3_male: String,
    #[serde(rename = "Beruf 3 (CH-ISCO-19, weibliche Bezeichnung)")]
    pub occupation_3_female: String,
    #[serde(rename = "Name (Rohtext)")]
    pub name_raw: String,
    #[serde(rename = "Vorname (Rohtext)")]
    pub given_name_raw: String,
    #[serde(rename = "Ledigname (Rohtext)")]
    pub maiden_name_raw: String,
    #[serde(rename = "Adelsname (Rohtext)")]
    pub nobility_name_raw: String,
    #[serde(rename = "Titel (Rohtext)")]
    pub title_raw: String,
    #[serde(rename = "Adresse 1 (Rohtext)")]
    pub address_1_raw: String,
    #[serde(rename = "Adresse 2 (Rohtext)")]
    pub address_2_raw: String,
    #[serde(rename = "Adresse 3 (Rohtext)")]
    pub address_3_raw: String,
    #[serde(rename = "Adresse 1 (bereinigt, vor Adressreform 1882)")]
    pub address_1_pre_reform: String,
    #[serde(rename = "Adresse 2 (bereinigt, vor Adressreform 1882)")]
    pub address_2_pre_reform: String,
    #[serde(rename = "Adresse 3 (bereinigt, vor Adressreform 1882)")]
    pub address_3_pre_reform: String,
    #[serde(rename = "Beruf 1 (Rohtext)")]
    pub occupation_1_raw: String,
    #[serde(rename = "Beruf 2 (Rohtext)")]
    pub occupation_2_raw: String,
    #[serde(rename = "Beruf 3 (Rohtext)")]
    pub occupation_3_raw: String,
    #[serde(rename = "Bemerkungen")]
    pub remarks: String,
    #[serde(rename = "Datum")]
    pub date: String,
    #[serde(rename = "Seite")]
    pub page: String,
    #[serde(rename = "Scan")]
    pub scan: String,
    #[serde(rename = "Position (X)")]
    pub pos_x: String,
    #[serde(rename = "Position (Y)")]
    pub pos_y: String,
    #[serde(rename = "Position (Breite)")]
    pub pos_width: String,
    #[serde(rename = "Position (Höhe)")]
    pub pos_height: String,
}

/// One company row in the released Firmen.csv.
///
/// Company activities are resolved against the economic-activities
/// table into NOGA codes and labels instead of personal occupations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Adresse 1")]
    pub address_1: String,
    #[serde(rename = "Adresse 2")]
    pub address_2: String,
    #[serde(rename = "Adresse 3")]
    pub address_3: String,
    #[serde(rename = "Branche 1 (NOGA-Code)")]
    pub activity_1_code: String,
    #[serde(rename = "Branche 1 (NOGA-Bezeichnung)")]
    pub activity_1_label: String,
    #[serde(rename = "Branche 2 (NOGA-Code)")]
    pub activity_2_code: String,
    #[serde(rename = "Branche 2 (NOGA-Bezeichnung)")]
    pub activity_2_label: String,
    #[serde(rename = "Branche 3 (NOGA-Code)")]
    pub activity_3_code: String,
    #[serde(rename = "Branche 3 (NOGA-Bezeichnung)")]
    pub activity_3_label: String,
    #[serde(rename = "Name (Rohtext)")]
    pub name_raw: String,
    #[serde(rename = "Adresse 1 (Rohtext)")]
    pub address_1_raw: String,
    #[serde(rename = "Adresse 2 (Rohtext)")]
    pub address_2_raw: String,
    #[serde(rename = "Adresse 3 (Rohtext)")]
    pub address_3_raw: String,
    #[serde(rename = "Adresse 1 (bereinigt, vor Adressreform 1882)")]
    pub address_1_pre_reform: String,
    #[serde(rename = "Adresse 2 (bereinigt, vor Adressreform 1882)")]
    pub address_2_pre_reform: String,
    #[serde(rename = "Adresse 3 (bereinigt, vor Adressreform 1882)")]
    pub address_3_pre_reform: String,
    #[serde(rename = "Branche 1 (Rohtext)")]
    pub activity_1_raw: String,
    #[serde(rename = "Branche 2 (Rohtext)")]
    pub activity_2_raw: String,
    #[serde(rename = "Branche 3 (Rohtext)")]
    pub activity_3_raw: String,
    #[serde(rename = "Bemerkungen")]
    pub remarks: String,
    #[serde(rename = "Datum")]
    pub date: String,
    #[serde(rename = "Seite")]
    pub page: String,
    #[serde(rename = "Scan")]
    pub scan: String,
    #[serde(rename = "Position (X)")]
    pub pos_x: String,
    #[serde(rename = "Position (Y)")]
    pub pos_y: String,
    #[serde(rename = "Position (Breite)")]
    pub pos_width: String,
    #[serde(rename = "Position (Höhe)")]
    pub pos_height: String,
}

/// Aggregated report row for a pre-1882 address that could not be
/// mapped through the address-reform table. Not an error; feeds the
/// curator's review report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownAddress {
    #[serde(rename = "Adresse")]
    pub address: String,
    #[serde(rename = "Anzahl")]
    pub count: u64,
    #[serde(rename = "Beispiel")]
    pub sample: String,
    #[serde(rename = "Beispiel-Scan")]
    pub sample_scan: String,
    #[serde(rename = "Jahr (min)")]
    pub min_year: i32,
    #[serde(rename = "Jahr (max)")]
    pub max_year: i32,
}
