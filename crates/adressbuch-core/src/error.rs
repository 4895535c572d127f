//! Error types for the adressbuch-core library.

use thiserror::Error;

/// Main error type for the adressbuch library.
#[derive(Error, Debug)]
pub enum AdressbuchError {
    /// Reference catalog loading or integrity error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record references a scan that is not in the pages table.
    #[error("unknown scan id: {0}")]
    UnknownScan(String),
}

/// Errors detected while loading the reference catalog.
///
/// These indicate corrupted reference data and abort construction;
/// they are never tolerated at runtime.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A reference table contains the same key twice.
    #[error("{file}: duplicate entry \"{key}\"")]
    DuplicateKey { file: String, key: String },

    /// A street abbreviation references a street absent from streets.csv.
    #[error("unknown street \"{street}\" for street abbreviation \"{abbrev}\"")]
    UnknownStreet { abbrev: String, street: String },

    /// An occupation carries a code absent from the CH-ISCO-19 code list.
    #[error("occupation \"{occupation}\": code {code} not in CH-ISCO-19 code list")]
    UnknownIscoCode { occupation: String, code: String },

    /// An economic activity carries a code absent from the NOGA code list.
    #[error("economic activity \"{activity}\": code {code} not in NOGA code list")]
    UnknownNogaCode { activity: String, code: String },

    /// A reference CSV is missing an expected column.
    #[error("{file}: missing column \"{column}\"")]
    MissingColumn { file: String, column: String },

    /// A date cell could not be parsed.
    #[error("{file}: invalid date \"{value}\"")]
    InvalidDate { file: String, value: String },

    /// CSV-level failure in a reference file.
    #[error("{file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// I/O failure while reading a reference file.
    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the adressbuch library.
pub type Result<T> = std::result::Result<T, AdressbuchError>;
