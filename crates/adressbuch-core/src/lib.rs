//! Core library for digitizing historical Bern address books.
//!
//! This crate provides:
//! - OCR text cleanup and line-fragment merging
//! - Rule-based splitting of entry lines into structured fields
//! - Validation of reviewed records against curated reference tables
//! - Normalization into the public release shape (CH-ISCO-19, NOGA,
//!   canonical addresses, pre-1882 address-reform mapping)

pub mod catalog;
pub mod error;
pub mod models;
pub mod split;
pub mod validate;

pub use catalog::ReferenceCatalog;
pub use error::{AdressbuchError, Result};
pub use models::{
    AddressBookEntry, BoundingBox, CompanyRecord, EntryRecord, FamilyName, Field, Gender,
    OcrLine, PersonRecord, SourcePos, UnknownAddress, read_ocr_lines,
};
pub use split::{cleanup_text, merge_lines, Splitter};
pub use validate::Validator;
