//! Data model for address-book digitization.

mod entry;
mod geometry;
mod lines;
mod release;

pub use entry::{AddressBookEntry, EntryRecord, FamilyName, Field, Gender, SourcePos};
pub use geometry::{BoundingBox, OcrLine};
pub use lines::read_ocr_lines;
pub use release::{CompanyRecord, PersonRecord, UnknownAddress};
