//! Core contracts for dremelgen.
//!
//! This crate defines the nested document model used by the generator, the
//! paired locale table, the byte-size estimator and helpers to read a
//! document collection back from JSON.

pub mod document;
pub mod error;
pub mod load;
pub mod locale;
pub mod size;

pub use document::{Document, Language, Links, NameEntry};
pub use error::{Error, Result};
pub use load::{load_documents, read_documents};
pub use locale::{LOCALES, Locale, country_for_code};
pub use size::{INTEGER_BYTES, SizeSummary, estimate_document_size, estimate_size};
