//! Seeded record generation and flattening for dremelgen.
//!
//! The engine builds a deterministic collection of nested `Document`s from a
//! seed and a count profile, writes it as one pretty-printed JSON array and
//! flattens it into per-path CSV column tables.

pub mod builder;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod profile;

pub use builder::{DocumentStream, RecordBuilder};
pub use engine::{GenerationEngine, RunOutcome, flatten_documents, flatten_file};
pub use errors::GenerationError;
pub use model::{DEFAULT_SEED, GenerateOptions, GenerationReport, TableReport};
pub use output::columns::{ColumnTable, ColumnWriter};
pub use profile::{CountBounds, Profile};
