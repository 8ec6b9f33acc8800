//! Approximate byte cost of generated documents.
//!
//! Costs are computed on the JSON value tree: an integer costs
//! [`INTEGER_BYTES`], a string its UTF-8 length, a mapping or sequence the sum
//! of its members. Object keys are free. The figures feed the end-of-run
//! summary only.

use serde_json::Value;
use tracing::warn;

use crate::document::Document;
use crate::error::Result;

/// Cost charged for every integer (a 64-bit value).
pub const INTEGER_BYTES: u64 = 8;

/// Estimate the byte cost of a JSON value.
///
/// Values other than mappings, sequences, integers and strings are logged as
/// unexpected and cost nothing.
pub fn estimate_size(value: &Value) -> u64 {
    match value {
        Value::Object(map) => map.values().map(estimate_size).sum(),
        Value::Array(items) => items.iter().map(estimate_size).sum(),
        Value::Number(number) if number.is_i64() || number.is_u64() => INTEGER_BYTES,
        Value::String(text) => text.len() as u64,
        other => {
            warn!(kind = value_kind(other), "unexpected value type in size estimate");
            0
        }
    }
}

/// Estimate the byte cost of one document.
pub fn estimate_document_size(document: &Document) -> Result<u64> {
    let value = serde_json::to_value(document)?;
    Ok(estimate_size(&value))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Aggregate size figures for a document collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSummary {
    pub records: u64,
    pub total_bytes: u64,
    pub avg_bytes_per_record: f64,
}

impl SizeSummary {
    pub fn from_documents(documents: &[Document]) -> Result<Self> {
        let mut total_bytes = 0_u64;
        for document in documents {
            total_bytes += estimate_document_size(document)?;
        }
        let records = documents.len() as u64;
        let avg_bytes_per_record = if records > 0 {
            total_bytes as f64 / records as f64
        } else {
            0.0
        };

        Ok(Self {
            records,
            total_bytes,
            avg_bytes_per_record,
        })
    }
}
