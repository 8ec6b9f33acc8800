use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::document::Document;
use crate::error::Result;

/// Decode a JSON document collection (a top-level array of records).
pub fn read_documents<R: Read>(reader: R) -> Result<Vec<Document>> {
    let documents = serde_json::from_reader(reader)?;
    Ok(documents)
}

/// Load a JSON document collection from disk.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let file = File::open(path)?;
    read_documents(BufReader::new(file))
}
