//! Flattened column tables.
//!
//! Every leaf occurrence of a repeated or optional field becomes one row in
//! the table of its path, keyed by the owning document's `DocId`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use dremelgen_core::Document;

use crate::errors::GenerationError;
use crate::model::TableReport;

/// One per-path output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnTable {
    DocId,
    LinksBackward,
    LinksForward,
    NameLanguageCode,
    NameLanguageCountry,
    NameUrl,
}

impl ColumnTable {
    pub const ALL: [ColumnTable; 6] = [
        ColumnTable::DocId,
        ColumnTable::LinksBackward,
        ColumnTable::LinksForward,
        ColumnTable::NameLanguageCode,
        ColumnTable::NameLanguageCountry,
        ColumnTable::NameUrl,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ColumnTable::DocId => "t_docId.csv",
            ColumnTable::LinksBackward => "t_links_backward.csv",
            ColumnTable::LinksForward => "t_links_forward.csv",
            ColumnTable::NameLanguageCode => "t_name_language_code.csv",
            ColumnTable::NameLanguageCountry => "t_name_language_country.csv",
            ColumnTable::NameUrl => "t_name_url.csv",
        }
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            ColumnTable::DocId => &["DocId"],
            ColumnTable::LinksBackward => &["DocId", "Links.Backward"],
            ColumnTable::LinksForward => &["DocId", "Links.Forward"],
            ColumnTable::NameLanguageCode => &["DocId", "Name.Language.Code"],
            ColumnTable::NameLanguageCountry => &["DocId", "Name.Language.Country"],
            ColumnTable::NameUrl => &["DocId", "Name.Url"],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Leaf value of a flattened row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Int(u64),
    Text(&'a str),
}

impl Cell<'_> {
    fn to_field(self) -> String {
        match self {
            Cell::Int(value) => value.to_string(),
            Cell::Text(value) => value.to_string(),
        }
    }
}

/// One row of a column table. `value` is `None` only for the `DocId` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRow<'a> {
    pub table: ColumnTable,
    pub doc_id: u64,
    pub value: Option<Cell<'a>>,
}

impl ColumnRow<'_> {
    fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.doc_id.to_string()];
        if let Some(value) = self.value {
            fields.push(value.to_field());
        }
        fields
    }
}

/// Rows of one document in traversal order: the id row, backward links,
/// forward links, then each name's languages (code before country) and url.
pub fn flatten_document(document: &Document) -> Vec<ColumnRow<'_>> {
    let doc_id = document.doc_id;
    let row = |table, value| ColumnRow {
        table,
        doc_id,
        value: Some(value),
    };

    let mut rows = vec![ColumnRow {
        table: ColumnTable::DocId,
        doc_id,
        value: None,
    }];
    rows.extend(
        document
            .backward()
            .iter()
            .map(|link| row(ColumnTable::LinksBackward, Cell::Int(*link))),
    );
    rows.extend(
        document
            .forward()
            .iter()
            .map(|link| row(ColumnTable::LinksForward, Cell::Int(*link))),
    );

    for name in document.names() {
        for language in name.languages() {
            rows.push(row(ColumnTable::NameLanguageCode, Cell::Text(&language.code)));
            if let Some(country) = &language.country {
                rows.push(row(ColumnTable::NameLanguageCountry, Cell::Text(country)));
            }
        }
        if let Some(url) = &name.url {
            rows.push(row(ColumnTable::NameUrl, Cell::Text(url)));
        }
    }

    rows
}

/// Streams flattened documents into one CSV writer per column table.
pub struct ColumnWriter<W: Write> {
    tables: Vec<csv::Writer<TableFile<W>>>,
    rows: [u64; ColumnTable::ALL.len()],
}

impl ColumnWriter<BufWriter<File>> {
    /// Create (or truncate) every table file in `dir`.
    pub fn create(dir: &Path) -> Result<Self, GenerationError> {
        std::fs::create_dir_all(dir)?;
        Self::new(|table| Ok(BufWriter::new(File::create(dir.join(table.file_name()))?)))
    }
}

impl<W: Write> ColumnWriter<W> {
    /// Open one writer per table with `open` and write the header rows.
    pub fn new(
        mut open: impl FnMut(ColumnTable) -> io::Result<W>,
    ) -> Result<Self, GenerationError> {
        let mut tables = Vec::with_capacity(ColumnTable::ALL.len());
        for table in ColumnTable::ALL {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::CRLF)
                .from_writer(TableFile::new(table, open(table)?));
            writer.write_record(table.header())?;
            tables.push(writer);
        }
        Ok(Self {
            tables,
            rows: [0; ColumnTable::ALL.len()],
        })
    }

    pub fn write_document(&mut self, document: &Document) -> Result<(), GenerationError> {
        for row in flatten_document(document) {
            let index = row.table.index();
            self.tables[index].write_record(row.fields())?;
            self.rows[index] += 1;
        }
        Ok(())
    }

    /// Flush every table and hand back its report with the inner writer.
    pub fn finish(self) -> Result<Vec<(TableReport, W)>, GenerationError> {
        self.tables
            .into_iter()
            .zip(self.rows)
            .map(|(writer, rows)| {
                let file = writer
                    .into_inner()
                    .map_err(|err| GenerationError::Io(err.into_error()))?;
                Ok(file.into_report(rows))
            })
            .collect()
    }
}

/// Output of one table; counts every byte that reaches `inner`, header
/// included.
struct TableFile<W> {
    table: ColumnTable,
    inner: W,
    bytes: u64,
}

impl<W: Write> TableFile<W> {
    fn new(table: ColumnTable, inner: W) -> Self {
        Self {
            table,
            inner,
            bytes: 0,
        }
    }

    fn into_report(self, rows: u64) -> (TableReport, W) {
        let report = TableReport {
            table: self.table,
            file_name: self.table.file_name().to_string(),
            rows_written: rows,
            bytes_written: self.bytes,
        };
        (report, self.inner)
    }
}

impl<W: Write> Write for TableFile<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bytes += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
