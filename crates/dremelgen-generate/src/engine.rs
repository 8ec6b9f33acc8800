use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use dremelgen_core::{Document, SizeSummary, load_documents};

use crate::builder::{DocumentStream, RecordBuilder};
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport, TableReport};
use crate::output::columns::ColumnWriter;
use crate::output::json::{write_json, write_json_atomic};

/// Outcome of a file-producing run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Generated(GenerationReport),
    /// The JSON collection already existed; nothing was written.
    Skipped { json_path: PathBuf },
}

/// Entry point for generating fixture data.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        let likelihood = options.likelihood;
        if !(0.0..=1.0).contains(&likelihood) {
            return Err(GenerationError::InvalidOptions(format!(
                "likelihood must lie in [0, 1], got {likelihood}"
            )));
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Build the whole collection from a freshly seeded stream.
    pub fn generate(&self) -> Vec<Document> {
        let builder = RecordBuilder::new(self.options.profile.bounds(), self.options.likelihood);
        let rng = ChaCha8Rng::seed_from_u64(self.options.seed);
        debug!(bounds = ?builder.bounds(), "record builder ready");
        DocumentStream::new(builder, rng, self.options.records).collect()
    }

    /// Write the JSON collection and the column tables into `out_dir`.
    ///
    /// Returns [`RunOutcome::Skipped`] without touching any file when the
    /// JSON collection is already present.
    pub fn run(&self) -> Result<RunOutcome, GenerationError> {
        let json_path = self.options.json_path();
        if json_path.exists() {
            info!(path = %json_path.display(), "output already exists, skipping generation");
            return Ok(RunOutcome::Skipped { json_path });
        }

        let start = Instant::now();
        let (documents, summary) = self.generate_with_summary()?;

        std::fs::create_dir_all(&self.options.out_dir)?;
        let json_bytes = write_json_atomic(&json_path, &documents)?;
        info!(path = %json_path.display(), bytes = json_bytes, "json collection written");

        let tables = flatten_documents(&documents, &self.options.out_dir)?;

        let report = self.report(summary, Some(json_path), tables, start);
        info!(
            records = report.records,
            duration_ms = report.duration_ms,
            "generation completed"
        );
        Ok(RunOutcome::Generated(report))
    }

    /// Stream the JSON collection to `writer`; no files are written.
    pub fn run_to_writer<W: Write>(&self, writer: W) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let (documents, summary) = self.generate_with_summary()?;
        write_json(writer, &documents)?;
        Ok(self.report(summary, None, Vec::new(), start))
    }

    fn generate_with_summary(&self) -> Result<(Vec<Document>, SizeSummary), GenerationError> {
        info!(
            records = self.options.records,
            seed = self.options.seed,
            profile = ?self.options.profile,
            likelihood = self.options.likelihood,
            "generation started"
        );
        let documents = self.generate();
        let summary = SizeSummary::from_documents(&documents)?;
        info!(
            records = summary.records,
            total_bytes = summary.total_bytes,
            avg_bytes_per_record = summary.avg_bytes_per_record,
            "records generated"
        );
        Ok((documents, summary))
    }

    fn report(
        &self,
        summary: SizeSummary,
        json_path: Option<PathBuf>,
        tables: Vec<TableReport>,
        start: Instant,
    ) -> GenerationReport {
        GenerationReport {
            seed: self.options.seed,
            profile: self.options.profile,
            likelihood: self.options.likelihood,
            records: summary.records,
            total_bytes: summary.total_bytes,
            avg_bytes_per_record: summary.avg_bytes_per_record,
            json_path,
            tables,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Flatten `documents` into the column tables under `out_dir`.
pub fn flatten_documents(
    documents: &[Document],
    out_dir: &Path,
) -> Result<Vec<TableReport>, GenerationError> {
    let mut writer = ColumnWriter::create(out_dir)?;
    for document in documents {
        writer.write_document(document)?;
    }

    let tables: Vec<TableReport> = writer
        .finish()?
        .into_iter()
        .map(|(report, _)| report)
        .collect();
    for table in &tables {
        info!(
            table = table.file_name.as_str(),
            rows = table.rows_written,
            bytes = table.bytes_written,
            "column table written"
        );
    }
    Ok(tables)
}

/// Load an existing JSON collection and flatten it into `out_dir`.
pub fn flatten_file(input: &Path, out_dir: &Path) -> Result<Vec<TableReport>, GenerationError> {
    let documents = load_documents(input)?;
    info!(
        path = %input.display(),
        records = documents.len(),
        "json collection loaded"
    );
    flatten_documents(&documents, out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    #[test]
    fn rejects_likelihood_outside_unit_interval() {
        let mut options = GenerateOptions::new(1, Profile::Fixed);
        options.likelihood = 1.5;
        assert!(matches!(
            GenerationEngine::new(options),
            Err(GenerationError::InvalidOptions(_))
        ));

        let mut options = GenerateOptions::new(1, Profile::Fixed);
        options.likelihood = f64::NAN;
        assert!(GenerationEngine::new(options).is_err());
    }

    #[test]
    fn streamed_run_reports_without_files() {
        let options = GenerateOptions::new(
            3,
            Profile::Sized {
                avg_record_bytes: 100,
            },
        );
        let engine = GenerationEngine::new(options).expect("engine");
        let mut buffer = Vec::new();
        let report = engine.run_to_writer(&mut buffer).expect("run");

        assert_eq!(report.records, 3);
        assert!(report.json_path.is_none());
        assert!(report.tables.is_empty());

        let documents: Vec<Document> = serde_json::from_slice(&buffer).expect("parse output");
        assert_eq!(documents, engine.generate());
    }
}
