use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::output::columns::ColumnTable;
use crate::profile::Profile;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 1234;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where the JSON collection and column tables are written.
    pub out_dir: PathBuf,
    /// Number of documents to generate.
    pub records: u64,
    /// How repeated-field counts are bounded.
    pub profile: Profile,
    /// Seed of the random stream shared by the whole run.
    pub seed: u64,
    /// Probability that an optional field is populated.
    pub likelihood: f64,
}

impl GenerateOptions {
    pub fn new(records: u64, profile: Profile) -> Self {
        Self {
            records,
            profile,
            ..Self::default()
        }
    }

    pub fn json_path(&self) -> PathBuf {
        self.out_dir.join(self.profile.json_file_name(self.records))
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            records: 0,
            profile: Profile::Fixed,
            seed: DEFAULT_SEED,
            likelihood: 1.0,
        }
    }
}

/// Summary of one written column table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: ColumnTable,
    pub file_name: String,
    pub rows_written: u64,
    pub bytes_written: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub profile: Profile,
    pub likelihood: f64,
    pub records: u64,
    pub total_bytes: u64,
    pub avg_bytes_per_record: f64,
    /// `None` when the collection was streamed instead of written to disk.
    pub json_path: Option<PathBuf>,
    pub tables: Vec<TableReport>,
    pub duration_ms: u64,
}

impl GenerationReport {
    /// Lines printed at the end of a run.
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!(
                "Generated {} random records with total size of {} bytes.",
                self.records, self.total_bytes
            ),
            format!("Avg. {:?} bytes per record.", self.avg_bytes_per_record),
        ]
    }

    pub fn table(&self, table: ColumnTable) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_path_joins_out_dir_and_profile_name() {
        let mut options = GenerateOptions::new(
            10,
            Profile::Sized {
                avg_record_bytes: 250,
            },
        );
        options.out_dir = PathBuf::from("fixtures");
        assert_eq!(
            options.json_path(),
            PathBuf::from("fixtures/generated_data_10_250.json")
        );

        let options = GenerateOptions::new(3, Profile::Fixed);
        assert_eq!(options.json_path(), PathBuf::from("./generated_data_3.json"));
    }

    #[test]
    fn summary_prints_average_with_decimal_point() {
        let report = GenerationReport {
            seed: DEFAULT_SEED,
            profile: Profile::Fixed,
            likelihood: 1.0,
            records: 2,
            total_bytes: 200,
            avg_bytes_per_record: 100.0,
            json_path: None,
            tables: Vec::new(),
            duration_ms: 0,
        };
        assert_eq!(
            report.summary_lines(),
            [
                "Generated 2 random records with total size of 200 bytes.".to_string(),
                "Avg. 100.0 bytes per record.".to_string(),
            ]
        );
    }
}
