use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dremelgen_generate::GenerateOptions;

use crate::CliError;

/// Settings read from a TOML file. Every key is optional; flags win.
///
/// ```toml
/// seed = 1234
/// likelihood = 0.8
/// out_dir = "fixtures"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub seed: Option<u64>,
    pub likelihood: Option<f64>,
    pub out_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply(&self, options: &mut GenerateOptions) {
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if let Some(likelihood) = self.likelihood {
            options.likelihood = likelihood;
        }
        if let Some(out_dir) = &self.out_dir {
            options.out_dir = out_dir.clone();
        }
    }
}
