use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSelectionConfig {
    pub criterion_prefix: Option<String>,
    pub constraint_column: Option<String>,
    pub constraint_cutoff: Option<f64>,
    pub quality_column: Option<String>,
    pub quantile_fraction: Option<f64>,
    pub skip_quantile: Option<bool>,
    pub top_k: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub directory: Option<PathBuf>,
    pub features: Option<Vec<String>>,
    pub features_csv: Option<String>, // "" disables the file
    pub full_csv: Option<String>,     // "" disables the file
    pub report: Option<String>,
    pub copy_structures: Option<bool>,
    pub structure_extension: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub preset: Option<String>,
    pub selection: Option<FileSelectionConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
