use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::report::ReportError;
use crate::core::io::score_file::ScoreFileError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing criterion field: no header column starts with '{prefix}'")]
    MissingCriterion { prefix: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load score files: {source}")]
    Load {
        #[from]
        source: ScoreFileError,
    },

    #[error("Failed to write '{path}': {source}", path = path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ReportError,
    },
}
