use scoresift::engine::config::{PipelineConfig, Preset};
use std::path::PathBuf;

pub struct AppConfig {
    pub working_dir: PathBuf,
    pub preset: Preset,
    pub pipeline: PipelineConfig,
    pub strict_schema: bool,
    pub dry_run: bool,
}
