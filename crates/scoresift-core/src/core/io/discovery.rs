use super::score_file::ScoreFileError;
use std::fs;
use std::path::{Path, PathBuf};

pub const SCORE_FILE_PREFIX: &str = "score";
pub const SCORE_FILE_EXTENSION: &str = ".sc";

pub fn is_score_file_name(name: &str) -> bool {
    name.starts_with(SCORE_FILE_PREFIX) && name.ends_with(SCORE_FILE_EXTENSION)
}

/// Lists the score files directly inside `dir`, sorted by file name.
///
/// Only regular files are considered and subdirectories are never descended
/// into, so report directories created under `dir` are not picked up again.
pub fn discover_score_files(dir: &Path) -> Result<Vec<PathBuf>, ScoreFileError> {
    let to_error = |e: std::io::Error| ScoreFileError::Directory {
        path: dir.to_string_lossy().to_string(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !is_score_file_name(&name) {
            continue;
        }
        if entry.path().is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}
