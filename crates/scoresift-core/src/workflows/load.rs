use crate::core::io::discovery::{SCORE_FILE_EXTENSION, SCORE_FILE_PREFIX, discover_score_files};
use crate::core::io::score_file::ScoreFile;
use crate::core::models::table::ScoreTable;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Loads every score file found directly inside `dir` into one table.
///
/// Finding no score files is not an error; the returned table is simply empty
/// and callers report it as such.
///
/// # Errors
///
/// Returns [`EngineError::Load`] if the directory cannot be listed or a score
/// file cannot be read.
#[instrument(skip_all, name = "load_workflow", fields(dir = %dir.display()))]
pub fn run(dir: &Path, reporter: &ProgressReporter) -> Result<ScoreTable, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading score files",
    });

    let files = discover_score_files(dir)?;
    if files.is_empty() {
        warn!(
            "No files matching '{}*{}' found in {:?}.",
            SCORE_FILE_PREFIX, SCORE_FILE_EXTENSION, dir
        );
    }

    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });
    let mut table = ScoreTable::new();
    for path in files {
        let parsed = ScoreFile::read_from_path(&path)?;
        debug!(
            "Parsed {:?}: {} rows kept, {} short, {} repeated headers.",
            path, parsed.tally.data_rows, parsed.tally.short_rows, parsed.tally.repeated_headers
        );
        table.absorb(path, parsed.header, parsed.records, parsed.tally);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let tally = table.total_tally();
    info!(
        "Loaded {} records ({} unique entries) from {} score file(s); skipped {} short rows and {} repeated headers.",
        table.len(),
        table.unique_identifiers(),
        table.files.len(),
        tally.short_rows,
        tally.repeated_headers
    );
    Ok(table)
}
