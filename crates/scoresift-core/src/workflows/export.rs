use super::select::{self, Selection, StageCounts};
use crate::core::io::report::{CsvTable, ReportError, SummaryLine, TextReport};
use crate::core::io::structures::{self, StructureCopy};
use crate::core::io::traits::ReportWriter;
use crate::core::models::record::Header;
use crate::engine::config::{FeatureColumn, PipelineConfig, SelectionConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Files produced by one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub features_csv: Option<PathBuf>,
    pub full_csv: Option<PathBuf>,
    pub report: PathBuf,
    pub copied_structures: Vec<PathBuf>,
    pub missing_structures: Vec<PathBuf>,
}

/// Resolves the configured feature columns, dropping those absent from `header`.
///
/// The criterion column is always kept.
pub fn available_features(
    features: &[FeatureColumn],
    header: &Header,
    criterion: &str,
) -> Vec<String> {
    features
        .iter()
        .map(|f| f.resolve(criterion))
        .filter(|name| *name == criterion || header.contains(name))
        .map(str::to_string)
        .collect()
}

/// Statistics block appended to the text report.
pub fn summary_lines(
    counts: &StageCounts,
    config: &SelectionConfig,
    criterion: &str,
) -> Vec<SummaryLine> {
    let mut lines = vec![
        SummaryLine::new("Total PDBs parsed", counts.unique_identifiers),
        SummaryLine::new(select::constraint_label(config), counts.passed_constraint),
    ];
    if let (Some(fraction), Some(kept)) = (config.quantile_fraction, counts.passed_quantile) {
        lines.push(SummaryLine::new(
            select::quantile_label(fraction, &config.quality_column),
            kept,
        ));
    }
    lines.push(SummaryLine::new(
        select::ranking_label(config.top_k, criterion),
        counts.selected,
    ));
    lines
}

fn export_error(path: &Path, source: impl Into<ReportError>) -> EngineError {
    EngineError::Export {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Writes the reports for `selection` and copies the selected structure files.
///
/// Everything lands in `config.output.directory`, resolved against
/// `working_dir` and created if absent. Existing files are overwritten, so
/// repeated exports of the same selection produce identical files. A missing
/// structure file is logged as a warning and listed in the summary but does
/// not fail the export.
///
/// # Errors
///
/// Returns [`EngineError::Export`] if the output directory cannot be created,
/// a report cannot be written, or copying an existing structure file fails.
#[instrument(skip_all, name = "export_workflow", fields(dir = %working_dir.display()))]
pub fn run(
    selection: &Selection,
    header: &Header,
    working_dir: &Path,
    config: &PipelineConfig,
    reporter: &ProgressReporter,
) -> Result<ExportSummary, EngineError> {
    let output = &config.output;
    let output_dir = working_dir.join(&output.directory);
    fs::create_dir_all(&output_dir).map_err(|e| export_error(&output_dir, e))?;

    reporter.report(Progress::PhaseStart {
        name: "Writing reports",
    });
    let features = available_features(&output.feature_columns, header, &selection.criterion);
    debug!("Report columns: {:?}", features);

    let mut summary = ExportSummary {
        output_dir: output_dir.clone(),
        ..Default::default()
    };

    if let Some(name) = &output.features_csv {
        let path = output_dir.join(name);
        CsvTable::new(features.clone())
            .write_to_path(&selection.records, &path)
            .map_err(|e| export_error(&path, e))?;
        info!("Wrote features CSV to {}", path.display());
        summary.features_csv = Some(path);
    }

    if let Some(name) = &output.full_csv {
        let path = output_dir.join(name);
        CsvTable::new(header.columns().to_vec())
            .write_to_path(&selection.records, &path)
            .map_err(|e| export_error(&path, e))?;
        info!("Wrote full scores CSV to {}", path.display());
        summary.full_csv = Some(path);
    }

    let report_path = output_dir.join(&output.report);
    TextReport::new(features)
        .with_summary(summary_lines(
            &selection.counts,
            &config.selection,
            &selection.criterion,
        ))
        .write_to_path(&selection.records, &report_path)
        .map_err(|e| export_error(&report_path, e))?;
    info!("Wrote text report to {}", report_path.display());
    summary.report = report_path;
    reporter.report(Progress::PhaseFinish);

    if output.copy_structures {
        reporter.report(Progress::PhaseStart {
            name: "Copying structures",
        });
        reporter.report(Progress::TaskStart {
            total_steps: selection.records.len() as u64,
        });
        for record in &selection.records {
            let Some(identifier) = record.identifier() else {
                warn!("Selected entry has no identifier; skipping structure copy.");
                reporter.report(Progress::TaskIncrement);
                continue;
            };
            let outcome = structures::copy_structure(
                identifier,
                &output.structure_extension,
                working_dir,
                &output_dir,
            )
            .map_err(|e| export_error(&output_dir, e))?;
            match outcome {
                StructureCopy::Copied { destination, .. } => {
                    summary.copied_structures.push(destination);
                }
                StructureCopy::Missing { source } => {
                    warn!("PDB not found: {}", source.display());
                    summary.missing_structures.push(source);
                }
            }
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
        info!(
            "Copied {} structure files ({} missing).",
            summary.copied_structures.len(),
            summary.missing_structures.len()
        );
    }

    Ok(summary)
}
