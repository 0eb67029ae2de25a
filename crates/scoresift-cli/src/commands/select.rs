use crate::cli::SelectArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use scoresift::{
    core::io::{report::TextReport, traits::ReportWriter},
    core::models::table::ScoreTable,
    engine::progress::ProgressReporter,
    workflows::{
        self,
        export::{self, ExportSummary},
        select::{Selection, SelectionOutcome},
    },
};
use std::io::{self, Write};
use tracing::info;

pub fn run(args: SelectArgs) -> Result<()> {
    info!("Merging configuration from preset, file and CLI arguments...");
    let app = config::build_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    execute(&app, &reporter)?;
    Ok(())
}

/// Runs load, select and (unless dry-running) export.
///
/// Stage results reach the console through `reporter`; this function prints
/// the load summary, the early-exit messages and the written paths. Returns
/// the export summary when files were written.
pub fn execute(app: &AppConfig, reporter: &ProgressReporter) -> Result<Option<ExportSummary>> {
    info!(
        "Running the '{}' pipeline on {:?}",
        app.preset, app.working_dir
    );
    if !app.working_dir.is_dir() {
        return Err(CliError::Argument(format!(
            "Working directory does not exist: {}",
            app.working_dir.display()
        )));
    }
    let table = workflows::load::run(&app.working_dir, reporter)?;

    if table.is_empty() {
        println!("No valid score data found.");
        return Ok(None);
    }
    print_load_summary(&table);
    check_schema(&table, app.strict_schema)?;

    let selection_config = &app.pipeline.selection;
    let outcome =
        workflows::select::run(&table.records, &table.header, selection_config, reporter)?;

    let selection = match outcome {
        SelectionOutcome::NoData => {
            println!("No valid score data found.");
            return Ok(None);
        }
        SelectionOutcome::NoneSurvivedConstraint { .. } => {
            println!("No entries passed the constraint filter.");
            return Ok(None);
        }
        SelectionOutcome::Selected(selection) => selection,
    };

    if app.dry_run {
        println!("\nDry run: no files written. Selected entries:");
        print_selection(&selection, &table, app)?;
        return Ok(None);
    }

    let summary = workflows::export::run(
        &selection,
        &table.header,
        &app.working_dir,
        &app.pipeline,
        reporter,
    )?;
    print_export_summary(&summary);
    Ok(Some(summary))
}

fn check_schema(table: &ScoreTable, strict: bool) -> Result<()> {
    if !table.has_schema_drift() {
        return Ok(());
    }
    // Each drifted file was already logged while loading.
    if strict {
        return Err(CliError::SchemaDrift {
            files: table.drifted_files.clone(),
        });
    }
    Ok(())
}

fn print_load_summary(table: &ScoreTable) {
    println!(
        "Total unique PDB entries found: {}",
        table.unique_identifiers()
    );
    let tally = table.total_tally();
    if tally.short_rows > 0 || tally.repeated_headers > 0 {
        println!(
            "Skipped {} short row(s) and {} repeated header(s) in {} score file(s).",
            tally.short_rows,
            tally.repeated_headers,
            table.files.len()
        );
    }
}

fn print_selection(selection: &Selection, table: &ScoreTable, app: &AppConfig) -> Result<()> {
    let columns = export::available_features(
        &app.pipeline.output.feature_columns,
        &table.header,
        &selection.criterion,
    );
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    TextReport::new(columns)
        .write_to(&selection.records, &mut handle)
        .map_err(|e| CliError::Other(e.into()))?;
    handle.flush()?;
    Ok(())
}

fn print_export_summary(summary: &ExportSummary) {
    println!("\nOutput written to:");
    if let Some(path) = &summary.features_csv {
        println!(" - Features CSV:      {}", path.display());
    }
    if let Some(path) = &summary.full_csv {
        println!(" - Full scores CSV:   {}", path.display());
    }
    println!(" - TXT summary:       {}", summary.report.display());

    // Missing structures were logged one by one during the copy.
    if summary.copied_structures.is_empty() {
        println!(
            "No PDBs were copied to {}/.",
            summary.output_dir.display()
        );
    } else {
        println!(
            "Copied {} PDB files to {}/",
            summary.copied_structures.len(),
            summary.output_dir.display()
        );
    }
}
