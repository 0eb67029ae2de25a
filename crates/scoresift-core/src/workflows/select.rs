use crate::core::models::record::{Header, ScoreRecord};
use crate::core::models::table::count_unique_identifiers;
use crate::engine::config::SelectionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stages::{constraint, criterion, quantile, ranking};
use tracing::{debug, info, instrument, warn};

/// Record counts after each stage, kept for reporting only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub parsed: usize,
    pub unique_identifiers: usize,
    pub passed_constraint: usize,
    pub passed_quantile: Option<usize>, // None when the quantile stage is disabled
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub criterion: String,
    pub records: Vec<&'a ScoreRecord>, // best first
    pub counts: StageCounts,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome<'a> {
    /// Nothing was loaded; there is nothing to rank.
    NoData,
    /// The criterion resolved but every record failed the constraint filter.
    NoneSurvivedConstraint {
        criterion: String,
        counts: StageCounts,
    },
    Selected(Selection<'a>),
}

pub fn constraint_label(config: &SelectionConfig) -> String {
    format!(
        "Entries passing {} < {:?}",
        config.constraint_column, config.constraint_cutoff
    )
}

pub fn quantile_label(fraction: f64, quality_column: &str) -> String {
    // Rounded so that e.g. 0.07 prints as 7% rather than 7.000000000000001%.
    let percent = (fraction * 100.0 * 1e6).round() / 1e6;
    format!("Top {}% by {}", percent, quality_column)
}

pub fn ranking_label(top_k: usize, criterion: &str) -> String {
    format!("Top {} by best {}", top_k, criterion)
}

/// Reduces `records` to at most `config.top_k` best-first candidates.
///
/// The stages run in a fixed order: criterion resolution against `header`,
/// constraint filter, optional quantile filter on the quality column, and the
/// final ranking by the resolved criterion. Empty intermediate results end the
/// run early with a descriptive [`SelectionOutcome`] rather than an error.
///
/// # Errors
///
/// Returns [`EngineError::MissingCriterion`] if no header column starts with
/// `config.criterion_prefix`.
#[instrument(skip_all, name = "selection_workflow")]
pub fn run<'a>(
    records: &'a [ScoreRecord],
    header: &Header,
    config: &SelectionConfig,
    reporter: &ProgressReporter,
) -> Result<SelectionOutcome<'a>, EngineError> {
    let mut counts = StageCounts {
        parsed: records.len(),
        unique_identifiers: count_unique_identifiers(records),
        ..Default::default()
    };

    if records.is_empty() {
        warn!("No valid score data found.");
        return Ok(SelectionOutcome::NoData);
    }

    let criterion = criterion::resolve_column(header, &config.criterion_prefix)
        .ok_or_else(|| EngineError::MissingCriterion {
            prefix: config.criterion_prefix.clone(),
        })?
        .to_string();
    info!("Resolved criterion column '{}'.", criterion);

    // === Stage 1: Constraint filter ===
    reporter.report(Progress::PhaseStart {
        name: "Constraint filter",
    });
    let pool = constraint::apply(
        records.iter().collect(),
        &config.constraint_column,
        config.constraint_cutoff,
    );
    counts.passed_constraint = pool.len();
    reporter.report(Progress::StageRetained {
        label: constraint_label(config),
        retained: pool.len(),
    });
    reporter.report(Progress::PhaseFinish);
    info!(
        "{} of {} entries passed {} < {:?}.",
        pool.len(),
        records.len(),
        config.constraint_column,
        config.constraint_cutoff
    );

    if pool.is_empty() {
        warn!("No entries passed the constraint filter.");
        return Ok(SelectionOutcome::NoneSurvivedConstraint { criterion, counts });
    }

    // === Stage 2: Quantile filter ===
    let pool = match config.quantile_fraction {
        Some(fraction) => {
            reporter.report(Progress::PhaseStart {
                name: "Quantile filter",
            });
            let kept = quantile::apply(pool, &config.quality_column, fraction);
            counts.passed_quantile = Some(kept.len());
            reporter.report(Progress::StageRetained {
                label: quantile_label(fraction, &config.quality_column),
                retained: kept.len(),
            });
            reporter.report(Progress::PhaseFinish);
            info!(
                "Kept best {} entries by {} (fraction {}).",
                kept.len(),
                config.quality_column,
                fraction
            );
            kept
        }
        None => {
            debug!("Quantile stage disabled; ranking the constraint-filtered pool directly.");
            pool
        }
    };

    // === Stage 3: Final ranking ===
    reporter.report(Progress::PhaseStart {
        name: "Final ranking",
    });
    let selected = ranking::apply(pool, &criterion, config.top_k);
    counts.selected = selected.len();
    reporter.report(Progress::StageRetained {
        label: ranking_label(config.top_k, &criterion),
        retained: selected.len(),
    });
    reporter.report(Progress::PhaseFinish);
    info!(
        "Selected top {} by best {} ({} entries).",
        config.top_k,
        criterion,
        selected.len()
    );

    Ok(SelectionOutcome::Selected(Selection {
        criterion,
        records: selected,
        counts,
    }))
}
