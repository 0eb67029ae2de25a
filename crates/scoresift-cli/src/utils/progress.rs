use indicatif::{ProgressBar, ProgressStyle};
use scoresift::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Terminal state shared by every clone of the callback.
///
/// A spinner lives only between `PhaseStart` and `PhaseFinish`; stage results
/// arriving outside a phase are printed directly.
struct Display {
    visible: bool,
    bar: Option<ProgressBar>,
}

impl Display {
    fn start_phase(&mut self, name: &'static str) {
        self.clear();
        let bar = if self.visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(spinner_style());
        bar.set_message(name);
        bar.enable_steady_tick(SPINNER_TICK);
        self.bar = Some(bar);
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn handle(&mut self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => self.start_phase(name),
            Progress::PhaseFinish => self.clear(),
            Progress::TaskStart { total_steps } => {
                if let Some(bar) = &self.bar {
                    bar.disable_steady_tick();
                    bar.set_length(total_steps);
                    bar.set_position(0);
                    bar.set_style(count_style());
                }
            }
            Progress::TaskIncrement => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
            }
            Progress::TaskFinish => {
                if let Some(bar) = &self.bar {
                    if let Some(total) = bar.length() {
                        bar.set_position(total);
                    }
                }
            }
            Progress::StageRetained { label, retained } => {
                let line = stage_line(&label, retained);
                match &self.bar {
                    Some(bar) => bar.suspend(|| println!("{}", line)),
                    None => println!("{}", line),
                }
            }
        }
    }
}

/// Status line printed on stdout once a selection stage has run.
pub fn stage_line(label: &str, retained: usize) -> String {
    format!("✓ {}: {} entries", label, retained)
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn count_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Renders workflow [`Progress`] events: spinners and file counters on stderr,
/// stage results on stdout.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<Display>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_visibility(true)
    }

    fn with_visibility(visible: bool) -> Self {
        Self {
            display: Arc::new(Mutex::new(Display { visible, bar: None })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = Arc::clone(&self.display);
        Box::new(move |event: Progress| match display.lock() {
            Ok(mut display) => display.handle(event),
            Err(_) => warn!("Progress display lock was poisoned; dropping {:?}.", event),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> CliProgressHandler {
        CliProgressHandler::with_visibility(false)
    }

    fn bar_state(handler: &CliProgressHandler) -> Option<(String, Option<u64>, u64)> {
        let display = handler.display.lock().unwrap();
        display
            .bar
            .as_ref()
            .map(|bar| (bar.message(), bar.length(), bar.position()))
    }

    #[test]
    fn stage_line_matches_the_report_labels() {
        assert_eq!(
            stage_line("Entries passing all_cst < 1.0", 12),
            "✓ Entries passing all_cst < 1.0: 12 entries"
        );
        assert_eq!(stage_line("Top 20% by total_score", 0), "✓ Top 20% by total_score: 0 entries");
    }

    #[test]
    fn spinner_exists_only_inside_a_phase() {
        let handler = hidden();
        let callback = handler.get_callback();
        assert!(bar_state(&handler).is_none());

        callback(Progress::PhaseStart {
            name: "Constraint filter",
        });
        let (message, _, _) = bar_state(&handler).unwrap();
        assert_eq!(message, "Constraint filter");

        callback(Progress::StageRetained {
            label: "Entries passing all_cst < 1.0".into(),
            retained: 12,
        });
        assert_eq!(bar_state(&handler).unwrap().0, "Constraint filter");

        callback(Progress::PhaseFinish);
        assert!(bar_state(&handler).is_none());
    }

    #[test]
    fn file_counter_tracks_loaded_score_files() {
        let handler = hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Loading score files",
        });
        callback(Progress::TaskStart { total_steps: 3 });
        callback(Progress::TaskIncrement);
        assert_eq!(bar_state(&handler).unwrap().1, Some(3));
        assert_eq!(bar_state(&handler).unwrap().2, 1);

        callback(Progress::TaskFinish);
        assert_eq!(bar_state(&handler).unwrap().2, 3);
    }

    #[test]
    fn stage_results_outside_a_phase_are_still_handled() {
        let handler = hidden();
        let callback = handler.get_callback();

        callback(Progress::TaskIncrement);
        callback(Progress::StageRetained {
            label: "Top 10 by best SR_2_interf_E_1_4_x".into(),
            retained: 3,
        });
        assert!(bar_state(&handler).is_none());
    }

    #[test]
    fn a_new_phase_replaces_an_unfinished_one() {
        let handler = hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Writing reports",
        });
        callback(Progress::PhaseStart {
            name: "Copying structures",
        });
        assert_eq!(bar_state(&handler).unwrap().0, "Copying structures");
    }
}
