/// Events emitted while loading, selecting and exporting.
///
/// Phases bracket a whole workflow step; tasks track countable work inside a
/// phase (files parsed, structures copied). `StageRetained` carries the
/// human-readable result of one selection stage. Reporting is purely
/// observational and never influences the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    StageRetained { label: String, retained: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseStart { name: "Loading" });
        reporter.report(Progress::PhaseFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            seen.lock().unwrap().push(event);
        }));

        reporter.report(Progress::PhaseStart { name: "Loading" });
        reporter.report(Progress::StageRetained {
            label: "Entries passing all_cst < 1.0".into(),
            retained: 12,
        });
        drop(reporter);

        let seen = seen.into_inner().unwrap();
        assert_eq!(
            seen,
            vec![
                Progress::PhaseStart { name: "Loading" },
                Progress::StageRetained {
                    label: "Entries passing all_cst < 1.0".into(),
                    retained: 12
                },
            ]
        );
    }
}
