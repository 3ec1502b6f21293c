//! Spinner-driven stage observer

use colored::*;
use indicatif::ProgressBar;

use crate::application::ports::{Stage, StageObserver, StageOutcome};

/// Reports pipeline progress on a terminal spinner.
///
/// Each finished stage is printed above the spinner so the run leaves a
/// short trail of what happened.
pub struct SpinnerObserver {
    spinner: ProgressBar,
}

impl SpinnerObserver {
    pub fn new(spinner: ProgressBar) -> Self {
        Self { spinner }
    }
}

impl StageObserver for SpinnerObserver {
    fn stage_started(&self, stage: Stage) {
        self.spinner.set_message(stage.label());
    }

    fn stage_finished(&self, stage: Stage, outcome: &StageOutcome) {
        if let Some(line) = outcome_line(stage, outcome) {
            self.spinner.println(line);
        }
    }
}

fn outcome_line(stage: Stage, outcome: &StageOutcome) -> Option<String> {
    match outcome {
        StageOutcome::Completed => Some(format!("{} {}", "✓".green(), stage)),
        StageOutcome::Fallback { reason } => Some(format!(
            "{} {} used a fallback: {}",
            "⚠".yellow(),
            stage,
            reason
        )),
        StageOutcome::Skipped => None,
        StageOutcome::Failed { error } => Some(format!("{} {}: {}", "✗".red(), stage, error)),
    }
}
