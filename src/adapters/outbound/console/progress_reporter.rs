use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the stdout payload.
/// Uses an indicatif spinner because the total number of packages is
/// unknown while the graph is still being discovered; only a running
/// fetch counter can be shown.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn get_or_create_spinner(&self) -> ProgressBar {
        let mut spinner_option = self.spinner.borrow_mut();
        if let Some(pb) = spinner_option.as_ref() {
            pb.clone()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("   {spinner:.green} [{pos} fetched] {msg}")
                    .expect("Failed to set progress spinner template"),
            );
            *spinner_option = Some(pb.clone());
            pb
        }
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.spinner.borrow().as_ref() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, message: &str) {
        let pb = self.get_or_create_spinner();
        pb.set_position(current as u64);
        pb.set_message(message.to_string());
    }

    fn report_error(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message.yellow());
    }

    fn report_completion(&self, message: &str) {
        self.clear_spinner();
        eprintln!();
        eprintln!("{}", message);
    }
}
