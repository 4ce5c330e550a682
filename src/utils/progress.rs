use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress indicator helpers for CLI feedback
pub struct ProgressUtils;

impl ProgressUtils {
    /// Spinner shown on stderr while a TER request is in flight.
    ///
    /// indicatif hides it automatically when stderr is not a terminal.
    pub fn create_request_spinner(endpoint: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("valid spinner template"),
        );
        pb.set_message(format!("Requesting {}", endpoint));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
