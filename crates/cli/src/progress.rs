//! Progress indicators

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output::Status;

/// Create a spinner for indeterminate progress
///
/// The spinner is hidden in quiet mode and when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    if Status::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
