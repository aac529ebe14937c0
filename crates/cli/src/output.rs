//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Colors are only emitted
//! when the target stream supports them and `--no-color` was not given.

use owo_colors::{OwoColorize, Stream};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Width of the separator rules printed around commands and steps
pub const RULE_WIDTH: usize = 50;

/// Status message helpers
pub struct Status;

impl Status {
    /// Suppress info, success and banner output
    pub fn set_quiet(quiet: bool) {
        QUIET.store(quiet, Ordering::Relaxed);
    }

    /// Whether quiet mode is on
    pub fn is_quiet() -> bool {
        QUIET.load(Ordering::Relaxed)
    }

    /// Print a success message
    pub fn success(message: &str) {
        if !Self::is_quiet() {
            println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
        }
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        if !Self::is_quiet() {
            println!("{} {}", "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()), message);
        }
    }

    /// Print a plain line, subject to quiet mode
    pub fn plain(message: &str) {
        if !Self::is_quiet() {
            println!("{message}");
        }
    }

    /// Print a horizontal rule
    pub fn rule(ch: char) {
        if !Self::is_quiet() {
            println!("{}", rule(ch).if_supports_color(Stream::Stdout, |t| t.dimmed()));
        }
    }

    /// Print a message framed by `=` rules
    pub fn banner(message: &str) {
        if !Self::is_quiet() {
            println!();
            println!("{}", rule('=').if_supports_color(Stream::Stdout, |t| t.dimmed()));
            println!("{}", message.if_supports_color(Stream::Stdout, |t| t.bold()));
            println!("{}", rule('=').if_supports_color(Stream::Stdout, |t| t.dimmed()));
            println!();
        }
    }

    /// Print a step message (for multi-step operations)
    pub fn step(step: usize, total: usize, message: &str) {
        if !Self::is_quiet() {
            println!();
            println!("{}", rule('=').if_supports_color(Stream::Stdout, |t| t.dimmed()));
            println!(
                "{} {}",
                format!("[{step}/{total}]").if_supports_color(Stream::Stdout, |t| t.dimmed()),
                format!("Step: {message}").if_supports_color(Stream::Stdout, |t| t.bold())
            );
            println!("{}", rule('=').if_supports_color(Stream::Stdout, |t| t.dimmed()));
            println!();
        }
    }
}

/// A separator line of [`RULE_WIDTH`] characters
pub fn rule(ch: char) -> String {
    std::iter::repeat_n(ch, RULE_WIDTH).collect()
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}
