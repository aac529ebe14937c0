//! Process execution utilities
//!
//! Provides a unified interface for running external commands with:
//! - Output capture (short probes such as `java -version`)
//! - Streaming output in a directory (long-running build tools)
//!
//! Callers go through the [`CommandRunner`] trait so that the orchestration
//! logic can be driven without spawning real processes.

use crate::error::{Error, ErrorCode, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from `std::process::Output`
    #[must_use]
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Get combined output (stdout + stderr)
    #[must_use]
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Seam between orchestration logic and the operating system
pub trait CommandRunner {
    /// Run a program with inherited stdio in `dir`, returning its exit code
    fn run_streaming(&self, program: &Path, args: &[&str], dir: &Path) -> Result<i32>;

    /// Run a program and capture its output
    fn run_captured(&self, program: &str, args: &[&str]) -> Result<CommandResult>;
}

/// [`CommandRunner`] backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_streaming(&self, program: &Path, args: &[&str], dir: &Path) -> Result<i32> {
        run_command_streaming_in_dir(program, args, dir)
    }

    fn run_captured(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        run_command(program, args)
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> Error {
    let code = match err.kind() {
        std::io::ErrorKind::NotFound => ErrorCode::CommandNotFound,
        std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
        _ => ErrorCode::ProcessError,
    };
    Error::new(code, format!("Failed to execute {program}: {err}")).with_source(err)
}

/// Run a command and capture output
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandResult> {
    tracing::debug!(program, ?args, "running captured command");
    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(program, e))?;

    Ok(CommandResult::from_output(output))
}

/// Run a command and stream output in a specific directory
pub fn run_command_streaming_in_dir(program: &Path, args: &[&str], dir: &Path) -> Result<i32> {
    tracing::debug!(program = %program.display(), ?args, dir = %dir.display(), "running streamed command");
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(&program.display().to_string(), e))?;

    Ok(status.code().unwrap_or(-1))
}
