//! Gradle build system integration
//!
//! Provides wrappers for the tasks the app is built with. Every task goes
//! through the project's Gradle wrapper script, run from the project root with
//! its output streamed to the terminal.

use dpd_cli::output::Status;
use dpd_core::error::Error;
use dpd_core::process::CommandRunner;
use std::path::{Path, PathBuf};

/// Keeps Gradle from leaving a daemon running after the task
pub const NO_DAEMON_FLAG: &str = "--no-daemon";

/// Gradle tasks behind the single build commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradleTask {
    /// `assembleDebug`
    AssembleDebug,
    /// `assembleRelease`
    AssembleRelease,
    /// `test`
    Test,
    /// `lint`
    Lint,
    /// `installDebug`
    InstallDebug,
    /// `clean`
    Clean,
}

impl GradleTask {
    /// Task name as Gradle knows it
    pub fn name(&self) -> &'static str {
        match self {
            GradleTask::AssembleDebug => "assembleDebug",
            GradleTask::AssembleRelease => "assembleRelease",
            GradleTask::Test => "test",
            GradleTask::Lint => "lint",
            GradleTask::InstallDebug => "installDebug",
            GradleTask::Clean => "clean",
        }
    }

    /// Line printed before the task starts
    pub fn announcement(&self) -> &'static str {
        match self {
            GradleTask::AssembleDebug => "Building Debug APK...",
            GradleTask::AssembleRelease => "Building Release APK...",
            GradleTask::Test => "Running Unit Tests...",
            GradleTask::Lint => "Running Lint...",
            GradleTask::InstallDebug => "Installing Debug APK...",
            GradleTask::Clean => "Cleaning build outputs...",
        }
    }
}

/// File name of the Gradle wrapper on this host
pub fn wrapper_file_name() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat"
    } else {
        "gradlew"
    }
}

/// Path of the Gradle wrapper inside a project root
pub fn wrapper_path(project_dir: &Path) -> PathBuf {
    project_dir.join(wrapper_file_name())
}

/// Find the Android project root for `start`
///
/// Walks up from `start` to the first directory holding the Gradle wrapper or
/// a settings script. Falls back to `start` itself.
pub fn find_project_root(start: &Path) -> PathBuf {
    find_project_root_within(start, None)
}

/// Like [`find_project_root`], but never looks above `boundary`
fn find_project_root_within(start: &Path, boundary: Option<&Path>) -> PathBuf {
    start
        .ancestors()
        .take_while(|dir| boundary.is_none_or(|b| dir.starts_with(b)))
        .find(|dir| is_project_root(dir))
        .unwrap_or(start)
        .to_path_buf()
}

fn is_project_root(dir: &Path) -> bool {
    wrapper_path(dir).is_file()
        || dir.join("settings.gradle").is_file()
        || dir.join("settings.gradle.kts").is_file()
}

/// Gradle wrapper bound to a project root
pub struct Gradle<'a> {
    project_dir: PathBuf,
    no_daemon: bool,
    runner: &'a dyn CommandRunner,
}

impl<'a> Gradle<'a> {
    /// Create a wrapper for `project_dir`, passing `--no-daemon` by default
    pub fn new(project_dir: impl Into<PathBuf>, runner: &'a dyn CommandRunner) -> Self {
        Self {
            project_dir: project_dir.into(),
            no_daemon: true,
            runner,
        }
    }

    /// Toggle the no-daemon flag
    #[must_use]
    pub fn with_no_daemon(mut self, no_daemon: bool) -> Self {
        self.no_daemon = no_daemon;
        self
    }

    /// Project root the wrapper runs in
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Run a Gradle task with extra arguments
    ///
    /// Returns true when the wrapper exits with status 0. A missing wrapper or
    /// any other spawn failure is reported and returns false.
    pub fn run_task(&self, task: &str, extra_args: &[&str]) -> bool {
        let wrapper = wrapper_path(&self.project_dir);
        let mut args = Vec::with_capacity(extra_args.len() + 1);
        args.push(task);
        args.extend_from_slice(extra_args);

        Status::plain(&format!("Running: {} {}", wrapper.display(), args.join(" ")));
        Status::rule('-');

        match self.runner.run_streaming(&wrapper, &args, &self.project_dir) {
            Ok(0) => {
                tracing::info!(task, "gradle task succeeded");
                true
            }
            Ok(code) => {
                tracing::info!(task, exit_code = code, "gradle task failed");
                false
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(wrapper = %wrapper.display(), "gradle wrapper missing");
                Status::error(&Error::gradle_wrapper_not_found(&wrapper).to_string());
                false
            }
            Err(e) => {
                tracing::info!(error = %e, task, "gradle wrapper could not be started");
                Status::error(&e.to_string());
                false
            }
        }
    }

    /// Announce and run one of the fixed tasks
    pub fn run(&self, task: GradleTask) -> bool {
        Status::info(task.announcement());
        if self.no_daemon {
            self.run_task(task.name(), &[NO_DAEMON_FLAG])
        } else {
            self.run_task(task.name(), &[])
        }
    }

    /// Build debug APK
    pub fn build_debug(&self) -> bool {
        self.run(GradleTask::AssembleDebug)
    }

    /// Build release APK
    pub fn build_release(&self) -> bool {
        self.run(GradleTask::AssembleRelease)
    }

    /// Run unit tests
    pub fn test(&self) -> bool {
        self.run(GradleTask::Test)
    }

    /// Run lint checks
    pub fn lint(&self) -> bool {
        self.run(GradleTask::Lint)
    }

    /// Install debug APK on a connected device
    pub fn install_debug(&self) -> bool {
        self.run(GradleTask::InstallDebug)
    }

    /// Clean build artifacts
    pub fn clean(&self) -> bool {
        self.run(GradleTask::Clean)
    }
}
