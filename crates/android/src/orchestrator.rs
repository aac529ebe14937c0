//! Command dispatch for the build orchestrator
//!
//! Maps each [`Command`] to exactly one Gradle invocation, the environment
//! check, or the full [`Pipeline`].

use crate::gradle::Gradle;
use crate::pipeline::{Pipeline, PipelineOutcome, StepAction};
use dpd_cli::output::{format_duration, Status};
use dpd_cli::progress::spinner;
use dpd_core::config::ConfigSchema;
use dpd_core::health::{CheckContext, EnvSource, EnvironmentReport, HealthChecker};
use dpd_core::process::CommandRunner;
use std::path::PathBuf;

/// Commands accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Command {
    /// Build debug APK
    Build,
    /// Build release APK
    Release,
    /// Run unit tests
    Test,
    /// Run lint checks
    Lint,
    /// Install debug APK on a connected device
    Install,
    /// Clean build outputs
    Clean,
    /// Check the development environment
    Check,
    /// Check, clean, test, lint, then build debug APK
    All,
}

/// Runs commands against one Android project
pub struct Orchestrator<'a> {
    gradle: Gradle<'a>,
    checker: HealthChecker,
    runner: &'a dyn CommandRunner,
    env: &'a dyn EnvSource,
    debug_apk: String,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator for the project at `project_dir`
    pub fn new(
        config: &ConfigSchema,
        project_dir: impl Into<PathBuf>,
        runner: &'a dyn CommandRunner,
        env: &'a dyn EnvSource,
    ) -> Self {
        let gradle = Gradle::new(project_dir, runner).with_no_daemon(config.gradle.no_daemon);
        let checker = HealthChecker::new()
            .with_android_checks(&config.environment.sdk_vars, &config.environment.java);

        Self {
            gradle,
            checker,
            runner,
            env,
            debug_apk: config.project.debug_apk.clone(),
        }
    }

    /// Run a command, returning whether it succeeded
    pub fn execute(&self, command: Command) -> bool {
        tracing::debug!(?command, project = %self.gradle.project_dir().display(), "dispatching");
        match command {
            Command::Build => self.gradle.build_debug(),
            Command::Release => self.gradle.build_release(),
            Command::Test => self.gradle.test(),
            Command::Lint => self.gradle.lint(),
            Command::Install => self.gradle.install_debug(),
            Command::Clean => self.gradle.clean(),
            Command::Check => self.check_environment(),
            Command::All => self.run_all().is_success(),
        }
    }

    /// Gather SDK home and Java issues without printing them
    pub fn environment_report(&self) -> EnvironmentReport {
        let ctx = CheckContext {
            runner: self.runner,
            env: self.env,
        };
        self.checker.run(&ctx)
    }

    /// Check the environment and print the outcome
    pub fn check_environment(&self) -> bool {
        let pb = spinner("Checking environment...");
        let report = self.environment_report();
        pb.finish_and_clear();

        let issues = report.issues();
        if issues.is_empty() {
            Status::success("Environment check passed!");
            return true;
        }

        Status::error("Environment Issues Found:");
        for issue in &issues {
            eprintln!("  - {issue}");
        }
        tracing::info!(issues = issues.len(), "environment check failed");
        false
    }

    /// Run the full pipeline, stopping at the first failed step
    pub fn run_all(&self) -> PipelineOutcome {
        let outcome = Pipeline::full().run(|step| match step.action {
            StepAction::CheckEnvironment => self.check_environment(),
            StepAction::Gradle(task) => self.gradle.run(task),
        });

        if let Some(step) = outcome.failed_step() {
            eprintln!();
            Status::error(&format!("Failed at: {}", step.label));
        } else {
            Status::banner("All steps completed successfully!");
            // Printed even in quiet mode; the artifact path is the result
            println!("Debug APK location: {}", self.debug_apk);
            Status::info(&format!(
                "Finished in {}",
                format_duration(outcome.total_duration())
            ));
        }

        outcome
    }
}
