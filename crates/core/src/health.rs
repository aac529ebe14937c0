//! Environment health checks
//!
//! Verifies the preconditions for driving an Android build:
//! - An SDK home variable is set and points at an existing directory
//! - A Java runtime can be invoked and reports its version
//!
//! Checks never fail hard. Each one produces a [`CheckResult`], and the
//! [`HealthChecker`] gathers them into an [`EnvironmentReport`] whose issue list
//! is empty when the environment is usable.

use crate::process::CommandRunner;
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

/// Read-only view of the process environment
pub trait EnvSource {
    /// Look up a variable, treating empty values as unset
    fn var(&self, key: &str) -> Option<String>;
}

/// [`EnvSource`] backed by `std::env`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Check passed
    Healthy,
    /// Check found an issue
    Unhealthy,
}

/// Individual health check result
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Status of the check
    pub status: HealthStatus,
    /// Issue description when unhealthy
    pub message: Option<String>,
    /// Duration of the check in milliseconds
    pub duration_ms: u64,
    /// Additional details as key-value pairs
    pub details: HashMap<String, String>,
}

impl CheckResult {
    /// Create a healthy check result
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: None,
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Create an unhealthy check result with an issue description
    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Set the duration of the check
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Add a detail key-value pair
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Outcome of all environment checks
#[derive(Debug, Clone)]
pub struct EnvironmentReport {
    /// Individual check results, in the order they ran
    pub checks: Vec<CheckResult>,
    /// Total duration of all checks in milliseconds
    pub total_duration_ms: u64,
}

impl EnvironmentReport {
    /// Create a report from check results
    #[must_use]
    pub fn new(checks: Vec<CheckResult>, duration: Duration) -> Self {
        Self {
            checks,
            total_duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Human-readable issues, one per failed check
    #[must_use]
    pub fn issues(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.status == HealthStatus::Unhealthy)
            .filter_map(|c| c.message.as_deref())
            .collect()
    }

    /// Returns true if no check reported an issue
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.status == HealthStatus::Healthy)
    }
}

/// Shared inputs handed to every check
pub struct CheckContext<'a> {
    /// Used to probe external programs
    pub runner: &'a dyn CommandRunner,
    /// Used to read environment variables
    pub env: &'a dyn EnvSource,
}

/// Trait for implementing health checks
pub trait HealthCheck {
    /// Perform the check and return a result
    fn check(&self, ctx: &CheckContext<'_>) -> CheckResult;
}

/// Health checker with configurable checks
#[derive(Default)]
pub struct HealthChecker {
    checks: Vec<Box<dyn HealthCheck>>,
}

impl HealthChecker {
    /// Create a new health checker with no checks
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a health check
    #[must_use]
    pub fn add_check(mut self, check: impl HealthCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Add the SDK home and Java checks
    #[must_use]
    pub fn with_android_checks(self, sdk_vars: &[String], java: &str) -> Self {
        self.add_check(SdkHomeCheck::new(sdk_vars.to_vec()))
            .add_check(JavaCheck::new(java))
    }

    /// Run all health checks
    #[must_use]
    pub fn run(&self, ctx: &CheckContext<'_>) -> EnvironmentReport {
        let start = Instant::now();
        let mut results = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let check_start = Instant::now();
            let result = check.check(ctx).with_duration(check_start.elapsed());
            tracing::debug!(check = %result.name, status = ?result.status, "health check finished");
            results.push(result);
        }

        EnvironmentReport::new(results, start.elapsed())
    }
}

/// Check that an SDK home variable is set and exists on disk
///
/// Variables are consulted in order; the first one that is set wins, even if
/// the directory it names is missing.
pub struct SdkHomeCheck {
    vars: Vec<String>,
}

impl SdkHomeCheck {
    /// Create a check over the given variable names
    #[must_use]
    pub fn new(vars: Vec<String>) -> Self {
        Self { vars }
    }
}

impl HealthCheck for SdkHomeCheck {
    fn check(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let found = self
            .vars
            .iter()
            .find_map(|name| ctx.env.var(name).map(|value| (name, value)));

        match found {
            None => CheckResult::unhealthy(
                "sdk_home",
                format!("{} environment variable not set", self.vars.join(" or ")),
            ),
            Some((name, value)) if !Path::new(&value).exists() => CheckResult::unhealthy(
                "sdk_home",
                format!("Android SDK path does not exist: {value}"),
            )
            .with_detail("variable", name.as_str()),
            Some((name, value)) => CheckResult::healthy("sdk_home")
                .with_detail("variable", name.as_str())
                .with_detail("path", value),
        }
    }
}

/// Check that a Java runtime answers `-version`
pub struct JavaCheck {
    program: String,
}

impl JavaCheck {
    /// Create a check for the given java executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl HealthCheck for JavaCheck {
    fn check(&self, ctx: &CheckContext<'_>) -> CheckResult {
        match ctx.runner.run_captured(&self.program, &["-version"]) {
            // `java -version` prints to stderr
            Ok(output) if output.success => {
                let version = output
                    .combined_output()
                    .lines()
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string();
                CheckResult::healthy("java").with_detail("version", version)
            }
            Ok(_) => CheckResult::unhealthy("java", "Java not found or not working properly"),
            Err(e) if e.is_not_found() => CheckResult::unhealthy("java", "Java not found in PATH"),
            Err(e) => {
                tracing::debug!(error = %e, "java probe failed");
                CheckResult::unhealthy("java", "Java not found or not working properly")
            }
        }
    }
}
