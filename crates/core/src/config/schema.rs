//! Configuration schema definitions

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub gradle: GradleConfig,

    #[serde(default)]
    pub environment: EnvironmentConfig,
}

impl ConfigSchema {
    /// Reject settings the orchestrator cannot act on
    pub fn validate(&self) -> Result<()> {
        if self.environment.sdk_vars.is_empty() {
            return Err(Error::new(
                ErrorCode::ConfigError,
                "environment.sdk_vars must name at least one variable",
            ));
        }

        if self.environment.sdk_vars.iter().any(|v| v.trim().is_empty()) {
            return Err(Error::new(
                ErrorCode::ConfigError,
                "environment.sdk_vars cannot contain empty names",
            ));
        }

        if self.environment.java.trim().is_empty() {
            return Err(Error::new(ErrorCode::ConfigError, "environment.java cannot be empty"));
        }

        Ok(())
    }
}

/// Android project layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project root; discovered from the working directory when unset
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Debug APK path reported after a full pipeline run, relative to the root
    #[serde(default = "default_debug_apk")]
    pub debug_apk: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: None,
            debug_apk: default_debug_apk(),
        }
    }
}

fn default_debug_apk() -> String {
    "app/build/outputs/apk/debug/app-debug.apk".to_string()
}

/// Gradle invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradleConfig {
    /// Pass `--no-daemon` to every task
    #[serde(default = "default_true")]
    pub no_daemon: bool,
}

impl Default for GradleConfig {
    fn default() -> Self {
        Self { no_daemon: true }
    }
}

fn default_true() -> bool {
    true
}

/// Environment check settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// SDK home variables, consulted in order
    #[serde(default = "default_sdk_vars")]
    pub sdk_vars: Vec<String>,

    /// Java executable probed with `-version`
    #[serde(default = "default_java")]
    pub java: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            sdk_vars: default_sdk_vars(),
            java: default_java(),
        }
    }
}

fn default_sdk_vars() -> Vec<String> {
    vec!["ANDROID_HOME".to_string(), "ANDROID_SDK_ROOT".to_string()]
}

fn default_java() -> String {
    "java".to_string()
}
