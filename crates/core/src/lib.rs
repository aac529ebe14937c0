//! Core utilities for the Dead Pixel Detective build tools
//!
//! Shared functionality used by the Android orchestrator and its CLI:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Process execution**: a [`process::CommandRunner`] seam over `std::process`
//! - **Health checks**: SDK home and Java runtime verification
//! - **Configuration**: TOML-based configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use dpd_core::health::{CheckContext, HealthChecker, ProcessEnv};
//! use dpd_core::process::SystemRunner;
//!
//! let sdk_vars = vec!["ANDROID_HOME".to_string()];
//! let ctx = CheckContext { runner: &SystemRunner, env: &ProcessEnv };
//! let report = HealthChecker::new()
//!     .with_android_checks(&sdk_vars, "java")
//!     .run(&ctx);
//!
//! for issue in report.issues() {
//!     eprintln!("{issue}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod health;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};

