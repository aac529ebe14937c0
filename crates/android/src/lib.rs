//! Android build orchestration for Dead Pixel Detective
//!
//! This crate provides:
//! - Gradle wrapper integration
//! - The command dispatch table behind the `dpd` CLI
//! - The check → clean → test → lint → build pipeline

#![warn(missing_docs)]

pub mod gradle;
pub mod orchestrator;
pub mod pipeline;

pub use orchestrator::{Command, Orchestrator};
