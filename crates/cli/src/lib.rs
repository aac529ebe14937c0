//! Terminal output helpers for the Dead Pixel Detective build tools
//!
//! Provides shared CLI functionality:
//! - Status messages and banners
//! - A spinner for short blocking probes

#![warn(missing_docs)]

pub mod output;
pub mod progress;
