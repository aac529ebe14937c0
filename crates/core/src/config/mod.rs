//! Configuration loading and schema definitions
//!
//! Every field has a default, so running without a config file reproduces the
//! stock build commands.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
