//! Configuration for podminator
//!
//! A single YAML file under the platform config directory, with per-field
//! defaults and a small set of environment overrides.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, TerminalConfig, UiConfig};
