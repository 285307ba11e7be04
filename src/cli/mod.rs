//! Command-line surface: flags and logging setup

mod args;
mod logging;

pub use args::Args;
pub use logging::*;
