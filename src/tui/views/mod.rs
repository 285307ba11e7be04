//! TUI view components
//!
//! Each component renders one part of the interface from borrowed state.

mod footer;
mod header;
mod helpers;
mod output;
mod picker;
mod prompt;
mod tree;

pub use footer::*;
pub use header::*;
pub use helpers::*;
pub use output::*;
pub use picker::*;
pub use prompt::*;
pub use tree::*;
