//! podminator library
//!
//! Session, fetch and tree engine behind the podminator terminal dashboard.
//! It can be driven without the TUI: build an [`engine::Engine`], connect a
//! context and consume the [`events::EngineEvent`] stream.

pub mod actions;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod events;
pub mod fetch;
pub mod refresh;
pub mod session;
pub mod tree;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use cluster::{ClusterApi, MetricsApi, PodRecord};
pub use engine::Engine;
pub use events::EngineEvent;
pub use session::{NamespaceScope, SessionStore};
pub use tree::PodTree;
