//! Session state shared by the interactive loop and background tasks
//!
//! `SessionStore` owns every piece of mutable session state behind one lock.
//! `ClientSessionManager` turns a context name into a connected `Session` off
//! the interactive path, and `Readiness` publishes which generation is live.

mod manager;
mod readiness;
mod store;

pub use manager::{ClientSessionManager, Connector, SessionHandles};
pub use readiness::Readiness;
pub use store::{NamespaceScope, Session, SessionState, SessionStore};

use thiserror::Error;

/// Errors raised while establishing or publishing a session
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to load kubeconfig {path}: {message}")]
    Config { path: String, message: String },

    #[error("Context '{context}' not found in kubeconfig")]
    UnknownContext { context: String },

    #[error("Failed to connect to context '{context}': {message}")]
    Handshake { context: String, message: String },

    /// A newer connect was started while this one was in flight
    #[error("Session generation {generation} was superseded")]
    Superseded { generation: u64 },
}
