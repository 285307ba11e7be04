use super::{Readiness, SessionError};
use crate::cluster::{ClusterApi, MetricsApi, PodRecord};
use crate::tree::ExpansionState;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Which namespaces a fetch covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    AllNamespaces,
    SingleNamespace(String),
}

impl NamespaceScope {
    /// Picker value for the all-namespaces entry
    pub const ALL: &'static str = "all";

    pub fn from_picker(value: &str) -> Self {
        if value == Self::ALL {
            NamespaceScope::AllNamespaces
        } else {
            NamespaceScope::SingleNamespace(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NamespaceScope::AllNamespaces => Self::ALL,
            NamespaceScope::SingleNamespace(name) => name,
        }
    }
}

/// Connected client handles for one context
#[derive(Clone)]
pub struct Session {
    pub generation: u64,
    pub context_name: String,
    pub cluster: Arc<dyn ClusterApi>,
    pub metrics: Option<Arc<dyn MetricsApi>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("generation", &self.generation)
            .field("context_name", &self.context_name)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Everything guarded by the store lock
#[derive(Debug, Default)]
pub struct SessionState {
    pub session: Option<Session>,
    /// Highest generation handed out to a connect attempt
    pub latest_requested: u64,
    /// `None` until the operator picks a namespace
    pub scope: Option<NamespaceScope>,
    pub search: String,
    pub expansion: ExpansionState,
    pub selection: Option<PodRecord>,
    /// Namespace names of the active session, sorted
    pub namespaces: Vec<String>,
}

impl SessionState {
    /// Generation of the active session, 0 when none is connected
    pub fn generation(&self) -> u64 {
        self.session.as_ref().map(|s| s.generation).unwrap_or(0)
    }

    pub fn context_name(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.context_name.as_str())
    }
}

/// Shared handle to the session state
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    state: Arc<Mutex<SessionState>>,
    readiness: Readiness,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the state lock
    ///
    /// A panic while holding the lock leaves the state intact, so poisoning
    /// is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    /// Hand out the generation for a connect attempt that is starting now
    pub fn reserve_generation(&self) -> u64 {
        let mut state = self.lock();
        state.latest_requested += 1;
        state.latest_requested
    }

    /// Whether `generation` is still the newest connect attempt
    pub fn is_latest_request(&self, generation: u64) -> bool {
        self.lock().latest_requested == generation
    }

    /// Clone of the active session
    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    /// Install `session` as the active one and mark it ready
    ///
    /// Replaces the previous session only if no newer connect was started.
    /// The previous context's scope, search, expansion, selection and
    /// namespace list are cleared.
    pub fn publish(&self, session: Session) -> Result<(), SessionError> {
        let mut state = self.lock();
        if session.generation != state.latest_requested {
            return Err(SessionError::Superseded {
                generation: session.generation,
            });
        }

        let generation = session.generation;
        state.session = Some(session);
        state.scope = None;
        state.search.clear();
        state.expansion.clear();
        state.selection = None;
        state.namespaces.clear();
        self.readiness.mark_ready(generation);
        Ok(())
    }
}
