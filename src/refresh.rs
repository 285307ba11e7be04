//! Periodic, debounced and manual refreshes
//!
//! Every trigger runs the same pipeline: snapshot scope and query under the
//! store lock, fetch on a background task, send the outcome to the
//! interactive loop, which applies it with [`apply_outcome`].

use crate::cluster::PodRecord;
use crate::events::{EngineEvent, EventSender};
use crate::fetch::{FetchError, ResourceFetcher};
use crate::session::{NamespaceScope, SessionState, SessionStore};
use crate::tree::{PodTree, reconcile};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Shortest accepted periodic interval
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Periodic,
    Search,
    Manual,
}

/// A finished fetch on its way to the interactive loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub trigger: RefreshTrigger,
    /// Generation the fetch ran against
    pub generation: u64,
    pub scope: NamespaceScope,
    pub result: Result<BTreeMap<String, Vec<PodRecord>>, FetchError>,
}

/// What applying an outcome did to the displayed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Rebuilt { pods: usize },
    /// Outcome of an older generation or scope
    Discarded,
    /// Not-ready periodic refresh
    Skipped,
    Failed(String),
}

#[derive(Clone)]
pub struct RefreshScheduler {
    store: SessionStore,
    fetcher: ResourceFetcher,
    events: EventSender,
    interval: Duration,
    debounce: Duration,
    pending_search: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl RefreshScheduler {
    pub fn new(
        store: SessionStore,
        fetcher: ResourceFetcher,
        events: EventSender,
        interval: Duration,
        debounce: Duration,
    ) -> Self {
        Self {
            store,
            fetcher,
            events,
            interval: interval.max(MIN_REFRESH_INTERVAL),
            debounce,
            pending_search: Arc::new(Mutex::new(None)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the periodic timer; the first tick fires after one interval
    pub fn spawn_periodic(&self) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + scheduler.interval, scheduler.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                scheduler.launch(RefreshTrigger::Periodic);
            }
        })
    }

    /// Restart the search delay; only the last edit of a burst fetches
    pub fn search_changed(&self) {
        let mut pending = self
            .pending_search
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let scheduler = self.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(scheduler.debounce).await;
            // The fetch runs on its own task so a later edit cannot cancel it
            scheduler.launch(RefreshTrigger::Search);
        }));
    }

    /// Refresh now, bypassing the search delay
    pub fn manual(&self) -> Option<JoinHandle<()>> {
        self.launch(RefreshTrigger::Manual)
    }

    /// Snapshot scope and query, then fetch on a background task
    ///
    /// Returns `None` when nothing was started: no scope picked yet, or a
    /// periodic tick while the session is not ready.
    pub fn launch(&self, trigger: RefreshTrigger) -> Option<JoinHandle<()>> {
        let (scope, query, generation) = {
            let state = self.store.lock();
            (state.scope.clone(), state.search.clone(), state.generation())
        };

        let Some(scope) = scope else {
            tracing::debug!(?trigger, "No namespace selected, skipping refresh");
            return None;
        };
        if trigger == RefreshTrigger::Periodic && !self.store.readiness().is_ready(generation) {
            tracing::debug!(generation, "Session not ready, skipping periodic refresh");
            return None;
        }

        let fetcher = self.fetcher.clone();
        let events = self.events.clone();
        Some(tokio::spawn(async move {
            let (generation, result) = match fetcher.fetch(&scope, &query).await {
                Ok(outcome) => (outcome.generation, Ok(outcome.namespaces)),
                Err(error) => (generation, Err(error)),
            };
            let _ = events.send(EngineEvent::Refreshed(RefreshOutcome {
                trigger,
                generation,
                scope,
                result,
            }));
        }))
    }
}

/// Apply a refresh outcome to the displayed tree
///
/// Runs on the interactive loop. Outcomes of an older generation, or of a
/// scope that is no longer selected, are dropped without touching state.
pub fn apply_outcome(store: &SessionStore, tree: &mut PodTree, outcome: RefreshOutcome) -> Applied {
    let mut guard = store.lock();
    let state: &mut SessionState = &mut guard;

    if outcome.generation != state.generation() {
        tracing::debug!(
            outcome_generation = outcome.generation,
            current_generation = state.generation(),
            "Discarding stale refresh"
        );
        return Applied::Discarded;
    }
    if state.scope.as_ref() != Some(&outcome.scope) {
        tracing::debug!(scope = outcome.scope.label(), "Discarding refresh for previous scope");
        return Applied::Discarded;
    }

    match outcome.result {
        Ok(namespaces) => {
            let prior = state.selection.clone();
            let reconciled = reconcile(tree, &namespaces, &mut state.expansion, prior.as_ref());
            *tree = reconciled.tree;
            state.selection = reconciled.selection;
            Applied::Rebuilt {
                pods: tree.pod_count(),
            }
        }
        Err(FetchError::NotReady) if outcome.trigger == RefreshTrigger::Periodic => {
            Applied::Skipped
        }
        Err(error) => {
            tracing::warn!(trigger = ?outcome.trigger, error = %error, "Refresh failed");
            Applied::Failed(error.to_string())
        }
    }
}
