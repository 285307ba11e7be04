//! Engine assembly
//!
//! Wires the session store, fetcher, scheduler and session manager around
//! one event channel. This is the entry point for driving the engine without
//! the terminal UI.

use crate::events::{self, EventReceiver, EventSender};
use crate::fetch::ResourceFetcher;
use crate::refresh::RefreshScheduler;
use crate::session::{ClientSessionManager, Connector, SessionStore};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct Engine {
    pub store: SessionStore,
    pub fetcher: ResourceFetcher,
    pub scheduler: RefreshScheduler,
    pub manager: ClientSessionManager,
    events: EventSender,
}

impl Engine {
    /// Build an engine; results of background work arrive on the receiver
    pub fn new(
        connector: Arc<dyn Connector>,
        refresh_interval: Duration,
        search_debounce: Duration,
    ) -> (Self, EventReceiver) {
        let (tx, rx) = events::channel();
        let store = SessionStore::new();
        let fetcher = ResourceFetcher::new(store.clone());
        let scheduler = RefreshScheduler::new(
            store.clone(),
            fetcher.clone(),
            tx.clone(),
            refresh_interval,
            search_debounce,
        );
        let manager = ClientSessionManager::new(store.clone(), connector, tx.clone());
        (
            Self {
                store,
                fetcher,
                scheduler,
                manager,
                events: tx,
            },
            rx,
        )
    }

    pub fn events(&self) -> &EventSender {
        &self.events
    }
}
