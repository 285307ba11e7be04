//! Application state and main TUI logic

use super::state::{UIState, UiRequest, ViewState};
use crate::actions::ActionRunner;
use crate::cluster::{ContextList, PodRecord};
use crate::config::Config;
use crate::engine::Engine;
use crate::session::NamespaceScope;
use crate::tree::PodTree;
use crate::tui::Theme;
use std::collections::VecDeque;

/// Main application state
pub struct App {
    // Core data
    pub(crate) engine: Engine,
    pub(crate) runner: ActionRunner,
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    pub(crate) contexts: ContextList,
    pub(crate) tree: PodTree,

    // Organized state
    pub(crate) view_state: ViewState,
    pub(crate) ui_state: UIState,

    /// Requests queued by key handling, dispatched by the main loop
    pub(crate) pending: VecDeque<UiRequest>,
}

impl App {
    pub fn new(
        engine: Engine,
        runner: ActionRunner,
        config: Config,
        theme: Theme,
        contexts: ContextList,
    ) -> Self {
        let ui_state = UIState {
            use_new_terminal: config.use_new_terminal,
            ..Default::default()
        };
        Self {
            engine,
            runner,
            config,
            theme,
            contexts,
            tree: PodTree::default(),
            view_state: ViewState::default(),
            ui_state,
            pending: VecDeque::new(),
        }
    }

    /// Queue a connect to `context`
    pub fn request_connect(&mut self, context: String) {
        self.ui_state.connecting = Some(context.clone());
        self.set_status_message((format!("Connecting to {}...", context), false));
        self.pending.push_back(UiRequest::Connect(context));
    }

    /// Drain the queued requests
    pub fn take_requests(&mut self) -> Vec<UiRequest> {
        self.pending.drain(..).collect()
    }

    pub fn tree(&self) -> &PodTree {
        &self.tree
    }

    pub fn view_state(&self) -> &super::state::ViewState {
        &self.view_state
    }

    pub fn ui_state(&self) -> &UIState {
        &self.ui_state
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn status_message(&self) -> Option<&(String, bool)> {
        self.ui_state.status_message.as_ref()
    }

    pub fn set_status_message(&mut self, message: (String, bool)) {
        self.ui_state.status_message = Some(message);
        self.ui_state.status_message_time = Some(std::time::Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.ui_state.status_message = None;
        self.ui_state.status_message_time = None;
    }

    /// Clear the status message once it outlived the configured timeout
    pub fn check_status_message_timeout(&mut self) {
        if let Some(set_at) = self.ui_state.status_message_time {
            if set_at.elapsed() >= self.config.status_timeout() {
                self.clear_status_message();
            }
        }
    }

    pub(crate) fn scope(&self) -> Option<NamespaceScope> {
        self.engine.store.lock().scope.clone()
    }

    pub(crate) fn search_text(&self) -> String {
        self.engine.store.lock().search.clone()
    }

    /// Mirror the tree focus into the stored selection
    pub(crate) fn sync_selection(&mut self) {
        let focused = self.tree.current_pod().cloned();
        self.engine.store.lock().selection = focused;
        let row = self.tree.current_row();
        self.view_state.update_tree_scroll(row);
    }

    pub(crate) fn focused_pod(&self) -> Option<PodRecord> {
        self.tree.current_pod().cloned()
    }
}
