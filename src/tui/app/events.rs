//! Event handling for the application
//!
//! Keyboard input and results delivered by background tasks. Neither path
//! performs I/O: work is queued as `UiRequest`s for the main loop.

use super::core::App;
use super::state::{InputMode, Panel, UiRequest};
use crate::actions::{ActionKind, ActionOutput, ActionRequest, split_exec_command};
use crate::cluster::PodRecord;
use crate::events::{EngineEvent, PodReport};
use crate::refresh::{Applied, RefreshTrigger, apply_outcome};
use crate::session::NamespaceScope;
use crate::tree::PodTree;
use crate::tui::constants::OUTPUT_PAGE_LINES;
use crate::tui::picker::{PickerItem, PickerKind, PickerState};
use crossterm::event::{KeyCode, KeyEvent};

impl App {
    /// Main keyboard event handler
    ///
    /// Returns `true` when the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.check_status_message_timeout();

        if self.view_state.picker.is_some() {
            self.handle_picker_key(key);
            return false;
        }

        match self.view_state.mode {
            InputMode::Search => {
                self.handle_search_key(key);
                return false;
            }
            InputMode::ExecPrompt => {
                self.handle_exec_prompt_key(key);
                return false;
            }
            InputMode::Normal => {}
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.clear_status_message(),
            KeyCode::Up => self.move_focus(-1),
            KeyCode::Down => self.move_focus(1),
            KeyCode::PageUp => self.view_state.output.scroll_up(OUTPUT_PAGE_LINES),
            KeyCode::PageDown => {
                let height = self.view_state.output_height;
                self.view_state.output.scroll_down(OUTPUT_PAGE_LINES, height);
            }
            KeyCode::Right => self.view_state.focus = Panel::Output,
            KeyCode::Left => self.view_state.focus = Panel::Tree,
            KeyCode::Enter => self.activate_current(),
            KeyCode::Char(' ') => {
                let height = self.view_state.output_height;
                self.view_state.output.scroll_to_end(height);
            }
            KeyCode::Char('o') => {
                self.ui_state.use_new_terminal = !self.ui_state.use_new_terminal;
                let target = if self.ui_state.use_new_terminal {
                    "new terminal"
                } else {
                    "output pane"
                };
                self.set_status_message((format!("Action output: {}", target), false));
            }
            KeyCode::Char('l') => self.request_action(ActionKind::Logs),
            KeyCode::Char('t') => self.request_action(ActionKind::TailLogs),
            KeyCode::Char('e') => self.request_action(ActionKind::Exec {
                command: self.config.exec_command.clone(),
            }),
            KeyCode::Char('E') => self.open_exec_prompt(),
            KeyCode::Char('i') => self.request_action(ActionKind::Describe),
            KeyCode::Char('y') => self.request_action(ActionKind::Yaml),
            KeyCode::Char('h') => self.request_action(ActionKind::MetricsGraph),
            KeyCode::Char('n') => self.open_namespace_picker(),
            KeyCode::Char('c') => self.open_context_picker(),
            KeyCode::Char('s') => {
                self.view_state.mode = InputMode::Search;
                self.view_state.focus = Panel::Tree;
            }
            KeyCode::Char('r') => self.request_refresh(),
            _ => {}
        }
        false
    }

    fn move_focus(&mut self, delta: i32) {
        match self.view_state.focus {
            Panel::Tree => {
                if delta < 0 {
                    self.tree.move_up();
                } else {
                    self.tree.move_down();
                }
                self.sync_selection();
            }
            Panel::Output => {
                if delta < 0 {
                    self.view_state.output.scroll_up(1);
                } else {
                    let height = self.view_state.output_height;
                    self.view_state.output.scroll_down(1, height);
                }
            }
        }
    }

    /// Enter on the tree: load a pod's details or fold a branch
    fn activate_current(&mut self) {
        if self.view_state.focus != Panel::Tree {
            return;
        }
        if let Some(pod) = self.focused_pod() {
            self.set_status_message((format!("Loading {}...", pod.name), false));
            self.pending.push_back(UiRequest::LoadDetails(pod));
        } else if self.tree.toggle_current() {
            let row = self.tree.current_row();
            self.view_state.update_tree_scroll(row);
        }
    }

    fn request_refresh(&mut self) {
        if self.scope().is_none() {
            self.set_status_message(("Select a namespace first (n)".to_string(), true));
            return;
        }
        self.pending.push_back(UiRequest::Refresh);
    }

    fn request_action(&mut self, kind: ActionKind) {
        let Some(pod) = self.focused_pod() else {
            self.set_status_message(("Select a pod first".to_string(), true));
            return;
        };
        if kind.needs_container() {
            self.pending.push_back(UiRequest::LoadContainers { pod, action: kind });
        } else {
            self.pending.push_back(UiRequest::RunAction(ActionRequest {
                pod: pod.name,
                namespace: pod.namespace,
                container: None,
                kind,
            }));
        }
    }

    fn open_exec_prompt(&mut self) {
        let Some(pod) = self.focused_pod() else {
            self.set_status_message(("Select a pod first".to_string(), true));
            return;
        };
        self.view_state.exec_input = self.config.exec_command.clone();
        self.view_state.exec_target = Some(pod);
        self.view_state.mode = InputMode::ExecPrompt;
    }

    fn open_namespace_picker(&mut self) {
        let (namespaces, current) = {
            let state = self.engine.store.lock();
            (state.namespaces.clone(), state.scope.clone())
        };
        if self.engine.store.session().is_none() {
            self.set_status_message(("Kubernetes clients are not initialized yet".to_string(), true));
            return;
        }

        let mut items = vec![PickerItem::with_display(
            NamespaceScope::ALL,
            "all namespaces",
        )];
        items.extend(namespaces.into_iter().map(PickerItem::new));
        let picker = PickerState::new(PickerKind::Namespace, "Select namespace", items)
            .with_selected(current.as_ref().map(|scope| scope.label()));
        self.view_state.picker = Some(picker);
    }

    fn open_context_picker(&mut self) {
        if self.contexts.names.is_empty() {
            self.set_status_message(("No contexts found in kubeconfig".to_string(), true));
            return;
        }
        let current = self
            .ui_state
            .context
            .clone()
            .or_else(|| self.contexts.current.clone());
        let items = self.contexts.names.iter().cloned().map(PickerItem::new).collect();
        let picker = PickerState::new(PickerKind::Context, "Select context", items)
            .with_selected(current.as_deref());
        self.view_state.picker = Some(picker);
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(picker) = self.view_state.picker.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up => picker.move_up(),
            KeyCode::Down => picker.move_down(),
            KeyCode::Esc => self.view_state.picker = None,
            KeyCode::Enter => {
                if let Some(picker) = self.view_state.picker.take() {
                    if let Some(value) = picker.selected_value() {
                        self.picker_selected(picker.kind, value);
                    }
                }
            }
            _ => {}
        }
    }

    fn picker_selected(&mut self, kind: PickerKind, value: String) {
        match kind {
            PickerKind::Context => self.request_connect(value),
            PickerKind::Namespace => self.select_namespace(NamespaceScope::from_picker(&value)),
            PickerKind::Container { pod, action } => {
                self.pending.push_back(UiRequest::RunAction(ActionRequest {
                    pod: pod.name,
                    namespace: pod.namespace,
                    container: Some(value),
                    kind: action,
                }))
            }
        }
    }

    /// Switch scope, reset the search and refresh
    pub fn select_namespace(&mut self, scope: NamespaceScope) {
        {
            let mut state = self.engine.store.lock();
            state.scope = Some(scope.clone());
            state.search.clear();
        }
        self.view_state.mode = InputMode::Normal;
        self.set_status_message((format!("Loading pods in {}...", scope.label()), false));
        self.pending.push_back(UiRequest::Refresh);
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view_state.mode = InputMode::Normal,
            KeyCode::Enter => {
                self.view_state.mode = InputMode::Normal;
                self.request_refresh();
            }
            KeyCode::Backspace => {
                if self.engine.store.lock().search.pop().is_some() {
                    self.pending.push_back(UiRequest::SearchChanged);
                }
            }
            KeyCode::Char(c) => {
                self.engine.store.lock().search.push(c);
                self.pending.push_back(UiRequest::SearchChanged);
            }
            _ => {}
        }
    }

    fn handle_exec_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view_state.mode = InputMode::Normal;
                self.view_state.exec_target = None;
            }
            KeyCode::Enter => {
                let command = self.view_state.exec_input.trim().to_string();
                // Keep the prompt open so the command can be corrected
                if let Err(e) = split_exec_command(&command) {
                    self.set_status_message((e.to_string(), true));
                    return;
                }
                self.view_state.mode = InputMode::Normal;
                if let Some(pod) = self.view_state.exec_target.take() {
                    self.pending.push_back(UiRequest::LoadContainers {
                        pod,
                        action: ActionKind::Exec { command },
                    });
                }
            }
            KeyCode::Backspace => {
                self.view_state.exec_input.pop();
            }
            KeyCode::Char(c) => self.view_state.exec_input.push(c),
            _ => {}
        }
    }

    /// Apply a result delivered by a background task
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let current = self.engine.store.generation();
        match event {
            EngineEvent::SessionReady {
                generation,
                context,
                metrics_available,
            } => {
                if generation != current {
                    return;
                }
                self.tree = PodTree::default();
                self.view_state.tree_scroll = 0;
                self.view_state.output = Default::default();
                self.ui_state.context = Some(context.clone());
                self.ui_state.connecting = None;
                self.ui_state.metrics_available = metrics_available;
                self.ui_state.last_refreshed = None;
                self.set_status_message((
                    format!("Connected to {}. Press n to pick a namespace", context),
                    false,
                ));
            }
            EngineEvent::SessionFailed { context, error } => {
                if self.ui_state.connecting.as_deref() == Some(context.as_str()) {
                    self.ui_state.connecting = None;
                }
                self.set_status_message((error.to_string(), true));
            }
            EngineEvent::NamespacesLoaded { generation, result } => {
                if generation != current {
                    return;
                }
                match result {
                    Ok(names) => tracing::debug!(count = names.len(), "Namespaces loaded"),
                    Err(e) => self.set_status_message((format!("Failed to list namespaces: {}", e), true)),
                }
            }
            EngineEvent::Refreshed(outcome) => {
                let trigger = outcome.trigger;
                match apply_outcome(&self.engine.store, &mut self.tree, outcome) {
                    Applied::Rebuilt { pods } => {
                        self.ui_state.last_refreshed = Some(chrono::Local::now());
                        let row = self.tree.current_row();
                        self.view_state.tree_scroll = 0;
                        self.view_state.update_tree_scroll(row);
                        if trigger == RefreshTrigger::Manual {
                            self.set_status_message((format!("Loaded {} pods", pods), false));
                        }
                    }
                    Applied::Failed(message) => self.set_status_message((message, true)),
                    Applied::Discarded | Applied::Skipped => {}
                }
            }
            EngineEvent::PodDetails {
                generation,
                pod,
                result,
            } => {
                if generation != current {
                    return;
                }
                match result {
                    Ok(Some(report)) => {
                        self.clear_status_message();
                        let title = format!("{}/{}", pod.namespace, pod.name);
                        self.view_state.output.set(title, pod_report_lines(&report));
                    }
                    Ok(None) => self.set_status_message((
                        format!("Pod {} no longer exists", pod.name),
                        true,
                    )),
                    Err(e) => self.set_status_message((e, true)),
                }
            }
            EngineEvent::Containers {
                generation,
                pod,
                action,
                result,
            } => {
                if generation != current {
                    return;
                }
                match result {
                    Ok(containers) => self.containers_loaded(pod, action, containers),
                    Err(e) => self.set_status_message((e, true)),
                }
            }
            EngineEvent::ActionFinished { result } => match result {
                Ok(ActionOutput::Captured { title, text }) => {
                    self.clear_status_message();
                    self.view_state.output.set_text(title, &text);
                }
                Ok(ActionOutput::Shown { title, lines }) => {
                    self.clear_status_message();
                    self.view_state.output.set(title, lines);
                }
                Ok(ActionOutput::Launched { command }) => {
                    self.set_status_message((format!("Launched: {}", command), false))
                }
                Ok(ActionOutput::Unavailable(message)) => {
                    self.set_status_message((message, false))
                }
                Err(e) => self.set_status_message((e, true)),
            },
        }
    }

    fn containers_loaded(&mut self, pod: PodRecord, action: ActionKind, mut containers: Vec<String>) {
        if containers.len() > 1 {
            let items = containers.into_iter().map(PickerItem::new).collect();
            let title = format!("Container for {}", pod.name);
            self.view_state.picker = Some(PickerState::new(
                PickerKind::Container { pod, action },
                title,
                items,
            ));
            return;
        }
        self.pending.push_back(UiRequest::RunAction(ActionRequest {
            pod: pod.name,
            namespace: pod.namespace,
            container: containers.pop(),
            kind: action,
        }));
    }
}

/// Output pane lines for a pod's details
pub fn pod_report_lines(report: &PodReport) -> Vec<String> {
    let details = &report.details;
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        format!("Name:       {}", details.name),
        format!("Namespace:  {}", details.namespace),
        format!("Phase:      {}", field(&details.phase)),
        format!("Pod IP:     {}", field(&details.pod_ip)),
        format!("Node:       {}", field(&details.node_name)),
        format!("Host IP:    {}", field(&details.host_ip)),
        format!("Started:    {}", field(&details.start_time)),
    ];
    if let Some(age) = details.age(chrono::Utc::now()) {
        lines.push(format!("Age:        {}", age));
    }
    if let Some(usage) = report.usage {
        lines.push(format!("CPU:        {}m", usage.cpu_millis));
        lines.push(format!(
            "Memory:     {}",
            crate::cluster::quantity::format_bytes(usage.memory_bytes)
        ));
    }
    lines.push(String::new());
    lines.push("Containers:".to_string());
    for (name, phase) in &details.containers {
        lines.push(format!("  {} ({})", name, phase.as_str()));
    }
    lines
}
