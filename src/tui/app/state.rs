//! Application state structures
//!
//! State sub-structures that group the App's fields by concern.

use crate::actions::{ActionKind, ActionRequest};
use crate::cluster::PodRecord;
use crate::tui::picker::PickerState;
use chrono::{DateTime, Local};
use std::time::Instant;

/// Panel receiving arrow keys
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Tree,
    Output,
}

/// Where typed characters go
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Search,
    ExecPrompt,
}

/// Text shown in the output pane
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputPane {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: usize,
}

impl OutputPane {
    pub fn set(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.title = title.into();
        self.lines = lines;
        self.scroll = 0;
    }

    pub fn set_text(&mut self, title: impl Into<String>, text: &str) {
        self.set(title, text.lines().map(str::to_string).collect());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize, visible_height: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll(visible_height));
    }

    pub fn scroll_to_end(&mut self, visible_height: usize) {
        self.scroll = self.max_scroll(visible_height);
    }

    fn max_scroll(&self, visible_height: usize) -> usize {
        self.lines.len().saturating_sub(visible_height)
    }
}

/// View-related state (focus, scrolling, popups)
#[derive(Debug)]
pub struct ViewState {
    pub focus: Panel,
    pub mode: InputMode,
    /// First visible tree row
    pub tree_scroll: usize,
    pub output: OutputPane,
    /// Active picker popup
    pub picker: Option<PickerState>,
    /// Exec prompt buffer and the pod it targets
    pub exec_input: String,
    pub exec_target: Option<PodRecord>,
    /// Inner heights of the last render, used for scrolling
    pub tree_height: usize,
    pub output_height: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            focus: Panel::Tree,
            mode: InputMode::Normal,
            tree_scroll: 0,
            output: OutputPane::default(),
            picker: None,
            exec_input: String::new(),
            exec_target: None,
            tree_height: 10,
            output_height: 10,
        }
    }
}

impl ViewState {
    /// Keep the focused tree row inside the viewport
    pub fn update_tree_scroll(&mut self, current_row: usize) {
        let height = self.tree_height.max(1);
        if current_row < self.tree_scroll {
            self.tree_scroll = current_row;
        } else if current_row >= self.tree_scroll + height {
            self.tree_scroll = current_row + 1 - height;
        }
    }
}

/// UI-related state (status line, session labels)
#[derive(Debug, Default)]
pub struct UIState {
    /// Status message to display (message, is_error)
    pub status_message: Option<(String, bool)>,
    /// When status message was set (for auto-clearing)
    pub status_message_time: Option<Instant>,
    /// Context of the active session
    pub context: Option<String>,
    /// Context a connect is in flight for
    pub connecting: Option<String>,
    pub metrics_available: bool,
    /// Route action output to a new terminal window
    pub use_new_terminal: bool,
    /// Time the last refresh outcome rebuilt the tree
    pub last_refreshed: Option<DateTime<Local>>,
}

/// Work the main loop dispatches onto background tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiRequest {
    Connect(String),
    Refresh,
    SearchChanged,
    LoadDetails(PodRecord),
    LoadContainers { pod: PodRecord, action: ActionKind },
    RunAction(ActionRequest),
}
