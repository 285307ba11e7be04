//! Rendering logic for the application
//!
//! Layout: header, body split between tree and output, footer, then
//! overlays for the picker and the exec prompt.

use super::core::App;
use super::state::{InputMode, Panel};
use crate::tui::constants::{FOOTER_HEIGHT, HEADER_HEIGHT, TREE_PANEL_PERCENT};
use crate::tui::views::{
    HeaderInfo, render_exec_prompt, render_footer, render_header, render_output, render_picker,
    render_tree,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(TREE_PANEL_PERCENT),
                Constraint::Percentage(100 - TREE_PANEL_PERCENT),
            ])
            .split(chunks[1]);

        // Scrolling uses the inner heights of this frame
        self.view_state.tree_height = body[0].height.saturating_sub(2) as usize;
        self.view_state.output_height = body[1].height.saturating_sub(2) as usize;
        let row = self.tree.current_row();
        self.view_state.update_tree_scroll(row);

        let (namespace, search) = {
            let state = self.engine.store.lock();
            (
                state.scope.as_ref().map(|scope| scope.label().to_string()),
                state.search.clone(),
            )
        };

        let header = HeaderInfo {
            context: self.ui_state.context.as_deref(),
            connecting: self.ui_state.connecting.as_deref(),
            namespace: namespace.as_deref(),
            search: &search,
            metrics_available: self.ui_state.metrics_available,
            use_new_terminal: self.ui_state.use_new_terminal,
            refresh_interval: self.engine.scheduler.interval(),
            last_refreshed: self.ui_state.last_refreshed,
        };
        render_header(f, chunks[0], &header, &self.theme);

        render_tree(
            f,
            body[0],
            &self.tree,
            self.view_state.tree_scroll,
            self.view_state.focus == Panel::Tree,
            &self.theme,
        );
        render_output(
            f,
            body[1],
            &self.view_state.output,
            self.view_state.focus == Panel::Output,
            &self.theme,
        );

        let popup_open =
            self.view_state.picker.is_some() || self.view_state.mode == InputMode::ExecPrompt;
        render_footer(
            f,
            chunks[2],
            self.view_state.mode,
            popup_open,
            &search,
            self.ui_state.status_message.as_ref(),
            &self.theme,
        );

        if let Some(picker) = self.view_state.picker.as_mut() {
            render_picker(f, f.area(), picker, &self.theme);
        } else if self.view_state.mode == InputMode::ExecPrompt {
            let pod = self
                .view_state
                .exec_target
                .as_ref()
                .map(|pod| pod.name.as_str())
                .unwrap_or("-");
            render_exec_prompt(f, f.area(), pod, &self.view_state.exec_input, &self.theme);
        }
    }
}
