//! Theme and styling definitions
//!
//! Centralized color and style definitions for every view.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // Header colors
    pub header_context: Color,
    pub header_namespace: Color,
    pub header_namespace_all: Color,
    pub header_search: Color,
    pub header_label: Color,

    // Tree colors
    pub tree_root: Color,
    pub tree_namespace: Color,
    pub tree_group: Color,
    pub tree_pod: Color,
    pub tree_info: Color,

    // Selection colors
    pub table_selected: Color,
    pub table_selected_bg: Color,

    // Border colors
    pub border_focused: Color,
    pub border_normal: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,

    // Status colors
    pub status_ready: Color,
    pub status_error: Color,
    pub status_pending: Color,

    // Input colors
    pub prompt: Color,

    // Footer colors
    pub footer_key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_context: Color::Yellow,
            header_namespace: Color::Yellow,
            header_namespace_all: Color::Green,
            header_search: Color::Magenta,
            header_label: Color::Cyan,

            tree_root: Color::Cyan,
            tree_namespace: Color::Yellow,
            tree_group: Color::Gray,
            tree_pod: Color::White,
            tree_info: Color::Gray,

            table_selected: Color::Blue,
            table_selected_bg: Color::DarkGray,

            border_focused: Color::Cyan,
            border_normal: Color::Gray,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,

            status_ready: Color::Green,
            status_error: Color::Red,
            status_pending: Color::Yellow,

            prompt: Color::Yellow,

            footer_key: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn header_context_style(&self) -> Style {
        Style::default()
            .fg(self.header_context)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_namespace_style(&self, is_all: bool) -> Style {
        Style::default()
            .fg(if is_all {
                self.header_namespace_all
            } else {
                self.header_namespace
            })
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_selected_style(&self) -> Style {
        Style::default()
            .fg(self.table_selected)
            .bg(self.table_selected_bg)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border_normal
        })
    }

    pub fn status_ready_style(&self) -> Style {
        Style::default().fg(self.status_ready)
    }

    pub fn status_error_style(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }
}
