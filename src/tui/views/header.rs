//! Header view rendering

use crate::tui::theme::Theme;
use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;

/// Values shown in the header line
#[derive(Debug, Clone, Default)]
pub struct HeaderInfo<'a> {
    pub context: Option<&'a str>,
    pub connecting: Option<&'a str>,
    pub namespace: Option<&'a str>,
    pub search: &'a str,
    pub metrics_available: bool,
    pub use_new_terminal: bool,
    pub refresh_interval: Duration,
    /// Time the last pod listing was applied
    pub last_refreshed: Option<DateTime<Local>>,
}

/// Render the header with context, namespace, search and output routing
pub fn render_header(f: &mut Frame, area: Rect, info: &HeaderInfo<'_>, theme: &Theme) {
    let label = Style::default().fg(theme.header_label);
    let value = Style::default().fg(theme.text_primary);
    let separator = Span::styled(" | ", Style::default().fg(theme.text_secondary));

    let context = match (info.connecting, info.context) {
        (Some(target), _) => Span::styled(
            format!("{} (connecting)", target),
            Style::default().fg(theme.status_pending),
        ),
        (None, Some(context)) => Span::styled(context.to_string(), theme.header_context_style()),
        (None, None) => Span::styled("-", value),
    };
    let namespace = match info.namespace {
        Some(ns) => Span::styled(ns.to_string(), theme.header_namespace_style(ns == "all")),
        None => Span::styled("-", value),
    };
    let search = if info.search.is_empty() {
        Span::styled("-", value)
    } else {
        Span::styled(info.search.to_string(), Style::default().fg(theme.header_search))
    };
    let metrics = if info.metrics_available {
        Span::styled("on", theme.status_ready_style())
    } else {
        Span::styled("off", value)
    };
    let output = if info.use_new_terminal {
        "terminal"
    } else {
        "pane"
    };

    let line = Line::from(vec![
        Span::styled("Context: ", label),
        context,
        separator.clone(),
        Span::styled("Namespace: ", label),
        namespace,
        separator.clone(),
        Span::styled("Search: ", label),
        search,
        separator.clone(),
        Span::styled("Metrics: ", label),
        metrics,
        separator,
        Span::styled("Output: ", label),
        Span::styled(output, value),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(false))
        .title_top(refresh_title(info, theme).right_aligned());
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn refresh_title(info: &HeaderInfo<'_>, theme: &Theme) -> Line<'static> {
    let every = format!(" Pods refreshed every {}s", info.refresh_interval.as_secs());
    let text = match info.last_refreshed {
        Some(at) => format!("{}, last at {} ", every, at.format("%H:%M:%S")),
        None => format!("{} ", every),
    };
    Line::from(Span::styled(text, Style::default().fg(theme.text_secondary)))
}
