//! Footer view rendering

use crate::tui::app::state::InputMode;
use crate::tui::keybindings::{
    NavigationCommand, get_navigation_commands, get_popup_commands, get_search_commands,
};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the footer: a status message, the search field, or key hints
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    mode: InputMode,
    popup_open: bool,
    search: &str,
    status_message: Option<&(String, bool)>,
    theme: &Theme,
) {
    // An error raised inside a popup replaces its hints
    let line = match status_message {
        Some((message, true)) if popup_open => status_line(message, true, theme),
        _ if popup_open => hint_line(&get_popup_commands(), theme),
        _ if mode == InputMode::Search => {
            let mut spans = vec![
                Span::styled("/", Style::default().fg(theme.prompt)),
                Span::raw(search.to_string()),
                Span::raw("_"), // Cursor
                Span::raw("  "),
            ];
            spans.extend(hint_line(&get_search_commands(), theme).spans);
            Line::from(spans)
        }
        Some((message, is_error)) => status_line(message, *is_error, theme),
        None => hint_line(&get_navigation_commands(), theme),
    };

    let footer = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(footer, area);
}

fn status_line(message: &str, is_error: bool, theme: &Theme) -> Line<'static> {
    let style = if is_error {
        theme.status_error_style()
    } else {
        theme.status_ready_style()
    };
    Line::from(Span::styled(message.to_string(), style))
}

fn hint_line(commands: &[NavigationCommand], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, command) in commands.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(command.key, theme.footer_key_style()));
        spans.push(Span::raw(format!(" {}", command.label)));
    }
    Line::from(spans)
}
