//! Exec command prompt

use super::helpers::centered_rect;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the command prompt for exec into `pod`
pub fn render_exec_prompt(f: &mut Frame, area: Rect, pod: &str, input: &str, theme: &Theme) {
    let popup_area = centered_rect(area.width.clamp(30, 60), 3, area);
    f.render_widget(Clear, popup_area);

    let line = Line::from(vec![
        Span::styled("$ ", Style::default().fg(theme.prompt)),
        Span::raw(input.to_string()),
        Span::raw("_"), // Cursor
    ]);
    let block = Block::default()
        .title(format!(" Exec in {} ", pod))
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(Style::default().fg(theme.text_primary).bg(Color::Black));
    f.render_widget(Paragraph::new(line).block(block), popup_area);
}
