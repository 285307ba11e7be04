//! Output pane: pod details and captured action output

use super::helpers::visible_window;
use crate::tui::app::state::OutputPane;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

pub fn render_output(f: &mut Frame, area: Rect, pane: &OutputPane, focused: bool, theme: &Theme) {
    let title = if pane.title.is_empty() {
        " Output ".to_string()
    } else {
        format!(" {} ", pane.title)
    };
    let height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = if pane.lines.is_empty() {
        vec![Line::styled(
            "Press Enter on a pod to see its details",
            Style::default().fg(theme.text_secondary),
        )]
    } else {
        visible_window(&pane.lines, pane.scroll, height)
            .iter()
            .map(|line| Line::raw(line.as_str()))
            .collect()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused));
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(theme.text_primary)),
        area,
    );
}
