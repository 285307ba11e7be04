//! Picker popup rendering
//!
//! Renders a picker as a centered overlay over the current view.

use super::helpers::centered_rect;
use crate::tui::constants::MAX_PICKER_ROWS;
use crate::tui::picker::PickerState;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

/// Render the picker overlay
///
/// Updates the picker's scroll offset so the selection stays visible.
pub fn render_picker(f: &mut Frame, area: Rect, picker: &mut PickerState, theme: &Theme) {
    let longest = picker
        .items
        .iter()
        .map(|item| item.display_text.chars().count())
        .chain(std::iter::once(picker.title.chars().count()))
        .max()
        .unwrap_or(0) as u16;
    let popup_width = longest.saturating_add(6).clamp(30, 60);
    let rows = (picker.items.len() as u16).clamp(1, MAX_PICKER_ROWS);
    let popup_area = centered_rect(popup_width, rows.saturating_add(2), area);

    let list_height = popup_area.height.saturating_sub(2) as usize;
    picker.update_scroll(list_height);

    // Clear the background area to make it opaque
    f.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = picker
        .items
        .iter()
        .enumerate()
        .skip(picker.scroll_offset)
        .take(list_height)
        .map(|(idx, item)| {
            let is_selected = idx == picker.selected_index;
            let style = if is_selected {
                theme.table_selected_style()
            } else {
                Style::default().fg(theme.text_primary)
            };
            let prefix = if is_selected { "> " } else { "  " };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", prefix, item.display_text),
                style,
            )))
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", picker.title),
            Style::default()
                .fg(theme.table_selected)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(Style::default().fg(theme.text_primary).bg(Color::Black));

    f.render_widget(List::new(items).block(block), popup_area);
}
