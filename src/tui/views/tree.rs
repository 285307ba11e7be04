//! Pod tree panel

use super::helpers::visible_window;
use crate::tree::{NodeKind, PodTree, VisibleRow};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Text of one tree row: indentation, fold marker, label
pub fn tree_row_text(row: &VisibleRow<'_>) -> String {
    let marker = if !row.node.is_expandable() {
        "  "
    } else if row.node.expanded {
        "- "
    } else {
        "+ "
    };
    format!("{}{}{}", "  ".repeat(row.depth), marker, row.node.label())
}

fn row_style(kind: &NodeKind, theme: &Theme) -> Style {
    match kind {
        NodeKind::Root => Style::default()
            .fg(theme.tree_root)
            .add_modifier(Modifier::BOLD),
        NodeKind::Namespace(_) => Style::default().fg(theme.tree_namespace),
        NodeKind::Group => Style::default().fg(theme.tree_group),
        NodeKind::Pod(_) => Style::default().fg(theme.tree_pod),
        NodeKind::Info(_) => Style::default()
            .fg(theme.tree_info)
            .add_modifier(Modifier::ITALIC),
    }
}

/// Render the tree, scrolled to `scroll`, highlighting the focused row
pub fn render_tree(
    f: &mut Frame,
    area: Rect,
    tree: &PodTree,
    scroll: usize,
    focused: bool,
    theme: &Theme,
) {
    let rows = tree.visible_rows();
    let current = tree.current_row();
    let height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = visible_window(&rows, scroll, height)
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let style = if scroll + offset == current {
                theme.table_selected_style()
            } else {
                row_style(&row.node.kind, theme)
            };
            Line::from(Span::styled(tree_row_text(row), style))
        })
        .collect();

    let block = Block::default()
        .title(" Pods ")
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
