//! Common helper functions for view rendering

use ratatui::layout::Rect;

/// Rectangle of `width` x `height` centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
    let popup_y = area
        .y
        .saturating_add(area.height.saturating_sub(height) / 2);

    Rect {
        x: popup_x,
        y: popup_y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Items that fit in a viewport starting at `scroll`
pub fn visible_window<T>(items: &[T], scroll: usize, height: usize) -> &[T] {
    let start = scroll.min(items.len());
    let end = (start + height).min(items.len());
    &items[start..end]
}
