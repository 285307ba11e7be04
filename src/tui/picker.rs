//! Selection popups for contexts, namespaces and containers

use crate::actions::ActionKind;
use crate::cluster::PodRecord;

/// What a picker selection is used for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerKind {
    Context,
    Namespace,
    Container { pod: PodRecord, action: ActionKind },
}

/// Represents a single item in a picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    /// The text to display
    pub display_text: String,
    /// The value to use when this item is selected
    pub value: String,
}

impl PickerItem {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display_text: value.clone(),
            value,
        }
    }

    pub fn with_display(value: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
            value: value.into(),
        }
    }
}

/// State for managing picker interaction
#[derive(Debug, Clone)]
pub struct PickerState {
    pub kind: PickerKind,
    pub items: Vec<PickerItem>,
    pub selected_index: usize,
    /// Scroll offset for rendering
    pub scroll_offset: usize,
    pub title: String,
}

impl PickerState {
    pub fn new(kind: PickerKind, title: impl Into<String>, items: Vec<PickerItem>) -> Self {
        Self {
            kind,
            items,
            selected_index: 0,
            scroll_offset: 0,
            title: title.into(),
        }
    }

    /// Preselect the item with `value`, if present
    pub fn with_selected(mut self, value: Option<&str>) -> Self {
        if let Some(index) = value.and_then(|v| self.items.iter().position(|i| i.value == v)) {
            self.selected_index = index;
        }
        self
    }

    pub fn move_down(&mut self) {
        if self.selected_index < self.items.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected_item(&self) -> Option<&PickerItem> {
        self.items.get(self.selected_index)
    }

    pub fn selected_value(&self) -> Option<String> {
        self.selected_item().map(|item| item.value.clone())
    }

    /// Update scroll offset to ensure selected item is visible
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }
}
