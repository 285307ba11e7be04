//! Centralized keybindings
//!
//! Single source of truth for the footer hints and the help text.

/// Key with a human-readable label
#[derive(Debug, Clone)]
pub struct NavigationCommand {
    pub key: &'static str,
    pub label: &'static str,
}

impl NavigationCommand {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Commands available while the tree or output pane is focused
pub fn get_navigation_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("↑↓", "Navigate"),
        NavigationCommand::new("Enter", "Open"),
        NavigationCommand::new("l", "Logs"),
        NavigationCommand::new("t", "Tail"),
        NavigationCommand::new("e", "Exec"),
        NavigationCommand::new("E", "Exec cmd"),
        NavigationCommand::new("i", "Describe"),
        NavigationCommand::new("y", "YAML"),
        NavigationCommand::new("h", "Metrics"),
        NavigationCommand::new("n", "Namespace"),
        NavigationCommand::new("c", "Context"),
        NavigationCommand::new("s", "Search"),
        NavigationCommand::new("r", "Refresh"),
        NavigationCommand::new("o", "Output"),
        NavigationCommand::new("q", "Quit"),
    ]
}

/// Hints shown while typing in the search field
pub fn get_search_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("Enter", "Refresh"),
        NavigationCommand::new("Esc", "Done"),
        NavigationCommand::new("Backspace", "Delete"),
    ]
}

/// Hints shown while a picker or prompt is open
pub fn get_popup_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("↑↓", "Move"),
        NavigationCommand::new("Enter", "Select"),
        NavigationCommand::new("Esc", "Cancel"),
    ]
}
