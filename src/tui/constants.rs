//! Constants used throughout the TUI module

/// Header height including borders
pub const HEADER_HEIGHT: u16 = 3;

/// Footer height including borders
pub const FOOTER_HEIGHT: u16 = 3;

/// Share of the body width given to the tree panel
pub const TREE_PANEL_PERCENT: u16 = 40;

/// Input poll interval of the main loop
pub const INPUT_POLL_MS: u64 = 100;

/// Lines moved by PageUp/PageDown in the output pane
pub const OUTPUT_PAGE_LINES: usize = 10;

/// Maximum picker rows before the popup scrolls
pub const MAX_PICKER_ROWS: u16 = 15;
