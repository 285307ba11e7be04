//! Snapshot tests for TUI rendering
//!
//! These tests use insta to capture and compare the rendered output of the TUI views.
//! Run `cargo insta review` to review and accept snapshot changes.

use chrono::{Local, TimeZone};
use insta::assert_snapshot;
use podminator::cluster::PodRecord;
use podminator::tree::{ExpansionState, PodTree, reconcile};
use podminator::tui::Theme;
use podminator::tui::app::state::{InputMode, OutputPane};
use podminator::tui::views::{HeaderInfo, render_footer, render_header, render_output, render_tree};
use ratatui::{Terminal, backend::TestBackend};
use std::collections::BTreeMap;
use std::time::Duration;

/// Create a test theme
fn create_test_theme() -> Theme {
    Theme::default()
}

/// Namespace `a` expanded with two pods, `b` collapsed with one
fn create_test_tree() -> PodTree {
    let mut fetched = BTreeMap::new();
    fetched.insert(
        "a".to_string(),
        vec![PodRecord::new("a", "web-1"), PodRecord::new("a", "web-2")],
    );
    fetched.insert("b".to_string(), vec![PodRecord::new("b", "api-0")]);

    let mut expansion = ExpansionState::default();
    expansion.set("a", true);
    reconcile(&PodTree::default(), &fetched, &mut expansion, None).tree
}

#[test]
fn test_tree_placeholder() {
    let backend = TestBackend::new(46, 4);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();

    terminal
        .draw(|f| render_tree(f, f.area(), &PodTree::default(), 0, true, &theme))
        .unwrap();

    assert_snapshot!("tree_placeholder", terminal.backend());
}

#[test]
fn test_tree_with_pods() {
    let backend = TestBackend::new(24, 8);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();
    let tree = create_test_tree();

    terminal
        .draw(|f| render_tree(f, f.area(), &tree, 0, true, &theme))
        .unwrap();

    assert_snapshot!("tree_with_pods", terminal.backend());
}

#[test]
fn test_tree_scrolled() {
    // Three inner rows starting at row 2 of six
    let backend = TestBackend::new(24, 5);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();
    let tree = create_test_tree();

    terminal
        .draw(|f| render_tree(f, f.area(), &tree, 2, false, &theme))
        .unwrap();

    assert_snapshot!("tree_scrolled", terminal.backend());
}

#[test]
fn test_output_empty() {
    let backend = TestBackend::new(42, 3);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();

    terminal
        .draw(|f| render_output(f, f.area(), &OutputPane::default(), false, &theme))
        .unwrap();

    assert_snapshot!("output_empty", terminal.backend());
}

#[test]
fn test_output_scrolled() {
    let backend = TestBackend::new(24, 4);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();
    let mut pane = OutputPane::default();
    pane.set(
        "a/web-1",
        vec![
            "line one".to_string(),
            "line two".to_string(),
            "line three".to_string(),
        ],
    );
    pane.scroll_down(1, 2);

    terminal
        .draw(|f| render_output(f, f.area(), &pane, true, &theme))
        .unwrap();

    assert_snapshot!("output_scrolled", terminal.backend());
}

#[test]
fn test_header() {
    let backend = TestBackend::new(80, 3);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();
    let info = HeaderInfo {
        context: Some("dev"),
        connecting: None,
        namespace: Some("all"),
        search: "web",
        metrics_available: true,
        use_new_terminal: false,
        refresh_interval: Duration::from_secs(60),
        last_refreshed: Local.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).single(),
    };

    terminal
        .draw(|f| render_header(f, f.area(), &info, &theme))
        .unwrap();

    assert_snapshot!("header", terminal.backend());
}

#[test]
fn test_footer_status_message() {
    let backend = TestBackend::new(40, 3);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();
    let status = ("Loaded 3 pods".to_string(), false);

    terminal
        .draw(|f| {
            render_footer(
                f,
                f.area(),
                InputMode::Normal,
                false,
                "",
                Some(&status),
                &theme,
            )
        })
        .unwrap();

    assert_snapshot!("footer_status_message", terminal.backend());
}

#[test]
fn test_footer_search() {
    let backend = TestBackend::new(60, 3);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = create_test_theme();

    terminal
        .draw(|f| render_footer(f, f.area(), InputMode::Search, false, "web", None, &theme))
        .unwrap();

    assert_snapshot!("footer_search", terminal.backend());
}
