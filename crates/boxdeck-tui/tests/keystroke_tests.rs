//! Integration tests that exercise App key handling via send_key()

mod helpers;

use boxdeck_core::{Deferred, LifecycleVerb, OutputMode};
use crossterm::event::{KeyCode, KeyModifiers};
use helpers::app_with_sessions;

fn press(app: &mut boxdeck_tui::App, code: KeyCode) -> Deferred {
    app.send_key(code, KeyModifiers::NONE)
}

fn args(deferred: &Deferred) -> Vec<String> {
    deferred.process().expect("expected a process").args.clone()
}

// ---------------------------------------------------------------------------
// Navigation tests
// ---------------------------------------------------------------------------

/// Rows are sorted by name, so the first row is "alpha"
#[test]
fn test_rows_sorted_by_name() {
    let app = app_with_sessions(&["zeta", "alpha", "mid"]);
    let names: Vec<_> = app.sessions.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    assert_eq!(app.selected_session().unwrap().name(), "alpha");
}

/// Pressing 'j' twice moves the selection down by two
#[test]
fn test_j_moves_selection_down() {
    let mut app = app_with_sessions(&["a", "b", "c"]);

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.selected, 1);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected, 2);
}

/// Moving past either end wraps around
#[test]
fn test_selection_wraps() {
    let mut app = app_with_sessions(&["a", "b", "c"]);

    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.selected, 2, "k at position 0 should wrap to last item");

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.selected, 0);

    press(&mut app, KeyCode::Up);
    assert_eq!(app.selected, 2);
}

/// g and G jump to the first and last rows
#[test]
fn test_jump_first_last() {
    let mut app = app_with_sessions(&["a", "b", "c", "d"]);

    press(&mut app, KeyCode::Char('G'));
    assert_eq!(app.selected, 3);
    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.selected, 0);
}

/// Right/Left move whole pages and stop at the ends
#[test]
fn test_paging() {
    let mut app = app_with_sessions(&["a", "b", "c", "d", "e", "f", "g"]);
    assert_eq!(app.pages(), 2);
    assert_eq!(app.page(), 0);

    press(&mut app, KeyCode::Right);
    assert_eq!(app.page(), 1);
    assert_eq!(app.selected, 5);
    assert_eq!(app.page_sessions().len(), 2);
    assert_eq!(app.table_state.selected(), Some(0));

    press(&mut app, KeyCode::Right);
    assert_eq!(app.page(), 1, "no page after the last");

    press(&mut app, KeyCode::Left);
    assert_eq!(app.page(), 0);
    assert_eq!(app.selected, 0);

    press(&mut app, KeyCode::Left);
    assert_eq!(app.selected, 0);
}

/// Moving down across a page boundary follows onto the next page
#[test]
fn test_row_navigation_crosses_pages() {
    let mut app = app_with_sessions(&["a", "b", "c", "d", "e", "f"]);
    for _ in 0..5 {
        press(&mut app, KeyCode::Char('j'));
    }
    assert_eq!(app.page(), 1);
    assert_eq!(app.selected_session().unwrap().name(), "f");
    assert_eq!(app.table_state.selected(), Some(0));
}

// ---------------------------------------------------------------------------
// Lifecycle keys
// ---------------------------------------------------------------------------

/// Enter hands the terminal to `distrobox enter <name>`
#[test]
fn test_enter_suspends_for_selected() {
    let mut app = app_with_sessions(&["devbox", "work"]);
    press(&mut app, KeyCode::Char('j'));

    let deferred = press(&mut app, KeyCode::Enter);
    let Deferred::SuspendForProcess(spec) = &deferred else {
        panic!("expected SuspendForProcess, got {:?}", deferred);
    };
    assert_eq!(spec.verb, LifecycleVerb::Enter);
    assert_eq!(spec.output, OutputMode::Inherit);
    assert_eq!(args(&deferred), vec!["enter", "work"]);
}

/// S stops the selected session in the background
#[test]
fn test_s_stops_selected() {
    let mut app = app_with_sessions(&["devbox"]);

    let deferred = press(&mut app, KeyCode::Char('S'));
    assert!(matches!(deferred, Deferred::RunDetached(_)));
    assert_eq!(args(&deferred), vec!["stop", "devbox", "--yes"]);
}

/// X and Delete both remove with --force
#[test]
fn test_x_and_delete_remove_selected() {
    let mut app = app_with_sessions(&["devbox"]);

    for code in [KeyCode::Char('X'), KeyCode::Delete] {
        let deferred = press(&mut app, code);
        assert!(matches!(deferred, Deferred::RunDetached(_)));
        assert_eq!(args(&deferred), vec!["rm", "devbox", "--force"]);
    }
}

/// R and F5 request a refresh
#[test]
fn test_refresh_keys() {
    let mut app = app_with_sessions(&["devbox"]);
    assert_eq!(press(&mut app, KeyCode::Char('R')), Deferred::Refresh);
    assert_eq!(press(&mut app, KeyCode::F(5)), Deferred::Refresh);
}

/// Action keys without any session do nothing
#[test]
fn test_actions_on_empty_table() {
    let mut app = app_with_sessions(&[]);

    for code in [KeyCode::Enter, KeyCode::Char('S'), KeyCode::Char('X'), KeyCode::Char('j')] {
        assert_eq!(press(&mut app, code), Deferred::Continue);
    }
    assert_eq!(app.selected, 0);
    assert_eq!(app.table_state.selected(), None);
}

/// Lowercase action letters are not bound
#[test]
fn test_lowercase_actions_unbound() {
    let mut app = app_with_sessions(&["devbox"]);
    assert_eq!(press(&mut app, KeyCode::Char('s')), Deferred::Continue);
    assert_eq!(press(&mut app, KeyCode::Char('x')), Deferred::Continue);
}

// ---------------------------------------------------------------------------
// Help and quit
// ---------------------------------------------------------------------------

/// '?' opens help; the next key only closes it
#[test]
fn test_help_toggle_swallows_key() {
    let mut app = app_with_sessions(&["a", "b"]);

    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);

    assert_eq!(press(&mut app, KeyCode::Char('j')), Deferred::Continue);
    assert!(!app.show_help);
    assert_eq!(app.selected, 0);
}

#[test]
fn test_quit_keys() {
    for code in [KeyCode::Char('q'), KeyCode::Char('Q')] {
        let mut app = app_with_sessions(&["a"]);
        press(&mut app, code);
        assert!(app.should_quit);
    }

    let mut app = app_with_sessions(&["a"]);
    app.send_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
}
