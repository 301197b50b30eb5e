//! Keyboard event handling tests
//!
//! Tests for keyboard input handling including quit keys, search mode,
//! category shortcuts and navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tooldeck::catalog::{Catalog, Category, ToolRecord};
use tooldeck::prefs::PreferenceStore;
use tooldeck::ui::config::Config;
use tooldeck::ui::keys::handle_key;
use tooldeck::ui::App;

/// Helper to create a key event
fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Helper to create a test app with a small catalog
fn create_test_app() -> App {
    let tool = |id: &str, title: &str, category: &str| ToolRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} tool", title),
        category: category.to_string(),
        url: None,
    };
    let catalog = Catalog::new(
        vec![
            Category {
                key: "text".to_string(),
                title: "Text Tools".to_string(),
            },
            Category {
                key: "generators".to_string(),
                title: "Generators".to_string(),
            },
        ],
        vec![
            tool("word-counter", "Word Counter", "text"),
            tool("lorem-ipsum", "Lorem Ipsum", "generators"),
            tool("password-generator", "Password Generator", "generators"),
        ],
    )
    .unwrap();
    App::new(catalog, PreferenceStore::in_memory(), &Config::default())
}

fn type_str(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)), now);
    }
}

#[tokio::test]
async fn test_quit_with_q_key() {
    let mut app = create_test_app();
    assert!(!app.should_quit);

    handle_key(&mut app, key(KeyCode::Char('q')), Instant::now());
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_quit_with_uppercase_q() {
    let mut app = create_test_app();

    handle_key(&mut app, key(KeyCode::Char('Q')), Instant::now());
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_ctrl_c_quits_from_search() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    handle_key(&mut app, ctrl('c'), now);
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_key_release_is_ignored() {
    let mut app = create_test_app();

    let release = KeyEvent::new_with_kind(
        KeyCode::Char('q'),
        KeyModifiers::empty(),
        KeyEventKind::Release,
    );
    handle_key(&mut app, release, Instant::now());
    assert!(!app.should_quit);
}

#[tokio::test]
async fn test_slash_enters_search_mode() {
    let mut app = create_test_app();
    assert!(!app.search_mode);

    handle_key(&mut app, key(KeyCode::Char('/')), Instant::now());
    assert!(app.search_mode);
}

#[tokio::test]
async fn test_ctrl_k_focuses_search() {
    let mut app = create_test_app();

    handle_key(&mut app, ctrl('k'), Instant::now());
    assert!(app.search_mode);
    assert!(app.search_input.is_empty());
}

#[tokio::test]
async fn test_q_in_search_mode_types() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    handle_key(&mut app, key(KeyCode::Char('q')), now);

    assert!(!app.should_quit);
    assert_eq!(app.search_input, "q");
}

#[tokio::test]
async fn test_typing_filters_after_pause() {
    let mut app = create_test_app();
    let t0 = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), t0);
    type_str(&mut app, "gen", t0);
    assert_eq!(app.view.visible.len(), 3);

    app.tick(t0 + Duration::from_millis(150));
    assert_eq!(app.view.visible.len(), 2);
    assert!(app.search_mode);
}

#[tokio::test]
async fn test_backspace_in_search() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    type_str(&mut app, "ab", now);
    handle_key(&mut app, key(KeyCode::Backspace), now);

    assert_eq!(app.search_input, "a");
}

#[tokio::test]
async fn test_enter_applies_search_and_leaves_search_mode() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    type_str(&mut app, "lorem", now);
    handle_key(&mut app, key(KeyCode::Enter), now);

    assert!(!app.search_mode);
    assert_eq!(app.view.visible.ids(), ["lorem-ipsum".to_string()]);
    assert_eq!(app.active_search_term(), Some("lorem"));
}

#[tokio::test]
async fn test_esc_clears_then_exits_search() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    type_str(&mut app, "zzz", now);
    app.tick(now + Duration::from_millis(150));
    assert!(app.view.no_results);

    // First Esc clears the query and keeps the search box focused
    handle_key(&mut app, key(KeyCode::Esc), now);
    assert!(app.search_mode);
    assert!(app.search_input.is_empty());
    assert!(!app.view.no_results);
    assert_eq!(app.view.visible.len(), 3);

    // Second Esc leaves search mode
    handle_key(&mut app, key(KeyCode::Esc), now);
    assert!(!app.search_mode);
}

#[tokio::test]
async fn test_esc_in_list_clears_applied_search() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    type_str(&mut app, "word", now);
    handle_key(&mut app, key(KeyCode::Enter), now);
    assert_eq!(app.view.visible.len(), 1);

    handle_key(&mut app, key(KeyCode::Esc), now);
    assert_eq!(app.view.visible.len(), 3);
    assert_eq!(app.active_search_term(), None);
}

#[tokio::test]
async fn test_navigation_keys() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('j')), now);
    assert_eq!(app.selected_index, 1);
    handle_key(&mut app, key(KeyCode::Down), now);
    assert_eq!(app.selected_index, 2);
    handle_key(&mut app, key(KeyCode::Down), now);
    assert_eq!(app.selected_index, 0);
    handle_key(&mut app, key(KeyCode::Char('k')), now);
    assert_eq!(app.selected_index, 2);
    handle_key(&mut app, key(KeyCode::Up), now);
    assert_eq!(app.selected_index, 1);
}

#[tokio::test]
async fn test_navigation_in_search_mode() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    handle_key(&mut app, key(KeyCode::Down), now);
    assert_eq!(app.selected_index, 1);
    handle_key(&mut app, key(KeyCode::Up), now);
    assert_eq!(app.selected_index, 0);
    assert!(app.search_input.is_empty());
}

#[tokio::test]
async fn test_g_goes_back_to_top() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('j')), now);
    handle_key(&mut app, key(KeyCode::Char('j')), now);
    handle_key(&mut app, key(KeyCode::Char('g')), now);

    assert_eq!(app.selected_index, 0);
    assert_eq!(app.view.scroll_offset, 0);
}

#[tokio::test]
async fn test_digit_selects_category() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('2')), now);
    assert_eq!(app.view.active_category.as_deref(), Some("generators"));
    assert_eq!(app.view.visible.len(), 2);
    assert_eq!(
        app.notifications.current().map(|n| n.message.as_str()),
        Some("Showing Generators tools")
    );

    handle_key(&mut app, key(KeyCode::Char('0')), now);
    assert_eq!(app.view.visible.len(), 3);
}

#[tokio::test]
async fn test_digit_in_search_mode_types() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('/')), now);
    handle_key(&mut app, key(KeyCode::Char('1')), now);

    assert_eq!(app.search_input, "1");
    assert_eq!(app.view.active_category, None);
}

#[tokio::test]
async fn test_enter_activates_tool() {
    let mut app = create_test_app();
    let now = Instant::now();

    handle_key(&mut app, key(KeyCode::Char('j')), now);
    handle_key(&mut app, key(KeyCode::Enter), now);

    assert_eq!(app.frequent, vec!["lorem-ipsum".to_string()]);
    assert_eq!(
        app.notifications.current().map(|n| n.message.as_str()),
        Some("Opened Lorem Ipsum")
    );
}

#[tokio::test]
async fn test_t_toggles_dark_mode() {
    let mut app = create_test_app();
    assert!(!app.dark_mode);

    handle_key(&mut app, key(KeyCode::Char('t')), Instant::now());
    assert!(app.dark_mode);
    assert_eq!(app.prefs.get::<bool>("darkMode"), Some(true));

    handle_key(&mut app, key(KeyCode::Char('t')), Instant::now());
    assert!(!app.dark_mode);
    assert_eq!(app.prefs.get::<bool>("darkMode"), Some(false));
}

#[tokio::test]
async fn test_y_without_clipboard_reports_failure() {
    let mut app = create_test_app();

    handle_key(&mut app, key(KeyCode::Char('y')), Instant::now());
    assert_eq!(
        app.notifications.current().map(|n| n.message.as_str()),
        Some("Failed to copy")
    );
}
