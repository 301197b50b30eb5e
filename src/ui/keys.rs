//! # Key Handling
//!
//! Maps terminal key presses onto [`App`] operations.
//!
//! ## Key Bindings
//!
//! ### Anywhere
//! - `Ctrl+k` - Focus search
//! - `Ctrl+c` - Quit
//!
//! ### Tool list
//! - `q` / `Q` - Quit
//! - `j` / `Down`, `k` / `Up` - Move selection
//! - `/` - Focus search
//! - `Esc` - Clear an applied search
//! - `0`-`9` - Show a category (`0` = all)
//! - `Enter` - Open the selected tool
//! - `g` / `Home` - Back to top
//! - `y` - Copy link, `s` - Share
//! - `e` - Export visible tools as JSON
//! - `t` - Toggle dark mode
//!
//! ### Search box
//! - Characters / `Backspace` - Edit the query
//! - `Enter` - Apply now and return to the list
//! - `Esc` - Clear the query, or leave search if already empty
//! - `Up` / `Down` - Move selection

use crate::export::ExportFormat;
use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if has_ctrl {
        match key.code {
            KeyCode::Char('k') => {
                app.enter_search_mode();
                return;
            }
            KeyCode::Char('c') => {
                app.should_quit = true;
                return;
            }
            _ => {}
        }
    }

    if app.search_mode {
        handle_search_key(app, key, has_ctrl, now);
    } else {
        handle_list_key(app, key, now);
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent, has_ctrl: bool, now: Instant) {
    match key.code {
        KeyCode::Esc => {
            if app.search_input.is_empty() {
                app.exit_search_mode();
            } else {
                app.clear_search(now);
            }
        }
        KeyCode::Enter => {
            app.submit_search(now);
            app.exit_search_mode();
        }
        KeyCode::Down => {
            app.next(now);
        }
        KeyCode::Up => {
            app.previous(now);
        }
        KeyCode::Backspace => {
            app.search_pop_char(now);
        }
        KeyCode::Char(c) if !has_ctrl => {
            app.search_push_char(c, now);
        }
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.enter_search_mode();
        }
        KeyCode::Esc => {
            if app.active_search_term().is_some() || !app.search_input.is_empty() {
                app.clear_search(now);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.next(now);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.previous(now);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.back_to_top(now);
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(n) = c.to_digit(10) {
                app.select_category_by_number(n as usize, now);
            }
        }
        KeyCode::Enter => {
            app.activate_selected(now);
        }
        KeyCode::Char('y') => {
            app.copy_selected(now);
        }
        KeyCode::Char('s') => {
            app.share_selected(now);
        }
        KeyCode::Char('e') => {
            app.export_visible(ExportFormat::Json, now);
        }
        KeyCode::Char('t') => {
            app.toggle_dark_mode();
        }
        _ => {}
    }
}
