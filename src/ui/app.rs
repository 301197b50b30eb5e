use crate::analytics::Analytics;
use crate::catalog::{Catalog, FilterQuery, ToolRecord, ALL_CATEGORIES};
use crate::export::{self, ExportFormat};
use crate::notify::{NotificationCenter, NotificationKind};
use crate::prefs::{PreferenceStore, DARK_MODE_KEY};
use crate::ratelimit::{Debouncer, Throttle};
use crate::scroll::ROW_HEIGHT;
use crate::share::{self, Clipboard, SharePayload, ShareTarget};
use crate::ui::config::Config;
use crate::ui::state::{reduce, UiEvent, ViewState};
use crate::ui::theme::Theme;
use crate::usage::UsageTracker;
use std::path::PathBuf;
use std::time::Instant;

pub struct App {
    pub catalog: Catalog,
    pub view: ViewState,
    pub selected_index: usize,
    pub search_mode: bool,
    /// What has been typed into the search box. The filter catches up once
    /// typing pauses.
    pub search_input: String,
    pub notifications: NotificationCenter,
    pub prefs: PreferenceStore,
    pub dark_mode: bool,
    pub should_quit: bool,
    pub page_visible: bool,
    pub frequent: Vec<String>,
    pub analytics: Analytics,
    pub clipboard: Clipboard,
    pub share_target: Option<Box<dyn ShareTarget>>,
    pub export_dir: PathBuf,
    search_debounce: Debouncer<String>,
    scroll_throttle: Throttle,
    /// The selection moved while the throttle window was closed.
    scroll_pending: bool,
}

impl App {
    pub fn new(catalog: Catalog, prefs: PreferenceStore, config: &Config) -> Self {
        let view = ViewState::initial(&catalog);
        let dark_mode = prefs.get::<bool>(DARK_MODE_KEY).unwrap_or(false);

        let mut app = Self {
            catalog,
            view,
            selected_index: 0,
            search_mode: false,
            search_input: String::new(),
            notifications: NotificationCenter::new(),
            prefs,
            dark_mode,
            should_quit: false,
            page_visible: true,
            frequent: Vec::new(),
            analytics: Analytics::disabled(),
            clipboard: Clipboard::unavailable(),
            share_target: None,
            export_dir: PathBuf::from("."),
            search_debounce: Debouncer::new(config.search_debounce()),
            scroll_throttle: Throttle::new(config.scroll_throttle()),
            scroll_pending: false,
        };
        app.refresh_frequent();
        app
    }

    pub fn theme(&self) -> &'static Theme {
        Theme::for_mode(self.dark_mode)
    }

    /// Run one event through the reducer and apply the result.
    pub fn dispatch(&mut self, event: UiEvent, now: Instant) {
        let query_before = self.view.query.clone();
        let transition = reduce(&self.view, &self.catalog, &event);
        self.view = transition.state;

        if self.view.query != query_before {
            self.selected_index = 0;
            self.scroll_pending = false;
        }
        if let Some(notice) = transition.notice {
            self.notifications.notify(notice.message, notice.kind, now);
        }
        self.clamp_selection();
    }

    /// Advance timers: run a debounced search that is due, catch the scroll
    /// state up with the selection and expire the notification.
    pub fn tick(&mut self, now: Instant) {
        if let Some(term) = self.search_debounce.poll(now) {
            self.dispatch(UiEvent::QueryChanged(term), now);
        }
        if self.scroll_pending && self.scroll_throttle.try_acquire(now) {
            self.scroll_pending = false;
            self.dispatch(UiEvent::ScrollPositionChanged(self.selection_offset()), now);
        }
        self.notifications.tick(now);
    }

    /// The earliest pending timer, used to size the input poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        let scroll = self
            .scroll_pending
            .then(|| self.scroll_throttle.reopens_at())
            .flatten();
        [
            self.search_debounce.deadline(),
            scroll,
            self.notifications.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn visible_tools(&self) -> Vec<&ToolRecord> {
        self.view
            .visible
            .iter()
            .filter_map(|id| self.catalog.tool(id))
            .collect()
    }

    pub fn selected_tool(&self) -> Option<&ToolRecord> {
        self.view
            .visible
            .ids()
            .get(self.selected_index)
            .and_then(|id| self.catalog.tool(id))
    }

    pub fn frequent_tools(&self) -> Vec<&ToolRecord> {
        self.frequent
            .iter()
            .filter_map(|id| self.catalog.tool(id))
            .collect()
    }

    /// The text term currently applied to the listing, if any.
    pub fn active_search_term(&self) -> Option<&str> {
        match &self.view.query {
            FilterQuery::Text { term } if !term.trim().is_empty() => Some(term.as_str()),
            _ => None,
        }
    }

    // -- Navigation --

    pub fn next(&mut self, now: Instant) {
        let count = self.view.visible.len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
            self.report_scroll(now);
        }
    }

    pub fn previous(&mut self, now: Instant) {
        let count = self.view.visible.len();
        if count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = count - 1;
            }
            self.report_scroll(now);
        }
    }

    pub fn back_to_top(&mut self, now: Instant) {
        self.selected_index = 0;
        self.scroll_pending = false;
        self.dispatch(UiEvent::ScrollPositionChanged(0), now);
    }

    /// Report the new position, or hold it for `tick` if the throttle
    /// window is closed.
    fn report_scroll(&mut self, now: Instant) {
        if self.scroll_throttle.try_acquire(now) {
            self.scroll_pending = false;
            self.dispatch(UiEvent::ScrollPositionChanged(self.selection_offset()), now);
        } else {
            self.scroll_pending = true;
        }
    }

    fn selection_offset(&self) -> u32 {
        u32::try_from(self.selected_index)
            .unwrap_or(u32::MAX)
            .saturating_mul(ROW_HEIGHT)
    }

    fn clamp_selection(&mut self) {
        let count = self.view.visible.len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    // -- Search --

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_push_char(&mut self, c: char, now: Instant) {
        self.search_input.push(c);
        self.search_debounce.call(self.search_input.clone(), now);
    }

    pub fn search_pop_char(&mut self, now: Instant) {
        self.search_input.pop();
        self.search_debounce.call(self.search_input.clone(), now);
    }

    /// Apply whatever is typed right away.
    pub fn submit_search(&mut self, now: Instant) {
        if let Some(term) = self.search_debounce.flush() {
            self.dispatch(UiEvent::QueryChanged(term), now);
        }
    }

    pub fn clear_search(&mut self, now: Instant) {
        self.search_input.clear();
        self.search_debounce.cancel();
        self.dispatch(UiEvent::QueryCleared, now);
    }

    // -- Categories --

    pub fn select_category(&mut self, key: &str, now: Instant) {
        self.search_input.clear();
        self.search_debounce.cancel();
        self.search_mode = false;
        self.dispatch(UiEvent::CategorySelected(key.to_string()), now);
        self.analytics.track_event("category", "select", key);
    }

    /// `0` selects all categories, `n` the n-th category in display order.
    pub fn select_category_by_number(&mut self, n: usize, now: Instant) {
        let key = if n == 0 {
            Some(ALL_CATEGORIES.to_string())
        } else {
            self.catalog
                .category_keys()
                .get(n - 1)
                .map(|k| k.to_string())
        };
        if let Some(key) = key {
            self.select_category(&key, now);
        }
    }

    // -- Tool actions --

    /// Open the selected tool: record usage and confirm.
    pub fn activate_selected(&mut self, now: Instant) {
        let Some(tool) = self.selected_tool().cloned() else {
            return;
        };

        if let Err(e) = UsageTracker::new(&mut self.prefs).record_usage(&tool.id) {
            log::warn!("Failed to record usage for {}: {}", tool.id, e);
        }
        self.refresh_frequent();
        self.analytics.track_event("tool", "open", &tool.id);
        self.notifications
            .notify(format!("Opened {}", tool.title), NotificationKind::Success, now);
    }

    pub fn copy_selected(&mut self, now: Instant) {
        let Some(tool) = self.selected_tool() else {
            return;
        };
        let text = tool.url.clone().unwrap_or_else(|| tool.title.clone());
        if let Err(e) =
            share::copy_to_clipboard(&mut self.clipboard, &text, &mut self.notifications, now)
        {
            log::debug!("Copy failed: {}", e);
        }
    }

    pub fn share_selected(&mut self, now: Instant) {
        let Some(tool) = self.selected_tool() else {
            return;
        };
        let payload = SharePayload {
            title: tool.title.clone(),
            text: tool.description.clone(),
            url: tool.url.clone().unwrap_or_else(|| tool.title.clone()),
        };
        if let Err(e) = share::share_content(
            self.share_target.as_deref_mut(),
            &mut self.clipboard,
            &payload,
            &mut self.notifications,
            now,
        ) {
            log::debug!("Share failed: {}", e);
        }
    }

    pub fn export_visible(&mut self, format: ExportFormat, now: Instant) {
        let result = {
            let tools = self.visible_tools();
            export::export_tools(&tools, &self.export_dir, "tools", format)
        };
        match result {
            Ok(path) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.notifications.notify(
                    format!("Downloaded {}", filename),
                    NotificationKind::Success,
                    now,
                );
            }
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.notifications
                    .notify("Export failed", NotificationKind::Error, now);
            }
        }
    }

    // -- Preferences and environment --

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = self.prefs.set(DARK_MODE_KEY, &self.dark_mode) {
            log::warn!("Failed to save preference: {}", e);
        }
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        if self.page_visible != visible {
            self.page_visible = visible;
            log::debug!("page {}", if visible { "visible" } else { "hidden" });
            if visible {
                self.analytics.track_page_view("tools");
            }
        }
    }

    pub fn set_online(&mut self, online: bool, now: Instant) {
        self.dispatch(UiEvent::ConnectivityChanged { online }, now);
    }

    fn refresh_frequent(&mut self) {
        self.frequent = UsageTracker::new(&mut self.prefs).frequent();
    }
}
