//! # View State
//!
//! The derived UI state and the pure function that advances it. [`reduce`]
//! takes the current state, the catalog and one input event and returns the
//! next state plus an optional notice for the notification center. It has
//! no side effects, so every interaction can be tested without a terminal.

use crate::catalog::{filter, Catalog, FilterQuery, VisibilitySet};
use crate::notify::NotificationKind;
use crate::scroll::ScrollFlags;

/// Input events the view reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    QueryChanged(String),
    QueryCleared,
    CategorySelected(String),
    ScrollPositionChanged(u32),
    ConnectivityChanged { online: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub query: FilterQuery,
    pub visible: VisibilitySet,
    pub no_results: bool,
    /// Category highlighted in the category bar. `None` while a text
    /// search is active.
    pub active_category: Option<String>,
    pub scroll_offset: u32,
    pub scroll: ScrollFlags,
    pub online: bool,
}

impl ViewState {
    /// Everything visible, scrolled to the top.
    pub fn initial(catalog: &Catalog) -> Self {
        let query = FilterQuery::all();
        let outcome = filter(&catalog.tools, &query);
        Self {
            query,
            visible: outcome.visible,
            no_results: outcome.no_results,
            active_category: None,
            scroll_offset: 0,
            scroll: ScrollFlags::default(),
            online: true,
        }
    }

    fn with_query(&self, catalog: &Catalog, query: FilterQuery) -> Self {
        let outcome = filter(&catalog.tools, &query);
        Self {
            query,
            visible: outcome.visible,
            no_results: outcome.no_results,
            ..self.clone()
        }
    }

    fn scrolled_to(self, offset: u32) -> Self {
        Self {
            scroll_offset: offset,
            scroll: ScrollFlags::at(offset),
            ..self
        }
    }
}

/// A message to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notice {
    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub notice: Option<Notice>,
}

impl Transition {
    fn quiet(state: ViewState) -> Self {
        Self {
            state,
            notice: None,
        }
    }
}

pub fn reduce(state: &ViewState, catalog: &Catalog, event: &UiEvent) -> Transition {
    match event {
        UiEvent::QueryChanged(term) => {
            Transition::quiet(searched(state, catalog, FilterQuery::text(term.clone())))
        }
        UiEvent::QueryCleared => Transition::quiet(searched(state, catalog, FilterQuery::text(""))),
        UiEvent::CategorySelected(key) => {
            let mut next = state.with_query(catalog, FilterQuery::category(key.clone()));
            next.active_category = Some(key.clone());
            let title = category_label(catalog, key);
            Transition {
                // Jump back to the top of the listing.
                state: next.scrolled_to(0),
                notice: Some(Notice::new(
                    format!("Showing {} tools", title),
                    NotificationKind::Info,
                )),
            }
        }
        UiEvent::ScrollPositionChanged(offset) => {
            Transition::quiet(state.clone().scrolled_to(*offset))
        }
        UiEvent::ConnectivityChanged { online } => {
            let next = ViewState {
                online: *online,
                ..state.clone()
            };
            let notice = match (state.online, *online) {
                (false, true) => Some(Notice::new(
                    "You are back online!",
                    NotificationKind::Success,
                )),
                (true, false) => Some(Notice::new(
                    "You are offline. Some features may not work.",
                    NotificationKind::Warning,
                )),
                _ => None,
            };
            Transition {
                state: next,
                notice,
            }
        }
    }
}

/// Apply a text search. A different query starts the listing from the top.
fn searched(state: &ViewState, catalog: &Catalog, query: FilterQuery) -> ViewState {
    let mut next = state.with_query(catalog, query);
    next.active_category = None;
    if next.query != state.query {
        next = next.scrolled_to(0);
    }
    next
}

fn category_label<'a>(catalog: &'a Catalog, key: &'a str) -> &'a str {
    if key == crate::catalog::ALL_CATEGORIES {
        "all"
    } else {
        catalog.category_title(key)
    }
}
