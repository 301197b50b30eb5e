//! ToolDeck - A terminal browser for a categorized catalog of tools
//!
//! This library provides the core functionality for filtering the catalog,
//! persisting preferences and usage counts, rate-limiting UI events, and the
//! notification, clipboard and export helpers the TUI is built on.

pub mod analytics;
pub mod catalog;
pub mod export;
pub mod notify;
pub mod prefs;
pub mod ratelimit;
pub mod scroll;
pub mod share;
pub mod ui;
pub mod usage;
