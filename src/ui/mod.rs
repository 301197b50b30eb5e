//! # UI Module
//!
//! This module provides the terminal user interface components for tooldeck.
//!
//! ## Components
//!
//! - [`state`] - Pure view state and the event reducer
//! - [`App`] - Adapter that applies reducer output, drives timers, and talks
//!   to the preference store, clipboard and analytics
//! - [`keys`] - Key bindings
//! - [`mod@render`] - Rendering functions for drawing the TUI
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              Header (shrinks on scroll)         │
//! ├─────────────────────────────────────────────────┤
//! │ Search: ...            [0] All [1] Calculators  │
//! ├─────────────────────┬───────────────────────────┤
//! │                     │      Details Panel        │
//! │   Tool List         ├───────────────────────────┤
//! │                     │   ⭐ Frequently Used      │
//! ├─────────────────────┴───────────────────────────┤
//! │                    Footer                       │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Notifications are drawn as a toast in the top-right corner.

pub mod app;
pub mod config;
pub mod keys;
pub mod render;
pub mod state;
pub mod theme;

pub use app::App;
pub use render::render;
