//! # Usage Tracking Module
//!
//! This module tracks how often each tool is opened and ranks tools by
//! frequency, so the most used ones can be shown in a "Frequently Used"
//! panel.
//!
//! ## Storage
//!
//! Counts are kept in the preference store (see [`crate::prefs`]) under the
//! `toolUsageStats` key. Counts only grow; entries are never pruned.
//!
//! ## Data Format
//!
//! ```json
//! {
//!   "json-formatter": 42,
//!   "word-counter": 7
//! }
//! ```
//!
//! Key order is first-use order, which is also how ties are ranked.

mod storage;

pub use storage::{
    UsageStats, UsageTracker, FREQUENTLY_USED_TITLE, MAX_FREQUENT_TOOLS, USAGE_STATS_KEY,
};
