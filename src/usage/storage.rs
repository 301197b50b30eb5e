//! # Usage Storage
//!
//! Counts how often each tool is activated and ranks tools by frequency.
//! Counts live in the preference store under [`USAGE_STATS_KEY`] as one JSON
//! object, in the order tools were first used.

use crate::prefs::{PrefError, PreferenceStore};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Preference key holding the usage map.
pub const USAGE_STATS_KEY: &str = "toolUsageStats";

/// Default number of tools returned by [`UsageTracker::top_used`].
pub const MAX_FREQUENT_TOOLS: usize = 5;

/// Reserved panel title for frequently used tools
pub const FREQUENTLY_USED_TITLE: &str = "⭐ Frequently Used";

/// Tool id -> activation count, kept in first-use order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageStats {
    entries: Vec<(String, u64)>,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `tool_id`, inserting it at 0 first if absent.
    /// Returns the new count.
    pub fn record(&mut self, tool_id: &str) -> u64 {
        if let Some((_, count)) = self.entries.iter_mut().find(|(id, _)| id == tool_id) {
            *count += 1;
            return *count;
        }
        self.entries.push((tool_id.to_string(), 1));
        1
    }

    pub fn count(&self, tool_id: &str) -> u64 {
        self.entries
            .iter()
            .find(|(id, _)| id == tool_id)
            .map_or(0, |(_, count)| *count)
    }

    /// The `limit` most used ids, highest count first. Equal counts keep
    /// first-use order.
    pub fn top(&self, limit: usize) -> Vec<&str> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        // sort_by is stable, which is what makes ties resolve by insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(limit)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

impl Serialize for UsageStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, count) in &self.entries {
            map.serialize_entry(id, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UsageStats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatsVisitor;

        impl<'de> Visitor<'de> for StatsVisitor {
            type Value = UsageStats;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of tool ids to usage counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<UsageStats, A::Error> {
                let mut stats = UsageStats::new();
                while let Some((id, count)) = access.next_entry::<String, u64>()? {
                    // A repeated key in hand-edited JSON keeps its first position.
                    match stats.entries.iter_mut().find(|(existing, _)| *existing == id) {
                        Some(entry) => entry.1 = count,
                        None => stats.entries.push((id, count)),
                    }
                }
                Ok(stats)
            }
        }

        deserializer.deserialize_map(StatsVisitor)
    }
}

/// Records and ranks tool usage through a preference store.
///
/// Every operation reads the stats fresh from the store, so two trackers
/// over the same store never disagree.
pub struct UsageTracker<'a> {
    store: &'a mut PreferenceStore,
}

impl<'a> UsageTracker<'a> {
    pub fn new(store: &'a mut PreferenceStore) -> Self {
        Self { store }
    }

    /// Current stats; empty when nothing is stored or the entry is corrupted.
    pub fn stats(&self) -> UsageStats {
        self.store.get(USAGE_STATS_KEY).unwrap_or_default()
    }

    /// Record one activation of `tool_id` and persist the full map.
    pub fn record_usage(&mut self, tool_id: &str) -> Result<u64, PrefError> {
        let mut stats = self.stats();
        let count = stats.record(tool_id);
        self.store.set(USAGE_STATS_KEY, &stats)?;
        Ok(count)
    }

    /// Up to `limit` tool ids, most used first.
    pub fn top_used(&self, limit: usize) -> Vec<String> {
        self.stats()
            .top(limit)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// [`top_used`](Self::top_used) with the default limit of five.
    pub fn frequent(&self) -> Vec<String> {
        self.top_used(MAX_FREQUENT_TOOLS)
    }

    pub fn has_usage_data(&self) -> bool {
        !self.stats().is_empty()
    }
}
