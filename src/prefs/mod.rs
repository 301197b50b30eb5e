//! # Preferences Module
//!
//! Typed get/set over a local string key-value store, with values stored as
//! JSON text. Reads never fail the caller: a missing or corrupted entry
//! reads as `None`. Writes report [`PrefError::StorageUnavailable`] when the
//! backend refuses them.
//!
//! ## Storage Location
//!
//! The default backend writes a single JSON object to the XDG data
//! directory:
//!
//! ```text
//! ~/.local/share/tooldeck/prefs.json
//! ```
//!
//! ```json
//! {
//!   "darkMode": "true",
//!   "toolUsageStats": "{\"word-counter\":3,\"unit-converter\":1}"
//! }
//! ```

mod backend;
mod store;

pub use backend::{data_dir, FileBackend, KeyValueBackend, MemoryBackend, PREFS_FILE_NAME};
pub use store::{PrefError, PreferenceStore};

/// Preference key for the dark mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";
