//! # Catalog Module
//!
//! The fixed list of tools shown by tooldeck, and the filter that decides
//! which of them are visible.
//!
//! ## Catalog Format
//!
//! ```json
//! {
//!   "categories": [{ "key": "text", "title": "Text Tools" }],
//!   "tools": [
//!     {
//!       "id": "word-counter",
//!       "title": "Word Counter",
//!       "description": "Count words and characters",
//!       "category": "text",
//!       "url": "https://example.com/word-counter"
//!     }
//!   ]
//! }
//! ```
//!
//! Tool ids must be unique; loading fails otherwise.

pub mod filter;
pub mod record;

pub use filter::{filter, FilterOutcome, FilterQuery, VisibilitySet, ALL_CATEGORIES};
pub use record::{Catalog, Category, ToolRecord};
