use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Catalog shipped with the binary, used when no `--catalog` file is given.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// A single entry in the tool listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Link used by copy and share. Optional in catalog files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Display name for a category key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub title: String,
}

/// The full, fixed set of tools and their categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    pub tools: Vec<ToolRecord>,
}

impl Catalog {
    /// Build a catalog from already-loaded parts, rejecting duplicate ids.
    pub fn new(categories: Vec<Category>, tools: Vec<ToolRecord>) -> Result<Self> {
        let catalog = Self { categories, tools };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("Failed to parse built-in catalog")
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(content).context("Invalid catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for tool in &self.tools {
            if tool.id.trim().is_empty() {
                bail!("Tool '{}' has an empty id", tool.title);
            }
            if !seen.insert(tool.id.as_str()) {
                bail!("Duplicate tool id: {}", tool.id);
            }
        }
        Ok(())
    }

    pub fn tool(&self, id: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Human-readable title for a category key, falling back to the key.
    pub fn category_title<'a>(&'a self, key: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.title.as_str())
            .unwrap_or(key)
    }

    /// Category keys in display order: declared categories first, then any
    /// key only seen on a tool, in first-seen order.
    pub fn category_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.categories.iter().map(|c| c.key.as_str()).collect();
        for tool in &self.tools {
            if !keys.contains(&tool.category.as_str()) {
                keys.push(tool.category.as_str());
            }
        }
        keys
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
