//! # Export
//!
//! Writes tool records to a file as JSON, CSV or plain text.
//!
//! CSV columns come from the record's field names. Values containing a
//! comma, quote or line break are quoted.

use crate::catalog::ToolRecord;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

/// Render `records` in the given format.
pub fn render(records: &[&ToolRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(records).context("Failed to serialize tools as JSON")
        }
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Txt => Ok(to_text(records)),
    }
}

/// Write `records` to `<dir>/<name>.<ext>` and return the full path.
pub fn export_tools(
    records: &[&ToolRecord],
    dir: &Path,
    name: &str,
    format: ExportFormat,
) -> Result<PathBuf> {
    let content = render(records, format)?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(format!("{}.{}", name, format.extension()));
    fs::write(&path, content)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    log::info!("Exported {} tools to {}", records.len(), path.display());
    Ok(path)
}

/// CSV with a header row taken from the first record's fields.
pub fn to_csv(records: &[&ToolRecord]) -> Result<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let header_value = serde_json::to_value(first).context("Failed to serialize tool record")?;
    let headers: Vec<String> = header_value
        .as_object()
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();

    let mut lines = vec![headers
        .iter()
        .map(|h| csv_field(h))
        .collect::<Vec<_>>()
        .join(",")];

    for record in records {
        let value = serde_json::to_value(record).context("Failed to serialize tool record")?;
        let row: Vec<String> = headers
            .iter()
            .map(|h| match value.get(h) {
                Some(serde_json::Value::String(s)) => csv_field(s),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => csv_field(&other.to_string()),
            })
            .collect();
        lines.push(row.join(","));
    }

    Ok(lines.join("\n"))
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn to_text(records: &[&ToolRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} [{}]: {}", r.title, r.category, r.description))
        .collect::<Vec<_>>()
        .join("\n")
}
