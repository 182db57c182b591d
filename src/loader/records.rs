//! Parsing of scraped record feeds (a JSON array, or one JSON object per line).

use crate::loader::error::{LoadError, ParseError};
use log::{debug, info};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// One scraped entity: a flat JSON object whose keys keep their document order.
pub type Record = Map<String, Value>;

/// Layout of a record feed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFormat {
    /// A single JSON array of objects, e.g. `[{"name": "..."}, {"name": "..."}]`.
    Json,
    /// One JSON object per line, blank lines ignored.
    JsonLines,
}

impl RecordFormat {
    /// Picks the format from the file extension: `.jl` and `.jsonl` are JSON Lines,
    /// everything else is treated as a JSON array.
    ///
    /// ```
    /// use std::path::Path;
    /// use trip_planner::RecordFormat;
    ///
    /// assert_eq!(RecordFormat::from_path(Path::new("hotels.json")), RecordFormat::Json);
    /// assert_eq!(RecordFormat::from_path(Path::new("hotels.jl")), RecordFormat::JsonLines);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("jl") | Some("jsonl") => RecordFormat::JsonLines,
            _ => RecordFormat::Json,
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::Json => write!(f, "json"),
            RecordFormat::JsonLines => write!(f, "json lines"),
        }
    }
}

/// Decodes `text` into records. The content is only ever decoded as JSON.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not valid JSON, if a JSON document is not
/// an array, or if any element is not an object.
pub fn parse_records(text: &str, format: RecordFormat) -> Result<Vec<Record>, ParseError> {
    match format {
        RecordFormat::Json => {
            let value: Value = serde_json::from_str(text)?;
            let Value::Array(items) = value else {
                return Err(ParseError::NotAnArray);
            };
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| into_record(item, index))
                .collect()
        }
        RecordFormat::JsonLines => text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .enumerate()
            .map(|(index, (line_idx, line))| {
                let value: Value =
                    serde_json::from_str(line).map_err(|source| ParseError::JsonLine {
                        line: line_idx + 1,
                        source,
                    })?;
                into_record(value, index)
            })
            .collect(),
    }
}

fn into_record(value: Value, index: usize) -> Result<Record, ParseError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ParseError::NotAnObject { index }),
    }
}

/// Reads and decodes a record feed, choosing the format from the file extension.
///
/// # Errors
///
/// * [`LoadError::Read`] if the file cannot be read as UTF-8 text.
/// * [`LoadError::Parse`] if its content is not a valid record sequence.
pub fn read_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let format = RecordFormat::from_path(path);
    info!("Reading {} records from {}", format, path.display());

    let text =
        std::fs::read_to_string(path).map_err(|e| LoadError::Read(path.to_path_buf(), e))?;
    let records = parse_records(&text, format).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Decoded {} records from {}", records.len(), path.display());
    Ok(records)
}
