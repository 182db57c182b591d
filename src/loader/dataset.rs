//! Contains the `Dataset` wrapper that turns scraped records into a Polars `DataFrame`
//! and moves it to and from delimited text.

use crate::layout::ensure_parent_dir;
use crate::loader::error::LoadError;
use crate::loader::records::Record;
use log::{debug, info};
use polars::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column type picked for a key after looking at every record that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    fn of(value: &Value) -> Option<ColumnKind> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ColumnKind::Boolean),
            Value::Number(n) if n.is_i64() => Some(ColumnKind::Integer),
            Value::Number(_) => Some(ColumnKind::Float),
            _ => Some(ColumnKind::Text),
        }
    }

    fn widen(self, other: ColumnKind) -> ColumnKind {
        use ColumnKind::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Text,
        }
    }
}

/// An in-memory table built once per run from a single input source.
///
/// Rows follow the input order; columns are the union of all record keys in the
/// order they were first seen. Keys absent from a record are nulls in that row.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl Dataset {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Builds a dataset with one row per record and one column per distinct key.
    ///
    /// Column types are inferred from all non-null values of a key: booleans, integers
    /// and floats keep a typed column (mixed integers and floats become floats), any
    /// other mix falls back to text. Nested arrays and objects are stored as JSON text.
    ///
    /// # Example
    ///
    /// ```
    /// use trip_planner::{parse_records, Dataset, RecordFormat};
    ///
    /// let records = parse_records(
    ///     r#"[{"city": "Nice", "clouds": 10}, {"city": "Lyon"}]"#,
    ///     RecordFormat::Json,
    /// )?;
    /// let dataset = Dataset::from_records(&records)?;
    /// assert_eq!(dataset.height(), 2);
    /// assert_eq!(dataset.column_names(), ["city", "clouds"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_records(records: &[Record]) -> Result<Self, LoadError> {
        let names = union_keys(records);
        let columns = names
            .iter()
            .map(|name| build_column(name, records))
            .collect::<Vec<_>>();

        let frame = if columns.is_empty() {
            // SAFETY: there are no columns whose length could disagree with the height.
            unsafe { DataFrame::new_no_checks(records.len(), columns) }
        } else {
            DataFrame::new(columns)?
        };
        debug!(
            "Built dataset with {} rows and {} columns from {} records",
            frame.height(),
            frame.width(),
            records.len()
        );
        Ok(Self { frame })
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Writes the dataset as UTF-8, comma separated text with a header row.
    ///
    /// Missing values become empty fields. An existing file at `path` is replaced, and
    /// the parent directory is created when needed. Polars needs `&mut` to write.
    ///
    /// A dataset without columns is written as an empty header line followed by one
    /// empty line per row.
    pub fn write_csv(&mut self, path: &Path) -> Result<(), LoadError> {
        ensure_parent_dir(path).map_err(|e| LoadError::OutputDirCreation(path.to_path_buf(), e))?;

        let mut file = File::create(path).map_err(|e| LoadError::CsvCreate(path.to_path_buf(), e))?;
        if self.frame.width() == 0 {
            file.write_all("\n".repeat(self.frame.height() + 1).as_bytes())
                .map_err(|e| LoadError::CsvWrite(path.to_path_buf(), e.into()))?;
            info!("Wrote {} empty rows to {}", self.frame.height(), path.display());
            return Ok(());
        }
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut self.frame)
            .map_err(|e| LoadError::CsvWrite(path.to_path_buf(), e))?;

        info!(
            "Wrote {} rows x {} columns to {}",
            self.frame.height(),
            self.frame.width(),
            path.display()
        );
        Ok(())
    }

    /// Reads a comma separated file with a header row. Empty fields are read as nulls and
    /// column types are inferred from the whole file.
    pub fn read_csv(path: &Path) -> Result<Self, LoadError> {
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))?;

        info!(
            "Read {} rows x {} columns from {}",
            frame.height(),
            frame.width(),
            path.display()
        );
        Ok(Self { frame })
    }
}

/// Every key across all records, in first-appearance order.
fn union_keys(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for key in records.iter().flat_map(|record| record.keys()) {
        if seen.insert(key.as_str()) {
            names.push(key.clone());
        }
    }
    names
}

fn infer_kind(name: &str, records: &[Record]) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for value in records.iter().filter_map(|record| record.get(name)) {
        if let Some(this) = ColumnKind::of(value) {
            let widened = kind.map_or(this, |k| k.widen(this));
            if widened == ColumnKind::Text {
                return ColumnKind::Text;
            }
            kind = Some(widened);
        }
    }
    kind.unwrap_or(ColumnKind::Text)
}

fn build_column(name: &str, records: &[Record]) -> Column {
    let values = records
        .iter()
        .map(|record| record.get(name).filter(|v| !v.is_null()));

    let series = match infer_kind(name, records) {
        ColumnKind::Boolean => Series::new(
            name.into(),
            values.map(|v| v.and_then(Value::as_bool)).collect::<Vec<_>>(),
        ),
        ColumnKind::Integer => Series::new(
            name.into(),
            values.map(|v| v.and_then(Value::as_i64)).collect::<Vec<_>>(),
        ),
        ColumnKind::Float => Series::new(
            name.into(),
            values.map(|v| v.and_then(Value::as_f64)).collect::<Vec<_>>(),
        ),
        ColumnKind::Text => Series::new(
            name.into(),
            values.map(|v| v.map(value_to_text)).collect::<Vec<Option<String>>>(),
        ),
    };
    series.into_column()
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
