//! Loader/normalizer: scraped JSON records in, one delimited text file out.

pub mod dataset;
pub mod error;
pub mod records;

use crate::loader::dataset::Dataset;
use crate::loader::error::LoadError;
use crate::loader::records::read_records;
use log::info;
use std::path::Path;

/// Reads the record feed at `input`, tabulates it and writes it as CSV to `output`.
///
/// Any existing file at `output` is overwritten. The conversion is deterministic, so
/// running it twice on the same input produces byte-identical files.
///
/// # Errors
///
/// Returns a [`LoadError`] when the input cannot be read or parsed, or when the output
/// cannot be written. A failure while writing may leave a truncated file behind.
pub fn convert_records_to_csv(input: &Path, output: &Path) -> Result<Dataset, LoadError> {
    let records = read_records(input)?;
    let mut dataset = Dataset::from_records(&records)?;
    dataset.write_csv(output)?;
    info!(
        "Converted {} records from {} into {}",
        records.len(),
        input.display(),
        output.display()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOTELS: &str = r#"[
        {"name": "Hôtel Le Negresco", "url": "https://booking.example/negresco", "score": 8.7, "lat": 43.6947, "lon": 7.2581, "description": "Sea view, \"iconic\" dome"},
        {"name": "Ibis Budget", "url": "https://booking.example/ibis", "score": 7.2},
        {"name": "Villa Rivoli", "url": "https://booking.example/rivoli", "lat": 43.6972, "lon": 7.2601, "stars": 3}
    ]"#;

    #[test]
    fn test_convert_writes_one_row_per_record() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("hotels.json");
        let output = dir.path().join("csv_files").join("hotel_data.csv");
        std::fs::write(&input, HOTELS)?;

        let dataset = convert_records_to_csv(&input, &output)?;
        assert_eq!(dataset.height(), 3);
        assert_eq!(
            dataset.column_names(),
            ["name", "url", "score", "lat", "lon", "description", "stars"]
        );

        let text = std::fs::read_to_string(&output)?;
        assert!(text.starts_with("name,url,score,lat,lon,description,stars\n"));
        assert!(text.contains("Hôtel Le Negresco"));
        assert_eq!(text.lines().count(), 4);
        Ok(())
    }

    #[test]
    fn test_convert_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("hotels.json");
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        std::fs::write(&input, HOTELS)?;

        convert_records_to_csv(&input, &first)?;
        convert_records_to_csv(&input, &second)?;
        // Rerun onto an existing file too.
        convert_records_to_csv(&input, &first)?;

        assert_eq!(std::fs::read(&first)?, std::fs::read(&second)?);
        Ok(())
    }

    #[test]
    fn test_convert_rejects_malformed_input_without_output() -> Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("hotels.json");
        let output = dir.path().join("hotel_data.csv");
        std::fs::write(&input, "[{'name': 'Ibis'}]")?;

        let result = convert_records_to_csv(&input, &output);
        assert!(matches!(result, Err(LoadError::Parse { .. })));
        assert!(!output.exists());
        Ok(())
    }
}
