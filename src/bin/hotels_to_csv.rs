//! Turns the booking scraper's `hotels.json` into `work/csv_files/hotel_data.csv`.
//!
//! Set RUST_LOG=info (or debug) to see progress messages.

use log::error;
use std::process::ExitCode;
use trip_planner::{convert_records_to_csv, ProjectLayout, TripPlannerError};

fn run() -> Result<(), TripPlannerError> {
    let layout = ProjectLayout::new();
    let dataset = convert_records_to_csv(&layout.hotels_json(), &layout.hotel_csv())?;
    println!(
        "Wrote {} hotels ({} columns) to {}",
        dataset.height(),
        dataset.column_names().len(),
        layout.hotel_csv().display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Hotel conversion failed: {}", e);
            eprintln!("Error: {}", e.describe());
            ExitCode::FAILURE
        }
    }
}
