//! Ranks the cities in `work/csv_files/weather_data.csv` for every forecast day and
//! opens an animated map of the five best per day in the browser.
//!
//! Set RUST_LOG=info (or debug) to see progress messages.

use log::error;
use std::env;
use std::process::ExitCode;
use trip_planner::{
    rank_top_destinations, Chart, ChartOptions, Dataset, ProjectLayout, RankOptions,
    TripPlannerError,
};

fn run() -> Result<(), TripPlannerError> {
    let layout = ProjectLayout::new();
    let weather = Dataset::read_csv(&layout.weather_csv())?;

    let ranked = rank_top_destinations(&weather.frame, &RankOptions::default())?;
    println!("{}", ranked);

    let chart = Chart::from_ranked(&ranked, &ChartOptions::default())?;
    chart.show()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    configure_polars_display();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Ranking destinations failed: {}", e);
            eprintln!("Error: {}", e.describe());
            ExitCode::FAILURE
        }
    }
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show every ranked row (5 per day)
    env::set_var("POLARS_FMT_MAX_ROWS", "-1");
}
