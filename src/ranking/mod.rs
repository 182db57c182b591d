//! Ranks destinations per day by how pleasant the forecast is and keeps the best few.

pub mod error;
pub mod options;
pub mod stages;

use crate::ranking::error::RankError;
use crate::ranking::options::RankOptions;
use crate::ranking::stages::{
    concat_groups, partition_groups, sort_group, truncate_group, validate_schema,
};
use log::{debug, info};
use polars::prelude::DataFrame;

/// Keeps the best `top_k` rows of every group.
///
/// The frame is validated, split by `options.group_by` (first-occurrence order), each
/// group is stable-sorted by `options.keys`, cut to `options.top_k` rows, and the
/// groups are stacked back together in order. Sort key and coordinate columns are
/// `Float64` in the result.
///
/// # Example
///
/// ```
/// use polars::prelude::*;
/// use trip_planner::{rank_top_destinations, RankOptions};
///
/// let weather = df!(
///     "day_id" => [1i64, 1, 1],
///     "city" => ["Lyon", "Nice", "Brest"],
///     "lat" => [45.76, 43.7, 48.39],
///     "lon" => [4.84, 7.26, -4.49],
///     "temp_max" => [21.0, 25.0, 15.0],
///     "humidity" => [50, 40, 80],
///     "clouds" => [20, 10, 90],
///     "rain_prob" => [0.1, 0.0, 0.8],
/// )?;
///
/// let options = RankOptions::builder().top_k(2).build();
/// let best = rank_top_destinations(&weather, &options)?;
/// let cities: Vec<_> = best.column("city")?.str()?.into_no_null_iter().collect();
/// assert_eq!(cities, ["Nice", "Lyon"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`RankError::Schema`] when a required column is missing or not numeric.
pub fn rank_top_destinations(
    frame: &DataFrame,
    options: &RankOptions,
) -> Result<DataFrame, RankError> {
    let validated = validate_schema(frame, options)?;
    let groups = partition_groups(&validated, &options.group_by)?;
    info!(
        "Ranking {} rows in {} '{}' groups, keeping the top {}",
        validated.height(),
        groups.len(),
        options.group_by,
        options.top_k
    );

    let ranked = groups
        .iter()
        .map(|group| {
            let sorted = sort_group(group, &options.keys, options.tie_break.as_deref())?;
            let kept = truncate_group(&sorted, options.top_k);
            debug!("Kept {} of {} rows", kept.height(), group.height());
            Ok(kept)
        })
        .collect::<Result<Vec<_>, RankError>>()?;

    concat_groups(ranked, &validated)
}
