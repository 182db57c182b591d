//! The individual steps of the ranking: validate, partition, sort, truncate, concatenate.

use crate::ranking::error::{RankError, SchemaError};
use crate::ranking::options::{RankOptions, SortKey, COL_LAT, COL_LON, REQUIRED_COLUMNS};
use polars::prelude::*;

/// Positional tie-breaker appended as the last sort key.
const ROW_INDEX: &str = "__row_nr";

/// Name for the positional tie-breaker that `frame` does not already use.
fn row_index_name(frame: &DataFrame) -> PlSmallStr {
    let mut name = String::from(ROW_INDEX);
    while frame.get_column_index(&name).is_some() {
        name.push('_');
    }
    name.into()
}

/// Checks that every column the ranking and chart need is present and that the
/// coordinates and sort keys are numeric.
///
/// Returns a copy of `frame` where `lat`, `lon` and every sort key are `Float64`.
/// Numeric text such as `"25"` is accepted and converted. NaN becomes null, so it
/// counts as a missing value when sorting.
///
/// # Errors
///
/// * [`SchemaError::MissingColumn`] for the first absent column.
/// * [`SchemaError::NonNumericColumn`] if a coordinate or sort key holds values that
///   do not convert to a number.
pub fn validate_schema(frame: &DataFrame, options: &RankOptions) -> Result<DataFrame, SchemaError> {
    let mut required: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    required.push(&options.group_by);
    required.extend(options.keys.iter().map(|key| key.column.as_str()));
    required.extend(options.tie_break.as_deref());

    if let Some(missing) = required
        .iter()
        .find(|name| frame.get_column_index(name).is_none())
    {
        return Err(SchemaError::MissingColumn(missing.to_string()));
    }

    let mut numeric: Vec<&str> = vec![COL_LAT, COL_LON];
    for key in &options.keys {
        if !numeric.contains(&key.column.as_str()) {
            numeric.push(&key.column);
        }
    }

    let mut validated = frame.clone();
    for name in numeric {
        let non_numeric = |source| SchemaError::NonNumericColumn {
            column: name.to_string(),
            source,
        };
        let cast = validated
            .column(name)
            .and_then(|column| column.as_materialized_series().strict_cast(&DataType::Float64))
            .map_err(non_numeric)?;
        let without_nan = cast
            .f64()
            .map_err(non_numeric)?
            .apply(|value| value.filter(|v| !v.is_nan()));
        validated
            .with_column(without_nan.into_series())
            .map_err(non_numeric)?;
    }
    Ok(validated)
}

/// Splits `frame` into one frame per distinct value of `group_by`.
///
/// Groups come out in the order their value first appears; rows inside a group keep
/// their original order. An empty frame has no groups.
pub fn partition_groups(frame: &DataFrame, group_by: &str) -> Result<Vec<DataFrame>, RankError> {
    if frame.height() == 0 {
        return Ok(Vec::new());
    }
    Ok(frame.partition_by_stable([group_by], true)?)
}

/// Stable multi-key sort of one group.
///
/// Nulls go last for every key regardless of direction. Rows equal on every key (and
/// on `tie_break`, when given) keep their original relative order.
pub fn sort_group(
    group: &DataFrame,
    keys: &[SortKey],
    tie_break: Option<&str>,
) -> Result<DataFrame, RankError> {
    let mut by: Vec<PlSmallStr> = keys.iter().map(|key| key.column.as_str().into()).collect();
    let mut descending: Vec<bool> = keys.iter().map(|key| key.descending).collect();
    if let Some(column) = tie_break {
        by.push(column.into());
        descending.push(false);
    }
    let row_index = row_index_name(group);
    by.push(row_index.clone());
    descending.push(false);

    let sorted = group
        .with_row_index(row_index.clone(), None)?
        .sort(
            by,
            SortMultipleOptions::default()
                .with_order_descending_multi(descending)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )?;
    Ok(sorted.drop(row_index.as_str())?)
}

/// Keeps the first `k` rows (all of them if the group is smaller).
pub fn truncate_group(group: &DataFrame, k: usize) -> DataFrame {
    group.head(Some(k))
}

/// Stacks the groups vertically in the given order. With no groups the result is an
/// empty frame with the schema of `empty_like`.
pub fn concat_groups(groups: Vec<DataFrame>, empty_like: &DataFrame) -> Result<DataFrame, RankError> {
    let mut groups = groups.into_iter();
    let Some(mut combined) = groups.next() else {
        return Ok(empty_like.clear());
    };
    for group in groups {
        combined.vstack_mut(&group)?;
    }
    combined.as_single_chunk_par();
    Ok(combined)
}
