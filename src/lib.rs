mod chart;
mod error;
mod layout;
mod loader;
mod ranking;

pub use error::TripPlannerError;
pub use layout::ProjectLayout;

pub use loader::convert_records_to_csv;
pub use loader::dataset::Dataset;
pub use loader::error::{LoadError, ParseError};
pub use loader::records::{parse_records, read_records, Record, RecordFormat};

pub use ranking::error::{RankError, SchemaError};
pub use ranking::options::*;
pub use ranking::rank_top_destinations;
pub use ranking::stages::{
    concat_groups, partition_groups, sort_group, truncate_group, validate_schema,
};

pub use chart::error::RenderError;
pub use chart::options::{ChartOptions, DEFAULT_TITLE};
pub use chart::{BrowserSurface, Chart, DisplaySurface};
