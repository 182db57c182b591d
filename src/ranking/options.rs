//! Sort keys and options for ranking destinations within a day.

use bon::Builder;

pub const COL_DAY_ID: &str = "day_id";
pub const COL_CITY: &str = "city";
pub const COL_LAT: &str = "lat";
pub const COL_LON: &str = "lon";
pub const COL_TEMP_MAX: &str = "temp_max"; // Maximum temperature
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_CLOUDS: &str = "clouds"; // Cloud cover
pub const COL_RAIN_PROB: &str = "rain_prob"; // Probability of precipitation

/// Columns every weather table must carry to be ranked and plotted.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_DAY_ID,
    COL_CITY,
    COL_LAT,
    COL_LON,
    COL_TEMP_MAX,
    COL_HUMIDITY,
    COL_CLOUDS,
    COL_RAIN_PROB,
];

pub const DEFAULT_TOP_K: usize = 5;

/// One attribute of a composite sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Hottest first, then the driest, clearest and least rain-prone.
pub fn weather_preference() -> Vec<SortKey> {
    vec![
        SortKey::descending(COL_TEMP_MAX),
        SortKey::ascending(COL_HUMIDITY),
        SortKey::ascending(COL_CLOUDS),
        SortKey::ascending(COL_RAIN_PROB),
    ]
}

/// How rows are grouped, ordered and cut when ranking destinations.
///
/// Built with a builder; every field has a default matching the weather ranking.
///
/// ```
/// use trip_planner::RankOptions;
///
/// let defaults = RankOptions::default();
/// assert_eq!(defaults.group_by, "day_id");
/// assert_eq!(defaults.top_k, 5);
/// assert_eq!(defaults.tie_break, None);
///
/// let custom = RankOptions::builder().top_k(3).tie_break("city").build();
/// assert_eq!(custom.top_k, 3);
/// assert_eq!(custom.tie_break.as_deref(), Some("city"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RankOptions {
    /// Column whose distinct values form the groups.
    #[builder(into, default = COL_DAY_ID.to_string())]
    pub group_by: String,

    /// Composite sort order, most significant key first.
    #[builder(default = weather_preference())]
    pub keys: Vec<SortKey>,

    /// Rows kept per group.
    #[builder(default = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Extra ascending key applied after `keys`. Rows still tied after it keep their
    /// original relative order.
    #[builder(into)]
    pub tie_break: Option<String>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
