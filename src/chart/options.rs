use bon::Builder;
use plotly::common::ColorScalePalette;
use plotly::layout::MapboxStyle;

pub const DEFAULT_TITLE: &str = "Top 5 destinations according to the weather forecast";

/// Look of the destination map. Defaults reproduce the classic top-5 forecast map.
///
/// ```
/// use trip_planner::ChartOptions;
///
/// let options = ChartOptions::builder().zoom(4).title("Best beaches").build();
/// assert_eq!(options.zoom, 4);
/// assert_eq!(options.height, 800);
/// assert_eq!(options.size_max, 35.0);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ChartOptions {
    #[builder(into, default = DEFAULT_TITLE.to_string())]
    pub title: String,

    /// Initial map zoom level.
    #[builder(default = 5)]
    pub zoom: u8,

    /// Figure height in pixels.
    #[builder(default = 800)]
    pub height: usize,

    /// Diameter in pixels of the largest marker.
    #[builder(default = 35.0)]
    pub size_max: f64,

    #[builder(default = ColorScalePalette::Bluered)]
    pub color_scale: ColorScalePalette,

    #[builder(default = MapboxStyle::OpenStreetMap)]
    pub map_style: MapboxStyle,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
