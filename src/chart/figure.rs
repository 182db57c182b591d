//! Animated destination map built with `plotly` from a ranked `DataFrame`.

use crate::chart::error::RenderError;
use crate::chart::options::ChartOptions;
use crate::ranking::options::{
    COL_CITY, COL_CLOUDS, COL_DAY_ID, COL_HUMIDITY, COL_LAT, COL_LON, COL_RAIN_PROB,
    COL_TEMP_MAX,
};
use log::{debug, warn};
use ordered_float::OrderedFloat;
use plotly::common::{Anchor, ColorBar, ColorScale, Marker, Mode, Pad, SizeMode, Title};
use plotly::layout::update_menu::{
    ButtonBuilder, UpdateMenu, UpdateMenuDirection, UpdateMenuType,
};
use plotly::layout::{
    Animation, AnimationEasing, AnimationMode, AnimationOptions, Center, Frame, FrameSettings,
    Mapbox, Margin, Slider, SliderCurrentValue, SliderStepBuilder, TransitionSettings,
};
use plotly::{Layout, Plot, ScatterMapbox, Traces};
use polars::prelude::{DataFrame, DataType};
use std::collections::HashMap;

const MAP_SUBPLOT: &str = "mapbox";
const HOVER_TEMPLATE: &str = "%{hovertext}<extra></extra>";
const PLAY_LABEL: &str = "&#9654;";
const PAUSE_LABEL: &str = "&#9724;";
const PLAY_FRAME_MS: usize = 500;

type MapTrace = ScatterMapbox<Option<f64>, Option<f64>>;

/// Plot columns pulled out of the ranked frame, one entry per row.
struct Points {
    day: Vec<String>,
    city: Vec<String>,
    lat: Vec<Option<f64>>,
    lon: Vec<Option<f64>>,
    temp_max: Vec<Option<f64>>,
    humidity: Vec<Option<f64>>,
    clouds: Vec<Option<f64>>,
    rain_prob: Vec<Option<f64>>,
}

impl Points {
    fn from_frame(frame: &DataFrame) -> Result<Self, RenderError> {
        Ok(Self {
            day: text_column(frame, COL_DAY_ID)?,
            city: text_column(frame, COL_CITY)?,
            lat: float_column(frame, COL_LAT)?,
            lon: float_column(frame, COL_LON)?,
            temp_max: float_column(frame, COL_TEMP_MAX)?,
            humidity: float_column(frame, COL_HUMIDITY)?,
            clouds: float_column(frame, COL_CLOUDS)?,
            rain_prob: float_column(frame, COL_RAIN_PROB)?,
        })
    }

    /// Row indices per day, days in first-occurrence order.
    fn days(&self) -> Vec<(String, Vec<usize>)> {
        let mut days: Vec<(String, Vec<usize>)> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();
        for (row, day) in self.day.iter().enumerate() {
            match position.get(day.as_str()) {
                Some(&idx) => days[idx].1.push(row),
                None => {
                    position.insert(day.as_str(), days.len());
                    days.push((day.clone(), vec![row]));
                }
            }
        }
        days
    }

    fn hover_text(&self, row: usize) -> String {
        format!(
            "<b>{}</b><br><br>{}={}<br>{}={}<br>{}={}<br>{}={}<br>{}={}",
            self.city[row],
            COL_DAY_ID,
            self.day[row],
            COL_TEMP_MAX,
            display_value(self.temp_max[row]),
            COL_HUMIDITY,
            display_value(self.humidity[row]),
            COL_CLOUDS,
            display_value(self.clouds[row]),
            COL_RAIN_PROB,
            display_value(self.rain_prob[row]),
        )
    }

    fn trace(&self, name: &str, rows: &[usize], scale: &MarkerScale) -> Box<MapTrace> {
        let pick = |values: &[Option<f64>]| rows.iter().map(|&r| values[r]).collect::<Vec<_>>();
        let hover: Vec<String> = rows.iter().map(|&r| self.hover_text(r)).collect();
        ScatterMapbox::new(pick(&self.lat), pick(&self.lon))
            .name(name)
            .mode(Mode::Markers)
            .subplot(MAP_SUBPLOT)
            .show_legend(false)
            .hover_text_array(hover)
            .hover_template(HOVER_TEMPLATE)
            .marker(scale.marker(&pick(&self.temp_max)))
    }

    fn warn_out_of_range(&self) {
        for (row, (lat, lon)) in self.lat.iter().zip(&self.lon).enumerate() {
            let bad_lat = lat.is_some_and(|v| !(-90.0..=90.0).contains(&v));
            let bad_lon = lon.is_some_and(|v| !(-180.0..=180.0).contains(&v));
            if bad_lat || bad_lon {
                warn!(
                    "Coordinates of '{}' are outside the valid range: ({:?}, {:?})",
                    self.city[row], lat, lon
                );
            }
        }
    }
}

/// Colour range and size scale shared by the markers of every day, so frames compare.
struct MarkerScale {
    cmin: f64,
    cmax: f64,
    size_max: f64,
    color_scale: ColorScale,
}

impl MarkerScale {
    fn new(temps: &[Option<f64>], options: &ChartOptions) -> Self {
        let present = || temps.iter().flatten().map(|t| OrderedFloat(*t));
        Self {
            cmin: present().min().map_or(0.0, |t| t.0),
            cmax: present().max().map_or(0.0, |t| t.0),
            size_max: options.size_max,
            color_scale: ColorScale::Palette(options.color_scale.clone()),
        }
    }

    /// Marker area grows linearly with the temperature and the hottest marker is
    /// `size_max` pixels across. Areas cannot be negative, and a missing temperature
    /// gets no marker.
    fn size(&self, temp_max: Option<f64>) -> usize {
        match temp_max {
            Some(t) if self.cmax > 0.0 => {
                (self.size_max * (t.max(0.0) / self.cmax).sqrt()).round() as usize
            }
            _ => 0,
        }
    }

    fn marker(&self, temps: &[Option<f64>]) -> Marker {
        // Markers without a temperature have no area, so their colour never shows.
        let colors: Vec<f64> = temps.iter().map(|t| t.unwrap_or(self.cmin)).collect();
        let sizes: Vec<usize> = temps.iter().map(|t| self.size(*t)).collect();
        Marker::new()
            .color_array(colors)
            .size_array(sizes)
            .size_mode(SizeMode::Diameter)
            .cmin(self.cmin)
            .cmax(self.cmax)
            .color_scale(self.color_scale.clone())
            .show_scale(true)
            .color_bar(ColorBar::new().title(COL_TEMP_MAX))
    }
}

/// NaN is read as a missing value.
fn float_column(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, RenderError> {
    let column_error = |e| RenderError::Column(name.to_string(), e);
    let column = frame
        .column(name)
        .and_then(|c| c.cast(&DataType::Float64))
        .map_err(column_error)?;
    Ok(column
        .f64()
        .map_err(column_error)?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

fn text_column(frame: &DataFrame, name: &str) -> Result<Vec<String>, RenderError> {
    let column_error = |e| RenderError::Column(name.to_string(), e);
    let column = frame
        .column(name)
        .and_then(|c| c.cast(&DataType::String))
        .map_err(column_error)?;
    Ok(column
        .str()
        .map_err(column_error)?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

fn display_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

fn step_options(duration: usize) -> AnimationOptions {
    AnimationOptions::new()
        .mode(AnimationMode::Immediate)
        .fromcurrent(true)
        .frame(FrameSettings::new().duration(duration).redraw(true))
        .transition(
            TransitionSettings::new()
                .duration(duration)
                .easing(AnimationEasing::Linear),
        )
}

fn slider(day_names: &[String]) -> Result<Slider, RenderError> {
    let steps = day_names
        .iter()
        .map(|name| {
            SliderStepBuilder::new()
                .label(name)
                .value(name.as_str())
                .animation(Animation::frames(vec![name.clone()]).options(step_options(0)))
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Slider::new()
        .active(0)
        .current_value(SliderCurrentValue::new().prefix(format!("{}=", COL_DAY_ID)))
        .length(0.9)
        .pad(Pad::new(60, 10, 0))
        .x(0.1)
        .x_anchor(Anchor::Left)
        .y(0.0)
        .y_anchor(Anchor::Top)
        .steps(steps))
}

fn play_controls() -> Result<UpdateMenu, RenderError> {
    let play = ButtonBuilder::new()
        .label(PLAY_LABEL)
        .animation(Animation::all_frames().options(step_options(PLAY_FRAME_MS)))
        .build()?;
    let pause = ButtonBuilder::new()
        .label(PAUSE_LABEL)
        .animation(Animation::pause())
        .build()?;
    Ok(UpdateMenu::new()
        .ty(UpdateMenuType::Buttons)
        .direction(UpdateMenuDirection::Left)
        .show_active(false)
        .pad(Pad::new(70, 0, 10))
        .x(0.1)
        .x_anchor(Anchor::Right)
        .y(0.0)
        .y_anchor(Anchor::Top)
        .buttons(vec![play, pause]))
}

/// Builds the animated map: one frame per day (in row order), one marker per row,
/// colour and area both driven by `temp_max` on one colour range for all days.
///
/// # Errors
///
/// * [`RenderError::NoData`] if `frame` has no rows.
/// * [`RenderError::Column`] if a plotted column is missing or has the wrong type.
pub(crate) fn ranked_plot(frame: &DataFrame, options: &ChartOptions) -> Result<Plot, RenderError> {
    if frame.height() == 0 {
        return Err(RenderError::NoData);
    }
    let points = Points::from_frame(frame)?;
    points.warn_out_of_range();
    let scale = MarkerScale::new(&points.temp_max, options);

    let mut plot = Plot::new();
    let mut day_names = Vec::new();
    for (index, (name, rows)) in points.days().into_iter().enumerate() {
        let trace = points.trace(&name, &rows, &scale);
        if index == 0 {
            plot.add_trace(trace.clone());
        }
        let mut traces = Traces::new();
        traces.push(trace);
        plot.add_frame(Frame::new().name(name.as_str()).data(traces));
        day_names.push(name);
    }
    debug!("Built {} animation frames for {} markers", day_names.len(), frame.height());

    let center = Center::new(
        mean(&points.lat).unwrap_or(0.0),
        mean(&points.lon).unwrap_or(0.0),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(format!("<b>{}</b>", options.title)).x(0.5))
            .height(options.height)
            .margin(Margin::new().right(0).top(40).left(0).bottom(0))
            .mapbox(
                Mapbox::new()
                    .style(options.map_style.clone())
                    .center(center)
                    .zoom(options.zoom),
            )
            .sliders(vec![slider(&day_names)?])
            .update_menus(vec![play_controls()?]),
    );
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::{json, Value};

    fn ranked() -> DataFrame {
        df!(
            "day_id" => [2i64, 2, 1, 1, 1],
            "city" => ["Nice", "Pau", "Lyon", "Metz", "Brest"],
            "lat" => [43.7, 43.3, 45.76, 49.12, 48.39],
            "lon" => [7.26, -0.37, 4.84, 6.18, -4.49],
            "temp_max" => [25.0, 23.0, 22.0, 21.0, -2.0],
            "humidity" => [40.0, 45.0, 50.0, 55.0, 80.0],
            "clouds" => [10.0, 15.0, 20.0, 40.0, 90.0],
            "rain_prob" => [0.0, 0.05, 0.1, 0.2, 0.8],
        )
        .expect("ranked frame")
    }

    fn plotted(frame: &DataFrame) -> Result<Value, Box<dyn std::error::Error>> {
        let plot = ranked_plot(frame, &ChartOptions::default())?;
        Ok(serde_json::from_str(&plot.to_json())?)
    }

    fn hover_cities(trace: &Value) -> Vec<String> {
        trace["hovertext"]
            .as_array()
            .map(|texts| {
                texts
                    .iter()
                    .filter_map(|t| t.as_str())
                    .filter_map(|t| t.strip_prefix("<b>"))
                    .filter_map(|t| t.split("</b>").next())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_one_frame_per_day_in_row_order() -> Result<(), Box<dyn std::error::Error>> {
        let value = plotted(&ranked())?;

        let names: Vec<&str> = value["frames"]
            .as_array()
            .ok_or("frames should be an array")?
            .iter()
            .filter_map(|f| f["name"].as_str())
            .collect();
        assert_eq!(names, ["2", "1"]);
        assert_eq!(hover_cities(&value["frames"][0]["data"][0]), ["Nice", "Pau"]);
        assert_eq!(hover_cities(&value["frames"][1]["data"][0]), ["Lyon", "Metz", "Brest"]);
        assert_eq!(value["data"][0], value["frames"][0]["data"][0]);
        assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
        Ok(())
    }

    #[test]
    fn test_markers_share_colour_range_and_size_scale() -> Result<(), Box<dyn std::error::Error>> {
        let value = plotted(&ranked())?;

        for frame in value["frames"].as_array().ok_or("frames should be an array")? {
            let marker = &frame["data"][0]["marker"];
            assert_eq!(marker["cmin"], -2.0);
            assert_eq!(marker["cmax"], 25.0);
            assert_eq!(marker["colorscale"], "Bluered");
            assert_eq!(marker["colorbar"]["title"]["text"], "temp_max");
        }
        let day_two = &value["frames"][0]["data"][0]["marker"];
        // The hottest marker is size_max across; area follows the temperature.
        let pau = (35.0_f64 * (23.0_f64 / 25.0).sqrt()).round() as u64;
        assert_eq!(day_two["size"], json!([35, pau]));

        let day_one = &value["frames"][1]["data"][0]["marker"];
        assert_eq!(day_one["color"], json!([22.0, 21.0, -2.0]));
        // Negative temperatures still get a colour, but no area.
        assert_eq!(day_one["size"][2], 0);
        Ok(())
    }

    #[test]
    fn test_hover_shows_weather_of_each_destination() -> Result<(), Box<dyn std::error::Error>> {
        let value = plotted(&ranked())?;
        let trace = &value["frames"][0]["data"][0];

        assert_eq!(trace["type"], "scattermapbox");
        assert_eq!(trace["lat"], json!([43.7, 43.3]));
        assert_eq!(trace["lon"], json!([7.26, -0.37]));
        assert_eq!(
            trace["hovertext"][1],
            "<b>Pau</b><br><br>day_id=2<br>temp_max=23<br>humidity=45<br>clouds=15<br>rain_prob=0.05"
        );
        assert_eq!(trace["hovertemplate"], HOVER_TEMPLATE);
        Ok(())
    }

    #[test]
    fn test_layout_has_map_and_animation_controls() -> Result<(), Box<dyn std::error::Error>> {
        let value = plotted(&ranked())?;
        let layout = &value["layout"];

        assert_eq!(layout["mapbox"]["style"], "open-street-map");
        assert_eq!(layout["mapbox"]["zoom"], 5);
        assert_eq!(layout["height"], 800);
        assert_eq!(
            layout["title"]["text"],
            "<b>Top 5 destinations according to the weather forecast</b>"
        );

        let steps = layout["sliders"][0]["steps"]
            .as_array()
            .ok_or("slider steps should be an array")?;
        let labels: Vec<&str> = steps.iter().filter_map(|s| s["label"].as_str()).collect();
        assert_eq!(labels, ["2", "1"]);
        assert_eq!(steps[1]["method"], "animate");
        assert_eq!(steps[1]["args"][0][0], "1");

        let buttons = layout["updatemenus"][0]["buttons"]
            .as_array()
            .ok_or("buttons should be an array")?;
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0]["args"][0], Value::Null);
        assert_eq!(buttons[1]["args"][0], json!([null]));
        Ok(())
    }

    #[test]
    fn test_map_is_centred_on_markers() -> Result<(), Box<dyn std::error::Error>> {
        let value = plotted(&ranked())?;
        let expected_lat = (43.7 + 43.3 + 45.76 + 49.12 + 48.39) / 5.0;
        let lat = value["layout"]["mapbox"]["center"]["lat"]
            .as_f64()
            .ok_or("centre latitude should be a number")?;
        assert!((lat - expected_lat).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_nan_temperature_does_not_break_the_colour_range(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = ranked();
        frame.with_column(Series::new(
            "temp_max".into(),
            [25.0, f64::NAN, 22.0, 21.0, -2.0],
        ))?;

        let value = plotted(&frame)?;
        let marker = &value["frames"][0]["data"][0]["marker"];
        assert_eq!(marker["cmax"], 25.0);
        assert_eq!(marker["size"], json!([35, 0]));
        Ok(())
    }

    #[test]
    fn test_empty_frame_cannot_be_plotted() {
        let result = ranked_plot(&ranked().clear(), &ChartOptions::default());
        assert!(matches!(result, Err(RenderError::NoData)));
    }

    #[test]
    fn test_missing_column_is_reported() -> Result<(), PolarsError> {
        let frame = ranked().drop("lon")?;
        let result = ranked_plot(&frame, &ChartOptions::default());
        assert!(matches!(result, Err(RenderError::Column(ref name, _)) if name == "lon"));
        Ok(())
    }

    #[test]
    fn test_out_of_range_coordinates_pass_through() -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = ranked();
        frame.with_column(Series::new("lat".into(), [95.0, 43.3, 45.76, 49.12, 48.39]))?;

        let value = plotted(&frame)?;
        assert_eq!(value["frames"][0]["data"][0]["lat"][0], 95.0);
        Ok(())
    }
}
