//! Renders ranked destinations as an animated `plotly` map and shows it on a display surface.

pub mod error;
pub mod figure;
pub mod options;

use crate::chart::error::RenderError;
use crate::chart::figure::ranked_plot;
use crate::chart::options::ChartOptions;
use crate::layout::ensure_parent_dir;
use log::info;
use plotly::Plot;
use polars::prelude::DataFrame;
use std::path::Path;

/// Anything that can present a rendered chart to the operator.
pub trait DisplaySurface {
    fn display(&self, plot: &Plot) -> Result<(), RenderError>;
}

/// The default web browser, reached through `plotly`'s temporary HTML page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSurface;

impl DisplaySurface for BrowserSurface {
    fn display(&self, plot: &Plot) -> Result<(), RenderError> {
        info!("Opening the chart in the default browser");
        plot.show();
        Ok(())
    }
}

/// An animated map of ranked destinations, ready to be shown or exported.
///
/// # Example
///
/// ```
/// use polars::prelude::*;
/// use trip_planner::{Chart, ChartOptions};
///
/// let ranked = df!(
///     "day_id" => [1i64, 1],
///     "city" => ["Nice", "Lyon"],
///     "lat" => [43.7, 45.76],
///     "lon" => [7.26, 4.84],
///     "temp_max" => [25.0, 21.0],
///     "humidity" => [40.0, 50.0],
///     "clouds" => [10.0, 20.0],
///     "rain_prob" => [0.0, 0.1],
/// )?;
///
/// let chart = Chart::from_ranked(&ranked, &ChartOptions::default())?;
/// assert_eq!(chart.plot().frame_count(), 1);
/// assert!(chart.to_html().contains("Plotly.newPlot"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Chart {
    plot: Plot,
}

impl Chart {
    /// Builds the chart from the output of [`crate::rank_top_destinations`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoData`] for an empty frame and [`RenderError::Column`]
    /// when a plotted column is missing or unusable.
    pub fn from_ranked(frame: &DataFrame, options: &ChartOptions) -> Result<Self, RenderError> {
        Ok(Self {
            plot: ranked_plot(frame, options)?,
        })
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// The figure as plotly.js JSON.
    pub fn to_json(&self) -> String {
        self.plot.to_json()
    }

    /// A standalone HTML page that loads plotly.js and draws the animated map.
    pub fn to_html(&self) -> String {
        self.plot.to_html()
    }

    /// Saves the page to `path`, creating missing directories and replacing any
    /// existing file.
    pub fn write_html(&self, path: &Path) -> Result<(), RenderError> {
        ensure_parent_dir(path).map_err(|e| RenderError::Write(path.to_path_buf(), e))?;
        std::fs::write(path, self.to_html())
            .map_err(|e| RenderError::Write(path.to_path_buf(), e))?;
        info!("Chart written to {}", path.display());
        Ok(())
    }

    /// Shows the chart in the default browser.
    ///
    /// # Panics
    ///
    /// `plotly` panics when the system has no application registered for HTML files.
    /// Use [`Chart::write_html`] on headless machines.
    pub fn show(&self) -> Result<(), RenderError> {
        self.show_on(&BrowserSurface)
    }

    pub fn show_on(&self, surface: &dyn DisplaySurface) -> Result<(), RenderError> {
        surface.display(&self.plot)
    }
}
