use plotly::layout::ControlBuilderError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No rows to plot")]
    NoData,

    #[error("Column '{0}' cannot be plotted")]
    Column(String, #[source] PolarsError),

    #[error("Failed to build the animation controls")]
    Controls(#[from] ControlBuilderError),

    #[error("Failed to write chart page '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Display surface '{surface}' could not show the chart")]
    Display {
        surface: String,
        #[source]
        source: std::io::Error,
    },
}
