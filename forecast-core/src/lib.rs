//! Core library for the `weather-forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The HTTP fetcher seam and its `reqwest` implementation
//! - Extraction of coordinates and daily samples from OpenWeather responses
//! - The two-stage pipeline that ties them together
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod print;

pub use config::Config;
pub use error::{ForecastError, Stage};
pub use extract::{extract_coordinates, extract_forecast};
pub use fetch::{Fetcher, HttpFetcher};
pub use model::{Coordinates, ForecastEntry};
pub use pipeline::{fetch_daily_forecast, run};
pub use print::{print_forecast, print_forecast_body};
