//! The two-stage lookup: city name to coordinates, coordinates to forecast.

use std::io::Write;

use reqwest::Url;
use tracing::{debug, error, info};

use crate::{
    error::{ForecastError, Stage},
    extract::{extract_coordinates, extract_forecast},
    fetch::Fetcher,
    model::{Coordinates, ForecastEntry},
    print::print_forecast,
};

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// `{base}/weather?q={city}&appid={key}`, with the city percent-encoded.
pub fn current_weather_url(base: &str, city: &str, api_key: &str) -> Result<Url, ForecastError> {
    endpoint(base, "weather", &[("q", city), ("appid", api_key)])
}

/// `{base}/forecast?lat={lat}&lon={lon}&appid={key}`.
pub fn forecast_url(base: &str, coords: Coordinates, api_key: &str) -> Result<Url, ForecastError> {
    let lat = coords.lat.to_string();
    let lon = coords.lon.to_string();
    endpoint(base, "forecast", &[("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", api_key)])
}

fn endpoint(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, ForecastError> {
    let raw = format!("{}/{path}", base.trim_end_matches('/'));
    Url::parse_with_params(&raw, params).map_err(|e| ForecastError::InvalidUrl(format!("{raw}: {e}")))
}

/// Runs both requests and returns the daily samples.
///
/// A failed or empty coordinate lookup stops here; the forecast request is
/// only made once coordinates were extracted.
pub async fn fetch_daily_forecast(
    fetcher: &dyn Fetcher,
    base: &str,
    city: &str,
    api_key: &str,
) -> Result<Vec<ForecastEntry>, ForecastError> {
    let url = current_weather_url(base, city, api_key)?;
    info!(%city, "looking up coordinates");
    let body = fetch_stage(fetcher, &url, Stage::Coordinates).await?;
    let coords = extract_coordinates(&body)?;

    let url = forecast_url(base, coords, api_key)?;
    info!(lat = coords.lat, lon = coords.lon, "fetching forecast");
    let body = fetch_stage(fetcher, &url, Stage::Forecast).await?;

    extract_forecast(&body)
}

async fn fetch_stage(fetcher: &dyn Fetcher, url: &Url, stage: Stage) -> Result<String, ForecastError> {
    match fetcher.fetch(url).await {
        Ok(body) if !body.is_empty() => Ok(body),
        Ok(_) => Err(ForecastError::EmptyBody(stage)),
        Err(e) => {
            debug!("Failed to get data for {stage}: {e}");
            Err(e)
        }
    }
}

/// Fetches and prints the forecast for `city`. Failures are logged, never returned.
///
/// Returns `true` when a forecast was printed.
pub async fn run<W: Write + Send>(
    fetcher: &dyn Fetcher,
    base: &str,
    city: &str,
    api_key: &str,
    out: &mut W,
) -> bool {
    let entries = match fetch_daily_forecast(fetcher, base, city, api_key).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Forecast for '{city}' unavailable: {}", error_chain(&e));
            return false;
        }
    };

    if let Err(e) = print_forecast(&entries, out) {
        error!("Failed to write forecast: {e}");
        return false;
    }
    true
}

/// `e` followed by each of its sources, so transport causes are not lost.
fn error_chain(e: &ForecastError) -> String {
    let mut msg = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
