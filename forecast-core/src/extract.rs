//! Extraction of coordinates and forecast samples from OpenWeather JSON bodies.
//!
//! Only the top-level `coord` / `list` members are required, and `coord` must be
//! an object. Nested fields that are missing or of the wrong type fall back to
//! an empty string or `0.0`.

use serde_json::Value;
use tracing::debug;

use crate::{
    error::ForecastError,
    model::{Coordinates, ForecastEntry},
};

/// The forecast list holds 3-hourly entries, so every 8th one is roughly a day apart.
pub const DAILY_STRIDE: usize = 8;

pub fn extract_coordinates(body: &str) -> Result<Coordinates, ForecastError> {
    let root = parse(body)?;

    let Some(coord) = root.get("coord") else {
        debug!("Coordinates not found in JSON response");
        return Err(ForecastError::MissingKey("coord"));
    };
    if !coord.is_object() {
        debug!(%coord, "'coord' member is not an object");
        return Err(ForecastError::MalformedKey("coord"));
    }

    let coords = Coordinates {
        lat: number_or_zero(coord.get("lat")),
        lon: number_or_zero(coord.get("lon")),
    };
    debug!(lat = coords.lat, lon = coords.lon, "extracted coordinates");

    Ok(coords)
}

/// Returns the daily samples (indices 0, 8, 16, ...) of the forecast `list`.
pub fn extract_forecast(body: &str) -> Result<Vec<ForecastEntry>, ForecastError> {
    let root = parse(body)?;

    let Some(list) = root.get("list") else {
        debug!("No 'list' member in JSON response");
        return Err(ForecastError::MissingKey("list"));
    };

    let entries: Vec<ForecastEntry> = list
        .as_array()
        .map(|items| items.iter().step_by(DAILY_STRIDE).map(entry_from).collect())
        .unwrap_or_default();
    debug!(samples = entries.len(), "extracted forecast samples");

    Ok(entries)
}

fn parse(body: &str) -> Result<Value, ForecastError> {
    serde_json::from_str(body).map_err(|e| {
        debug!("Failed to parse JSON data: {e}");
        ForecastError::Json(e)
    })
}

fn entry_from(item: &Value) -> ForecastEntry {
    let description = item
        .get("weather")
        .and_then(|w| w.get(0))
        .and_then(|w| w.get("description"));

    ForecastEntry {
        dt_txt: string_or_empty(item.get("dt_txt")),
        description: string_or_empty(description),
        temp_kelvin: number_or_zero(item.get("main").and_then(|m| m.get("temp"))),
    }
}

fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

fn string_or_empty(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forecast_body(count: usize) -> String {
        let list: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "dt_txt": format!("entry-{i}"),
                    "main": { "temp": 280.0 + i as f64 },
                    "weather": [{ "description": format!("sky {i}") }],
                })
            })
            .collect();
        json!({ "cod": "200", "list": list }).to_string()
    }

    #[test]
    fn extracts_coordinates() {
        let coords = extract_coordinates(r#"{"coord":{"lat":12.34,"lon":56.78}}"#).unwrap();
        assert_eq!(coords, Coordinates { lat: 12.34, lon: 56.78 });
    }

    #[test]
    fn missing_coord_is_an_error() {
        let err = extract_coordinates(r#"{"cod":"404","message":"city not found"}"#).unwrap_err();
        assert!(matches!(err, ForecastError::MissingKey("coord")));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = extract_coordinates("{not json").unwrap_err();
        assert!(matches!(err, ForecastError::Json(_)));
    }

    #[test]
    fn non_numeric_coordinates_default_to_zero() {
        let coords = extract_coordinates(r#"{"coord":{"lat":"north"}}"#).unwrap();
        assert_eq!(coords, Coordinates { lat: 0.0, lon: 0.0 });
    }

    #[test]
    fn scalar_coord_is_an_error() {
        let err = extract_coordinates(r#"{"coord":5}"#).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedKey("coord")));

        for body in [r#"{"coord":null}"#, r#"{"coord":[12.34,56.78]}"#, r#"{"coord":"x"}"#] {
            assert!(extract_coordinates(body).is_err(), "{body}");
        }
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let coords = extract_coordinates(r#"{"coord":{"lat":10,"lon":-3}}"#).unwrap();
        assert_eq!(coords, Coordinates { lat: 10.0, lon: -3.0 });
    }

    #[test]
    fn samples_every_eighth_entry() {
        let entries = extract_forecast(&forecast_body(16)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].dt_txt, "entry-0");
        assert_eq!(entries[1].dt_txt, "entry-8");
        assert_eq!(entries[1].description, "sky 8");
        assert_eq!(entries[1].temp_kelvin, 288.0);
    }

    #[test]
    fn full_five_day_list_gives_five_samples() {
        let entries = extract_forecast(&forecast_body(40)).unwrap();
        let stamps: Vec<&str> = entries.iter().map(|e| e.dt_txt.as_str()).collect();
        assert_eq!(stamps, vec!["entry-0", "entry-8", "entry-16", "entry-24", "entry-32"]);
    }

    #[test]
    fn partial_trailing_day_is_sampled() {
        assert_eq!(extract_forecast(&forecast_body(9)).unwrap().len(), 2);
        assert_eq!(extract_forecast(&forecast_body(1)).unwrap().len(), 1);
        assert!(extract_forecast(&forecast_body(0)).unwrap().is_empty());
    }

    #[test]
    fn missing_list_is_an_error() {
        let err = extract_forecast(r#"{"coord":{"lat":1,"lon":2}}"#).unwrap_err();
        assert!(matches!(err, ForecastError::MissingKey("list")));
    }

    #[test]
    fn non_array_list_yields_no_entries() {
        assert!(extract_forecast(r#"{"list":{}}"#).unwrap().is_empty());
    }

    #[test]
    fn sparse_entry_uses_defaults() {
        let entries = extract_forecast(r#"{"list":[{"weather":[]}]}"#).unwrap();
        assert_eq!(
            entries,
            vec![ForecastEntry {
                dt_txt: String::new(),
                description: String::new(),
                temp_kelvin: 0.0,
            }]
        );
    }
}
