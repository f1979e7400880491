use std::{fmt, io};

use thiserror::Error;

/// Which of the two requests a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Coordinates,
    Forecast,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Coordinates => "coordinates",
            Stage::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to initialize HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to get data for {0}")]
    EmptyBody(Stage),

    #[error("Failed to parse JSON data")]
    Json(#[from] serde_json::Error),

    #[error("No '{0}' member in JSON response")]
    MissingKey(&'static str),

    #[error("'{0}' member in JSON response has an unexpected shape")]
    MalformedKey(&'static str),

    #[error("Failed to write forecast")]
    Io(#[from] io::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}
