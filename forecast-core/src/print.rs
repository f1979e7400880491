use std::io::{self, Write};

use crate::{error::ForecastError, extract::extract_forecast, model::ForecastEntry};

/// Writes one record block per entry to `out`.
pub fn print_forecast<W: Write>(entries: &[ForecastEntry], out: &mut W) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    out.flush()
}

/// Extracts the daily samples from a forecast body and prints them.
pub fn print_forecast_body<W: Write>(body: &str, out: &mut W) -> Result<usize, ForecastError> {
    let entries = extract_forecast(body)?;
    print_forecast(&entries, out)?;
    Ok(entries.len())
}
