use std::fmt;

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Geographic position of a city, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One sampled element of the 3-hourly forecast list.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub dt_txt: String,
    pub description: String,
    pub temp_kelvin: f64,
}

impl ForecastEntry {
    pub fn temperature_celsius(&self) -> f64 {
        kelvin_to_celsius(self.temp_kelvin)
    }
}

impl fmt::Display for ForecastEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "****Weather *****")?;
        writeln!(f, "Date & Time: {}", self.dt_txt)?;
        writeln!(f, "Weather: {}", self.description)?;
        write!(f, "Temperature: {:.2}°C", self.temperature_celsius())
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}
