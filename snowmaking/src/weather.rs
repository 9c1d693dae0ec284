use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wet_bulb::estimate_wet_bulb_temperature;

/// A single weather observation from a provider or an edge station.
///
/// `wet_bulb_temperature` is derived from `temperature` and `humidity` and is
/// recomputed by every setter that touches either of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWeatherReading")]
pub struct WeatherReading {
    source_name: String,
    /// Dry-bulb temperature in °F
    temperature: f64,
    /// Relative humidity in % (0-100)
    humidity: f64,
    /// Wind speed in mph
    wind_speed: f64,
    /// Wind direction in degrees from north
    wind_direction: f64,
    /// Derived wet-bulb temperature in °F
    wet_bulb_temperature: f64,
    /// When the reading was taken, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    observed_at: Option<DateTime<Utc>>,
}

/// Wire shape of a reading. Any `wet_bulb_temperature` present in the input is ignored.
#[derive(Deserialize)]
struct RawWeatherReading {
    source_name: String,
    temperature: f64,
    humidity: f64,
    #[serde(default)]
    wind_speed: f64,
    #[serde(default)]
    wind_direction: f64,
    #[serde(default)]
    observed_at: Option<DateTime<Utc>>,
}

impl From<RawWeatherReading> for WeatherReading {
    fn from(raw: RawWeatherReading) -> Self {
        let mut reading = WeatherReading::new(
            raw.source_name,
            raw.temperature,
            raw.humidity,
            raw.wind_speed,
            raw.wind_direction,
        );
        reading.observed_at = raw.observed_at;
        reading
    }
}

impl WeatherReading {
    pub fn new(
        source_name: impl Into<String>,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
        wind_direction: f64,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            temperature,
            humidity,
            wind_speed,
            wind_direction,
            wet_bulb_temperature: estimate_wet_bulb_temperature(temperature, humidity),
            observed_at: None,
        }
    }

    pub fn with_observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = Some(observed_at);
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    pub fn wind_direction(&self) -> f64 {
        self.wind_direction
    }

    pub fn wet_bulb_temperature(&self) -> f64 {
        self.wet_bulb_temperature
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.observed_at
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.set_conditions(temperature, self.humidity);
    }

    pub fn set_humidity(&mut self, humidity: f64) {
        self.set_conditions(self.temperature, humidity);
    }

    /// Update temperature and humidity together, recomputing the wet-bulb value once
    pub fn set_conditions(&mut self, temperature: f64, humidity: f64) {
        self.temperature = temperature;
        self.humidity = humidity;
        self.wet_bulb_temperature = estimate_wet_bulb_temperature(temperature, humidity);
    }

    pub fn set_wind(&mut self, wind_speed: f64, wind_direction: f64) {
        self.wind_speed = wind_speed;
        self.wind_direction = wind_direction;
    }
}
