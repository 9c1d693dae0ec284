use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::LatLng;
use crate::weather::WeatherReading;

/// Operational status of a snowgun.
///
/// `Active` and `Inactive` are recognized; any other label is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Active,
    Inactive,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Other(label) => label,
        }
    }

    pub fn is_active(&self) -> bool {
        *self == Status::Active
    }
}

impl From<&str> for Status {
    fn from(label: &str) -> Self {
        match label {
            "Active" => Status::Active,
            "Inactive" => Status::Inactive,
            other => Status::Other(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        Status::from(label.as_str())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A snowmaking gun placed on a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snowgun {
    pub id: String,
    pub location: LatLng,
    pub status: Status,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub gun_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nozzle: Option<String>,
    /// Name of the run the gun sits on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrant_number: Option<u32>,
    /// Snapshot from the gun's edge weather station
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReading>,
}

impl Snowgun {
    pub fn new(id: impl Into<String>, location: LatLng, status: impl Into<Status>) -> Self {
        Self {
            id: id.into(),
            location,
            status: status.into(),
            gun_type: None,
            nozzle: None,
            run: None,
            hydrant_number: None,
            weather: None,
        }
    }

    pub fn with_type(mut self, gun_type: impl Into<String>) -> Self {
        self.gun_type = Some(gun_type.into());
        self
    }

    pub fn with_nozzle(mut self, nozzle: impl Into<String>) -> Self {
        self.nozzle = Some(nozzle.into());
        self
    }

    pub fn with_run(mut self, run: impl Into<String>) -> Self {
        self.run = Some(run.into());
        self
    }

    pub fn with_hydrant_number(mut self, hydrant_number: u32) -> Self {
        self.hydrant_number = Some(hydrant_number);
        self
    }

    pub fn with_weather(mut self, weather: WeatherReading) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Wet-bulb temperature from the attached weather snapshot, if any
    pub fn wet_bulb_temperature(&self) -> Option<f64> {
        self.weather.as_ref().map(WeatherReading::wet_bulb_temperature)
    }

    /// Set the run name from free text, stored exactly as typed
    pub fn set_run_name(&mut self, text: &str) {
        self.run = Some(text.to_string());
    }

    /// Parse and set the hydrant number from free text. The previous value is
    /// kept when the text is not a valid number.
    pub fn set_hydrant_number_from_text(&mut self, text: &str) -> Result<u32> {
        let hydrant_number: u32 = text
            .trim()
            .parse()
            .map_err(|_| anyhow!("Please enter a valid number for Hydrant Number (got {:?})", text))?;
        self.hydrant_number = Some(hydrant_number);
        Ok(hydrant_number)
    }
}
