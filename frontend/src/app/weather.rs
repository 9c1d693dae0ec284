use anyhow::{anyhow, Result};
use openweathermap::OpenWeatherMapAPI;
use snowmaking::WeatherReading;

use crate::app::config::Config;

/// Weather readings for the list view, plus the last fetch error if any
#[derive(Debug, Clone, Default)]
pub struct WeatherPanel {
    pub readings: Vec<WeatherReading>,
    pub error_message: Option<String>,
}

impl WeatherPanel {
    fn failed(error: anyhow::Error) -> Self {
        Self {
            readings: Vec::new(),
            error_message: Some(format!("Error fetching weather data: {}", error)),
        }
    }
}

async fn fetch_readings(config: &Config) -> Result<Vec<WeatherReading>> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| anyhow!("no OpenWeatherMap API key configured"))?;

    let api = OpenWeatherMapAPI::new(api_key)?;
    let reading = api.fetch_weather_reading(&config.city).await?;

    // Further providers are appended here
    Ok(vec![reading])
}

/// Fetch every configured weather source. A failure leaves the list empty and
/// is reported in `error_message`; the dashboard keeps going.
pub async fn update_weather_panel(config: &Config) -> WeatherPanel {
    info!("Updating weather readings for {}...", config.city);

    match fetch_readings(config).await {
        Ok(readings) => {
            info!("Weather readings updated ({} sources)", readings.len());
            WeatherPanel {
                readings,
                error_message: None,
            }
        }
        Err(e) => {
            error!("Failed to fetch weather data: {}", e);
            WeatherPanel::failed(e)
        }
    }
}
