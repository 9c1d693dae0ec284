use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use snowmaking::WeatherReading;

/// Label attached to readings produced by this client
pub const SOURCE_NAME: &str = "OpenWeatherMap";

/// City used when nothing else is configured
pub const DEFAULT_CITY: &str = "Big Bear Lake,CA,US";

/// OpenWeatherMap current-conditions API client
pub struct OpenWeatherMapAPI {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Current conditions as returned by `/data/2.5/weather` with `units=imperial`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    /// City name resolved by the provider
    #[serde(default)]
    pub name: String,
    /// Observation time, unix seconds
    #[serde(default)]
    pub dt: Option<i64>,
    pub main: MainConditions,
    pub wind: Wind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MainConditions {
    /// Temperature in °F
    pub temp: f64,
    /// Relative humidity in %
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wind {
    /// Wind speed in mph
    pub speed: f64,
    /// Wind direction in degrees; calm reports can omit it
    #[serde(default)]
    pub deg: f64,
}

impl CurrentWeather {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Convert into a reading; the wet-bulb value is derived on the way
    pub fn to_reading(&self) -> WeatherReading {
        let reading = WeatherReading::new(
            SOURCE_NAME,
            self.main.temp,
            self.main.humidity,
            self.wind.speed,
            self.wind.deg,
        );
        match self.observed_at() {
            Some(observed_at) => reading.with_observed_at(observed_at),
            None => reading,
        }
    }
}

/// Parse a current-conditions response body
pub fn parse_current_weather(json: &str) -> Result<CurrentWeather> {
    serde_json::from_str(json).context("Unexpected OpenWeatherMap response")
}

impl OpenWeatherMapAPI {
    /// Create a new OpenWeatherMap API client
    pub fn new(api_key: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(anyhow!("OpenWeatherMap API key is empty"));
        }

        Ok(Self {
            client: Client::new(),
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Point the client at a different endpoint, e.g. a local mock
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch current conditions for a city query such as "Big Bear Lake,CA,US"
    pub async fn fetch_current_weather(&self, city: &str) -> Result<CurrentWeather> {
        let url = self.build_url(city, &self.api_key);
        let masked_url = self.build_url(city, "***");
        info!("Fetching current weather for {}", city);

        // reqwest errors carry the full URL, key included
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Request failed - URL: {}", masked_url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch weather: HTTP {} - URL: {}",
                response.status(),
                masked_url
            ));
        }

        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to read response - URL: {}", masked_url))?;
        let weather = parse_current_weather(&body)?;
        debug!(
            "{}: {} °F, {} %, wind {} mph @ {}°",
            weather.name, weather.main.temp, weather.main.humidity, weather.wind.speed, weather.wind.deg
        );
        Ok(weather)
    }

    /// Fetch current conditions and turn them into a [`WeatherReading`]
    pub async fn fetch_weather_reading(&self, city: &str) -> Result<WeatherReading> {
        let weather = self.fetch_current_weather(city).await?;
        Ok(weather.to_reading())
    }

    /// Build the request URL; the key is passed in so it can be masked in errors
    fn build_url(&self, city: &str, api_key: &str) -> String {
        let params = [("q", city), ("units", "imperial"), ("appid", api_key)];
        format!(
            "{}/weather?{}",
            self.base_url,
            serde_urlencoded::to_string(params).unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowmaking::estimate_wet_bulb_temperature;

    const SAMPLE: &str = r#"{
        "coord": {"lon": -116.9114, "lat": 34.2439},
        "weather": [{"id": 600, "main": "Snow", "description": "light snow", "icon": "13n"}],
        "main": {"temp": 27.3, "feels_like": 19.8, "pressure": 1018, "humidity": 72},
        "wind": {"speed": 6.91, "deg": 250},
        "dt": 1735700400,
        "name": "Big Bear Lake"
    }"#;

    #[test]
    fn test_url_construction() {
        let api = OpenWeatherMapAPI::new("abc123").unwrap();
        let url = api.build_url(DEFAULT_CITY, "abc123");
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/weather?q=Big+Bear+Lake%2CCA%2CUS&units=imperial&appid=abc123"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let api = OpenWeatherMapAPI::new("k")
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(
            api.build_url("Denver", "k"),
            "http://localhost:8080/weather?q=Denver&units=imperial&appid=k"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(OpenWeatherMapAPI::new("   ").is_err());
    }

    #[test]
    fn test_parse_sample_response() {
        let weather = parse_current_weather(SAMPLE).unwrap();
        assert_eq!(weather.name, "Big Bear Lake");
        assert_eq!(weather.main.temp, 27.3);
        assert_eq!(weather.main.humidity, 72.0);
        assert_eq!(weather.wind.speed, 6.91);
        assert_eq!(weather.wind.deg, 250.0);
        assert_eq!(weather.observed_at().unwrap().timestamp(), 1735700400);
    }

    #[test]
    fn test_reading_from_response() {
        let reading = parse_current_weather(SAMPLE).unwrap().to_reading();
        assert_eq!(reading.source_name(), SOURCE_NAME);
        assert_eq!(
            reading.wet_bulb_temperature(),
            estimate_wet_bulb_temperature(27.3, 72.0)
        );
        assert!(reading.observed_at().is_some());
    }

    #[test]
    fn test_calm_wind_without_direction() {
        let json = r#"{"main": {"temp": 30.0, "humidity": 80}, "wind": {"speed": 0.0}}"#;
        let weather = parse_current_weather(json).unwrap();
        assert_eq!(weather.wind.deg, 0.0);
        assert!(weather.observed_at().is_none());
        assert_eq!(weather.name, "");
    }

    #[test]
    fn test_missing_fields_are_errors() {
        assert!(parse_current_weather(r#"{"cod": 401, "message": "Invalid API key"}"#).is_err());
        assert!(parse_current_weather("not json").is_err());
    }

    /// Serve one canned HTTP response on a local port and return its base URL
    async fn serve_once(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_connection_error_hides_key() {
        // Bind then drop a listener so the port is closed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = OpenWeatherMapAPI::new("SUPERSECRETKEY")
            .unwrap()
            .with_base_url(&format!("http://{}", addr));
        let err = api.fetch_current_weather(DEFAULT_CITY).await.unwrap_err();

        let shown = format!("{:#}", err);
        assert!(!shown.contains("SUPERSECRETKEY"), "{}", shown);
        assert!(shown.contains("appid=***"), "{}", shown);
        assert!(!format!("{:?}", err).contains("SUPERSECRETKEY"));
    }

    #[tokio::test]
    async fn test_http_error_status_hides_key() {
        let base_url = serve_once(
            "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
        )
        .await;

        let api = OpenWeatherMapAPI::new("SUPERSECRETKEY")
            .unwrap()
            .with_base_url(&base_url);
        let err = api.fetch_current_weather(DEFAULT_CITY).await.unwrap_err();

        let shown = format!("{:#}", err);
        assert!(shown.contains("HTTP 401"), "{}", shown);
        assert!(shown.contains("appid=***"), "{}", shown);
        assert!(!shown.contains("SUPERSECRETKEY"), "{}", shown);
    }

    #[tokio::test]
    async fn test_fetch_from_local_server() {
        let base_url = serve_once(concat!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n",
            r#"{"main": {"temp": 27.3, "humidity": 72}, "wind": {"speed": 6.91, "deg": 250}, "name": "Big Bear Lake"}"#
        ))
        .await;

        let api = OpenWeatherMapAPI::new("key").unwrap().with_base_url(&base_url);
        let reading = api.fetch_weather_reading(DEFAULT_CITY).await.unwrap();
        assert_eq!(reading.temperature(), 27.3);
        assert_eq!(reading.humidity(), 72.0);
    }

    #[tokio::test]
    async fn test_api_creation() {
        let api = OpenWeatherMapAPI::new("key");
        assert!(api.is_ok());
    }
}
