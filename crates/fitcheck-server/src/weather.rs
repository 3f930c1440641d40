//! Current weather lookup
//!
//! Reports carry the band the temperature falls in so they can feed the
//! outfit engine directly.

use crate::config::WeatherConfig;
use async_trait::async_trait;
use fitcheck_core::{Error, Result, WeatherBand};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Weather snapshot for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Degrees Celsius, rounded
    pub temperature: i64,
    pub condition: String,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub weather_category: WeatherBand,
    pub city: String,
    pub recommendation: String,
}

impl WeatherReport {
    /// Build a report from raw observations; the band uses the unrounded temperature
    pub fn from_observation(
        city: impl Into<String>,
        celsius: f64,
        condition: &str,
        description: &str,
        humidity: f64,
        wind_speed: f64,
    ) -> Self {
        Self {
            temperature: celsius.round() as i64,
            condition: condition.to_lowercase(),
            description: title_case(description),
            humidity,
            wind_speed,
            weather_category: WeatherBand::from_temperature(celsius),
            city: city.into(),
            recommendation: recommendation_for(celsius).to_string(),
        }
    }

    /// Report served when no provider is configured or the provider fails
    pub fn mock() -> Self {
        Self {
            temperature: 22,
            condition: "clear".to_string(),
            description: "Clear Sky".to_string(),
            humidity: 60.0,
            wind_speed: 5.0,
            weather_category: WeatherBand::Mild,
            city: "Demo Location".to_string(),
            recommendation: "Perfect weather for light layers".to_string(),
        }
    }
}

/// Clothing advice for an air temperature, on the same thresholds as the bands
pub fn recommendation_for(celsius: f64) -> &'static str {
    match WeatherBand::from_temperature(celsius) {
        WeatherBand::Hot => "Light, breathable fabrics recommended",
        WeatherBand::Warm => "Comfortable light layers work well",
        WeatherBand::Mild => "Light jacket or sweater recommended",
        WeatherBand::Cool => "Warm layers and outerwear needed",
        _ => "Heavy winter clothing recommended",
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Source of current weather
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider name for logs and responses
    fn name(&self) -> &str;

    async fn current(&self, city: &str) -> Result<WeatherReport>;
}

/// OpenWeather current-conditions client (metric units)
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::upstream(format!("Failed to build weather client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
    #[serde(default)]
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    #[serde(default)]
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    fn name(&self) -> &str {
        "openweather"
    }

    async fn current(&self, city: &str) -> Result<WeatherReport> {
        let response = self
            .http
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| Error::upstream(format!("Weather request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(format!("Weather provider returned {}", status)));
        }

        let body: CurrentWeather = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("Unexpected weather payload: {}", e)))?;

        let (condition, description) = body
            .weather
            .first()
            .map(|c| (c.main.as_str(), c.description.as_str()))
            .unwrap_or(("clear", "clear sky"));

        debug!(city, temperature = body.main.temp, condition, "Fetched current weather");

        Ok(WeatherReport::from_observation(
            city,
            body.main.temp,
            condition,
            description,
            body.main.humidity,
            body.wind.speed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_uses_unrounded_temperature() {
        let report = WeatherReport::from_observation("Oslo", 24.6, "Clouds", "broken clouds", 70.0, 3.2);

        assert_eq!(report.temperature, 25);
        assert_eq!(report.weather_category, WeatherBand::Warm);
        assert_eq!(report.condition, "clouds");
        assert_eq!(report.description, "Broken Clouds");
        assert_eq!(report.recommendation, "Comfortable light layers work well");
    }

    #[test]
    fn test_recommendation_thresholds() {
        assert_eq!(recommendation_for(30.0), "Light, breathable fabrics recommended");
        assert_eq!(recommendation_for(15.0), "Light jacket or sweater recommended");
        assert_eq!(recommendation_for(5.0), "Warm layers and outerwear needed");
        assert_eq!(recommendation_for(-3.0), "Heavy winter clothing recommended");
    }

    #[test]
    fn test_mock_report() {
        let report = WeatherReport::mock();
        assert_eq!(report.city, "Demo Location");
        assert_eq!(report.weather_category, WeatherBand::Mild);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weather_category"], "mild");
        assert_eq!(json["temperature"], 22);
    }

    #[test]
    fn test_parses_provider_payload() {
        let payload = r#"{
            "main": {"temp": 3.4, "humidity": 81},
            "weather": [{"main": "Snow", "description": "light snow"}],
            "wind": {"speed": 6.1},
            "name": "Tromso"
        }"#;
        let body: CurrentWeather = serde_json::from_str(payload).unwrap();

        assert_eq!(body.main.temp, 3.4);
        assert_eq!(body.weather[0].main, "Snow");
        assert_eq!(body.wind.speed, 6.1);
    }
}
