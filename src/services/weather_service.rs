//! Weather Service
//!
//! Serves templated weather data; no upstream provider is called.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_CITY: &str = "London";

const CITIES: [&str; 10] = [
    "London",
    "New York",
    "Tokyo",
    "Berlin",
    "Paris",
    "Sydney",
    "Toronto",
    "Amsterdam",
    "Barcelona",
    "Singapore",
];

/// One day of the forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub temp: i32,
    pub condition: String,
}

/// Current conditions plus a short forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    pub location: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
    pub air_quality: Option<String>,
    pub forecast: Vec<ForecastDay>,
    pub timestamp: DateTime<Utc>,
}

/// Weather service for business logic
pub struct WeatherService;

impl WeatherService {
    /// Weather with forecast and air quality for `city`
    pub fn enhanced(city: &str) -> WeatherData {
        info!("WeatherService::enhanced - {}", city);

        let forecast = [("Today", 22, "Sunny"), ("Tomorrow", 20, "Cloudy"), ("Day 3", 18, "Rain")]
            .into_iter()
            .map(|(day, temp, condition)| ForecastDay {
                day: day.to_string(),
                temp,
                condition: condition.to_string(),
            })
            .collect();

        WeatherData {
            location: city.to_string(),
            temperature: 22.5,
            description: "Partly cloudy".to_string(),
            humidity: 65,
            wind_speed: 5.2,
            air_quality: Some("Good".to_string()),
            forecast,
            timestamp: Utc::now(),
        }
    }

    /// Cities the dashboard offers in its picker
    pub fn cities() -> &'static [&'static str] {
        &CITIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhanced_echoes_city() {
        let weather = WeatherService::enhanced("Tokyo");
        assert_eq!(weather.location, "Tokyo");
        assert_eq!(weather.forecast.len(), 3);
        assert_eq!(weather.forecast[0].day, "Today");
        assert_eq!(weather.air_quality.as_deref(), Some("Good"));
    }

    #[test]
    fn test_cities_include_default() {
        assert_eq!(WeatherService::cities().len(), 10);
        assert!(WeatherService::cities().contains(&DEFAULT_CITY));
    }
}
