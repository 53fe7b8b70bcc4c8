//! Weather tool: synthetic current conditions for a city.
//!
//! Arguments are `city` or `city,units` where units is `metric` (default)
//! or `imperial`. Values are derived from a hash of the city name, so the
//! same city always reports the same weather.

use async_trait::async_trait;
use reactloop_core::catalog::ParameterDescriptor;
use reactloop_core::error::ToolError;
use reactloop_core::tool::Tool;
use serde::Serialize;

const CONDITIONS: [&str; 8] = [
    "Clear skies",
    "Partly cloudy",
    "Overcast",
    "Light rain",
    "Heavy rain",
    "Thunderstorms",
    "Snow",
    "Foggy",
];

const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Units {
    Metric,
    Imperial,
}

impl Units {
    fn parse(raw: &str) -> Result<Self, ToolError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "metric" | "c" => Ok(Self::Metric),
            "imperial" | "f" => Ok(Self::Imperial),
            other => Err(ToolError::InvalidArguments(format!(
                "unknown units '{other}', expected metric or imperial"
            ))),
        }
    }
}

pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Get current weather for a city. Pass the city name, optionally followed by ',imperial'."
    }

    fn parameters(&self) -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::required("city", "string", "City name"),
            ParameterDescriptor::optional("units", "string", "metric (default) or imperial"),
        ]
    }

    async fn execute(&self, args: &str) -> Result<String, ToolError> {
        let (city, units) = match args.split_once(',') {
            Some((city, units)) => (city.trim(), Units::parse(units)?),
            None => (args.trim(), Units::Metric),
        };
        if city.is_empty() {
            return Err(ToolError::InvalidArguments("missing city".into()));
        }

        let report = Report::for_city(city, units);
        serde_json::to_string(&report).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct Report {
    city: String,
    temperature: f64,
    units: &'static str,
    conditions: &'static str,
    humidity: u32,
    wind_speed: f64,
    wind_direction: &'static str,
}

impl Report {
    fn for_city(city: &str, units: Units) -> Self {
        let seed = city
            .to_lowercase()
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));

        // -5 to 34 °C
        let celsius = f64::from(seed % 40) - 5.0;
        let wind_kmh = f64::from(seed % 30) + 5.0;

        let (temperature, label, wind_speed) = match units {
            Units::Metric => (celsius, "°C", wind_kmh),
            Units::Imperial => (celsius * 9.0 / 5.0 + 32.0, "°F", wind_kmh * 0.621_371),
        };

        Self {
            city: city.to_string(),
            temperature: round1(temperature),
            units: label,
            conditions: CONDITIONS[(seed as usize / 7) % CONDITIONS.len()],
            humidity: 30 + seed % 60,
            wind_speed: round1(wind_speed),
            wind_direction: WIND_DIRECTIONS[(seed as usize / 3) % WIND_DIRECTIONS.len()],
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
