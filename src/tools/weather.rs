//! `get_weather` tool backed by OpenWeatherMap, with a demo fallback.
//!
//! Without a key the tool never touches the network and answers from a
//! fixed table of five cities; any other city gets a generic placeholder.
//! Both demo variants carry a `[DEMO DATA]` label and a note on how to
//! enable live data.

use super::traits::{ParamType, Tool, ToolArgs, ToolDescriptor, ToolInput, ToolOutput};
use crate::config::WeatherSource;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Canonical tool name for the weather tool.
pub const GET_WEATHER: &str = "get_weather";

const DEMO_NOTE: &str = "💡 Note: This is demo data. Get real-time weather by setting OPENWEATHER_API_KEY environment variable.";

/// Pressure reported for every demo city.
const DEMO_PRESSURE_HPA: f64 = 1013.0;

struct DemoCity {
    key: &'static str,
    temp: f64,
    feels_like: f64,
    description: &'static str,
    humidity: f64,
    wind: f64,
}

/// Demo readings, keyed by lower-cased city name.
#[rustfmt::skip]
const DEMO_CITIES: &[DemoCity] = &[
    DemoCity { key: "london", temp: 15.0, feels_like: 13.0, description: "partly cloudy", humidity: 75.0, wind: 3.2 },
    DemoCity { key: "new york", temp: 22.0, feels_like: 24.0, description: "sunny", humidity: 60.0, wind: 2.1 },
    DemoCity { key: "tokyo", temp: 18.0, feels_like: 19.0, description: "clear sky", humidity: 65.0, wind: 1.8 },
    DemoCity { key: "paris", temp: 16.0, feels_like: 15.0, description: "light rain", humidity: 80.0, wind: 4.5 },
    DemoCity { key: "sydney", temp: 25.0, feels_like: 27.0, description: "sunny", humidity: 55.0, wind: 2.8 },
];

/// Where a report's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOrigin {
    Live,
    /// A city from the demo table.
    Demo,
    /// Generic values for a city the demo table doesn't know.
    Placeholder,
}

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    /// °C
    pub temperature: f64,
    /// °C
    pub feels_like: f64,
    pub description: String,
    /// Percent, 0-100.
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// hPa
    pub pressure: f64,
    pub timestamp: String,
    pub origin: ReportOrigin,
}

impl WeatherReport {
    pub fn render(&self) -> String {
        let header = match self.origin {
            ReportOrigin::Live => {
                format!("🌤️ Current Weather in {} ({})", self.city, self.timestamp)
            }
            ReportOrigin::Demo => format!(
                "🌤️ Current Weather in {} ({}) [DEMO DATA]",
                self.city, self.timestamp
            ),
            ReportOrigin::Placeholder => format!(
                "🌤️ Weather for {} ({}) [DEMO DATA]",
                self.city, self.timestamp
            ),
        };

        let mut out = format!(
            "{header}\n\n\
             🌡️ Temperature: {}°C (feels like {}°C)\n\
             ☁️ Conditions: {}\n\
             💧 Humidity: {}%\n\
             🌪️ Wind Speed: {} m/s\n\
             📊 Pressure: {} hPa",
            self.temperature,
            self.feels_like,
            title_case(&self.description),
            self.humidity,
            self.wind_speed,
            self.pressure,
        );

        if self.origin != ReportOrigin::Live {
            out.push_str("\n\n");
            out.push_str(DEMO_NOTE);
        }
        out
    }
}

/// Weather failures, kept apart until rendered.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Connect, timeout, DNS or non-2xx status.
    #[error("{0}")]
    Network(String),

    /// A successful response lacked an expected field.
    #[error("Missing field {0}")]
    MissingField(String),

    /// Body was not JSON or a field had the wrong type.
    #[error("{0}")]
    Decode(String),
}

impl WeatherError {
    /// Text handed to the model in place of a report.
    pub fn render(&self, city: &str) -> String {
        match self {
            Self::Network(detail) => format!("Error getting weather for {}: {}", city, detail),
            Self::MissingField(_) => format!("Error parsing weather data for {}: {}", city, self),
            Self::Decode(detail) => {
                format!("Unexpected error getting weather for {}: {}", city, detail)
            }
        }
    }
}

/// Report from the demo table, or the placeholder for unknown cities.
pub fn demo_report(city: &str, timestamp: &str) -> WeatherReport {
    let key = city.to_lowercase();
    match DEMO_CITIES.iter().find(|c| c.key == key) {
        Some(c) => WeatherReport {
            city: title_case(city),
            temperature: c.temp,
            feels_like: c.feels_like,
            description: c.description.into(),
            humidity: c.humidity,
            wind_speed: c.wind,
            pressure: DEMO_PRESSURE_HPA,
            timestamp: timestamp.into(),
            origin: ReportOrigin::Demo,
        },
        None => WeatherReport {
            city: city.into(),
            temperature: 20.0,
            feels_like: 21.0,
            description: "Partly Cloudy".into(),
            humidity: 70.0,
            wind_speed: 2.5,
            pressure: DEMO_PRESSURE_HPA,
            timestamp: timestamp.into(),
            origin: ReportOrigin::Placeholder,
        },
    }
}

/// Extract a report from an OpenWeatherMap current-weather response.
pub fn parse_weather(
    data: &Value,
    city: &str,
    timestamp: &str,
) -> Result<WeatherReport, WeatherError> {
    Ok(WeatherReport {
        city: city.into(),
        temperature: number_at(data, &["main", "temp"])?,
        feels_like: number_at(data, &["main", "feels_like"])?,
        humidity: number_at(data, &["main", "humidity"])?,
        pressure: number_at(data, &["main", "pressure"])?,
        description: description_at(data)?,
        wind_speed: number_at(data, &["wind", "speed"])?,
        timestamp: timestamp.into(),
        origin: ReportOrigin::Live,
    })
}

/// Walk `path` through nested objects. Only an object lacking a key is a
/// missing field; any other node in the way is a decode error.
fn field_at<'a>(data: &'a Value, path: &[&str]) -> Result<&'a Value, WeatherError> {
    let mut v = data;
    for (i, key) in path.iter().enumerate() {
        let obj = v.as_object().ok_or_else(|| {
            WeatherError::Decode(format!("field {} is not an object", parent_path(path, i)))
        })?;
        v = obj
            .get(*key)
            .ok_or_else(|| WeatherError::MissingField(path[..=i].join(".")))?;
    }
    Ok(v)
}

fn parent_path(path: &[&str], i: usize) -> String {
    if i == 0 {
        "<root>".to_string()
    } else {
        path[..i].join(".")
    }
}

fn number_at(data: &Value, path: &[&str]) -> Result<f64, WeatherError> {
    field_at(data, path)?.as_f64().ok_or_else(|| {
        WeatherError::Decode(format!("field {} is not a number", path.join(".")))
    })
}

fn description_at(data: &Value) -> Result<String, WeatherError> {
    let list = field_at(data, &["weather"])?
        .as_array()
        .ok_or_else(|| WeatherError::Decode("field weather is not a list".into()))?;
    let first = list
        .first()
        .ok_or_else(|| WeatherError::MissingField("weather[0]".into()))?;
    let description = first
        .as_object()
        .ok_or_else(|| WeatherError::Decode("field weather[0] is not an object".into()))?
        .get("description")
        .ok_or_else(|| WeatherError::MissingField("weather[0].description".into()))?;
    description.as_str().map(str::to_string).ok_or_else(|| {
        WeatherError::Decode("field weather[0].description is not a string".into())
    })
}

/// Capitalize the first letter of every word, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current weather for a city.
pub struct WeatherTool {
    descriptor: ToolDescriptor,
    http: reqwest::Client,
    endpoint: String,
    source: WeatherSource,
}

impl WeatherTool {
    /// `http` should carry the request timeout.
    pub fn new(http: reqwest::Client, endpoint: &str, source: WeatherSource) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: GET_WEATHER.into(),
                description: "Gets current weather information for a specific city. Use this when someone asks about weather conditions, temperature, or weather forecasts for any location.".into(),
                inputs: vec![ToolInput::string(
                    "city",
                    "The name of the city to get weather for (e.g., 'London', 'New York', 'Tokyo')",
                )],
                output_type: ParamType::String,
            },
            http,
            endpoint: endpoint.to_string(),
            source,
        }
    }

    /// Look up current conditions for `city`.
    pub async fn report(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = match &self.source {
            WeatherSource::Demo => return Ok(demo_report(city, &now_stamp())),
            WeatherSource::Live { api_key } => api_key,
        };

        debug!("Weather lookup: {}", city);

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| WeatherError::Network(super::error_chain(&e)))?;

        let body = resp
            .text()
            .await
            .map_err(|e| WeatherError::Network(super::error_chain(&e)))?;
        let data: Value =
            serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))?;

        parse_weather(&data, city, &now_stamp())
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, args: &ToolArgs) -> ToolOutput {
        let city = match args.text("city") {
            Ok(c) => c,
            Err(e) => return ToolOutput::Text(format!("Error: {}", e)),
        };

        let text = match self.report(city).await {
            Ok(report) => report.render(),
            Err(e) => e.render(city),
        };
        ToolOutput::Text(text)
    }
}
