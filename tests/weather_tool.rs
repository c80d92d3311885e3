//! get_weather in demo mode and against a mocked OpenWeatherMap.

use agent_tools::config::WeatherSource;
use agent_tools::tools::{Tool, ToolArgs, ToolOutput, WeatherTool};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder().timeout(timeout).build().unwrap()
}

fn live(key: &str) -> WeatherSource {
    WeatherSource::Live {
        api_key: key.into(),
    }
}

async fn invoke(tool: &WeatherTool, city: &str) -> String {
    let args = ToolArgs::validate(tool.descriptor(), &json!({ "city": city })).unwrap();
    match tool.invoke(&args).await {
        ToolOutput::Text(text) => text,
        other => panic!("expected text output, got {other:?}"),
    }
}

#[tokio::test]
async fn demo_mode_never_calls_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let tool = WeatherTool::new(
        client(Duration::from_secs(10)),
        &server.uri(),
        WeatherSource::Demo,
    );

    let london = invoke(&tool, "LoNdOn").await;
    assert!(london.contains("Current Weather in London"));
    assert!(london.contains("Temperature: 15°C (feels like 13°C)"));
    assert!(london.contains("Conditions: Partly Cloudy"));
    assert!(london.contains("Humidity: 75%"));
    assert!(london.contains("Wind Speed: 3.2 m/s"));
    assert!(london.contains("[DEMO DATA]"));
    assert!(london.contains("This is demo data"));

    let unknown = invoke(&tool, "Atlantis").await;
    assert!(unknown.contains("Weather for Atlantis"));
    assert!(unknown.contains("Temperature: 20°C"));
    assert!(unknown.contains("Humidity: 70%"));
    assert!(unknown.contains("Conditions: Partly Cloudy"));
    assert!(unknown.contains("This is demo data"));
}

#[tokio::test]
async fn live_lookup_sends_metric_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "New Delhi"))
        .and(query_param("appid", "secret"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{"id": 721, "main": "Haze", "description": "haze"}],
            "main": {"temp": 31.05, "feels_like": 35.2, "humidity": 62, "pressure": 1004},
            "wind": {"speed": 2.06, "deg": 270},
            "name": "New Delhi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tool = WeatherTool::new(
        client(Duration::from_secs(10)),
        &format!("{}/data/2.5/weather", server.uri()),
        live("secret"),
    );
    let out = invoke(&tool, "New Delhi").await;

    assert!(out.starts_with("🌤️ Current Weather in New Delhi ("));
    assert!(out.contains("Temperature: 31.05°C (feels like 35.2°C)"));
    assert!(out.contains("Conditions: Haze"));
    assert!(out.contains("Humidity: 62%"));
    assert!(out.contains("Wind Speed: 2.06 m/s"));
    assert!(out.contains("Pressure: 1004 hPa"));
    assert!(!out.contains("DEMO"));
}

#[tokio::test]
async fn missing_field_is_reported_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{"description": "clear sky"}],
            "main": {"temp": 20.0, "feels_like": 19.0, "humidity": 40, "pressure": 1015}
        })))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(client(Duration::from_secs(10)), &server.uri(), live("k"));
    let out = invoke(&tool, "Madrid").await;

    assert_eq!(
        out,
        "Error parsing weather data for Madrid: Missing field wind.speed"
    );
}

#[tokio::test]
async fn unknown_city_status_is_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let tool = WeatherTool::new(client(Duration::from_secs(10)), &server.uri(), live("k"));
    let out = invoke(&tool, "Nowhere").await;

    assert!(out.starts_with("Error getting weather for Nowhere: "));
    assert!(out.contains("404"));
}

#[tokio::test]
async fn timeout_becomes_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(client(Duration::from_millis(200)), &server.uri(), live("k"));
    let out = invoke(&tool, "Tokyo").await;

    assert!(
        out.starts_with("Error getting weather for Tokyo: "),
        "unexpected output: {out}"
    );
}
