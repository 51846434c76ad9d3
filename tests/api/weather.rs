use crate::helpers::{spawn_app, spawn_app_with, PROVIDER_PATH, TEST_API_KEY};
use approx::assert_relative_eq;
use claims::assert_ok;
use fake::faker::address::en::CityName;
use fake::Fake;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;
use weather_lookup::WeatherResult;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const MISSING_INPUT: &str = "Enter Something in the search text box";
const TRANSPORT_FAILURE: &str = "Cant fetch data from the weathermap API";
const INCOMPLETE_DATA: &str = "Unable to get the data :( TRY AGAIN";

fn provider_payload(temp: f64, description: &str, name: &str) -> Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 800, "main": "Clear", "description": description, "icon": "01d"}],
        "base": "stations",
        "main": {"temp": temp, "feels_like": temp - 1.0, "pressure": 1012, "humidity": 52},
        "name": name,
        "cod": 200
    })
}

#[tokio::test]
async fn lookup_returns_normalized_weather() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .and(query_param("q", "London"))
        .and(query_param("appid", TEST_API_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(provider_payload(300.15, "clear sky", "London,GB")),
        )
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("London").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"temperature": 300.15, "description": "clear sky", "cityName": "London,GB"})
    );

    let result: WeatherResult = assert_ok!(serde_json::from_value(body));
    assert_relative_eq!(result.temperature(), 300.15);
}

#[tokio::test]
async fn missing_location_is_rejected_without_provider_call() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.weather_server)
        .await;

    let test_cases = vec![
        ("", "no query string"),
        ("?address=", "empty address"),
        ("?address=%20%20%20", "spaces only"),
        ("?address=%09%0A", "tab and newline"),
        ("?other=London", "unrelated parameter"),
    ];

    for (query, description) in test_cases {
        let response = app.get_weather_raw(query).await;

        assert_eq!(
            response.status().as_u16(),
            200,
            "The API did not answer 200 OK when the request had {description}."
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({"error": MISSING_INPUT}),
            "The API did not report missing input when the request had {description}."
        );
    }
}

#[tokio::test]
async fn location_parameter_is_accepted_as_alias() {
    let app = spawn_app().await;

    Mock::given(path(PROVIDER_PATH))
        .and(query_param("q", "Lisbon"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(provider_payload(295.0, "few clouds", "Lisbon")),
        )
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather_raw("?location=Lisbon").await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["cityName"], json!("Lisbon"));
}

#[tokio::test]
async fn location_is_trimmed_before_lookup() {
    let app = spawn_app().await;

    Mock::given(path(PROVIDER_PATH))
        .and(query_param("q", "Oslo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_payload(270.0, "snow", "Oslo")))
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("  Oslo  ").await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["description"], json!("snow"));
}

#[tokio::test]
async fn special_characters_reach_provider_intact() {
    let app = spawn_app().await;
    let location = "São Paulo, BR & Co/+%?#";

    Mock::given(path(PROVIDER_PATH))
        .and(query_param("q", location))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(provider_payload(299.0, "haze", "São Paulo")),
        )
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather(location).await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["cityName"], json!("São Paulo"));
}

#[tokio::test]
async fn missing_temperature_reports_incomplete_data() {
    let app = spawn_app().await;

    let mut payload = provider_payload(280.0, "mist", "Dublin");
    payload["main"].as_object_mut().unwrap().remove("temp");

    Mock::given(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("Dublin").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": INCOMPLETE_DATA}));
}

#[tokio::test]
async fn incomplete_payloads_report_incomplete_data() {
    let app = spawn_app().await;

    let test_cases = vec![
        (json!({"weather": [{"description": "mist"}], "name": "Cork"}), "no main block"),
        (json!({"main": {"temp": 280.0}, "weather": [], "name": "Cork"}), "no conditions"),
        (json!({"main": {"temp": 280.0}, "weather": [{"description": "mist"}]}), "no name"),
        (json!({"main": {"temp": null}, "weather": [{"description": "mist"}], "name": "Cork"}), "null temp"),
        (json!({"main": {"temp": 280.0}, "weather": [{"main": "Mist"}], "name": "Cork"}), "no description"),
        (json!({"main": {"temp": 280.0}, "weather": [{"description": null}], "name": "Cork"}), "null description"),
        (json!({"main": {"temp": 280.0}, "weather": [{"description": "mist"}], "name": null}), "null name"),
    ];

    for (payload, description) in test_cases {
        app.weather_server.reset().await;
        Mock::given(path(PROVIDER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&app.weather_server)
            .await;

        let response = app.get_weather("Cork").await;

        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({"error": INCOMPLETE_DATA}),
            "The API did not report incomplete data when the payload had {description}."
        );
    }
}

#[tokio::test]
async fn only_leading_condition_is_read() {
    let app = spawn_app().await;

    let mut payload = provider_payload(281.0, "drizzle", "Cork");
    payload["weather"].as_array_mut().unwrap().push(json!({"description": 7}));

    Mock::given(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("Cork").await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"temperature": 281.0, "description": "drizzle", "cityName": "Cork"})
    );
}

#[tokio::test]
async fn provider_not_found_reports_incomplete_data() {
    let app = spawn_app().await;

    Mock::given(path(PROVIDER_PATH))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("Atlantis").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": INCOMPLETE_DATA}));
}

#[tokio::test]
async fn zero_temperature_is_valid_data() {
    let app = spawn_app().await;

    Mock::given(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_payload(0.0, "snow", "Vostok")))
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("Vostok").await;

    let body: Value = response.json().await.unwrap();
    let result: WeatherResult = assert_ok!(serde_json::from_value(body));
    assert_eq!(result, WeatherResult::new(0.0, "snow", "Vostok"));
}

#[tokio::test]
async fn non_json_provider_response_reports_transport_failure() {
    let app = spawn_app().await;

    Mock::given(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("Berlin").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": TRANSPORT_FAILURE}));
}

#[tokio::test]
async fn unreachable_provider_reports_transport_failure() {
    // nothing listens on port 9 (discard) on test hosts
    let app = spawn_app_with(|settings| {
        settings.weather.base_url = Url::parse("http://127.0.0.1:9/data/2.5/weather").unwrap();
    })
    .await;

    let response = app.get_weather("Berlin").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": TRANSPORT_FAILURE}));
}

#[tokio::test]
async fn slow_provider_reports_transport_failure() {
    let app = spawn_app_with(|settings| {
        settings.weather.timeout = Duration::from_millis(250);
    })
    .await;

    Mock::given(path(PROVIDER_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(provider_payload(290.0, "clear sky", "Rome"))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather("Rome").await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": TRANSPORT_FAILURE}));
}

#[tokio::test]
async fn repeated_lookup_is_idempotent() {
    let app = spawn_app().await;
    let city: String = CityName().fake();

    Mock::given(path(PROVIDER_PATH))
        .and(query_param("q", city.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(provider_payload(287.5, "light rain", &city)),
        )
        .expect(2)
        .mount(&app.weather_server)
        .await;

    let first: Value = app.get_weather(&city).await.json().await.unwrap();
    let second: Value = app.get_weather(&city).await.json().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first["cityName"], json!(city));
}

#[tokio::test]
async fn duplicate_parameter_is_a_bad_request() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.weather_server)
        .await;

    let response = app.get_weather_raw("?address=Paris&address=Lyon").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid URL query input"));
}
