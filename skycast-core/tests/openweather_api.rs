//! Integration tests for `OpenWeatherClient` against a mock HTTP server.

use serde_json::json;
use skycast_core::{
    Config, Favorites, MemoryStorage, OpenWeatherClient, Units, WeatherError, search,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> Config {
    Config {
        api_key: "test-key".to_string(),
        units: Units::Metric,
        base_url: base_url.to_string(),
    }
}

fn current_payload() -> serde_json::Value {
    json!({
        "name": "Paris",
        "dt": 1_700_000_000,
        "visibility": 10_000,
        "coord": {"lat": 48.85, "lon": 2.35},
        "main": {"temp": 20.4, "feels_like": 19.8, "humidity": 62, "pressure": 1015},
        "wind": {"speed": 4.1},
        "weather": [{"main": "Clouds", "description": "scattered clouds", "icon": "03d"}]
    })
}

/// One sample per day at 12:00 UTC for `days` consecutive days, so the
/// grouping count is the same in every time zone.
fn forecast_payload(days: i64) -> serde_json::Value {
    let noon = 1_700_000_000_i64 - (1_700_000_000 % 86_400) + 43_200;
    let list: Vec<serde_json::Value> = (0..days)
        .map(|i| {
            json!({
                "dt": noon + i * 86_400,
                "main": {"temp": 10.0 + i as f64},
                "weather": [{"main": "Rain", "icon": "10d"}]
            })
        })
        .collect();

    json!({"list": list})
}

#[tokio::test]
async fn fetch_current_parses_a_success_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let current = client.fetch_current("Paris").await.unwrap();

    assert_eq!(current.city, "Paris");
    assert_eq!(current.temperature, 20.4);
    assert_eq!(current.feels_like, 19.8);
    assert_eq!(current.humidity, 62);
    assert_eq!(current.pressure, 1015);
    assert_eq!(current.visibility, 10_000);
    assert_eq!(current.condition, "Clouds");
    assert_eq!(current.description, "scattered clouds");
    assert_eq!(current.icon, "03d");
    assert_eq!(current.lat, 48.85);
    assert_eq!(current.lon, 2.35);
    assert_eq!(current.observed_at.timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn a_404_maps_to_city_not_found_with_the_requested_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404", "message": "city not found"
        })))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let err = client.fetch_current("Zzzqx").await.unwrap_err();

    match err {
        WeatherError::CityNotFound(city) => assert_eq!(city, "Zzzqx"),
        other => panic!("expected CityNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn a_401_maps_to_invalid_credentials_regardless_of_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401, "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();

    for city in ["Paris", "Zzzqx"] {
        let err = client.fetch_current(city).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCredentials), "{city}: {err:?}");
    }
}

#[tokio::test]
async fn other_statuses_map_to_upstream_with_the_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let err = client.fetch_current("Paris").await.unwrap_err();

    match err {
        WeatherError::Upstream { status, .. } => assert_eq!(status, 503),
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn a_garbled_success_body_maps_to_bad_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let err = client.fetch_current("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::BadPayload(_)), "{err:?}");
}

#[tokio::test]
async fn a_placeholder_key_fails_before_any_request() {
    let server = MockServer::start().await;

    let config = Config { base_url: server.uri(), ..Config::default() };
    let client = OpenWeatherClient::new(config).unwrap();

    let err = client.fetch_current("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Configuration), "{err:?}");

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "no request should have been sent");
}

#[tokio::test]
async fn fetch_forecast_parses_samples() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(3)))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let samples = client.fetch_forecast(48.85, 2.35).await.unwrap();

    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].temperature, 10.0);
    assert_eq!(samples[0].condition, "Rain");
    assert_eq!(samples[0].icon, "10d");
    assert!(samples.windows(2).all(|w| w[0].dt < w[1].dt));
}

#[tokio::test]
async fn every_forecast_failure_collapses_to_forecast_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let err = client.fetch_forecast(48.85, 2.35).await.unwrap_err();
    assert!(matches!(err, WeatherError::ForecastUnavailable), "{err:?}");
}

#[tokio::test]
async fn forecast_decode_failure_also_collapses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let err = client.fetch_forecast(48.85, 2.35).await.unwrap_err();
    assert!(matches!(err, WeatherError::ForecastUnavailable), "{err:?}");
}

#[tokio::test]
async fn search_records_the_favorite_and_aggregates_the_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(7)))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let mut favorites = Favorites::new(MemoryStorage::new());

    let outcome = search(&client, &mut favorites, "  Paris  ").await.unwrap();

    assert_eq!(outcome.current.city, "Paris");

    // 7 distinct days upstream: the current day is dropped, the rest capped
    // at 5, whatever the local zone is.
    let days = outcome.forecast.expect("forecast present");
    assert_eq!(days.len(), 5);

    let entries = favorites.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].city, "Paris");
    assert_eq!(entries[0].temperature, 20);
}

#[tokio::test]
async fn search_survives_a_dead_forecast_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let mut favorites = Favorites::new(MemoryStorage::new());

    let outcome = search(&client, &mut favorites, "Paris").await.unwrap();

    assert_eq!(outcome.current.city, "Paris");
    assert!(outcome.forecast.is_none());
    // The favorite is still recorded; it only depends on current conditions.
    assert_eq!(favorites.list().unwrap().len(), 1);
}

#[tokio::test]
async fn search_rejects_blank_input_without_any_request() {
    let server = MockServer::start().await;

    let client = OpenWeatherClient::new(test_config(&server.uri())).unwrap();
    let mut favorites = Favorites::new(MemoryStorage::new());

    let err = search(&client, &mut favorites, "   ").await.unwrap_err();
    assert!(matches!(err, WeatherError::EmptyCity), "{err:?}");

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
    assert!(favorites.list().unwrap().is_empty());
}
