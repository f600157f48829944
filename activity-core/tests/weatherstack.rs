use activity_core::{
    ActivityAdvisor, ActivityBucket, Error, Location, SimpleActivityAdvisor, WeatherSource,
    provider::weatherstack::WeatherstackSource,
};
use serde_json::json;
use std::{
    io,
    sync::{Arc, Mutex},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn source_for(server: &MockServer) -> WeatherstackSource {
    WeatherstackSource::builder("fake_api_key".to_string())
        .endpoint(format!("{}/current", server.uri()))
        .build()
        .expect("client builds")
}

fn partly_cloudy() -> serde_json::Value {
    json!({
        "location": {"name": "Paris", "country": "France", "region": "Ile-de-France"},
        "current": {
            "temperature": 75,
            "weather_descriptions": ["Partly Cloudy"],
            "precip": 0
        }
    })
}

#[tokio::test]
async fn fetch_conditions_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current"))
        .and(query_param("access_key", "fake_api_key"))
        .and(query_param("query", "Paris, France"))
        .and(query_param("units", "f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(partly_cloudy()))
        .expect(1)
        .mount(&server)
        .await;

    let report = source_for(&server)
        .fetch_conditions(&Location::new("Paris", "France"))
        .await
        .expect("fetch succeeds");

    assert_eq!(report.temperature_f, 75.0);
    assert_eq!(report.primary_condition(), Some("Partly Cloudy"));
    assert_eq!(report.precip_in, 0.0);
}

#[tokio::test]
async fn fetch_conditions_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": {"info": "Invalid API key."}})),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_conditions(&Location::from_query("TestCity"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UpstreamRejection { .. }));
    assert!(err.to_string().contains("Invalid API key."));
}

#[tokio::test]
async fn fetch_conditions_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_conditions(&Location::new("Paris", "France"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let source = WeatherstackSource::builder("fake_api_key".to_string())
        .endpoint("http://127.0.0.1:1/current")
        .timeout(Some(std::time::Duration::from_secs(5)))
        .build()
        .unwrap();
    let err = source.fetch_conditions(&Location::new("Paris", "France")).await.unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(!err.to_string().contains("fake_api_key"));
}

#[tokio::test]
async fn missing_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"current": {"temperature": 75, "precip": 0}})),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_conditions(&Location::new("Paris", "France"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
}

#[tokio::test]
async fn repeated_fetches_are_identical() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(partly_cloudy()))
        .expect(2)
        .mount(&server)
        .await;

    let source = source_for(&server);
    let location = Location::new("Paris", "France");

    let first = source.fetch_conditions(&location).await.unwrap();
    let second = source.fetch_conditions(&location).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn fetched_report_feeds_the_advisor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(partly_cloudy()))
        .mount(&server)
        .await;

    let report = source_for(&server)
        .fetch_conditions(&Location::new("Paris", "France"))
        .await
        .unwrap();
    let rec = SimpleActivityAdvisor::new().recommend(&report).unwrap();

    assert_eq!(rec.bucket, ActivityBucket::Warm);
    assert!(ActivityBucket::Warm.candidates().contains(&rec.activity));
    assert_eq!(rec.weather_condition, "Partly Cloudy");
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[tokio::test]
async fn transport_failure_log_omits_access_key() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let source = WeatherstackSource::builder("SUPERSECRETKEY".to_string())
        .endpoint("http://127.0.0.1:1/current")
        .timeout(Some(std::time::Duration::from_secs(5)))
        .build()
        .unwrap();
    let err = source.fetch_conditions(&Location::new("Paris", "France")).await.unwrap_err();

    let captured = log.contents();
    assert!(captured.contains("weatherstack request failed"), "log was: {captured}");
    assert!(!captured.contains("SUPERSECRETKEY"), "log was: {captured}");
    assert!(!err.to_string().contains("SUPERSECRETKEY"));
}
