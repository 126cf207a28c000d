//! Application wiring tests against a mock backend.

use pulse_chart::{ChartBackend, ChartDataset, ChartInstance};
use pulse_client::{AppConfig, Application};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount successful responses for every endpoint the client touches.
async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;

    let ok_list = ResponseTemplate::new(200).set_body_json(serde_json::json!([]));
    for endpoint in [
        "/api/posts",
        "/api/trends",
        "/api/sources/stats",
        "/api/sources/runs",
    ] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ok_list.clone())
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/api/posts/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "source": "reddit", "hour": "2026-08-20T10:00:00", "count": 5 }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/posts/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_posts": 42,
            "posts_today": 5,
            "avg_engagement": 1.5,
            "per_source": {}
        })))
        .mount(&server)
        .await;

    // The push endpoint serves an empty stream that ends immediately;
    // a long reconnect delay in the test config keeps it quiet after.
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(""),
        )
        .mount(&server)
        .await;

    server
}

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        api_base_url: server.uri(),
        reconnect_delay_ms: 60_000,
        ..AppConfig::default()
    }
}

/// Chart backend that records every dataset handed to it.
#[derive(Clone, Default)]
struct RecordingBackend {
    datasets: Arc<Mutex<Vec<ChartDataset>>>,
}

struct NoopInstance;

impl ChartInstance for NoopInstance {
    fn dispose(&mut self) {}
}

impl ChartBackend for RecordingBackend {
    fn create(&self, dataset: &ChartDataset) -> Box<dyn ChartInstance> {
        self.datasets.lock().unwrap().push(dataset.clone());
        Box::new(NoopInstance)
    }
}

#[tokio::test]
async fn test_startup_runs_initial_fetch() {
    let server = mock_backend().await;
    let app = Application::new(config_for(&server)).unwrap();
    let store = app.store();
    let shutdown = app.shutdown_handle();

    let handle = tokio::spawn(app.run());

    tokio::time::timeout(Duration::from_secs(2), async {
        while store.stats().total_posts != 42 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("initial fetch did not populate the store");

    assert!(store.last_updated().is_some());
    assert!(!store.is_loading());

    shutdown.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_startup_fetch_renders_chart() {
    let server = mock_backend().await;
    let backend = RecordingBackend::default();
    let datasets = backend.datasets.clone();

    let app =
        Application::with_chart_backend(config_for(&server), Box::new(backend)).unwrap();
    let shutdown = app.shutdown_handle();

    let handle = tokio::spawn(app.run());

    // The activity rows from the very first fetch must reach the chart,
    // not wait for the next poll tick.
    tokio::time::timeout(Duration::from_secs(2), async {
        while datasets.lock().unwrap().is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("startup fetch did not render the activity chart");

    let first = datasets.lock().unwrap()[0].clone();
    assert_eq!(first.labels, vec!["10:00"]);
    assert_eq!(first.series.len(), 1);
    assert_eq!(first.series[0].source, "reddit");
    assert_eq!(first.series[0].points, vec![5]);

    shutdown.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_manual_trigger_while_running() {
    let server = mock_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/scraper/run/news"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "started"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = Application::new(config_for(&server)).unwrap();
    let store = app.store();
    let orchestrator = app.orchestrator();
    let shutdown = app.shutdown_handle();

    let handle = tokio::spawn(app.run());

    tokio::time::timeout(Duration::from_secs(2), async {
        while store.last_updated().is_none() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("initial fetch did not settle");

    // The orchestrator handle fires triggers while the loop owns the app.
    orchestrator.trigger_scrape("news").await;
    server.verify().await;

    shutdown.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_manual_trigger_refreshes() {
    let server = mock_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/scraper/run/reddit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "started"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = Application::new(config_for(&server)).unwrap();
    let store = app.store();

    app.trigger_scrape("reddit").await;

    // The trigger always chains into a full refresh.
    assert_eq!(store.stats().total_posts, 42);
    assert!(store.last_updated().is_some());
    server.verify().await;
}
