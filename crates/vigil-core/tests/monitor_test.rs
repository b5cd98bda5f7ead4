// End-to-end Monitor behavior against a mocked backend.
//
// Uses real (short) timers where deferred refreshes are under test, so
// these tests trade a little wall-clock time for fidelity.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vigil_core::{CoreError, EventFilter, Monitor, MonitorConfig, Reading, SensorKind, Severity};

fn config_for(server: &MockServer, fast_poll: Duration) -> MonitorConfig {
    MonitorConfig {
        base_url: server.uri().parse().unwrap(),
        fast_poll,
        // Keep the sampling cycle out of the way unless a test opts in.
        sample_poll: None,
        ..MonitorConfig::default()
    }
}

fn login_body() -> serde_json::Value {
    serde_json::json!({
        "identity": "n.romanoff",
        "fullName": "Natasha Romanoff",
        "role": "SECURITY_OFFICER",
        "credentialToken": "tok-e2e-1",
    })
}

fn sensors_body() -> serde_json::Value {
    serde_json::json!([
        {
            "sensorId": "MOV-001",
            "type": "MOVEMENT",
            "location": "Vault corridor",
            "active": true,
            "lastCheck": "2026-08-25T09:00:00Z",
        },
        {
            "sensorId": "TEMP-001",
            "type": "TEMPERATURE",
            "location": "Server room",
            "active": false,
        },
    ])
}

fn event_body(id: i64, kind: &str, critical: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "eventType": "DETECTION",
        "description": "test event",
        "critical": critical,
        "detectedAt": "2026-08-25T09:30:00Z",
        "sensor": {
            "sensorId": "S-1",
            "type": kind,
            "location": "Vault",
            "active": true,
        },
    })
}

fn stats_body() -> serde_json::Value {
    serde_json::json!({
        "totalSensors": 2,
        "activeSensors": 1,
        "totalEvents": 2,
        "unprocessedCriticalEvents": 1,
    })
}

/// Mount the standard happy-path mocks: login plus the three refresh
/// endpoints.
async fn mount_backend(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            event_body(1, "MOVEMENT", false),
            event_body(2, "TEMPERATURE", true),
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(server)
        .await;
}

async fn login(monitor: &Monitor) {
    monitor
        .login("n.romanoff", SecretString::from("hunter2"))
        .await
        .unwrap();
}

async fn requests_to(server: &MockServer, wanted: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == wanted)
        .count()
}

// ── Session lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn login_loads_data_and_starts_polling() {
    let server = MockServer::start().await;
    mount_backend(&server).await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    assert!(!monitor.is_polling());

    login(&monitor).await;

    let session = monitor.current_session();
    assert!(session.is_authenticated());
    assert_eq!(
        session.session().map(|s| s.display_name().to_owned()),
        Some("Natasha Romanoff".to_owned())
    );
    assert!(monitor.is_polling());

    // Initial load completed before login() returned.
    assert_eq!(monitor.sensors_snapshot().len(), 2);
    assert_eq!(monitor.events_snapshot().len(), 2);
    assert_eq!(monitor.stats().unprocessed_critical_events, 1);

    let notes = monitor.notifications_snapshot();
    assert!(notes
        .iter()
        .any(|n| n.severity == Severity::Success && n.message.contains("Natasha Romanoff")));
}

#[tokio::test]
async fn failed_login_stays_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    let result = monitor
        .login("n.romanoff", SecretString::from("wrong"))
        .await;

    assert!(result.is_err());
    assert!(!monitor.current_session().is_authenticated());
    assert!(!monitor.is_polling());

    let notes = monitor.notifications_snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Error);
    assert!(notes[0].message.contains("Login failed"));
}

#[tokio::test]
async fn repeated_login_never_accumulates_poll_cycles() {
    let server = MockServer::start().await;
    mount_backend(&server).await;

    let monitor = Monitor::new(config_for(&server, Duration::from_millis(100))).unwrap();
    login(&monitor).await;
    login(&monitor).await;
    login(&monitor).await;
    assert!(monitor.is_polling());

    tokio::time::sleep(Duration::from_millis(350)).await;

    // One cycle: 3 initial loads + ~3-4 ticks. Three stacked cycles
    // would have produced well over a dozen stats fetches by now.
    let stats_calls = requests_to(&server, "/api/events/stats").await;
    assert!(
        (4..=9).contains(&stats_calls),
        "expected a single poll cycle, saw {stats_calls} stats fetches"
    );
}

#[tokio::test]
async fn logout_stops_polling_and_clears_session() {
    let server = MockServer::start().await;
    mount_backend(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Logged out"))
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_millis(100))).unwrap();
    login(&monitor).await;
    monitor.logout().await;

    assert!(!monitor.is_polling());
    assert!(!monitor.current_session().is_authenticated());
    assert_eq!(requests_to(&server, "/api/auth/logout").await, 1);

    // No further traffic after logout.
    let before = requests_to(&server, "/api/events/stats").await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    let after = requests_to(&server, "/api/events/stats").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn failed_relogin_tears_down_the_session() {
    let server = MockServer::start().await;
    // First login succeeds, every later attempt is rejected.
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_millis(100))).unwrap();
    login(&monitor).await;
    assert!(monitor.is_polling());

    let result = monitor
        .login("n.romanoff", SecretString::from("stale"))
        .await;
    assert!(matches!(result, Err(CoreError::InvalidCredentials)));

    // The previous session must be fully torn down: no live session,
    // no poll cycles, no further traffic with the old credential.
    assert!(!monitor.current_session().is_authenticated());
    assert!(!monitor.is_polling());

    // Let any refresh spawned before the teardown land first.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let before = requests_to(&server, "/api/events/stats").await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    let after = requests_to(&server, "/api/events/stats").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn anonymous_refresh_never_touches_network() {
    let server = MockServer::start().await;
    for endpoint in ["/api/sensors", "/api/events", "/api/events/stats"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;
    }

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    monitor.manual_refresh().await;

    // One error notification per failed refresh target.
    let notes = monitor.notifications_snapshot();
    assert_eq!(notes.len(), 3);
    assert!(notes.iter().all(|n| n.severity == Severity::Error));

    server.verify().await;
}

#[tokio::test]
async fn rejected_credential_forces_anonymous() {
    let server = MockServer::start().await;
    mount_backend(&server).await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;
    assert!(monitor.is_polling());

    // The backend starts rejecting our token mid-session.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/events/stats"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    monitor.refresh_stats().await;

    assert!(!monitor.current_session().is_authenticated());
    assert!(!monitor.is_polling());
    let notes = monitor.notifications_snapshot();
    assert!(notes
        .iter()
        .any(|n| n.severity == Severity::Error && n.message.contains("Session expired")));
}

// ── Filtering and staleness ─────────────────────────────────────────

#[tokio::test]
async fn filter_change_refetches_under_new_context() {
    let server = MockServer::start().await;
    mount_backend(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/events/critical"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([event_body(2, "TEMPERATURE", true)])),
        )
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;
    assert_eq!(monitor.events_snapshot().len(), 2);

    monitor.set_filter(EventFilter::Critical).await;

    let snap = monitor.events_snapshot();
    assert_eq!(snap.len(), 1);
    assert!(snap[0].critical);
    assert_eq!(requests_to(&server, "/api/events/critical").await, 1);
}

#[tokio::test]
async fn slow_response_for_old_filter_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&server)
        .await;
    // The unfiltered feed is slow; the critical feed is fast.
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([
                    event_body(1, "MOVEMENT", false),
                    event_body(2, "TEMPERATURE", true),
                ]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/critical"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([event_body(2, "TEMPERATURE", true)])),
        )
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;

    // Switch to the slow unfiltered view, then to critical while that
    // response is still in flight. The late unfiltered payload must not
    // clobber the critical snapshot.
    let slow = monitor.set_filter(EventFilter::All);
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        monitor.set_filter(EventFilter::Critical).await;
    };
    // Starting point is All (the default), so force a round trip first.
    monitor.set_filter(EventFilter::Kind(SensorKind::Access)).await;
    tokio::join!(slow, fast);

    assert_eq!(monitor.store().filter(), EventFilter::Critical);
    let snap = monitor.events_snapshot();
    assert_eq!(snap.len(), 1);
    assert!(snap[0].critical);
}

// ── Command dispatch ────────────────────────────────────────────────

#[tokio::test]
async fn simulate_defers_exactly_one_refresh() {
    let server = MockServer::start().await;
    mount_backend(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/sensors/MOV-001/process"))
        .respond_with(ResponseTemplate::new(202).set_body_string("Reading accepted"))
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;
    assert_eq!(requests_to(&server, "/api/sensors").await, 1);

    monitor
        .simulate("MOV-001", Reading::Movement(true))
        .await
        .unwrap();

    let notes = monitor.notifications_snapshot();
    assert!(notes
        .iter()
        .any(|n| n.severity == Severity::Warning && n.message.contains("Movement detected")));

    // Refresh is deferred, not immediate.
    assert_eq!(requests_to(&server, "/api/sensors").await, 1);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(requests_to(&server, "/api/sensors").await, 2);
}

#[tokio::test]
async fn failed_simulation_mutates_nothing() {
    let server = MockServer::start().await;
    mount_backend(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/sensors/TEMP-001/process"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;

    let result = monitor.simulate("TEMP-001", Reading::Temperature(21.0)).await;
    assert!(result.is_err());

    let notes = monitor.notifications_snapshot();
    assert!(notes
        .iter()
        .any(|n| n.severity == Severity::Error && n.message.contains("Simulation failed")));

    // No deferred refresh was scheduled.
    tokio::time::sleep(Duration::from_millis(1700)).await;
    assert_eq!(requests_to(&server, "/api/sensors").await, 1);
}

#[tokio::test]
async fn batch_reports_progress_then_completion() {
    let server = MockServer::start().await;
    mount_backend(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/sensors/process-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Batch accepted",
            "sensorsProcessed": 2,
        })))
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;

    monitor
        .simulate_batch(vec![
            vigil_core::BatchReading {
                sensor_id: "MOV-001".into(),
                reading: Reading::Movement(true),
            },
            vigil_core::BatchReading {
                sensor_id: "TEMP-001".into(),
                reading: Reading::Temperature(22.5),
            },
        ])
        .await
        .unwrap();

    let notes = monitor.notifications_snapshot();
    assert!(notes
        .iter()
        .any(|n| n.severity == Severity::Warning && n.message.contains("Processing 2")));

    tokio::time::sleep(Duration::from_millis(2300)).await;

    let notes = monitor.notifications_snapshot();
    assert!(notes
        .iter()
        .any(|n| n.severity == Severity::Success && n.message.contains("Batch processing complete")));
    // Exactly one deferred full refresh.
    assert_eq!(requests_to(&server, "/api/sensors").await, 2);
}

#[tokio::test]
async fn mark_processed_refreshes_events_and_stats() {
    let server = MockServer::start().await;
    mount_backend(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/events/2/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_body(2, "TEMPERATURE", true)))
        .mount(&server)
        .await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;

    monitor.mark_processed(2).await.unwrap();

    assert_eq!(requests_to(&server, "/api/events/2/process").await, 1);
    // Initial load + post-command refresh.
    assert_eq!(requests_to(&server, "/api/events").await, 2);
    assert_eq!(requests_to(&server, "/api/events/stats").await, 2);
}

// ── Render model ────────────────────────────────────────────────────

#[tokio::test]
async fn render_model_reflects_loaded_state() {
    let server = MockServer::start().await;
    mount_backend(&server).await;

    let monitor = Monitor::new(config_for(&server, Duration::from_secs(60))).unwrap();
    login(&monitor).await;

    let model = monitor.render_model();
    let cards: Vec<_> = model.sensor_cards().collect();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].sensor_id, "MOV-001");
    assert_eq!(cards[0].status_badge, "active");
    assert_eq!(cards[1].sensor_id, "TEMP-001");
    assert_eq!(cards[1].status_badge, "inactive");

    assert_eq!(model.events.len(), 2);
    assert_eq!(model.stats.total_sensors, 2);
}
