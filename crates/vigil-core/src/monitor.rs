// ── Monitor orchestrator ──
//
// Ties the session state machine, poll scheduler, view store,
// notification queue, and command dispatch together. Session
// transitions drive the scheduler exactly once per transition;
// transport results feed the store; failures become notifications.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use vigil_api::transport::TransportConfig;
use vigil_api::types::{BatchReading, DashboardStats, Reading, Sensor, SensorEvent, SensorKind};
use vigil_api::ApiClient;

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::notify::{Notification, NotificationQueue, Severity};
use crate::poll::PollScheduler;
use crate::session::{Session, SessionManager, SessionState};
use crate::store::{EventFilter, ViewStore};
use crate::view::RenderModel;

/// Deferred refresh delay after a single simulated reading, allowing
/// for backend processing latency.
pub const READING_REFRESH_DELAY: Duration = Duration::from_millis(1500);

/// Deferred refresh delay after a batch submission.
pub const BATCH_REFRESH_DELAY: Duration = Duration::from_secs(2);

/// Temperature above which a simulated reading is reported as an error.
const TEMPERATURE_ALERT_THRESHOLD: f64 = 50.0;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. The rendering sink observes state
/// through the `watch` subscriptions and calls the user-driven
/// operations (`login`, `logout`, `set_filter`, `manual_refresh`,
/// `simulate*`).
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: ApiClient,
    session: SessionManager,
    store: ViewStore,
    notifications: Arc<NotificationQueue>,
    scheduler: PollScheduler,
}

impl Monitor {
    /// Create a new Monitor from configuration. Does not connect —
    /// call [`login()`](Self::login) to authenticate and start polling.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            accept_invalid_certs: config.accept_invalid_certs,
        };
        let client = ApiClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a Monitor with a pre-built client (tests).
    pub fn with_client(config: MonitorConfig, client: ApiClient) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                session: SessionManager::new(),
                store: ViewStore::new(),
                notifications: Arc::new(NotificationQueue::new()),
                scheduler: PollScheduler::new(),
            }),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &ViewStore {
        &self.inner.store
    }

    pub fn notifications(&self) -> &Arc<NotificationQueue> {
        &self.inner.notifications
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate with the backend.
    ///
    /// On success, installs the credential, performs the initial data
    /// load, and starts the poll cycles (idempotently — a second login
    /// without logout never accumulates timers). On failure the session
    /// stays anonymous and one error notification is emitted.
    pub async fn login(&self, username: &str, password: SecretString) -> Result<(), CoreError> {
        self.inner.session.set_authenticating();

        match self.inner.client.login(username, &password).await {
            Ok(resp) => {
                self.inner
                    .client
                    .install_credential(SecretString::from(resp.credential_token));
                let session = Session {
                    identity: resp.identity,
                    full_name: resp.full_name,
                    role: resp.role,
                };
                let display = session.display_name().to_owned();
                self.inner.session.set_authenticated(session);

                self.notify(format!("Signed in as {display}"), Severity::Success);

                // Initial load; failures are surfaced as notifications
                // and do not fail the login itself.
                self.full_refresh().await;

                self.inner.scheduler.start(
                    self.clone(),
                    self.inner.config.fast_poll,
                    self.inner.config.sample_poll,
                );

                info!(username, "session started");
                Ok(())
            }
            Err(e) => {
                // Full teardown: a failed re-login must not leave the
                // previous session's cycles or credential behind.
                self.inner.scheduler.stop();
                self.inner.client.clear_credential();
                self.inner.session.set_anonymous();
                // A 401 on the login exchange means bad credentials, not
                // a missing session.
                let core = match e {
                    vigil_api::Error::Unauthenticated => CoreError::InvalidCredentials,
                    other => other.into(),
                };
                self.notify(format!("Login failed: {core}"), Severity::Error);
                Err(core)
            }
        }
    }

    /// End the session: stop polling, notify the backend (best-effort),
    /// clear the credential, and return to anonymous.
    pub async fn logout(&self) {
        self.inner.scheduler.stop();

        if self.inner.client.has_credential() {
            if let Err(e) = self.inner.client.logout().await {
                warn!(error = %e, "backend logout failed (non-fatal)");
            }
        }

        self.inner.client.clear_credential();
        self.inner.session.set_anonymous();
        info!("session ended");
    }

    /// Current session state; pure read.
    pub fn current_session(&self) -> SessionState {
        self.inner.session.current()
    }

    /// Subscribe to session transitions.
    pub fn session_state(&self) -> watch::Receiver<SessionState> {
        self.inner.session.subscribe()
    }

    /// Whether the recurring poll cycles are active.
    pub fn is_polling(&self) -> bool {
        self.inner.scheduler.is_running()
    }

    /// Forced de-auth: the backend rejected our credential mid-session.
    /// Stops polling and re-prompts login via the anonymous state.
    fn force_anonymous(&self) {
        self.inner.scheduler.stop();
        self.inner.client.clear_credential();
        self.inner.session.set_anonymous();
        self.notify("Session expired -- please sign in again", Severity::Error);
    }

    // ── Refresh operations ───────────────────────────────────────────

    /// Refresh the sensor inventory.
    pub async fn refresh_sensors(&self) {
        match self.inner.client.list_sensors().await {
            Ok(sensors) => {
                debug!(count = sensors.len(), "sensors refreshed");
                self.inner.store.apply_sensors(sensors);
            }
            Err(e) => self.report("Sensor refresh failed", &e),
        }
    }

    /// Refresh events under the currently selected filter. The filter
    /// context is captured at issue time; a response arriving after the
    /// user changed the filter is discarded by the store.
    pub async fn refresh_events(&self) {
        let ctx = self.inner.store.filter();

        let result = match ctx {
            EventFilter::Critical => self.inner.client.critical_events().await,
            _ => self.inner.client.list_events().await,
        };

        match result {
            Ok(events) => {
                if self.inner.store.apply_events(events, ctx) {
                    debug!(%ctx, "events refreshed");
                }
            }
            Err(e) => self.report("Event refresh failed", &e),
        }
    }

    /// Refresh the dashboard counters.
    pub async fn refresh_stats(&self) {
        match self.inner.client.event_stats().await {
            Ok(stats) => self.inner.store.apply_stats(stats),
            Err(e) => self.report("Stats refresh failed", &e),
        }
    }

    /// One fast-cycle tick: stats + events, concurrently.
    pub async fn refresh_fast(&self) {
        tokio::join!(self.refresh_stats(), self.refresh_events());
    }

    /// Full refresh: stats + events + sensors, concurrently.
    pub async fn full_refresh(&self) {
        tokio::join!(
            self.refresh_stats(),
            self.refresh_events(),
            self.refresh_sensors()
        );
    }

    /// User-triggered refresh of everything, bypassing the schedule.
    pub async fn manual_refresh(&self) {
        self.full_refresh().await;
    }

    /// Fetch sensors of a single kind directly. Does not touch the store.
    pub async fn sensors_by_kind(&self, kind: SensorKind) -> Result<Vec<Sensor>, CoreError> {
        Ok(self.inner.client.sensors_by_kind(kind).await?)
    }

    // ── Filter ───────────────────────────────────────────────────────

    /// Select an event filter and immediately re-fetch under it.
    pub async fn set_filter(&self, filter: EventFilter) {
        if self.inner.store.set_filter(filter) {
            self.refresh_events().await;
        }
    }

    // ── Command dispatch ─────────────────────────────────────────────

    /// Dispatch one simulated reading. On success, emits a
    /// reading-specific notification and schedules exactly one deferred
    /// full refresh; on failure, emits one error notification and
    /// mutates nothing.
    pub async fn simulate(&self, sensor_id: &str, reading: Reading) -> Result<(), CoreError> {
        match self.inner.client.process_reading(sensor_id, &reading).await {
            Ok(_ack) => {
                let (message, severity) = reading_notice(sensor_id, &reading);
                self.notify(message, severity);
                self.schedule_deferred_refresh(READING_REFRESH_DELAY);
                Ok(())
            }
            Err(e) => {
                self.report("Simulation failed", &e);
                Err(e.into())
            }
        }
    }

    /// Dispatch a heterogeneous batch of readings as one request.
    ///
    /// Emits a "batch in progress" notification immediately and, after
    /// the deferred refresh completes, a "batch complete" one.
    pub async fn simulate_batch(&self, entries: Vec<BatchReading>) -> Result<(), CoreError> {
        let count = entries.len();

        match self.inner.client.process_batch(&entries).await {
            Ok(_ack) => {
                self.notify(
                    format!("Processing {count} sensor readings..."),
                    Severity::Warning,
                );

                let monitor = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(BATCH_REFRESH_DELAY).await;
                    monitor.full_refresh().await;
                    monitor.notify("Batch processing complete", Severity::Success);
                });
                Ok(())
            }
            Err(e) => {
                self.report("Batch simulation failed", &e);
                Err(e.into())
            }
        }
    }

    /// Mark an event as processed and refresh the affected views.
    pub async fn mark_processed(&self, event_id: i64) -> Result<(), CoreError> {
        match self.inner.client.mark_processed(event_id).await {
            Ok(_event) => {
                tokio::join!(self.refresh_events(), self.refresh_stats());
                Ok(())
            }
            Err(e) => {
                self.report("Marking event failed", &e);
                Err(e.into())
            }
        }
    }

    /// Schedule exactly one deferred full refresh.
    fn schedule_deferred_refresh(&self, delay: Duration) {
        let monitor = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            monitor.full_refresh().await;
        });
    }

    // ── Render model ─────────────────────────────────────────────────

    /// Project the current snapshots into the display-ready render model.
    pub fn render_model(&self) -> RenderModel {
        RenderModel::project(
            &self.inner.store.sensors_snapshot(),
            &self.inner.store.events_snapshot(),
            self.inner.store.stats(),
            &self.inner.notifications.snapshot(),
        )
    }

    // ── Snapshot accessors (delegate to the store) ───────────────────

    pub fn sensors_snapshot(&self) -> Arc<Vec<Sensor>> {
        self.inner.store.sensors_snapshot()
    }

    pub fn events_snapshot(&self) -> Arc<Vec<SensorEvent>> {
        self.inner.store.events_snapshot()
    }

    pub fn stats(&self) -> DashboardStats {
        self.inner.store.stats()
    }

    pub fn notifications_snapshot(&self) -> Arc<Vec<Arc<Notification>>> {
        self.inner.notifications.snapshot()
    }

    // ── Failure routing ──────────────────────────────────────────────

    /// Push a notification.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.inner.notifications.push(message, severity);
    }

    /// Translate a transport failure into exactly one notification.
    ///
    /// A rejected credential additionally forces the session back to
    /// anonymous (which stops polling). Late completions arriving after
    /// an explicit logout are logged but stay quiet.
    fn report(&self, context: &str, err: &vigil_api::Error) {
        if err.is_auth() {
            if self.inner.session.is_authenticated() {
                warn!(context, "credential rejected by backend");
                self.force_anonymous();
            } else {
                debug!(context, "auth failure while anonymous (late completion?)");
                self.notify(format!("{context}: not authenticated"), Severity::Error);
            }
        } else {
            warn!(context, error = %err, "request failed");
            self.notify(format!("{context}: {err}"), Severity::Error);
        }
    }
}

/// Notification text and severity for a successfully dispatched reading.
fn reading_notice(sensor_id: &str, reading: &Reading) -> (String, Severity) {
    match reading {
        Reading::Movement(_) => (
            format!("Movement detected on {sensor_id}"),
            Severity::Warning,
        ),
        Reading::Temperature(celsius) => (
            format!("Temperature reading of {celsius} \u{b0}C on {sensor_id}"),
            if *celsius > TEMPERATURE_ALERT_THRESHOLD {
                Severity::Error
            } else {
                Severity::Success
            },
        ),
        Reading::Access {
            user_id,
            authorized,
        } => {
            if *authorized {
                (format!("Access granted for {user_id}"), Severity::Success)
            } else {
                (format!("Access denied for {user_id}"), Severity::Error)
            }
        }
    }
}
