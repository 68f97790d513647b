//! Sync Poller
//!
//! Periodically fetches the full notification list and hands it to the
//! dashboard, which only recomputes its views when the list changed.
//! Fresh views are published on a `watch` channel for front ends to redraw.

use crate::client::Backend;
use crate::dashboard::{Dashboard, DashboardView, SyncOutcome, POLL_INTERVAL};
use crate::filter::FilterState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Current state of the poller
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncState {
    /// When the last sync started
    pub last_attempt: Option<DateTime<Utc>>,
    /// When a payload was last accepted
    pub last_accepted: Option<DateTime<Utc>>,
    pub last_outcome: Option<SyncOutcome>,
    pub consecutive_failures: u32,
    pub syncs_accepted: u64,
}

/// Polls the backend and keeps the dashboard current
pub struct SyncPoller {
    backend: Arc<dyn Backend>,
    dashboard: Arc<RwLock<Dashboard>>,
    state: RwLock<SyncState>,
    views: watch::Sender<Arc<DashboardView>>,
}

impl SyncPoller {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_dashboard(backend, Dashboard::new())
    }

    /// Create a poller around an existing dashboard (e.g. one with a filter set)
    pub fn with_dashboard(backend: Arc<dyn Backend>, dashboard: Dashboard) -> Self {
        let (views, _) = watch::channel(Arc::new(dashboard.view().clone()));

        Self {
            backend,
            dashboard: Arc::new(RwLock::new(dashboard)),
            state: RwLock::new(SyncState::default()),
            views,
        }
    }

    pub fn dashboard(&self) -> Arc<RwLock<Dashboard>> {
        Arc::clone(&self.dashboard)
    }

    /// Receive every view published after an accepted sync or filter change
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardView>> {
        self.views.subscribe()
    }

    /// Start the polling task
    ///
    /// Syncs immediately, then every [`POLL_INTERVAL`].
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tracing::info!(
            interval_secs = POLL_INTERVAL.as_secs(),
            "Starting notification polling"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                self.sync().await;
            }
        })
    }

    /// Run one fetch-and-compare round trip
    ///
    /// Failures are logged and leave the dashboard on its last accepted list.
    pub async fn sync(&self) -> SyncOutcome {
        let started = Utc::now();

        // fetch without holding the dashboard lock
        let outcome = match self.backend.list_notifications().await {
            Ok(payload) => {
                let mut dashboard = self.dashboard.write().await;
                let outcome = dashboard.apply_sync(payload);
                if outcome == SyncOutcome::Accepted {
                    self.views.send_replace(Arc::new(dashboard.view().clone()));
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(error = %e, "Notification sync failed");
                SyncOutcome::Failed
            }
        };

        let mut state = self.state.write().await;
        state.last_attempt = Some(started);
        state.last_outcome = Some(outcome);
        match outcome {
            SyncOutcome::Failed => state.consecutive_failures += 1,
            SyncOutcome::Accepted => {
                state.consecutive_failures = 0;
                state.last_accepted = Some(Utc::now());
                state.syncs_accepted += 1;
            }
            SyncOutcome::Unchanged => state.consecutive_failures = 0,
        }

        outcome
    }

    pub async fn status(&self) -> SyncState {
        self.state.read().await.clone()
    }

    /// Replace the filter and publish the re-filtered view
    pub async fn update_filter(&self, filter: FilterState) -> Arc<DashboardView> {
        let mut dashboard = self.dashboard.write().await;
        dashboard.set_filter(filter);

        let view = Arc::new(dashboard.view().clone());
        self.views.send_replace(Arc::clone(&view));
        view
    }
}
