//! Global Application State
//!
//! The core [`Dashboard`] lives in a stored value; the view it derives is
//! mirrored into a signal that components read.

use leptos::*;
use notiboard::{
    CardHandle, Dashboard, DashboardView, DeleteTarget, FilterState, Notification, SyncOutcome,
};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Store, filter state and selector options
    pub dashboard: StoredValue<Dashboard>,
    /// Last view derived from `dashboard`
    pub view: RwSignal<DashboardView>,
    /// Last accepted sync, epoch millis
    pub last_sync: RwSignal<Option<i64>>,
    /// Fetches currently in flight
    pub in_flight: RwSignal<u32>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let dashboard = Dashboard::new();

    let state = GlobalState {
        view: create_rw_signal(dashboard.view().clone()),
        dashboard: store_value(dashboard),
        last_sync: create_rw_signal(None),
        in_flight: create_rw_signal(0),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Offer a fetched list to the dashboard; views update only if it changed
    pub fn apply_sync(&self, payload: Vec<Notification>) -> SyncOutcome {
        let mut outcome = SyncOutcome::Unchanged;
        self.dashboard
            .update_value(|dashboard| outcome = dashboard.apply_sync(payload));

        if outcome == SyncOutcome::Accepted {
            self.last_sync.set(Some(chrono::Utc::now().timestamp_millis()));
            self.publish();
        }
        outcome
    }

    /// True while at least one fetch is running
    pub fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub fn fetch_started(&self) {
        self.in_flight.update(|n| *n += 1);
    }

    /// An early finisher does not hide a fetch still running
    pub fn fetch_finished(&self) {
        self.in_flight.update(|n| *n = n.saturating_sub(1));
    }

    pub fn search(&self, term: String) {
        self.dashboard.update_value(|dashboard| {
            dashboard.search(term);
        });
        self.publish();
    }

    pub fn select_app(&self, app: String) {
        self.dashboard.update_value(|dashboard| {
            dashboard.select_app(app);
        });
        self.publish();
    }

    pub fn filter_state(&self) -> FilterState {
        self.dashboard.with_value(|dashboard| dashboard.filter_state().clone())
    }

    pub fn delete_target(&self, handle: CardHandle) -> Option<DeleteTarget> {
        self.dashboard
            .with_value(|dashboard| dashboard.delete_target(handle))
    }

    fn publish(&self) {
        let view = self.dashboard.with_value(|dashboard| dashboard.view().clone());
        self.view.set(view);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
