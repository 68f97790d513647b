//! Dashboard Controller
//!
//! The application-state object: owns the store, the filter state and the
//! app selector, and keeps every derived view in step with them. Views are
//! recomputed inside the call that replaced the store, so callers never see
//! a half-updated dashboard.

use crate::chart::{compute_histogram, BarChartData, Histogram};
use crate::filter::{filter, FilterState};
use crate::model::{Notification, NotificationId};
use crate::options::{distinct_apps, AppOptions};
use crate::render::{render, CardHandle, RenderedList};
use crate::stats::{compute_stats, Stats};
use crate::store::NotificationStore;
use serde::Serialize;
use std::time::Duration;

/// Time between two scheduled syncs
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Result of offering a payload to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The payload replaced the store and views were recomputed
    Accepted,
    /// Same signature as the stored list; nothing recomputed
    Unchanged,
    /// The fetch failed; the store keeps its last accepted list
    Failed,
}

/// Everything a front end draws
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub list: RenderedList,
    pub stats: Stats,
    pub histogram: Histogram,
    /// App selector options, excluding "All apps"
    pub app_options: Vec<String>,
    pub selected_app: String,
    pub search_term: String,
    /// Store generation this view was derived from
    pub generation: u64,
}

impl DashboardView {
    pub fn chart_data(&self) -> BarChartData {
        self.histogram.chart_data()
    }
}

/// What a delete control needs to confirm and issue its request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: NotificationId,
    pub app: String,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    store: NotificationStore,
    filter: FilterState,
    options: AppOptions,
    /// Selected app came from the caller, not the selector; never reset
    app_pinned: bool,
    view: DashboardView,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a filter already applied
    ///
    /// A non-empty app here is pinned: it stays selected even while no
    /// notification carries it, so the list stays empty instead of widening
    /// to all apps.
    pub fn with_filter(filter: FilterState) -> Self {
        let mut dashboard = Self::default();
        dashboard.options.select(filter.selected_app.clone());
        dashboard.app_pinned = !filter.selected_app.is_empty();
        dashboard.filter = filter;
        dashboard.sync_filter_fields();
        dashboard
    }

    /// Offer a payload received from the backend
    ///
    /// When the store accepts it, the selector options, stats, histogram
    /// and list are all recomputed before returning.
    pub fn apply_sync(&mut self, payload: Vec<Notification>) -> SyncOutcome {
        if !self.store.accept(payload) {
            tracing::debug!(
                count = self.store.len(),
                "Notification list unchanged, skipping refresh"
            );
            return SyncOutcome::Unchanged;
        }

        let list = self.store.list();

        let patch = self.options.reconcile(distinct_apps(&list));
        if !patch.is_empty() {
            tracing::debug!(
                added = ?patch.added,
                removed = ?patch.removed,
                "App selector options patched"
            );
        }
        if patch.selection_reset {
            if self.app_pinned {
                self.options.select(self.filter.selected_app.clone());
            } else {
                tracing::debug!(app = %self.filter.selected_app, "Selected app disappeared, showing all apps");
                self.filter.selected_app.clear();
            }
        }

        self.view.stats = compute_stats(&list);
        self.view.histogram = compute_histogram(&list);
        self.view.app_options = self.options.options().to_vec();
        self.view.generation = self.store.generation();
        self.refresh_list();

        tracing::info!(
            total = self.view.stats.total,
            apps = self.view.stats.distinct_apps,
            keywords = self.view.stats.distinct_keywords,
            "Notification list changed, views refreshed"
        );

        SyncOutcome::Accepted
    }

    /// Set the search term and re-filter
    pub fn search(&mut self, term: impl Into<String>) -> &RenderedList {
        self.filter.search_term = term.into();
        self.refresh_list();
        &self.view.list
    }

    /// Select an app ("" for all apps) and re-filter
    pub fn select_app(&mut self, app: impl Into<String>) -> &RenderedList {
        let app = app.into();
        self.app_pinned = false;
        self.options.select(app.clone());
        self.filter.selected_app = app;
        self.refresh_list();
        &self.view.list
    }

    /// Replace the whole filter state and re-filter
    pub fn set_filter(&mut self, filter: FilterState) -> &RenderedList {
        self.app_pinned = false;
        self.options.select(filter.selected_app.clone());
        self.filter = filter;
        self.refresh_list();
        &self.view.list
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// Resolve a card handle from the current list
    pub fn delete_target(&self, handle: CardHandle) -> Option<DeleteTarget> {
        self.view.list.card(handle).map(|card| DeleteTarget {
            id: card.id.clone(),
            app: card.app.clone(),
        })
    }

    /// App label for an id, if the store has it
    pub fn app_for(&self, id: &NotificationId) -> Option<&str> {
        self.store.find(id).map(Notification::app_label)
    }

    fn refresh_list(&mut self) {
        self.sync_filter_fields();

        if !self.store.is_loaded() {
            return;
        }

        let list = self.store.list();
        self.view.list = render(filter(&list, &self.filter));
    }

    fn sync_filter_fields(&mut self) {
        self.view.search_term = self.filter.search_term.clone();
        self.view.selected_app = self.filter.selected_app.clone();
    }
}
