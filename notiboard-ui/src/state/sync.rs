//! Background Polling
//!
//! Fetches the notification list on mount and then on a fixed interval.
//! A failed fetch is only logged; the dashboard keeps its last list.

use gloo_timers::callback::Interval;
use leptos::*;
use notiboard::{SyncOutcome, POLL_INTERVAL};

use crate::api;
use crate::state::global::GlobalState;

/// Sync now, then every [`POLL_INTERVAL`] for the life of the page
pub fn start_polling(state: GlobalState) {
    spawn_local(async move {
        sync_now(state).await;
    });

    Interval::new(POLL_INTERVAL.as_millis() as u32, move || {
        spawn_local(async move {
            sync_now(state).await;
        });
    })
    .forget();
}

/// Run one fetch-and-compare round trip
pub async fn sync_now(state: GlobalState) -> SyncOutcome {
    state.fetch_started();
    let fetched = api::fetch_notifications().await;
    state.fetch_finished();

    match fetched {
        Ok(payload) => state.apply_sync(payload),
        Err(e) => {
            web_sys::console::warn_1(&format!("Notification sync failed: {}", e).into());
            SyncOutcome::Failed
        }
    }
}
