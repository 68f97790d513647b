//! Mutations
//!
//! Delete-one and clear-all from the browser. Confirmation goes through
//! `window.confirm`; failures are shown as error toasts. Success re-syncs
//! instead of editing the list locally.

use notiboard::mutation::{
    clear_failed_message, delete_failed_message, delete_prompt, CLEAR_NETWORK_ERROR,
    CLEAR_PROMPT, DELETE_NETWORK_ERROR,
};
use notiboard::{Alert, CardHandle, Confirm};

use crate::api;
use crate::state::global::GlobalState;
use crate::state::sync::sync_now;

/// Browser confirmation dialog
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

impl Alert for GlobalState {
    fn alert(&self, message: &str) {
        web_sys::console::error_1(&message.into());
        self.show_error(message);
    }
}

/// Delete the notification behind a card, after confirmation
pub async fn delete_card(state: GlobalState, handle: CardHandle, confirm: &dyn Confirm) {
    let Some(target) = state.delete_target(handle) else {
        return;
    };

    if !confirm.confirm(&delete_prompt(Some(target.app.as_str()), &target.id)) {
        return;
    }

    match api::delete_notification(&target.id).await {
        Ok(()) => {
            state.show_success("Notification removed");
            sync_now(state).await;
        }
        Err(e) if e.is_network() => state.alert(DELETE_NETWORK_ERROR),
        Err(e) => state.alert(&delete_failed_message(e.message())),
    }
}

/// Clear every notification, after confirmation
pub async fn clear_all(state: GlobalState, confirm: &dyn Confirm) {
    if !confirm.confirm(CLEAR_PROMPT) {
        return;
    }

    match api::clear_notifications().await {
        Ok(response) if response.is_success() => {
            state.show_success(response.message().unwrap_or("All notifications cleared"));
            sync_now(state).await;
        }
        Ok(response) => state.alert(&clear_failed_message(response.message())),
        Err(e) if e.is_network() => state.alert(CLEAR_NETWORK_ERROR),
        Err(e) => state.alert(&clear_failed_message(Some(e.message()))),
    }
}
