//! Mutation Client
//!
//! Delete-one and clear-all behind an interactive confirmation. A
//! successful mutation is followed by a fresh sync rather than a local
//! edit, so the store always reflects what the backend holds.
//!
//! The prompts, messages and the [`Confirm`]/[`Alert`] seams are shared with
//! the browser front end; [`MutationClient`] is the native implementation.

use crate::model::NotificationId;

/// Asks the user to approve a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Surfaces a mutation failure to the user
pub trait Alert {
    fn alert(&self, message: &str);
}

pub const CLEAR_PROMPT: &str =
    "Are you sure you want to clear ALL notifications? This cannot be undone.";

pub const DELETE_NETWORK_ERROR: &str = "Network error while removing notification.";
pub const CLEAR_NETWORK_ERROR: &str = "Network error while clearing notifications.";
pub const SEND_NETWORK_ERROR: &str = "Network error while sending notification.";

/// Confirmation prompt for deleting one notification
///
/// Names the app when it is known, otherwise the raw id.
pub fn delete_prompt(app: Option<&str>, id: &NotificationId) -> String {
    match app {
        Some(app) => format!("Are you sure you want to remove the notification from \"{app}\"?"),
        None => format!("Are you sure you want to remove notification {id}?"),
    }
}

pub fn delete_failed_message(message: &str) -> String {
    format!("Failed to remove notification: {message}")
}

pub fn clear_failed_message(message: Option<&str>) -> String {
    format!(
        "Failed to clear notifications: {}",
        message.filter(|m| !m.is_empty()).unwrap_or("Unknown error")
    )
}

pub fn send_failed_message(message: &str) -> String {
    format!("Failed to send notification: {message}")
}

#[cfg(feature = "native")]
pub use native::{MutationClient, MutationOutcome};

#[cfg(feature = "native")]
mod native {
    use super::*;
    use crate::client::{Backend, ClientError};
    use crate::dashboard::SyncOutcome;
    use crate::model::NewNotification;
    use crate::render::CardHandle;
    use crate::sync::SyncPoller;
    use serde::Serialize;
    use std::sync::Arc;

    /// What a mutation ended with
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(tag = "outcome", rename_all = "snake_case")]
    pub enum MutationOutcome {
        /// The user declined; no request was sent
        Cancelled,
        /// The backend accepted the change and a sync followed
        Completed { resync: SyncOutcome },
        /// The request failed; the message was alerted
        Failed { message: String },
    }

    pub struct MutationClient {
        backend: Arc<dyn Backend>,
        poller: Arc<SyncPoller>,
        confirm: Arc<dyn Confirm + Send + Sync>,
        alert: Arc<dyn Alert + Send + Sync>,
    }

    impl MutationClient {
        pub fn new(
            backend: Arc<dyn Backend>,
            poller: Arc<SyncPoller>,
            confirm: Arc<dyn Confirm + Send + Sync>,
            alert: Arc<dyn Alert + Send + Sync>,
        ) -> Self {
            Self {
                backend,
                poller,
                confirm,
                alert,
            }
        }

        /// Delete the notification behind a rendered card
        pub async fn delete_card(&self, handle: CardHandle) -> MutationOutcome {
            let target = {
                let dashboard = self.poller.dashboard();
                let dashboard = dashboard.read().await;
                dashboard.delete_target(handle)
            };

            let Some(target) = target else {
                tracing::warn!(handle = handle.index(), "No card for handle, nothing to delete");
                return MutationOutcome::Cancelled;
            };

            let prompt = delete_prompt(Some(target.app.as_str()), &target.id);
            self.delete_confirmed(&target.id, prompt).await
        }

        /// Delete a notification by id
        pub async fn delete_one(&self, id: &NotificationId) -> MutationOutcome {
            let app = {
                let dashboard = self.poller.dashboard();
                let dashboard = dashboard.read().await;
                dashboard.app_for(id).map(str::to_string)
            };

            let prompt = delete_prompt(app.as_deref(), id);
            self.delete_confirmed(id, prompt).await
        }

        /// Remove every notification
        pub async fn clear_all(&self) -> MutationOutcome {
            if !self.ask(CLEAR_PROMPT.to_string()).await {
                tracing::debug!("Clear cancelled");
                return MutationOutcome::Cancelled;
            }

            let message = match self.backend.clear_notifications().await {
                Ok(response) if response.is_success() => {
                    tracing::info!(reply = response.message(), "Notifications cleared");
                    return self.completed().await;
                }
                Ok(response) => clear_failed_message(response.message()),
                Err(e) if e.is_transport() => CLEAR_NETWORK_ERROR.to_string(),
                Err(e) => clear_failed_message(e.server_message()),
            };

            self.failed(message)
        }

        /// Submit a new notification; not destructive, so never confirmed
        pub async fn submit(&self, notification: NewNotification) -> MutationOutcome {
            let message = match self.backend.submit_notification(&notification).await {
                Ok(response) if response.is_success() => {
                    tracing::info!(
                        app = %notification.app_name,
                        id = response.id.as_deref(),
                        "Notification sent"
                    );
                    return self.completed().await;
                }
                Ok(response) => send_failed_message(response.message().unwrap_or("Unknown error")),
                Err(e) if e.is_transport() => SEND_NETWORK_ERROR.to_string(),
                Err(e) => send_failed_message(&failure_text(&e)),
            };

            self.failed(message)
        }

        async fn delete_confirmed(&self, id: &NotificationId, prompt: String) -> MutationOutcome {
            if !self.ask(prompt).await {
                tracing::debug!(%id, "Delete cancelled");
                return MutationOutcome::Cancelled;
            }

            match self.backend.delete_notification(id).await {
                Ok(()) => {
                    tracing::info!(%id, "Notification removed");
                    self.completed().await
                }
                Err(e) if e.is_transport() => self.failed(DELETE_NETWORK_ERROR.to_string()),
                Err(e) => self.failed(delete_failed_message(&failure_text(&e))),
            }
        }

        /// Run the confirmation off the async worker; prompts may block on stdin
        async fn ask(&self, prompt: String) -> bool {
            let confirm = Arc::clone(&self.confirm);
            match tokio::task::spawn_blocking(move || confirm.confirm(&prompt)).await {
                Ok(answer) => answer,
                Err(e) => {
                    tracing::warn!(error = %e, "Confirmation prompt failed");
                    false
                }
            }
        }

        async fn completed(&self) -> MutationOutcome {
            MutationOutcome::Completed {
                resync: self.poller.sync().await,
            }
        }

        fn failed(&self, message: String) -> MutationOutcome {
            tracing::warn!(error = %message, "Mutation failed");
            self.alert.alert(&message);
            MutationOutcome::Failed { message }
        }
    }

    fn failure_text(e: &ClientError) -> String {
        match e {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Parse(message) => message.clone(),
            other => other.to_string(),
        }
    }

}
