//! Notification Backend Client
//!
//! The REST endpoints the dashboard consumes:
//!
//! - `GET /notifications` - Full notification list
//! - `DELETE /api/notification/:id` - Remove one notification
//! - `POST /clear` - Remove all notifications
//! - `POST /api/notification` - Submit a notification (form data)
//!
//! [`Backend`] is the seam the poller and mutation client talk to;
//! [`HttpBackend`] is the reqwest implementation.

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpBackend;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{NewNotification, Notification, NotificationId, StatusResponse};

#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the authoritative notification list
    async fn list_notifications(&self) -> Result<Vec<Notification>, ClientError>;

    /// Delete a single notification
    async fn delete_notification(&self, id: &NotificationId) -> Result<(), ClientError>;

    /// Clear every notification
    ///
    /// Returns the parsed `{status, message}` body; callers decide success
    /// from its `status` field.
    async fn clear_notifications(&self) -> Result<StatusResponse, ClientError>;

    /// Submit a new notification
    async fn submit_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<StatusResponse, ClientError>;
}

/// Errors that can occur when talking to the notification backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Notification backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Message the server sent with a non-success status
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Unavailable | ClientError::Timeout | ClientError::Request(_)
        )
    }
}
