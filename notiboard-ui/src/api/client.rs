//! HTTP API Client
//!
//! Functions for communicating with the notification backend.

use gloo_net::http::{Request, Response};
use notiboard::{Notification, NotificationId, StatusResponse};
use std::fmt;

/// Default API base URL; empty means the page's own origin
pub const DEFAULT_API_BASE: &str = "";

const API_BASE_KEY: &str = "notiboard_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    url.trim_end_matches('/').to_string()
}

/// Errors from a backend call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never got a response
    Network(String),
    /// Non-success status; `message` is the server's, or the status text
    Server { status: u16, message: String },
    Parse(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Text shown to the user after a failed mutation
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(message) | ApiError::Parse(message) => message,
            ApiError::Server { message, .. } => message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Server { status, message } => write!(f, "Server error {}: {}", status, message),
            ApiError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

// ============ API Functions ============

/// Fetch the full notification list
pub async fn fetch_notifications() -> Result<Vec<Notification>, ApiError> {
    let response = Request::get(&format!("{}/notifications", get_api_base()))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(server_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Delete one notification
pub async fn delete_notification(id: &NotificationId) -> Result<(), ApiError> {
    let encoded = String::from(js_sys::encode_uri_component(&id.to_string()));

    let response = Request::delete(&format!("{}/api/notification/{}", get_api_base(), encoded))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(server_error(response).await);
    }

    Ok(())
}

/// Clear all notifications
///
/// Returns the `{status, message}` body; the caller checks `status`.
pub async fn clear_notifications() -> Result<StatusResponse, ApiError> {
    let response = Request::post(&format!("{}/clear", get_api_base()))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let ok = response.ok();
    let status = response.status();
    let status_text = response.status_text();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    match serde_json::from_str::<StatusResponse>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(e) if ok => Err(ApiError::Parse(e.to_string())),
        Err(_) => Err(ApiError::Server {
            status,
            message: status_text,
        }),
    }
}

async fn server_error(response: Response) -> ApiError {
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();

    ApiError::Server {
        status,
        message: StatusResponse::message_from_body(&body, &status_text),
    }
}
