//! HTTP implementation of the backend client.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use super::{Backend, ClientError};
use crate::config::BackendConfig;
use crate::model::{NewNotification, Notification, NotificationId, StatusResponse};

/// Notification backend reached over HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the configured backend
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_notifications(&self) -> Result<Vec<Notification>, ClientError> {
        let url = self.url("/notifications");
        tracing::debug!(%url, "Fetching notifications");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn delete_notification(&self, id: &NotificationId) -> Result<(), ClientError> {
        let url = self.url(&format!(
            "/api/notification/{}",
            urlencoding::encode(&id.to_string())
        ));
        tracing::debug!(%url, "Deleting notification");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    async fn clear_notifications(&self) -> Result<StatusResponse, ClientError> {
        let url = self.url("/clear");
        tracing::debug!(%url, "Clearing notifications");

        let response = self.client.post(&url).send().await.map_err(transport_error)?;
        read_status_body(response).await
    }

    async fn submit_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<StatusResponse, ClientError> {
        let url = self.url("/api/notification");
        tracing::debug!(%url, app = %notification.app_name, "Submitting notification");

        let response = self
            .client
            .post(&url)
            .form(notification)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        read_status_body(response).await
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Build an API error from a non-success response
///
/// Uses the body's `message` when it is JSON carrying one, otherwise the
/// HTTP status text.
async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    ClientError::Api {
        status: status.as_u16(),
        message: StatusResponse::message_from_body(&body, &status_text(status)),
    }
}

/// Parse a `{status, message}` body whatever the HTTP status
async fn read_status_body(response: Response) -> Result<StatusResponse, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    match serde_json::from_str::<StatusResponse>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(e) if status.is_success() => Err(ClientError::Parse(e.to_string())),
        Err(_) => Err(ClientError::Api {
            status: status.as_u16(),
            message: status_text(status),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Form, Path, State},
        http::StatusCode as AxumStatus,
        response::IntoResponse,
        routing::{delete, get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Deleted = Arc<Mutex<Vec<String>>>;

    fn fake_backend(deleted: Deleted) -> Router {
        Router::new()
            .route(
                "/notifications",
                get(|| async {
                    Json(json!([
                        {"id": "1", "app": "Mail", "content": "hi", "keyword": null},
                        {"id": 2, "app": "Chat", "timestamp": "2024-01-01 10:00:00"},
                        {"app": "NoId"}
                    ]))
                }),
            )
            .route(
                "/api/notification/:id",
                delete(
                    |State(deleted): State<Deleted>, Path(id): Path<String>| async move {
                        match id.as_str() {
                            "missing" => (
                                AxumStatus::NOT_FOUND,
                                Json(json!({"status": "error", "message": "Notification not found"})),
                            )
                                .into_response(),
                            "broken" => (AxumStatus::INTERNAL_SERVER_ERROR, "oops").into_response(),
                            _ => {
                                deleted.lock().unwrap().push(id);
                                Json(json!({"status": "success", "message": "Notification removed"}))
                                    .into_response()
                            }
                        }
                    },
                ),
            )
            .route(
                "/clear",
                post(|| async { Json(json!({"status": "success", "message": "2 cleared"})) }),
            )
            .route(
                "/api/notification",
                post(|Form(form): Form<HashMap<String, String>>| async move {
                    let app = form.get("appName").cloned().unwrap_or_default();
                    Json(json!({"status": "success", "message": app, "id": "new-id"}))
                }),
            )
            .with_state(deleted)
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn backend_for(url: &str) -> HttpBackend {
        HttpBackend::new(&BackendConfig {
            url: format!("{}/", url),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_notifications() {
        let url = spawn(fake_backend(Deleted::default())).await;
        let backend = backend_for(&url);

        let list = backend.list_notifications().await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].app_label(), "Mail");
        assert_eq!(list[1].id, Some(NotificationId::Number(2)));
        assert!(list[2].usable_id().is_none());
    }

    #[tokio::test]
    async fn test_delete_encodes_id() {
        let deleted = Deleted::default();
        let url = spawn(fake_backend(Arc::clone(&deleted))).await;
        let backend = backend_for(&url);

        backend
            .delete_notification(&NotificationId::from("a b/c"))
            .await
            .unwrap();

        assert_eq!(*deleted.lock().unwrap(), vec!["a b/c".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_error_uses_server_message() {
        let url = spawn(fake_backend(Deleted::default())).await;
        let backend = backend_for(&url);

        let err = backend
            .delete_notification(&NotificationId::from("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert_eq!(err.server_message(), Some("Notification not found"));
    }

    #[tokio::test]
    async fn test_delete_error_falls_back_to_status_text() {
        let url = spawn(fake_backend(Deleted::default())).await;
        let backend = backend_for(&url);

        let err = backend
            .delete_notification(&NotificationId::from("broken"))
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Internal Server Error"));
    }

    #[tokio::test]
    async fn test_clear_and_submit() {
        let url = spawn(fake_backend(Deleted::default())).await;
        let backend = backend_for(&url);

        let cleared = backend.clear_notifications().await.unwrap();
        assert!(cleared.is_success());
        assert_eq!(cleared.message(), Some("2 cleared"));

        let submitted = backend
            .submit_notification(&NewNotification::new("Mail").text("hello"))
            .await
            .unwrap();
        assert!(submitted.is_success());
        assert_eq!(submitted.message(), Some("Mail"));
        assert_eq!(submitted.id.as_deref(), Some("new-id"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = backend_for(&format!("http://{}", addr));
        let err = backend.list_notifications().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = backend_for("http://localhost:5000");
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url("/clear"), "http://localhost:5000/clear");
    }
}
