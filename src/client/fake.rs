//! In-memory backend for poller and mutation tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::{Backend, ClientError};
use crate::model::{NewNotification, Notification, NotificationId, StatusResponse};

#[derive(Debug, Clone)]
pub enum FakeFailure {
    Unavailable,
    Api(u16, &'static str),
}

impl FakeFailure {
    fn to_error(&self) -> ClientError {
        match self {
            FakeFailure::Unavailable => ClientError::Unavailable,
            FakeFailure::Api(status, message) => ClientError::Api {
                status: *status,
                message: message.to_string(),
            },
        }
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub notifications: Mutex<Vec<Notification>>,
    pub list_failure: Mutex<Option<FakeFailure>>,
    pub mutation_failure: Mutex<Option<FakeFailure>>,
    pub clear_response: Mutex<Option<StatusResponse>>,
    pub deleted: Mutex<Vec<NotificationId>>,
    pub submitted: Mutex<Vec<NewNotification>>,
    /// Holds the next list call after it has read its payload
    pub list_gate: Mutex<Option<Arc<Notify>>>,
    pub list_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Mutex::new(notifications),
            ..Default::default()
        }
    }

    pub fn set_notifications(&self, notifications: Vec<Notification>) {
        *self.notifications.lock().unwrap() = notifications;
    }

    pub fn fail_list(&self, failure: Option<FakeFailure>) {
        *self.list_failure.lock().unwrap() = failure;
    }

    /// Make the next list call wait, payload already taken, until notified
    pub fn hold_next_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn fail_mutations(&self, failure: FakeFailure) {
        *self.mutation_failure.lock().unwrap() = Some(failure);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    fn mutation_error(&self) -> Option<ClientError> {
        self.mutation_failure
            .lock()
            .unwrap()
            .as_ref()
            .map(FakeFailure::to_error)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_notifications(&self) -> Result<Vec<Notification>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.list_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        let payload = self.notifications.lock().unwrap().clone();
        let gate = self.list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(payload)
    }

    async fn delete_notification(&self, id: &NotificationId) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        self.deleted.lock().unwrap().push(id.clone());
        self.notifications
            .lock()
            .unwrap()
            .retain(|n| n.id.as_ref() != Some(id));
        Ok(())
    }

    async fn clear_notifications(&self) -> Result<StatusResponse, ClientError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        if let Some(response) = self.clear_response.lock().unwrap().clone() {
            return Ok(response);
        }
        self.notifications.lock().unwrap().clear();
        Ok(StatusResponse {
            status: Some("success".to_string()),
            message: Some("All notifications cleared".to_string()),
            ..Default::default()
        })
    }

    async fn submit_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<StatusResponse, ClientError> {
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        let mut notifications = self.notifications.lock().unwrap();
        let id = format!("sent-{}", notifications.len() + 1);
        notifications.push(
            Notification::new(id.as_str())
                .app(notification.app_name.as_str())
                .content(notification.text.clone().unwrap_or_default()),
        );
        self.submitted.lock().unwrap().push(notification.clone());
        Ok(StatusResponse {
            status: Some("success".to_string()),
            message: None,
            id: Some(id),
            ..Default::default()
        })
    }
}
