//! Notification Model
//!
//! Records received from the notification backend and the small JSON
//! bodies its mutation endpoints answer with.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Label shown for notifications without a source app
pub const UNKNOWN_APP: &str = "Unknown";

/// Body shown for notifications without content
pub const NO_CONTENT: &str = "No content";

/// Opaque notification identifier (the backend may send strings or integers)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationId {
    Number(i64),
    Text(String),
}

impl NotificationId {
    /// An empty string id is treated the same as a missing one
    pub fn is_empty(&self) -> bool {
        matches!(self, NotificationId::Text(s) if s.is_empty())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationId::Number(n) => write!(f, "{}", n),
            NotificationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for NotificationId {
    fn from(s: &str) -> Self {
        NotificationId::Text(s.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(s: String) -> Self {
        NotificationId::Text(s)
    }
}

impl From<i64> for NotificationId {
    fn from(n: i64) -> Self {
        NotificationId::Number(n)
    }
}

/// A notification as listed by `GET /notifications`
///
/// Every field is optional on the wire. Records without an id are kept in
/// the list (they count towards totals) but never rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Option<NotificationId>,
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Notification {
    /// Create a notification with the given id
    pub fn new(id: impl Into<NotificationId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Create a notification without an id
    pub fn without_id() -> Self {
        Self::default()
    }

    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// The id, if present and non-empty
    pub fn usable_id(&self) -> Option<&NotificationId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }

    /// Source app name, if present and non-empty
    pub fn app_name(&self) -> Option<&str> {
        non_empty(self.app.as_deref())
    }

    /// Keyword, if present and non-empty
    pub fn keyword_name(&self) -> Option<&str> {
        non_empty(self.keyword.as_deref())
    }

    /// Source app for display
    pub fn app_label(&self) -> &str {
        self.app_name().unwrap_or(UNKNOWN_APP)
    }

    /// Timestamp for display
    pub fn timestamp_label(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("")
    }

    /// Body for display
    pub fn content_text(&self) -> &str {
        non_empty(self.content.as_deref()).unwrap_or(NO_CONTENT)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Accept any JSON scalar and keep its text form
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// `{status, message}` body returned by the mutation endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Some failures answer `{"error": ...}` instead of a message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Server-provided message, if any
    pub fn message(&self) -> Option<&str> {
        non_empty(self.message.as_deref()).or_else(|| non_empty(self.error.as_deref()))
    }

    /// Extract the message from an error body, falling back to the status text
    pub fn message_from_body(body: &str, status_text: &str) -> String {
        serde_json::from_str::<StatusResponse>(body)
            .ok()
            .and_then(|r| r.message().map(str::to_string))
            .unwrap_or_else(|| status_text.to_string())
    }
}

/// Form fields accepted by `POST /api/notification`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewNotification {
    #[serde(rename = "appName")]
    pub app_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "macro", skip_serializing_if = "Option::is_none")]
    pub macro_name: Option<String>,
}

impl NewNotification {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn macro_name(mut self, macro_name: impl Into<String>) -> Self {
        self.macro_name = Some(macro_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_ids() {
        let list: Vec<Notification> = serde_json::from_str(
            r#"[
                {"id": "a1", "app": "Mail", "content": "hi"},
                {"id": 42, "app": "Chat"},
                {"id": null, "app": "X"},
                {"app": "Y"}
            ]"#,
        )
        .unwrap();

        assert_eq!(list.len(), 4);
        assert_eq!(list[0].id, Some(NotificationId::from("a1")));
        assert_eq!(list[1].id, Some(NotificationId::Number(42)));
        assert!(list[2].usable_id().is_none());
        assert!(list[3].usable_id().is_none());
    }

    #[test]
    fn test_empty_string_id_is_unusable() {
        let n = Notification::new("");
        assert!(n.usable_id().is_none());
        assert!(Notification::new(0i64).usable_id().is_some());
    }

    #[test]
    fn test_timestamp_accepts_numbers() {
        let n: Notification = serde_json::from_str(r#"{"id": "1", "timestamp": 1700000000}"#).unwrap();
        assert_eq!(n.timestamp_label(), "1700000000");

        let n: Notification =
            serde_json::from_str(r#"{"id": "1", "timestamp": "2024-01-01 10:00:00"}"#).unwrap();
        assert_eq!(n.timestamp_label(), "2024-01-01 10:00:00");
    }

    #[test]
    fn test_display_defaults() {
        let n = Notification::new("1");
        assert_eq!(n.app_label(), UNKNOWN_APP);
        assert_eq!(n.timestamp_label(), "");
        assert_eq!(n.content_text(), NO_CONTENT);
        assert!(n.keyword_name().is_none());

        let n = Notification::new("2").app("").keyword("");
        assert_eq!(n.app_label(), UNKNOWN_APP);
        assert!(n.keyword_name().is_none());
    }

    #[test]
    fn test_message_from_body() {
        assert_eq!(
            StatusResponse::message_from_body(r#"{"status":"error","message":"Not found"}"#, "Not Found"),
            "Not found"
        );
        assert_eq!(
            StatusResponse::message_from_body("<html>oops</html>", "Internal Server Error"),
            "Internal Server Error"
        );
        assert_eq!(
            StatusResponse::message_from_body(r#"{"status":"error"}"#, "Bad Request"),
            "Bad Request"
        );
        assert_eq!(
            StatusResponse::message_from_body(r#"{"error":"Database not initialized"}"#, "Internal Server Error"),
            "Database not initialized"
        );
    }

    #[test]
    fn test_new_notification_form_fields() {
        let form = NewNotification::new("Mail").text("hello").macro_name("urgent");
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["appName"], "Mail");
        assert_eq!(value["text"], "hello");
        assert_eq!(value["macro"], "urgent");
        assert!(value.get("title").is_none());
    }
}
