//! List Renderer
//!
//! Projects notifications into display cards. Each card carries a handle;
//! the rendered list maps handles back to notification ids so delete
//! controls never have to read ids out of markup.

use crate::linkify::render_content;
use crate::model::{Notification, NotificationId};
use serde::Serialize;

/// Text shown when there is nothing to list
pub const EMPTY_PLACEHOLDER: &str = "No notifications found.";

/// Handle of a rendered card, valid for the list that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardHandle(usize);

impl CardHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single notification card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub handle: CardHandle,
    pub id: NotificationId,
    pub app: String,
    pub timestamp: String,
    pub keyword: Option<String>,
    /// Body as plain text
    pub content: String,
    /// Body with links and line breaks
    pub content_html: String,
}

/// Output of a render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum RenderedList {
    /// No payload has been accepted yet
    #[default]
    NotLoaded,
    /// Loaded, but the list to show was empty
    Placeholder,
    Cards(Vec<Card>),
}

impl RenderedList {
    pub fn cards(&self) -> &[Card] {
        match self {
            RenderedList::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderedList::Placeholder)
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, RenderedList::NotLoaded)
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    pub fn card(&self, handle: CardHandle) -> Option<&Card> {
        self.cards().get(handle.0)
    }

    /// Notification id behind a card handle
    pub fn id_for(&self, handle: CardHandle) -> Option<&NotificationId> {
        self.card(handle).map(|card| &card.id)
    }
}

/// Render notifications into cards
///
/// An empty input renders the placeholder. Records without a usable id
/// are skipped with a warning; the rest still render.
pub fn render<'a>(items: impl IntoIterator<Item = &'a Notification>) -> RenderedList {
    let mut seen_any = false;
    let mut cards = Vec::new();

    for notification in items {
        seen_any = true;

        let Some(id) = notification.usable_id() else {
            tracing::warn!(
                app = notification.app_label(),
                "Notification without id, skipping"
            );
            continue;
        };

        let content = notification.content_text();
        cards.push(Card {
            handle: CardHandle(cards.len()),
            id: id.clone(),
            app: notification.app_label().to_string(),
            timestamp: notification.timestamp_label().to_string(),
            keyword: notification.keyword_name().map(str::to_string),
            content: content.to_string(),
            content_html: render_content(content),
        });
    }

    if !seen_any {
        return RenderedList::Placeholder;
    }

    RenderedList::Cards(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_renders_placeholder() {
        let list: Vec<Notification> = Vec::new();
        let rendered = render(&list);
        assert!(rendered.is_placeholder());
        assert!(rendered.is_loaded());
        assert_eq!(rendered.len(), 0);
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let list = vec![Notification::without_id().app("X"), Notification::new("2").app("Y")];
        let rendered = render(&list);

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered.cards()[0].id, NotificationId::from("2"));
        assert_eq!(rendered.cards()[0].app, "Y");
    }

    #[test]
    fn test_all_invalid_is_not_placeholder() {
        let list = vec![Notification::without_id(), Notification::new("")];
        let rendered = render(&list);
        assert!(!rendered.is_placeholder());
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_card_fields() {
        let list = vec![
            Notification::new("7")
                .app("Mail")
                .timestamp("2024-01-01 10:00:00")
                .keyword("urgent")
                .content("See www.example.com\nthanks"),
            Notification::new("8"),
        ];
        let rendered = render(&list);
        let first = &rendered.cards()[0];
        let second = &rendered.cards()[1];

        assert_eq!(first.app, "Mail");
        assert_eq!(first.timestamp, "2024-01-01 10:00:00");
        assert_eq!(first.keyword.as_deref(), Some("urgent"));
        assert!(first.content_html.contains(r#"href="http://www.example.com""#));
        assert!(first.content_html.ends_with("<br>thanks"));

        assert_eq!(second.app, "Unknown");
        assert_eq!(second.timestamp, "");
        assert!(second.keyword.is_none());
        assert_eq!(second.content, "No content");
    }

    #[test]
    fn test_handles_map_to_ids() {
        let list = vec![
            Notification::new("a"),
            Notification::without_id(),
            Notification::new(9i64),
        ];
        let rendered = render(&list);
        let handles: Vec<CardHandle> = rendered.cards().iter().map(|c| c.handle).collect();

        assert_eq!(rendered.id_for(handles[0]), Some(&NotificationId::from("a")));
        assert_eq!(rendered.id_for(handles[1]), Some(&NotificationId::Number(9)));
        assert_eq!(rendered.id_for(CardHandle(5)), None);
    }

    #[test]
    fn test_renders_filtered_references() {
        let list = vec![Notification::new("1").app("A"), Notification::new("2").app("B")];
        let subset: Vec<&Notification> = list.iter().filter(|n| n.app_label() == "B").collect();
        let rendered = render(subset);
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered.cards()[0].app, "B");
    }
}
