//! Notification Store
//!
//! Holds the last notification list accepted from the backend. The list is
//! only ever replaced as a whole, and only when its signature changes.

use crate::model::{Notification, NotificationId};
use std::sync::Arc;

/// Cheap change digest of a notification list: sorted ids plus length
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    ids: Vec<String>,
    len: usize,
}

impl Signature {
    /// Compute the signature of a list (missing ids count as empty strings)
    pub fn of(list: &[Notification]) -> Self {
        let mut ids: Vec<String> = list
            .iter()
            .map(|n| n.id.as_ref().map(|id| id.to_string()).unwrap_or_default())
            .collect();
        ids.sort();

        Self {
            ids,
            len: list.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// In-memory cache of the authoritative notification list
#[derive(Debug, Default)]
pub struct NotificationStore {
    list: Arc<Vec<Notification>>,
    /// `None` until the first payload is accepted
    signature: Option<Signature>,
    generation: u64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a freshly received payload
    ///
    /// Returns `true` when the payload replaced the stored list. A payload
    /// with the same signature as the stored list is dropped. The first
    /// payload is always accepted, even when empty.
    pub fn accept(&mut self, payload: Vec<Notification>) -> bool {
        let signature = Signature::of(&payload);

        if self.signature.as_ref() == Some(&signature) {
            return false;
        }

        self.list = Arc::new(payload);
        self.signature = Some(signature);
        self.generation += 1;
        true
    }

    /// Shared handle to the current list
    pub fn list(&self) -> Arc<Vec<Notification>> {
        Arc::clone(&self.list)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.list
    }

    /// Whether any payload has been accepted yet
    pub fn is_loaded(&self) -> bool {
        self.signature.is_some()
    }

    /// Number of accepted payloads so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Find a notification by id
    pub fn find(&self, id: &NotificationId) -> Option<&Notification> {
        self.list.iter().find(|n| n.usable_id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Notification> {
        vec![
            Notification::new("b").app("Mail"),
            Notification::new("a").app("Chat"),
        ]
    }

    #[test]
    fn test_identical_payload_is_suppressed() {
        let mut store = NotificationStore::new();

        assert!(store.accept(sample()));
        assert!(!store.accept(sample()));
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn test_reordered_payload_is_suppressed() {
        let mut store = NotificationStore::new();
        store.accept(sample());

        let mut reordered = sample();
        reordered.reverse();
        assert!(!store.accept(reordered));
    }

    #[test]
    fn test_changed_ids_are_accepted() {
        let mut store = NotificationStore::new();
        store.accept(sample());

        let mut changed = sample();
        changed.push(Notification::new("c"));
        assert!(store.accept(changed));
        assert_eq!(store.len(), 3);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_duplicate_ids_change_length() {
        let mut store = NotificationStore::new();
        store.accept(vec![Notification::new("a")]);

        assert!(store.accept(vec![Notification::new("a"), Notification::new("a")]));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_first_empty_payload_is_accepted() {
        let mut store = NotificationStore::new();
        assert!(!store.is_loaded());

        assert!(store.accept(Vec::new()));
        assert!(store.is_loaded());
        assert!(store.is_empty());

        assert!(!store.accept(Vec::new()));
    }

    #[test]
    fn test_list_is_swapped_not_mutated() {
        let mut store = NotificationStore::new();
        store.accept(sample());
        let before = store.list();

        store.accept(vec![Notification::new("z")]);

        assert_eq!(before.len(), 2);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_signature_counts_missing_ids() {
        let sig = Signature::of(&[Notification::without_id(), Notification::new("1")]);
        assert_eq!(sig.len(), 2);
        assert_eq!(sig, Signature::of(&[Notification::new("1"), Notification::new("")]));
    }

    #[test]
    fn test_find() {
        let mut store = NotificationStore::new();
        store.accept(sample());

        let found = store.find(&NotificationId::from("a")).unwrap();
        assert_eq!(found.app_label(), "Chat");
        assert!(store.find(&NotificationId::from("missing")).is_none());
    }
}
