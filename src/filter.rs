//! Filtering
//!
//! Free-text search combined with an exact source-app selector.

use crate::model::Notification;

/// Current search term and app selection
///
/// An empty `selected_app` means "all apps".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub selected_app: String,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, selected_app: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            selected_app: selected_app.into(),
        }
    }

    /// Whether this filter lets everything through
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.selected_app.is_empty()
    }
}

/// Select the notifications matching `state`, keeping list order
///
/// A notification passes when its app equals the selected app (or none is
/// selected) and the search term occurs, case-insensitively, in its app,
/// content or keyword (or the term is empty). Missing fields match as "".
pub fn filter<'a>(list: &'a [Notification], state: &FilterState) -> Vec<&'a Notification> {
    let term = state.search_term.to_lowercase();
    let app = state.selected_app.as_str();

    list.iter()
        .filter(|n| app.is_empty() || n.app.as_deref().unwrap_or("") == app)
        .filter(|n| term.is_empty() || search_matches(n, &term))
        .collect()
}

fn search_matches(n: &Notification, term: &str) -> bool {
    [&n.app, &n.content, &n.keyword]
        .into_iter()
        .any(|field| field.as_deref().unwrap_or("").to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Notification> {
        vec![
            Notification::new("1").app("Mail").content("hi"),
            Notification::new("2").app("Chat").content("bye").keyword("urgent"),
        ]
    }

    #[test]
    fn test_filter_by_keyword_term() {
        let list = sample();
        let result = filter(&list, &FilterState::new("urgent", ""));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].app_label(), "Chat");
    }

    #[test]
    fn test_filter_by_app() {
        let list = sample();
        let result = filter(&list, &FilterState::new("", "Mail"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].content_text(), "hi");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let list = sample();
        assert_eq!(filter(&list, &FilterState::default()).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let list = sample();
        assert_eq!(filter(&list, &FilterState::new("URGENT", "")).len(), 1);
        assert_eq!(filter(&list, &FilterState::new("mAiL", "")).len(), 1);
        assert_eq!(filter(&list, &FilterState::new("BY", "")).len(), 1);
    }

    #[test]
    fn test_app_match_is_exact() {
        let list = sample();
        assert!(filter(&list, &FilterState::new("", "mail")).is_empty());
        assert!(filter(&list, &FilterState::new("", "Mai")).is_empty());
    }

    #[test]
    fn test_both_conditions_required() {
        let list = sample();
        assert!(filter(&list, &FilterState::new("urgent", "Mail")).is_empty());
        assert_eq!(filter(&list, &FilterState::new("hi", "Mail")).len(), 1);
    }

    #[test]
    fn test_missing_fields_never_match_everything() {
        let list = vec![Notification::new("1"), Notification::new("2").content("hello")];
        let result = filter(&list, &FilterState::new("x", ""));
        assert!(result.is_empty());

        let result = filter(&list, &FilterState::new("hell", ""));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_order_is_preserved() {
        let list = vec![
            Notification::new("3").app("A").content("x"),
            Notification::new("1").app("B").content("x"),
            Notification::new("2").app("C").content("x"),
        ];
        let ids: Vec<String> = filter(&list, &FilterState::new("x", ""))
            .iter()
            .map(|n| n.usable_id().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }
}
