//! App Selector Options
//!
//! Keeps the app filter's option list in step with the apps present in the
//! store by patching it rather than rebuilding it.

use crate::model::Notification;
use std::collections::HashSet;

/// Value of the implicit "All apps" option
pub const ALL_APPS: &str = "";

/// Distinct non-empty app names, in order of first appearance
pub fn distinct_apps(list: &[Notification]) -> Vec<&str> {
    let mut seen = HashSet::new();
    list.iter()
        .filter_map(Notification::app_name)
        .filter(|app| seen.insert(*app))
        .collect()
}

/// Option list of the app selector plus its current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppOptions {
    options: Vec<String>,
    selected: String,
}

/// What a reconcile pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsPatch {
    pub removed: Vec<String>,
    pub added: Vec<String>,
    /// The previous selection disappeared and was reset to "All apps"
    pub selection_reset: bool,
}

impl OptionsPatch {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && !self.selection_reset
    }
}

impl AppOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// App options, excluding the implicit "All apps"
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Set the selection; it is re-validated on the next reconcile
    pub fn select(&mut self, app: impl Into<String>) {
        self.selected = app.into();
    }

    /// Patch the option list to match `present`
    ///
    /// Options for vanished apps are removed, new apps are appended, and
    /// the selection survives only if its app is still present.
    pub fn reconcile<'a>(&mut self, present: impl IntoIterator<Item = &'a str>) -> OptionsPatch {
        let mut patch = OptionsPatch::default();
        let mut present_set: HashSet<&str> = HashSet::new();
        let mut present_order: Vec<&str> = Vec::new();
        for app in present {
            if !app.is_empty() && present_set.insert(app) {
                present_order.push(app);
            }
        }

        self.options.retain(|option| {
            let keep = present_set.contains(option.as_str());
            if !keep {
                patch.removed.push(option.clone());
            }
            keep
        });

        let existing: HashSet<String> = self.options.iter().cloned().collect();
        for app in present_order {
            if !existing.contains(app) {
                self.options.push(app.to_string());
                patch.added.push(app.to_string());
            }
        }

        if self.selected != ALL_APPS && !present_set.contains(self.selected.as_str()) {
            self.selected = ALL_APPS.to_string();
            patch.selection_reset = true;
        }

        patch
    }
}
