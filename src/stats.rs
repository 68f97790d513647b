//! Stats Panel
//!
//! Aggregate counters shown above the notification list.

use crate::model::Notification;
use serde::Serialize;
use std::collections::HashSet;

/// Counters derived from the full notification list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub distinct_apps: usize,
    pub distinct_keywords: usize,
}

/// Recompute all counters from scratch
pub fn compute_stats(list: &[Notification]) -> Stats {
    let apps: HashSet<&str> = list.iter().filter_map(Notification::app_name).collect();
    let keywords: HashSet<&str> = list.iter().filter_map(Notification::keyword_name).collect();

    Stats {
        total: list.len(),
        distinct_apps: apps.len(),
        distinct_keywords: keywords.len(),
    }
}
