//! Chart Adapter
//!
//! Per-app notification counts and the bar-chart seam they are pushed into.

use crate::model::Notification;
use serde::Serialize;
use std::collections::HashMap;

/// Dataset label shown by bar charts
pub const CHART_LABEL: &str = "Notifications per app";

/// App name → count, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    buckets: Vec<(String, u64)>,
}

impl Histogram {
    /// Count for one app
    pub fn get(&self, app: &str) -> Option<u64> {
        self.buckets
            .iter()
            .find(|(name, _)| name == app)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.buckets.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Split into the parallel label/value sequences a bar chart takes
    pub fn chart_data(&self) -> BarChartData {
        let (labels, values) = self.buckets.iter().cloned().unzip();
        BarChartData { labels, values }
    }
}

/// Group notifications by app (missing app → "Unknown") and count them
pub fn compute_histogram(list: &[Notification]) -> Histogram {
    let mut buckets: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for notification in list {
        let app = notification.app_label();
        match index.get(app) {
            Some(&i) => buckets[i].1 += 1,
            None => {
                index.insert(app, buckets.len());
                buckets.push((app.to_string(), 1));
            }
        }
    }

    Histogram { buckets }
}

/// Labels and values for a single-dataset bar chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BarChartData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl BarChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// An external bar chart that accepts replacement data
///
/// Redrawing is the sink's business.
pub trait ChartSink {
    fn replace_data(&mut self, data: &BarChartData);
}

/// Bar chart drawn with block characters, for terminals
#[derive(Debug, Clone)]
pub struct TextBarChart {
    data: BarChartData,
    width: usize,
}

impl TextBarChart {
    /// `width` is the length of the longest bar in characters
    pub fn new(width: usize) -> Self {
        Self {
            data: BarChartData::default(),
            width: width.max(1),
        }
    }

    /// Render one line per bar
    pub fn lines(&self) -> Vec<String> {
        let label_width = self
            .data
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let max = self.data.values.iter().copied().max().unwrap_or(0);

        self.data
            .labels
            .iter()
            .zip(&self.data.values)
            .map(|(label, &value)| {
                let bar = if max == 0 {
                    0
                } else {
                    ((value as f64 / max as f64) * self.width as f64).round() as usize
                };
                format!(
                    "{:<width$} │{} {}",
                    label,
                    "█".repeat(bar.max(1)),
                    value,
                    width = label_width
                )
            })
            .collect()
    }
}

impl Default for TextBarChart {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ChartSink for TextBarChart {
    fn replace_data(&mut self, data: &BarChartData) {
        self.data = data.clone();
    }
}
