//! UI Components
//!
//! Leptos components for the dashboard page.

pub mod chart;
pub mod filter_bar;
pub mod loading;
pub mod notification_list;
pub mod stats_panel;
pub mod toast;

pub use chart::AppChart;
pub use filter_bar::FilterBar;
pub use loading::Loading;
pub use notification_list::NotificationList;
pub use stats_panel::StatsPanel;
pub use toast::Toast;
