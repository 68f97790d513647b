//! # Notiboard
//!
//! Notification Dashboard - polls a notification backend, and filters,
//! counts and charts the notifications it holds.
//!
//! ## Features
//!
//! - **Change-suppressed polling**: the list is only re-derived when its
//!   id signature changes
//! - **Filtering**: free-text search plus exact app selection
//! - **Derived views**: stats, per-app histogram and selector options
//! - **Mutations**: confirmed delete-one and clear-all, followed by a re-sync
//!
//! ## Modules
//!
//! - [`dashboard`]: Application state and derived views
//! - [`sync`]: Background poller (native)
//! - [`client`]: Backend REST client (native)
//! - [`mutation`]: Delete, clear and submit
//!
//! The core modules build without the `native` feature so the WASM
//! dashboard can reuse them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notiboard::{Backend, BackendConfig, HttpBackend, SyncPoller};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&BackendConfig::default())?);
//!     let poller = Arc::new(SyncPoller::new(backend));
//!
//!     poller.sync().await;
//!
//!     let dashboard = poller.dashboard();
//!     let dashboard = dashboard.read().await;
//!     println!("{} notifications", dashboard.view().stats.total);
//!
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod dashboard;
pub mod filter;
pub mod linkify;
pub mod model;
pub mod mutation;
pub mod options;
pub mod render;
pub mod stats;
pub mod store;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod sync;

// Re-export top-level types for convenience
pub use chart::{compute_histogram, BarChartData, ChartSink, Histogram, TextBarChart};
pub use dashboard::{Dashboard, DashboardView, DeleteTarget, SyncOutcome, POLL_INTERVAL};
pub use filter::{filter, FilterState};
pub use linkify::{linkify, render_content};
pub use model::{NewNotification, Notification, NotificationId, StatusResponse};
pub use mutation::{Alert, Confirm};
pub use options::{AppOptions, OptionsPatch};
pub use render::{render, Card, CardHandle, RenderedList};
pub use stats::{compute_stats, Stats};
pub use store::{NotificationStore, Signature};

#[cfg(feature = "native")]
pub use client::{Backend, ClientError, HttpBackend};

#[cfg(feature = "native")]
pub use config::{BackendConfig, Config, ConfigError, LoggingConfig};

#[cfg(feature = "native")]
pub use mutation::{MutationClient, MutationOutcome};

#[cfg(feature = "native")]
pub use sync::{SyncPoller, SyncState};
