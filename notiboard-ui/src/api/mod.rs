//! Backend API
//!
//! Fetch, delete and clear calls against the notification backend.

pub mod client;

pub use client::{
    clear_notifications, delete_notification, fetch_notifications, get_api_base, ApiError,
};
