//! Notiboard Dashboard
//!
//! Notification dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Polls the notification backend every 10 seconds
//! - Free-text search and per-app filtering
//! - Counters and a per-app bar chart
//! - Delete and clear with confirmation
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Filtering, change detection and the derived views come from
//! the `notiboard` core; this crate only fetches and draws.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
