//! State Management
//!
//! Global dashboard state, background polling and mutations.

pub mod global;
pub mod mutations;
pub mod sync;

pub use global::{provide_global_state, GlobalState};
