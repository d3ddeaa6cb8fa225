//! Unidirectional data flow primitives.
//!
//! This module provides the store abstraction the view helpers bind to.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ ViewStore ──→ View
//!    ↑                                            │
//!    └────────────────────────────────────────────┘
//! ```
//!
//! - **Store**: single-threaded state container, sole point of dispatch
//! - **Reducer**: pure function that transforms state based on actions
//! - **ViewStore**: observation handle narrowed to a view's state/action
//!   projection, with duplicate-state filtering

mod reducer;
#[allow(clippy::module_inception)]
mod store;
mod view_store;

pub use reducer::Reducer;
pub use store::{Store, Subscription};
pub use view_store::ViewStore;
