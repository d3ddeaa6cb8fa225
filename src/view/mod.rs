//! View helpers that compose into ratatui widget trees.

mod lazy;
mod store_view;
#[cfg(debug_assertions)]
mod trace;

pub use lazy::LazyView;
pub use store_view::{StoreView, StoreViewBuilder};
