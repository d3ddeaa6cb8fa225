//! Store-bound view helpers for ratatui.
//!
//! Two leaf-level helpers for unidirectional-data-flow terminal UIs:
//!
//! - [`StoreView`] binds a [`Store`] to a render function, filtering
//!   out re-renders for state changes the caller deems insignificant
//!   and, in debug builds, tracing every render with a state diff.
//! - [`LazyView`] defers building a widget until each render.
//!
//! The crate carries the minimal store abstraction the helpers bind to
//! ([`Store`], [`Reducer`], [`ViewStore`]); everything else is ratatui.
//!
//! # Example
//!
//! ```
//! use ratatui::widgets::Paragraph;
//! use storeview::{Store, StoreView};
//!
//! enum CounterAction {
//!     Increment,
//! }
//!
//! let store = Store::new(0i32, |state, action| match action {
//!     CounterAction::Increment => state + 1,
//! });
//!
//! let view = StoreView::new(&store, |handle| {
//!     Paragraph::new(format!("count: {}", handle.state()))
//! })
//! .debug("[counter]");
//!
//! store.send(CounterAction::Increment);
//! # let _ = view;
//! ```

pub mod store;
pub mod view;

pub use store::{Reducer, Store, Subscription, ViewStore};
pub use view::{LazyView, StoreView, StoreViewBuilder};
