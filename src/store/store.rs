//! Single-threaded state container with reducer-driven dispatch.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::reducer::Reducer;

type Subscriber<S> = Box<dyn Fn(&S)>;

struct StoreInner<S: 'static, A: 'static> {
    state: RefCell<S>,
    reduce: Box<dyn Fn(S, A) -> S>,
    subscribers: RefCell<Vec<(u64, Subscriber<S>)>>,
    next_id: Cell<u64>,
}

/// Centralized container of application state and the sole point of
/// action dispatch.
///
/// A `Store` is a cheap handle: cloning it clones the handle, not the
/// state. All operations happen on the thread that created the store;
/// there is no internal locking.
///
/// Subscribers are notified after every dispatch, whether or not the
/// reducer produced a different value. Filtering insignificant changes
/// is the job of [`ViewStore`](super::ViewStore).
pub struct Store<S: 'static, A: 'static> {
    inner: Rc<StoreInner<S, A>>,
}

impl<S: 'static, A: 'static> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Clone + 'static, A: 'static> Store<S, A> {
    /// Create a store from an initial state and a reduce function.
    pub fn new<F>(initial: S, reduce: F) -> Self
    where
        F: Fn(S, A) -> S + 'static,
    {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                reduce: Box::new(reduce),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Create a store driven by a [`Reducer`] implementation.
    pub fn from_reducer<R>(initial: S) -> Self
    where
        R: Reducer<State = S, Action = A> + 'static,
    {
        Self::new(initial, R::reduce)
    }

    /// Current state, by value.
    pub fn state(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Run the reducer and notify every subscriber with the new state.
    ///
    /// The state borrow is released before notification, so subscribers
    /// may read the store (and even dispatch) reentrantly. They must not
    /// subscribe or unsubscribe from within a notification.
    pub fn send(&self, action: A) {
        let next = (self.inner.reduce)(self.state(), action);
        *self.inner.state.borrow_mut() = next.clone();
        for (_, subscriber) in self.inner.subscribers.borrow().iter() {
            subscriber(&next);
        }
    }

    /// Register a callback invoked on every dispatch.
    ///
    /// The callback stays registered until the returned [`Subscription`]
    /// is dropped or cancelled.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Box::new(callback)));

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
            }
        })
    }
}

/// Guard for a registered callback. Dropping it removes the callback.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new<F: FnOnce() + 'static>(cancel: F) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the callback now instead of at drop time.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
