//! Observation handle scoped to a view's state/action projection.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::store::{Store, Subscription};

type Observer<VS> = Box<dyn Fn(&VS)>;

struct ViewStoreInner<VS: 'static, VA: 'static> {
    state: RefCell<VS>,
    send: Box<dyn Fn(VA)>,
    observers: RefCell<Vec<(u64, Observer<VS>)>>,
    next_id: Cell<u64>,
}

/// A scoped, read/dispatch interface derived from a [`Store`].
///
/// The view store recomputes its projection on every upstream dispatch
/// and notifies its observers only when the duplicate-detection
/// predicate reports the new value as distinct from the last delivered
/// one. Observers therefore see exactly the state changes the caller
/// deems significant.
///
/// The predicate must be an equivalence relation (reflexive, symmetric,
/// transitive). A predicate that is not one degrades deduplication
/// quality silently; it is never an error.
pub struct ViewStore<VS: 'static, VA: 'static> {
    inner: Rc<ViewStoreInner<VS, VA>>,
    // Keeps the upstream store hook registered for as long as any
    // handle to this view store is alive.
    _upstream: Rc<Subscription>,
}

impl<VS: 'static, VA: 'static> Clone for ViewStore<VS, VA> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            _upstream: Rc::clone(&self._upstream),
        }
    }
}

impl<VS: Clone + 'static, VA: 'static> ViewStore<VS, VA> {
    /// Derive a view store from `store` via a state projection, an
    /// action embedding, and a duplicate-detection predicate.
    ///
    /// The upstream hook is created here, exactly once, and lives until
    /// the last clone of the view store is dropped.
    pub fn scoped<S, A, StateFn, ActionFn, DedupFn>(
        store: &Store<S, A>,
        to_view_state: StateFn,
        from_view_action: ActionFn,
        is_duplicate: DedupFn,
    ) -> Self
    where
        S: Clone + 'static,
        A: 'static,
        StateFn: Fn(&S) -> VS + 'static,
        ActionFn: Fn(VA) -> A + 'static,
        DedupFn: Fn(&VS, &VS) -> bool + 'static,
    {
        let initial = to_view_state(&store.state());
        let send = {
            let store = store.clone();
            Box::new(move |action| store.send(from_view_action(action))) as Box<dyn Fn(VA)>
        };
        let inner = Rc::new(ViewStoreInner {
            state: RefCell::new(initial),
            send,
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        });

        let hook = {
            let inner = Rc::clone(&inner);
            store.subscribe(move |full: &S| {
                let next = to_view_state(full);
                let duplicate = is_duplicate(&inner.state.borrow(), &next);
                if duplicate {
                    return;
                }
                *inner.state.borrow_mut() = next.clone();
                for (_, observer) in inner.observers.borrow().iter() {
                    observer(&next);
                }
            })
        };

        Self {
            inner,
            _upstream: Rc::new(hook),
        }
    }

    /// [`scoped`](Self::scoped) with structural equality as the
    /// duplicate-detection predicate.
    pub fn deduped<S, A, StateFn, ActionFn>(
        store: &Store<S, A>,
        to_view_state: StateFn,
        from_view_action: ActionFn,
    ) -> Self
    where
        VS: PartialEq,
        S: Clone + 'static,
        A: 'static,
        StateFn: Fn(&S) -> VS + 'static,
        ActionFn: Fn(VA) -> A + 'static,
    {
        Self::scoped(store, to_view_state, from_view_action, |a, b| a == b)
    }

    /// Last delivered view state, by value.
    pub fn state(&self) -> VS {
        self.inner.state.borrow().clone()
    }

    /// Translate the view action and dispatch it to the backing store.
    pub fn send(&self, action: VA) {
        (self.inner.send)(action)
    }

    /// Register an observer invoked whenever a distinct view state is
    /// delivered. Observers must not observe or unobserve from within a
    /// notification.
    pub fn observe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&VS) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Box::new(observer)));

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.observers.borrow_mut().retain(|(oid, _)| *oid != id);
            }
        })
    }
}
