//! A view that observes a store and re-renders on distinct state.

use std::fmt;
#[cfg(debug_assertions)]
use std::panic::Location;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{List, ListItem, Widget};

use crate::store::{Store, ViewStore};

#[cfg(debug_assertions)]
use super::trace::StateTrace;

type RenderFn<VS, VA> = Box<dyn Fn(&ViewStore<VS, VA>, Rect, &mut Buffer)>;

/// Binds a [`Store`] to a render function operating on a narrower,
/// caller-chosen view state/action pair.
///
/// The view owns a [`ViewStore`] created exactly once at construction.
/// Upstream dispatches that the duplicate-detection predicate reports
/// as equal to the last delivered view state notify no observers and
/// cause no re-render; everything else flows through unchanged.
///
/// Rendering is immediate-mode: each [`Widget::render`] call reads the
/// current view state, optionally records a debug trace, and invokes
/// the render function with the observation handle.
pub struct StoreView<VS: 'static, VA: 'static> {
    view_store: ViewStore<VS, VA>,
    render: RenderFn<VS, VA>,
    #[cfg(debug_assertions)]
    location: &'static Location<'static>,
    #[cfg(debug_assertions)]
    trace: Option<StateTrace<VS>>,
}

/// Configures a [`StoreView`]: optional state projection, optional
/// action translation, optional duplicate-detection predicate.
///
/// Without [`dedup`](Self::dedup) or
/// [`dedup_structural`](Self::dedup_structural), every upstream
/// dispatch counts as distinct.
pub struct StoreViewBuilder<S: 'static, A: 'static, VS: 'static, VA: 'static> {
    store: Store<S, A>,
    to_view_state: Box<dyn Fn(&S) -> VS>,
    from_view_action: Box<dyn Fn(VA) -> A>,
    is_duplicate: Box<dyn Fn(&VS, &VS) -> bool>,
    #[cfg(debug_assertions)]
    location: &'static Location<'static>,
}

impl<S: Clone + 'static, A: 'static> StoreViewBuilder<S, A, S, A> {
    /// Start from a full store: identity projections, no filtering.
    #[track_caller]
    pub fn new(store: &Store<S, A>) -> Self {
        Self {
            store: store.clone(),
            to_view_state: Box::new(|state: &S| state.clone()),
            from_view_action: Box::new(|action| action),
            is_duplicate: Box::new(|_, _| false),
            #[cfg(debug_assertions)]
            location: Location::caller(),
        }
    }
}

impl<S: Clone + 'static, A: 'static, VS: 'static, VA: 'static> StoreViewBuilder<S, A, VS, VA> {
    /// Project full state into the view state this view renders.
    ///
    /// Resets any predicate set so far: the predicate compares view
    /// states, so it must be chosen after the projection.
    pub fn map_state<VS2, F>(self, to_view_state: F) -> StoreViewBuilder<S, A, VS2, VA>
    where
        VS2: 'static,
        F: Fn(&S) -> VS2 + 'static,
    {
        StoreViewBuilder {
            store: self.store,
            to_view_state: Box::new(to_view_state),
            from_view_action: self.from_view_action,
            is_duplicate: Box::new(|_, _| false),
            #[cfg(debug_assertions)]
            location: self.location,
        }
    }

    /// Translate view actions back into the store's native actions.
    pub fn map_actions<VA2, F>(self, from_view_action: F) -> StoreViewBuilder<S, A, VS, VA2>
    where
        VA2: 'static,
        F: Fn(VA2) -> A + 'static,
    {
        StoreViewBuilder {
            store: self.store,
            to_view_state: self.to_view_state,
            from_view_action: Box::new(from_view_action),
            is_duplicate: self.is_duplicate,
            #[cfg(debug_assertions)]
            location: self.location,
        }
    }

    /// Supply the duplicate-detection predicate.
    ///
    /// Must be an equivalence relation over the view state; a predicate
    /// that is not one degrades deduplication silently.
    pub fn dedup<F>(mut self, is_duplicate: F) -> Self
    where
        F: Fn(&VS, &VS) -> bool + 'static,
    {
        self.is_duplicate = Box::new(is_duplicate);
        self
    }

    /// Use structural equality as the duplicate-detection predicate.
    pub fn dedup_structural(self) -> Self
    where
        VS: PartialEq,
    {
        self.dedup(|a, b| a == b)
    }

    /// Finish with a render function and build the view.
    ///
    /// The view store is derived here, exactly once; it is never
    /// replaced for the lifetime of the returned view.
    pub fn render<W, F>(self, render: F) -> StoreView<VS, VA>
    where
        VS: Clone,
        W: Widget,
        F: Fn(&ViewStore<VS, VA>) -> W + 'static,
    {
        let view_store = ViewStore::scoped(
            &self.store,
            self.to_view_state,
            self.from_view_action,
            self.is_duplicate,
        );
        StoreView {
            view_store,
            render: Box::new(move |handle, area, buf| render(handle).render(area, buf)),
            #[cfg(debug_assertions)]
            location: self.location,
            #[cfg(debug_assertions)]
            trace: None,
        }
    }
}

impl<VS: Clone + PartialEq + 'static, VA: 'static> StoreView<VS, VA> {
    /// Observe a store whose state and actions the view uses directly,
    /// with structural equality as the duplicate-detection predicate.
    #[track_caller]
    pub fn new<W, F>(store: &Store<VS, VA>, render: F) -> Self
    where
        W: Widget,
        F: Fn(&ViewStore<VS, VA>) -> W + 'static,
    {
        StoreViewBuilder::new(store).dedup_structural().render(render)
    }

    /// Observe a projection of a larger store's state; actions pass
    /// through untranslated.
    #[track_caller]
    pub fn scoped<S, StateFn, W, F>(store: &Store<S, VA>, to_view_state: StateFn, render: F) -> Self
    where
        S: Clone + 'static,
        StateFn: Fn(&S) -> VS + 'static,
        W: Widget,
        F: Fn(&ViewStore<VS, VA>) -> W + 'static,
    {
        StoreViewBuilder::new(store)
            .map_state(to_view_state)
            .dedup_structural()
            .render(render)
    }

    /// Observe a projection of a larger store's state and translate
    /// view actions back into the store's native actions.
    #[track_caller]
    pub fn scoped_actions<S, A, StateFn, ActionFn, W, F>(
        store: &Store<S, A>,
        to_view_state: StateFn,
        from_view_action: ActionFn,
        render: F,
    ) -> Self
    where
        S: Clone + 'static,
        A: 'static,
        StateFn: Fn(&S) -> VS + 'static,
        ActionFn: Fn(VA) -> A + 'static,
        W: Widget,
        F: Fn(&ViewStore<VS, VA>) -> W + 'static,
    {
        StoreViewBuilder::new(store)
            .map_state(to_view_state)
            .map_actions(from_view_action)
            .dedup_structural()
            .render(render)
    }
}

impl<VS: Clone + 'static, VA: 'static> StoreView<VS, VA> {
    /// Fully explicit construction for view states without structural
    /// equality: projection, translation, and predicate all supplied.
    #[track_caller]
    pub fn with_dedup<S, A, StateFn, ActionFn, DedupFn, W, F>(
        store: &Store<S, A>,
        to_view_state: StateFn,
        from_view_action: ActionFn,
        is_duplicate: DedupFn,
        render: F,
    ) -> Self
    where
        S: Clone + 'static,
        A: 'static,
        StateFn: Fn(&S) -> VS + 'static,
        ActionFn: Fn(VA) -> A + 'static,
        DedupFn: Fn(&VS, &VS) -> bool + 'static,
        W: Widget,
        F: Fn(&ViewStore<VS, VA>) -> W + 'static,
    {
        StoreViewBuilder::new(store)
            .map_state(to_view_state)
            .map_actions(from_view_action)
            .dedup(is_duplicate)
            .render(render)
    }

    /// The observation handle this view renders from.
    pub fn view_store(&self) -> &ViewStore<VS, VA> {
        &self.view_store
    }
}

impl<VS: Clone + fmt::Debug + 'static, VA: 'static> StoreView<VS, VA> {
    /// Emit a human-readable trace on every render: the view state and
    /// action type names, the construction call-site, and either a full
    /// dump (first render), a no-difference note, or a field-level diff.
    ///
    /// Traces go to `tracing::debug!` under the `storeview` target.
    #[cfg(debug_assertions)]
    #[must_use]
    pub fn debug(mut self, prefix: impl Into<String>) -> Self {
        self.trace = Some(StateTrace::new::<VA>(prefix.into(), self.location));
        self
    }

    /// Release builds compile tracing out entirely; this is a no-op.
    #[cfg(not(debug_assertions))]
    #[must_use]
    pub fn debug(self, _prefix: impl Into<String>) -> Self {
        self
    }
}

impl<VS: Clone + IntoIterator + 'static, VA: 'static> StoreView<VS, VA> {
    /// Iterate the elements of the observed collection state, in order.
    pub fn items(&self) -> <VS as IntoIterator>::IntoIter {
        self.view_store.state().into_iter()
    }
}

impl<VS: Clone + IntoIterator + 'static, VA: 'static> IntoIterator for &StoreView<VS, VA> {
    type Item = <VS as IntoIterator>::Item;
    type IntoIter = <VS as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

impl<VS, VA> StoreView<VS, VA>
where
    VS: Clone + IntoIterator + 'static,
    <VS as IntoIterator>::Item: Into<ListItem<'static>>,
    VA: 'static,
{
    /// Build a [`List`] over the current elements, one item per
    /// element, preserving order and count.
    pub fn list(&self) -> List<'static> {
        List::new(self.items().map(Into::into))
    }
}

impl<VS: Clone + 'static, VA: 'static> Widget for &StoreView<VS, VA> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        #[cfg(debug_assertions)]
        if let Some(trace) = &self.trace {
            let message = trace.record(&self.view_store.state());
            tracing::debug!(target: "storeview", "{message}");
        }
        (self.render)(&self.view_store, area, buf);
    }
}

impl<VS: Clone + 'static, VA: 'static> Widget for StoreView<VS, VA> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self).render(area, buf);
    }
}
