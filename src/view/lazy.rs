//! A view that defers building its content until it is rendered.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

/// Wraps a widget-producing closure and invokes it anew on every
/// render.
///
/// Nothing is built at construction and nothing is cached: a view
/// rendered twice runs its producer twice. Useful when building the
/// content is expensive and the view may never be shown.
pub struct LazyView {
    build: Box<dyn Fn(Rect, &mut Buffer)>,
}

impl LazyView {
    /// Capture `build` as a deferred, repeatable producer.
    pub fn new<W, F>(build: F) -> Self
    where
        W: Widget,
        F: Fn() -> W + 'static,
    {
        Self {
            build: Box::new(move |area, buf| build().render(area, buf)),
        }
    }
}

impl Widget for &LazyView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (self.build)(area, buf);
    }
}

impl Widget for LazyView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self).render(area, buf);
    }
}
