//! Debug-build state dump and diff formatting for render tracing.

use std::cell::RefCell;
use std::fmt;
use std::panic::Location;

/// Per-view trace state: a one-slot memory of the previously rendered
/// view state plus everything needed to format a human-readable message.
///
/// Only compiled into debug builds; release builds carry no trace slot
/// at all.
pub(crate) struct StateTrace<VS> {
    prefix: String,
    location: &'static Location<'static>,
    state_type: String,
    action_type: String,
    dump: fn(&VS) -> String,
    prev: RefCell<Option<VS>>,
}

impl<VS: fmt::Debug> StateTrace<VS> {
    pub(crate) fn new<VA>(prefix: String, location: &'static Location<'static>) -> Self {
        Self {
            prefix,
            location,
            state_type: short_type_name::<VS>(),
            action_type: short_type_name::<VA>(),
            dump: dump_value::<VS>,
            prev: RefCell::new(None),
        }
    }
}

impl<VS: Clone> StateTrace<VS> {
    /// Format the trace message for a render delivering `new`, and
    /// remember `new` for the next render.
    ///
    /// Three forms: "(Initial state)" plus a full dump on the first
    /// render, "(No difference in state detected)" when the pretty dump
    /// is unchanged, or a line diff of the two dumps otherwise.
    pub(crate) fn record(&self, new: &VS) -> String {
        let header = self.header();
        let mut prev = self.prev.borrow_mut();
        let message = match prev.as_ref() {
            None => format!("{header}: (Initial state)\n{}", indent((self.dump)(new))),
            Some(old) => {
                let before = (self.dump)(old);
                let after = (self.dump)(new);
                if before == after {
                    format!("{header}: (No difference in state detected)")
                } else {
                    format!("{header}: state changed\n{}", diff_lines(&before, &after))
                }
            }
        };
        *prev = Some(new.clone());
        message
    }

    fn header(&self) -> String {
        let label = if self.prefix.is_empty() {
            String::new()
        } else {
            format!("{} ", self.prefix)
        };
        format!(
            "{label}StoreView<{}, {}>@{}",
            self.state_type, self.action_type, self.location
        )
    }
}

fn dump_value<T: fmt::Debug>(value: &T) -> String {
    format!("{value:#?}")
}

fn indent(text: String) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line diff of two pretty dumps: the common prefix and suffix are
/// trimmed, the remainder is emitted as `-` (old) and `+` (new) lines.
fn diff_lines(before: &str, after: &str) -> String {
    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();

    let mut start = 0;
    while start < old.len() && start < new.len() && old[start] == new[start] {
        start += 1;
    }
    let mut old_end = old.len();
    let mut new_end = new.len();
    while old_end > start && new_end > start && old[old_end - 1] == new[new_end - 1] {
        old_end -= 1;
        new_end -= 1;
    }

    let mut lines = Vec::with_capacity((old_end - start) + (new_end - start));
    for line in &old[start..old_end] {
        lines.push(format!("  - {}", line.trim_start()));
    }
    for line in &new[start..new_end] {
        lines.push(format!("  + {}", line.trim_start()));
    }
    lines.join("\n")
}

/// `std::any::type_name` with module paths stripped from every segment,
/// so `alloc::vec::Vec<alloc::string::String>` reads `Vec<String>`.
fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            push_last_segment(&mut out, &segment);
            segment.clear();
            out.push(ch);
        }
    }
    push_last_segment(&mut out, &segment);
    out
}

fn push_last_segment(out: &mut String, segment: &str) {
    if let Some(last) = segment.rsplit("::").next() {
        out.push_str(last);
    }
}
