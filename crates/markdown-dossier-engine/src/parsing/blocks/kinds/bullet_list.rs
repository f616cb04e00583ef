use crate::parsing::blocks::types::{Flowable, StyleRole};
use crate::parsing::inline::format_inline;

/// Unordered list items (`- item` or `* item`). Nesting is not tracked.
pub struct BulletList;

impl BulletList {
    pub const MARKERS: &'static [&'static str] = &["- ", "* "];

    /// Item text of a bullet line, with the marker removed and trimmed.
    /// `text` must already have quote prefixes and indentation stripped.
    pub fn item(text: &str) -> Option<&str> {
        Self::MARKERS
            .iter()
            .find_map(|marker| text.strip_prefix(marker))
            .map(str::trim)
    }

    /// Formats a run of raw items into a list, dropping items that format to
    /// blank. `None` when nothing survives.
    pub fn flush(items: &[String], role: StyleRole) -> Option<Flowable> {
        let items: Vec<String> = items
            .iter()
            .map(|item| format_inline(item))
            .filter(|formatted| !formatted.trim().is_empty())
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(Flowable::BulletList { items, role })
        }
    }
}
