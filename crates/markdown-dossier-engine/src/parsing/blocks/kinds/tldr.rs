use crate::parsing::blocks::kinds::{BlockQuote, BulletList};
use crate::parsing::blocks::types::{Flowable, StyleRole};
use crate::parsing::inline::format_inline;

/// The boxed summary callout opened by a quoted `### TL;DR` heading.
pub struct Tldr;

impl Tldr {
    /// Lower-cased prefix of the quoted text that opens a callout.
    pub const OPENER: &'static str = "### tl;dr";
    pub const LABEL: &'static str = "TL;DR";
    /// Gap emitted for a blank line inside the callout.
    pub const INNER_GAP: f32 = 4.0;

    /// Whether quoted text (prefixes already stripped) opens a callout.
    pub fn opens(quoted: &str) -> bool {
        quoted.to_lowercase().starts_with(Self::OPENER)
    }
}

/// Parses the callout whose heading line is at `start`.
///
/// Consumes the quoted lines after the heading and, when the run ends on a
/// blank line, that blank line too. With no quoted lines the callout is
/// dropped and only the heading line is consumed.
pub fn parse_tldr<S: AsRef<str>>(lines: &[S], start: usize) -> (Option<Flowable>, usize) {
    let mut index = start + 1;
    let mut content = Vec::new();
    while let Some(candidate) = lines.get(index).map(AsRef::as_ref) {
        if BlockQuote::is_quoted(candidate) {
            content.push(BlockQuote::strip_prefixes(candidate));
            index += 1;
            continue;
        }
        if candidate.trim().is_empty() {
            index += 1;
        }
        break;
    }

    if content.is_empty() {
        return (None, start + 1);
    }

    let mut body = vec![Flowable::paragraph(Tldr::LABEL, StyleRole::TldrHeading)];
    let mut pending: Vec<String> = Vec::new();

    for raw in content {
        let text = raw.trim();
        if text.is_empty() {
            flush_items(&mut pending, &mut body);
            body.push(Flowable::spacer(Tldr::INNER_GAP));
            continue;
        }
        if let Some(item) = BulletList::item(text) {
            pending.push(item.to_string());
            continue;
        }
        flush_items(&mut pending, &mut body);
        let formatted = format_inline(text);
        if !formatted.trim().is_empty() {
            body.push(Flowable::paragraph(formatted, StyleRole::TldrBody));
        }
    }
    flush_items(&mut pending, &mut body);

    let callout = Flowable::Callout {
        label: Tldr::LABEL.to_string(),
        body,
    };
    (Some(callout), index)
}

fn flush_items(pending: &mut Vec<String>, body: &mut Vec<Flowable>) {
    if let Some(list) = BulletList::flush(pending, StyleRole::TldrBody) {
        body.push(list);
    }
    pending.clear();
}
