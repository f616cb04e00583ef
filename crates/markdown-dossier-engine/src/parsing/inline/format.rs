use std::sync::OnceLock;

use regex::Regex;

use super::kinds::{CodeSpan, FontFace, Link};

/// HTML tags rewritten to plain text before anything else runs.
const TAG_REWRITES: &[(&str, &str)] = &[
    ("<br />", "\n"),
    ("<br/>", "\n"),
    ("<br>", "\n"),
    ("<ul>", ""),
    ("</ul>", ""),
    ("</li>", "\n"),
    ("<li>", "- "),
];

/// Escapes text for embedding in the typesetter's markup.
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

fn normalize_tags(text: &str) -> String {
    TAG_REWRITES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

struct Emphasis {
    pattern: Regex,
    replacement: &'static str,
}

/// Emphasis passes in application order.
fn emphasis_passes() -> &'static [Emphasis] {
    static PASSES: OnceLock<Vec<Emphasis>> = OnceLock::new();
    PASSES.get_or_init(|| {
        [
            (r"__(.+?)__", "<b>${1}</b>"),
            (r"\*\*(.+?)\*\*", "<b>${1}</b>"),
            (r"_(.+?)_", "<i>${1}</i>"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Emphasis {
            pattern: Regex::new(pattern).expect("Invalid emphasis regex"),
            replacement,
        })
        .collect()
    })
}

fn apply_emphasis(text: String) -> String {
    emphasis_passes().iter().fold(text, |acc, pass| {
        pass.pattern
            .replace_all(&acc, pass.replacement)
            .into_owned()
    })
}

/// Converts one line (or cell, or list item) of inline markdown into markup.
///
/// Passes run in a fixed order and must not be reordered:
///
/// 1. HTML line-break and list tags become newlines and `- ` prefixes.
/// 2. Code spans are swapped for placeholders, so nothing below sees them.
/// 3. Everything left is escaped.
/// 4. Links are swapped for placeholders too, so emphasis markers inside a
///    target never pair with markers in the label or the text around it.
/// 5. Bold, italic and `<font face>` tags are applied to the text and to
///    each link label on its own, then links are restored. Placeholders
///    contain no `_`, `*`, `[` or `&lt;`, so these passes cannot reach into
///    them.
/// 6. Code spans come back as escaped, tinted and underlined spans.
/// 7. Remaining newlines become `<br/>`.
///
/// Malformed input never fails: unbalanced markers stay literal, unknown
/// font faces fall back to the default face, unsupported links keep only
/// their label.
pub fn format_inline(text: &str) -> String {
    let cleaned = normalize_tags(text);
    let (with_placeholders, code_chunks) = CodeSpan::extract(&cleaned);
    let escaped = escape(&with_placeholders);
    let (unlinked, mut links) = Link::extract(&escaped);
    for link in &mut links {
        link.label = apply_emphasis(std::mem::take(&mut link.label));
    }
    let emphasised = apply_emphasis(unlinked);
    let linked = Link::restore(emphasised, &links);
    let faced = FontFace::normalize(&linked);
    let restored = CodeSpan::restore(faced, &code_chunks);
    restored.replace('\n', "<br/>")
}
