use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Markdown `[label](target)` links.
///
/// Only external URIs become clickable; in-document fragments and anything
/// without a recognised scheme collapse to their label.
pub struct Link;

impl Link {
    /// Schemes that are never emitted as clickable references.
    pub const UNSAFE_SCHEMES: &'static [&'static str] = &["javascript", "vbscript", "data"];
    /// Marker framing a placeholder; never produced by escaping.
    const MARK: char = '\u{0}';

    fn pattern() -> &'static Regex {
        static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
        LINK_REGEX
            .get_or_init(|| Regex::new(r"\[(.+?)\]\((.+?)\)").expect("Invalid link regex"))
    }

    fn scheme_pattern() -> &'static Regex {
        static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();
        SCHEME_REGEX.get_or_init(|| {
            Regex::new(r"(?i)^([a-z][a-z0-9+.\-]*):").expect("Invalid link scheme regex")
        })
    }

    /// Whether `target` is an external URI that may be rendered as a link.
    pub fn is_external(target: &str) -> bool {
        if target.starts_with('#') {
            return false;
        }
        match Self::scheme_pattern().captures(target) {
            Some(caps) => {
                let scheme = caps[1].to_ascii_lowercase();
                !Self::UNSAFE_SCHEMES.contains(&scheme.as_str())
            }
            None => false,
        }
    }

    fn placeholder(index: usize) -> String {
        format!("{mark}LINK{index}{mark}", mark = Self::MARK)
    }

    /// Replaces every link in already-escaped text with a numbered
    /// placeholder, so emphasis passes cannot pair markers across the label
    /// and the target.
    pub fn extract(text: &str) -> (String, Vec<LinkChunk>) {
        let mut chunks = Vec::new();
        let replaced = Self::pattern().replace_all(text, |caps: &Captures<'_>| {
            let index = chunks.len();
            let target = &caps[2];
            chunks.push(LinkChunk {
                label: caps[1].to_string(),
                href: Self::is_external(target).then(|| target.to_string()),
            });
            Self::placeholder(index)
        });
        (replaced.into_owned(), chunks)
    }

    /// Puts links back where the placeholders were. Labels are expected to
    /// be formatted already.
    pub fn restore(mut text: String, chunks: &[LinkChunk]) -> String {
        for (index, chunk) in chunks.iter().enumerate() {
            let markup = match &chunk.href {
                Some(href) => format!(r#"<link href="{href}">{}</link>"#, chunk.label),
                None => chunk.label.clone(),
            };
            text = text.replace(&Self::placeholder(index), &markup);
        }
        text
    }
}

/// A link lifted out of the text by [`Link::extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinkChunk {
    pub label: String,
    /// `None` when the target is not external; only the label is kept.
    pub href: Option<String>,
}
