use std::sync::OnceLock;

use regex::Regex;

/// Code span inline type with owned delimiter and placeholder conventions.
///
/// Code spans are raw zones: their contents are lifted out before escaping and
/// emphasis passes run, then restored as a tinted, underlined span.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';
    /// Marker byte framing a placeholder; never produced by escaping.
    const MARK: char = '\u{0}';
    /// Background tint of restored code spans.
    pub const BACKCOLOR: &'static str = "#F5F5F5";

    fn pattern() -> &'static Regex {
        static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
        CODE_REGEX.get_or_init(|| Regex::new(r"`([^`]+)`").expect("Invalid code span regex"))
    }

    fn placeholder(index: usize) -> String {
        format!("{mark}CODE{index}{mark}", mark = Self::MARK)
    }

    /// Replaces every closed code span with a numbered placeholder.
    ///
    /// Returns the rewritten text and the raw span contents, indexed by
    /// placeholder number. Unclosed backticks are left in place.
    pub fn extract(text: &str) -> (String, Vec<String>) {
        let mut chunks = Vec::new();
        let replaced = Self::pattern().replace_all(text, |caps: &regex::Captures<'_>| {
            let index = chunks.len();
            chunks.push(caps[1].to_string());
            Self::placeholder(index)
        });
        (replaced.into_owned(), chunks)
    }

    /// Puts escaped code span markup back where the placeholders were.
    pub fn restore(mut text: String, chunks: &[String]) -> String {
        for (index, raw) in chunks.iter().enumerate() {
            let safe = crate::parsing::inline::escape(raw);
            let markup = format!(
                r#"<span backcolor="{}"><u>{safe}</u></span>"#,
                Self::BACKCOLOR
            );
            text = text.replace(&Self::placeholder(index), &markup);
        }
        text
    }
}
