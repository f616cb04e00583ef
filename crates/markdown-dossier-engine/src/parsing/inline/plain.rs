use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid markup tag regex"))
}

/// Plain text of formatted markup: line breaks become spaces, other tags are
/// dropped and entities decoded. Used for TOC entries and bookmark titles.
pub fn plain_text(markup: &str) -> String {
    let spaced = markup.replace("<br/>", " ");
    let stripped = tag_pattern().replace_all(&spaced, "");
    html_escape::decode_html_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::format_inline;

    #[test]
    fn strips_tags_and_decodes_entities() {
        assert_eq!(plain_text("<b>R&amp;D</b> &lt;plan&gt;"), "R&D <plan>");
    }

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(plain_text("one<br/>two"), "one two");
    }

    #[test]
    fn inverts_formatting_for_headings() {
        let formatted = format_inline("Costs & `budget` for **Q3**");
        assert_eq!(plain_text(&formatted), "Costs & budget for Q3");
    }
}
