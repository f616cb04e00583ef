use std::sync::OnceLock;

use regex::{Captures, Regex};

/// The standard PDF fonts every viewer provides; the only faces the
/// typesetter can draw without embedding.
pub const STANDARD_FONTS: &[&str] = &[
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Symbol",
    "ZapfDingbats",
];

/// `<font face="...">` handling: the one attribute-carrying HTML tag the
/// dialect lets through.
pub struct FontFace;

impl FontFace {
    pub const DEFAULT: &'static str = "Courier";

    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("courier", "Courier"),
        ("courier new", "Courier"),
        ("courier-new", "Courier"),
        ("couriernew", "Courier"),
        ("monospace", "Courier"),
        ("arial", "Helvetica"),
        ("sans-serif", "Helvetica"),
        ("times", "Times-Roman"),
        ("times new roman", "Times-Roman"),
        ("serif", "Times-Roman"),
    ];

    /// Matches the tag after escaping has turned it into entities.
    fn pattern() -> &'static Regex {
        static FONT_FACE_REGEX: OnceLock<Regex> = OnceLock::new();
        FONT_FACE_REGEX.get_or_init(|| {
            Regex::new(r"(?is)&lt;font\s+face=(.*?)&gt;(.*?)&lt;/font&gt;")
                .expect("Invalid font face regex")
        })
    }

    /// Returns a standard font name for `font`, or [`FontFace::DEFAULT`].
    pub fn sanitize(font: &str) -> String {
        let font = font.trim().trim_matches(|c| c == '\'' || c == '"');
        let lowered = font.to_lowercase();
        let aliased = Self::ALIASES
            .iter()
            .find(|(alias, _)| *alias == lowered)
            .map_or(font, |(_, name)| *name);
        let normalized = aliased.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            return Self::DEFAULT.to_string();
        }
        match STANDARD_FONTS
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&normalized))
        {
            Some(name) => (*name).to_string(),
            None => {
                log::warn!("unknown font face {normalized:?}, using {}", Self::DEFAULT);
                Self::DEFAULT.to_string()
            }
        }
    }

    /// Sanitizes a comma separated face list, dropping duplicates in order.
    pub fn sanitize_list(value: &str) -> String {
        let mut fonts: Vec<String> = Vec::new();
        for font in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let name = Self::sanitize(font);
            if !fonts.contains(&name) {
                fonts.push(name);
            }
        }
        if fonts.is_empty() {
            fonts.push(Self::DEFAULT.to_string());
        }
        fonts.join(", ")
    }

    /// Restores escaped `<font face>` tags with a sanitized face list.
    pub fn normalize(text: &str) -> String {
        Self::pattern()
            .replace_all(text, |caps: &Captures<'_>| {
                let raw_value = html_escape::decode_html_entities(&caps[1]);
                let value = raw_value.trim().trim_matches(|c| c == '\'' || c == '"');
                format!(
                    r#"<font face="{}">{}</font>"#,
                    Self::sanitize_list(value),
                    &caps[2]
                )
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Courier", "Courier")]
    #[case("courier new", "Courier")]
    #[case("'Courier New'", "Courier")]
    #[case("monospace", "Courier")]
    #[case("helvetica-bold", "Helvetica-Bold")]
    #[case("Times  New   Roman", "Courier")]
    #[case("times new roman", "Times-Roman")]
    #[case("Comic Sans MS", "Courier")]
    #[case("", "Courier")]
    fn sanitize_font_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(FontFace::sanitize(input), expected);
    }

    #[test]
    fn list_is_deduplicated() {
        assert_eq!(
            FontFace::sanitize_list("Courier New, monospace, Helvetica"),
            "Courier, Helvetica"
        );
    }

    #[test]
    fn empty_list_falls_back_to_default() {
        assert_eq!(FontFace::sanitize_list(" , ,"), "Courier");
    }

    #[test]
    fn escaped_tag_is_restored() {
        let escaped = "&lt;font face=&quot;Courier New, Wingdings&quot;&gt;x&lt;/font&gt;";
        assert_eq!(
            FontFace::normalize(escaped),
            r#"<font face="Courier">x</font>"#
        );
    }

    #[test]
    fn unquoted_attribute_is_accepted() {
        let escaped = "&lt;font face=Helvetica&gt;x&lt;/font&gt;";
        assert_eq!(
            FontFace::normalize(escaped),
            r#"<font face="Helvetica">x</font>"#
        );
    }

    #[test]
    fn unclosed_tag_stays_escaped() {
        let escaped = "&lt;font face=&quot;Courier&quot;&gt;x";
        assert_eq!(FontFace::normalize(escaped), escaped);
    }
}
