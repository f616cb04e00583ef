/// ATX heading line (`## Title`).
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: char = '#';
    /// Directive used by editor TOC plugins; removed from heading text.
    pub const OMIT_IN_TOC: &'static str = "<!-- omit in toc -->";
    /// Titles (lower-cased, trailing `:` removed) of hand-written TOC sections.
    pub const TOC_TITLES: &'static [&'static str] = &["table of contents", "contents"];

    /// Whether the line is a heading candidate: `#` in the first column.
    pub fn is_heading(line: &str) -> bool {
        line.starts_with(Self::MARKER)
    }

    /// Splits a heading line. `None` if it does not start with `#`.
    ///
    /// Any number of markers is accepted and no space is required after them.
    /// The returned text may be empty once the omit directive is removed.
    pub fn split(line: &str) -> Option<(usize, String)> {
        if !Self::is_heading(line) {
            return None;
        }
        let rest = line.trim_start_matches(Self::MARKER);
        let level = line.len() - rest.len();
        let text = rest.trim().replace(Self::OMIT_IN_TOC, "");
        Some((level, text.trim().to_string()))
    }

    /// Whether heading text names a hand-written table of contents.
    pub fn is_toc_title(text: &str) -> bool {
        let normalized = text.to_lowercase();
        let normalized = normalized.trim_end_matches(':');
        Self::TOC_TITLES.contains(&normalized)
    }
}
