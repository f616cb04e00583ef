use super::kinds::{AtxHeading, BlockQuote, CodeFence, PipeTable};

/// Breadcrumb markers of the "previous / next chapter" navigation lines.
pub const NAVIGATION_MARKERS: &[&str] = &["← Previous", "Next →"];

/// Editor TOC placeholders, compared against the trimmed, lower-cased line.
pub const TOC_DIRECTIVES: &[&str] = &["[toc]", "[[toc]]", "{{toc}}", "<!-- toc -->", "<!--toc-->"];

/// A horizontal rule is exactly this once trimmed.
pub const RULE: &str = "---";

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// The line without trailing whitespace.
    pub line: &'a str,
    /// Whether the line is blank.
    pub is_blank: bool,
    /// Contains a breadcrumb marker.
    pub is_navigation: bool,
    pub is_rule: bool,
    pub is_toc_directive: bool,
    /// Opens (or closes) a code fence.
    pub is_fence: bool,
    /// Could start a pipe table.
    pub is_table_row: bool,
    /// `#` in the first column.
    pub is_heading: bool,
    /// `>` in the first column.
    pub is_quoted: bool,
    /// Text with leading `>` and space characters removed.
    pub remainder: &'a str,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify<'a>(&self, raw: &'a str) -> LineClass<'a> {
        let line = raw.trim_end();
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        LineClass {
            line,
            is_blank: trimmed.is_empty(),
            is_navigation: NAVIGATION_MARKERS
                .iter()
                .any(|marker| trimmed.contains(marker)),
            is_rule: trimmed == RULE,
            is_toc_directive: TOC_DIRECTIVES.contains(&lowered.as_str()),
            is_fence: CodeFence::is_fence(trimmed),
            is_table_row: PipeTable::is_row(trimmed),
            is_heading: AtxHeading::is_heading(line),
            is_quoted: BlockQuote::is_quoted(raw),
            remainder: BlockQuote::strip_prefixes(line),
        }
    }
}
