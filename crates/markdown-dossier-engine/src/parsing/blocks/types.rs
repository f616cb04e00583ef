/// Paragraph style a flowable is rendered with.
///
/// A closed set: the typesetter resolves each role through a fixed table of
/// font sizes, leading and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRole {
    Body,
    Quote,
    Bullet,
    Heading1,
    Heading2,
    Heading3,
    TldrHeading,
    TldrBody,
    TableHeader,
    TableCell,
    CoverTitle,
    CoverSubtitle,
    Legal,
    TocTitle,
}

impl StyleRole {
    /// Heading role for a markdown heading level; levels past 3 share `Heading3`.
    pub fn for_heading_level(level: usize) -> Self {
        match level {
            0 | 1 => StyleRole::Heading1,
            2 => StyleRole::Heading2,
            _ => StyleRole::Heading3,
        }
    }

    /// Bookmark outline level; only the top two heading roles take part in
    /// the navigable table of contents.
    pub fn outline_level(self) -> Option<u8> {
        match self {
            StyleRole::Heading1 => Some(0),
            StyleRole::Heading2 => Some(1),
            _ => None,
        }
    }
}

/// A heading with its registered anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading `#` markers.
    pub level: usize,
    /// Inline-formatted heading text.
    pub text: String,
    /// Unique anchor slug from the build's anchor registry.
    pub anchor: String,
    /// Whether the heading may appear in the TOC and bookmarks.
    pub in_toc: bool,
}

impl Heading {
    pub fn new(level: usize, text: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            anchor: anchor.into(),
            in_toc: true,
        }
    }

    pub fn role(&self) -> StyleRole {
        StyleRole::for_heading_level(self.level)
    }

    /// Bookmark level, `None` for deep headings and headings kept out of
    /// the TOC.
    pub fn outline_level(&self) -> Option<u8> {
        if self.in_toc {
            self.role().outline_level()
        } else {
            None
        }
    }
}

/// Table cells after inline formatting; row 0 is the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableGrid {
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A layout primitive, in document order.
///
/// Text fields hold markup produced by [`crate::parsing::inline::format_inline`].
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph { text: String, role: StyleRole },
    Heading(Heading),
    BulletList { items: Vec<String>, role: StyleRole },
    Table(TableGrid),
    /// Verbatim lines; never inline formatted.
    CodeBlock { lines: Vec<String> },
    Rule,
    Spacer { height: f32 },
    /// A boxed composite such as the TL;DR summary.
    Callout { label: String, body: Vec<Flowable> },
    // Produced only by the story assembler.
    PageBreak,
    KeyValueTable(Vec<(String, String)>),
    TableOfContents,
}

impl Flowable {
    pub fn paragraph(text: impl Into<String>, role: StyleRole) -> Self {
        Flowable::Paragraph {
            text: text.into(),
            role,
        }
    }

    pub fn spacer(height: f32) -> Self {
        Flowable::Spacer { height }
    }
}
