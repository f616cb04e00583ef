pub mod blocks;
pub mod inline;

use crate::anchors::AnchorRegistry;

use blocks::{BlockBuilder, Flowable};

/// Layout primitives of one parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDoc {
    pub blocks: Vec<Flowable>,
}

impl ParsedDoc {
    /// Headings in document order.
    pub fn headings(&self) -> impl Iterator<Item = &blocks::Heading> {
        self.blocks.iter().filter_map(|block| match block {
            Flowable::Heading(heading) => Some(heading),
            _ => None,
        })
    }

    /// Keeps every heading of this document out of the TOC and bookmarks.
    pub fn exclude_from_toc(&mut self) {
        for block in &mut self.blocks {
            if let Flowable::Heading(heading) = block {
                heading.in_toc = false;
            }
        }
    }
}

/// Parses one document. Anchors are registered in `anchors`, so headings stay
/// unique across every document parsed with the same registry.
pub fn parse_document(text: &str, anchors: &mut AnchorRegistry) -> ParsedDoc {
    let lines: Vec<&str> = text.lines().collect();
    let mut builder = BlockBuilder::new(anchors);
    builder.push_lines(&lines);

    ParsedDoc {
        blocks: builder.finish(),
    }
}
