use log::trace;

use crate::anchors::AnchorRegistry;
use crate::parsing::inline::format_inline;

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    kinds::{AtxHeading, BulletList, CodeFence, Tldr, parse_table, parse_tldr},
    types::{Flowable, Heading, StyleRole},
};

/// Gap emitted for a blank line.
pub const BLANK_GAP: f32 = 6.0;
/// Gap emitted after code blocks, tables and callouts.
pub const BLOCK_GAP: f32 = 12.0;

/// Single-pass block parser.
///
/// Walks the lines of one document with a monotonically advancing cursor.
/// Multi-line constructs (fences, tables, TL;DR callouts) are handed to their
/// sub-parsers, which report where the cursor resumes. Bullet lines accumulate
/// into a pending run that any other kind of line flushes.
pub struct BlockBuilder<'r> {
    anchors: &'r mut AnchorRegistry,
    classifier: MarkdownLineClassifier,
    /// Level of the hand-written contents heading whose section is being
    /// elided.
    skip_level: Option<usize>,
    bullets: Vec<String>,
    out: Vec<Flowable>,
}

impl<'r> BlockBuilder<'r> {
    pub fn new(anchors: &'r mut AnchorRegistry) -> Self {
        Self {
            anchors,
            classifier: MarkdownLineClassifier,
            skip_level: None,
            bullets: Vec::new(),
            out: Vec::new(),
        }
    }

    /// Consumes every line of a document.
    pub fn push_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        let mut index = 0;
        while index < lines.len() {
            let next = self.step(lines, index);
            debug_assert!(next > index, "cursor must advance");
            index = next;
        }
    }

    pub fn finish(mut self) -> Vec<Flowable> {
        // EOF flush
        self.flush_bullets();
        self.out
    }

    /// Handles the line at `index` and returns the index to resume at.
    fn step<S: AsRef<str>>(&mut self, lines: &[S], index: usize) -> usize {
        let c = self.classifier.classify(lines[index].as_ref());

        if c.is_navigation {
            self.flush_bullets();
            return index + 1;
        }
        if c.is_rule {
            self.flush_bullets();
            self.out.push(Flowable::Rule);
            return index + 1;
        }
        if c.is_toc_directive {
            return index + 1;
        }
        if self.skip_level.is_some() && !c.is_heading {
            return index + 1;
        }
        if c.is_blank {
            self.flush_bullets();
            self.out.push(Flowable::spacer(BLANK_GAP));
            return index + 1;
        }
        if c.is_fence {
            self.flush_bullets();
            let (body, next) = CodeFence::collect(lines, index);
            if !body.is_empty() {
                self.out.push(Flowable::CodeBlock { lines: body });
                self.out.push(Flowable::spacer(BLOCK_GAP));
            }
            return next;
        }
        if c.is_table_row {
            self.flush_bullets();
            if let Some((grid, next)) = parse_table(lines, index) {
                self.out.push(Flowable::Table(grid));
                self.out.push(Flowable::spacer(BLOCK_GAP));
                return next;
            }
        }
        if c.is_heading {
            self.flush_bullets();
            self.heading(c.line);
            return index + 1;
        }
        if let Some(item) = BulletList::item(c.remainder) {
            if !item.is_empty() {
                self.bullets.push(item.to_string());
            }
            return index + 1;
        }
        if c.is_quoted && Tldr::opens(c.remainder) {
            self.flush_bullets();
            let (callout, next) = parse_tldr(lines, index);
            if let Some(callout) = callout {
                self.out.push(callout);
                self.out.push(Flowable::spacer(BLOCK_GAP));
            }
            return next;
        }

        self.flush_bullets();
        self.paragraph(&c);
        index + 1
    }

    fn heading(&mut self, line: &str) {
        let Some((level, text)) = AtxHeading::split(line) else {
            return;
        };
        if text.is_empty() {
            return;
        }
        if let Some(skip) = self.skip_level {
            if level > skip {
                return;
            }
            self.skip_level = None;
        }
        if AtxHeading::is_toc_title(&text) {
            trace!("eliding contents section at level {level}");
            self.skip_level = Some(level);
            return;
        }

        let anchor = self.anchors.register(&text);
        self.out
            .push(Flowable::Heading(Heading::new(level, format_inline(&text), anchor)));
    }

    fn paragraph(&mut self, c: &LineClass<'_>) {
        let role = if c.is_quoted {
            StyleRole::Quote
        } else {
            StyleRole::Body
        };
        let formatted = format_inline(c.remainder);
        if !formatted.trim().is_empty() {
            self.out.push(Flowable::paragraph(formatted, role));
        }
    }

    fn flush_bullets(&mut self) {
        if self.bullets.is_empty() {
            return;
        }
        if let Some(list) = BulletList::flush(&self.bullets, StyleRole::Bullet) {
            self.out.push(list);
        }
        self.bullets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::types::TableGrid;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<Flowable> {
        let mut anchors = AnchorRegistry::new();
        let lines: Vec<&str> = text.lines().collect();
        let mut builder = BlockBuilder::new(&mut anchors);
        builder.push_lines(&lines);
        builder.finish()
    }

    fn heading(level: usize, text: &str, anchor: &str) -> Flowable {
        Flowable::Heading(Heading::new(level, text, anchor))
    }

    fn bullets(items: &[&str]) -> Flowable {
        Flowable::BulletList {
            items: items.iter().map(|i| i.to_string()).collect(),
            role: StyleRole::Bullet,
        }
    }

    #[test]
    fn empty_document() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn headings_paragraphs_and_blank_lines() {
        assert_eq!(
            parse("# Intro\n\nHello **world**."),
            vec![
                heading(1, "Intro", "intro"),
                Flowable::spacer(BLANK_GAP),
                Flowable::paragraph("Hello <b>world</b>.", StyleRole::Body),
            ]
        );
    }

    #[test]
    fn bullet_run_is_flushed_by_paragraph() {
        assert_eq!(
            parse("- a\n* b\nafter"),
            vec![
                bullets(&["a", "b"]),
                Flowable::paragraph("after", StyleRole::Body),
            ]
        );
    }

    #[test]
    fn bullet_run_is_flushed_at_end_of_document() {
        assert_eq!(parse("- a\n- <ul>\n- b"), vec![bullets(&["a", "b"])]);
    }

    #[test]
    fn quoted_bullets_join_the_run() {
        assert_eq!(parse("> - a\n- b"), vec![bullets(&["a", "b"])]);
    }

    #[test]
    fn quote_flushes_pending_bullets() {
        assert_eq!(
            parse("- a\n> said"),
            vec![
                bullets(&["a"]),
                Flowable::paragraph("said", StyleRole::Quote),
            ]
        );
    }

    #[test]
    fn empty_quote_emits_nothing() {
        assert!(parse(">\n> \n>>").is_empty());
    }

    #[test]
    fn rule_and_navigation() {
        assert_eq!(
            parse("- a\n[← Previous](a.md)\n---"),
            vec![bullets(&["a"]), Flowable::Rule]
        );
    }

    #[test]
    fn toc_directive_is_dropped() {
        assert_eq!(
            parse("[TOC]\ntext"),
            vec![Flowable::paragraph("text", StyleRole::Body)]
        );
    }

    #[test]
    fn code_fence_is_verbatim() {
        assert_eq!(
            parse("```\n# not heading\n**raw**\n```\nafter"),
            vec![
                Flowable::CodeBlock {
                    lines: vec!["# not heading".into(), "**raw**".into()],
                },
                Flowable::spacer(BLOCK_GAP),
                Flowable::paragraph("after", StyleRole::Body),
            ]
        );
    }

    #[test]
    fn empty_fence_emits_nothing() {
        assert_eq!(
            parse("```\n```\nafter"),
            vec![Flowable::paragraph("after", StyleRole::Body)]
        );
    }

    #[test]
    fn table_then_spacer() {
        assert_eq!(
            parse("| a | b |\n|---|---|\n| 1 | 2 |"),
            vec![
                Flowable::Table(TableGrid {
                    rows: vec![
                        vec!["a".into(), "b".into()],
                        vec!["1".into(), "2".into()],
                    ],
                }),
                Flowable::spacer(BLOCK_GAP),
            ]
        );
    }

    #[test]
    fn single_pipe_line_falls_through_to_paragraph() {
        assert_eq!(
            parse("| alone |"),
            vec![Flowable::paragraph("| alone |", StyleRole::Body)]
        );
    }

    #[test]
    fn contents_section_is_elided_until_shallower_heading() {
        let doc = "\
## Table of Contents
- [Intro](#intro)
### Nested
text
## Intro
body";
        assert_eq!(
            parse(doc),
            vec![
                heading(2, "Intro", "intro"),
                Flowable::paragraph("body", StyleRole::Body),
            ]
        );
    }

    #[test]
    fn contents_section_ends_at_same_level() {
        let doc = "# Contents:\n## Skipped\n# Next";
        assert_eq!(parse(doc), vec![heading(1, "Next", "next")]);
    }

    #[test]
    fn omit_in_toc_directive_is_removed() {
        assert_eq!(
            parse("## Setup <!-- omit in toc -->\n## <!-- omit in toc -->"),
            vec![heading(2, "Setup", "setup")]
        );
    }

    #[test]
    fn heading_text_is_formatted_but_anchor_uses_raw_text() {
        assert_eq!(
            parse("### Costs & **Risks**"),
            vec![heading(3, "Costs &amp; <b>Risks</b>", "costs-risks")]
        );
    }

    #[test]
    fn tldr_callout_is_followed_by_gap() {
        let parsed = parse("> ### TL;DR\n> short\n\nafter");
        assert!(matches!(parsed[0], Flowable::Callout { .. }));
        assert_eq!(
            parsed[1..],
            [
                Flowable::spacer(BLOCK_GAP),
                Flowable::paragraph("after", StyleRole::Body),
            ]
        );
    }

    #[test]
    fn empty_tldr_advances_past_heading_only() {
        assert_eq!(
            parse("> ### TL;DR\n\nafter"),
            vec![
                Flowable::spacer(BLANK_GAP),
                Flowable::paragraph("after", StyleRole::Body),
            ]
        );
    }

    #[test]
    fn indented_text_is_body() {
        assert_eq!(
            parse("   indented"),
            vec![Flowable::paragraph("indented", StyleRole::Body)]
        );
    }
}
