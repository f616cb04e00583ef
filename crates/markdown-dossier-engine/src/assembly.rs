//! Whole-build story: cover page, TOC page, then every document.

use std::fmt::Write;

use chrono::NaiveDate;
use log::warn;
use markdown_dossier_config::Branding;

use crate::parsing::ParsedDoc;
use crate::parsing::blocks::{Flowable, Heading, StyleRole};
use crate::parsing::inline::escape;

/// Space above the cover title.
pub const COVER_TOP_GAP: f32 = 108.0;
/// Space between the cover metadata and the legal notice.
pub const COVER_LEGAL_GAP: f32 = 54.0;
pub const TOC_TITLE: &str = "Table of Contents";

const FALLBACK_DATE_FORMAT: &str = "%B %d, %Y";

/// Formats `date` with a strftime pattern, falling back to the default
/// pattern when `pattern` is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_ok() {
        return out;
    }
    warn!("invalid date format {pattern:?}, using {FALLBACK_DATE_FORMAT:?}");
    date.format(FALLBACK_DATE_FORMAT).to_string()
}

/// The ordered flowables of a whole build.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub flowables: Vec<Flowable>,
    /// Build date printed on the cover and in the running header.
    pub date: NaiveDate,
}

impl Story {
    /// Builds the story: cover page, TOC page, then each document separated
    /// by page breaks.
    pub fn assemble(branding: &Branding, today: NaiveDate, documents: Vec<ParsedDoc>) -> Self {
        let mut flowables = Vec::new();
        Self::push_cover(&mut flowables, branding, today);
        Self::push_toc_page(&mut flowables);

        for doc in documents {
            flowables.extend(doc.blocks);
            flowables.push(Flowable::PageBreak);
        }
        if matches!(flowables.last(), Some(Flowable::PageBreak)) {
            flowables.pop();
        }

        Self {
            flowables,
            date: today,
        }
    }

    fn push_cover(out: &mut Vec<Flowable>, branding: &Branding, today: NaiveDate) {
        let date = format_date(today, &branding.header_date_format);
        out.push(Flowable::spacer(COVER_TOP_GAP));
        out.push(Flowable::paragraph(
            escape(&branding.project_name),
            StyleRole::CoverTitle,
        ));
        out.push(Flowable::paragraph(
            escape(&branding.cover_subtitle),
            StyleRole::CoverSubtitle,
        ));
        out.push(Flowable::KeyValueTable(vec![
            ("Prepared for".to_string(), escape(&branding.prepared_for)),
            ("Prepared by".to_string(), escape(&branding.prepared_by)),
            ("Document date".to_string(), escape(&date)),
            ("Classification".to_string(), escape(&branding.classification)),
        ]));
        out.push(Flowable::spacer(COVER_LEGAL_GAP));
        out.push(Flowable::paragraph(
            escape(&branding.legal_notice),
            StyleRole::Legal,
        ));
        out.push(Flowable::PageBreak);
    }

    fn push_toc_page(out: &mut Vec<Flowable>) {
        out.push(Flowable::paragraph(TOC_TITLE, StyleRole::TocTitle));
        out.push(Flowable::TableOfContents);
        out.push(Flowable::PageBreak);
    }

    /// Headings in story order.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.flowables.iter().filter_map(|flowable| match flowable {
            Flowable::Heading(heading) => Some(heading),
            _ => None,
        })
    }

    /// Headings that belong in the TOC and the bookmark outline.
    pub fn outline(&self) -> impl Iterator<Item = &Heading> {
        self.headings()
            .filter(|heading| heading.outline_level().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::AnchorRegistry;
    use crate::parsing::parse_document;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn docs(texts: &[&str]) -> Vec<ParsedDoc> {
        let mut anchors = AnchorRegistry::new();
        texts
            .iter()
            .map(|text| parse_document(text, &mut anchors))
            .collect()
    }

    #[test]
    fn cover_page_layout() {
        let story = Story::assemble(&Branding::for_title("About"), date(), docs(&["text"]));
        let cover = &story.flowables[..7];
        assert_eq!(cover[0], Flowable::spacer(COVER_TOP_GAP));
        assert_eq!(cover[1], Flowable::paragraph("About", StyleRole::CoverTitle));
        assert_eq!(
            cover[2],
            Flowable::paragraph(
                "Corporate Strategy &amp; Intelligence Dossier",
                StyleRole::CoverSubtitle
            )
        );
        let Flowable::KeyValueTable(rows) = &cover[3] else {
            panic!("expected cover metadata");
        };
        let labels: Vec<&str> = rows.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Prepared for", "Prepared by", "Document date", "Classification"]
        );
        assert_eq!(rows[2].1, "March 07, 2025");
        assert_eq!(cover[4], Flowable::spacer(COVER_LEGAL_GAP));
        assert!(matches!(cover[5], Flowable::Paragraph { role: StyleRole::Legal, .. }));
        assert_eq!(cover[6], Flowable::PageBreak);
    }

    #[test]
    fn toc_page_follows_cover() {
        let story = Story::assemble(&Branding::default(), date(), docs(&["text"]));
        assert_eq!(
            story.flowables[7..10],
            [
                Flowable::paragraph(TOC_TITLE, StyleRole::TocTitle),
                Flowable::TableOfContents,
                Flowable::PageBreak,
            ]
        );
    }

    #[test]
    fn documents_are_separated_without_trailing_break() {
        let story = Story::assemble(&Branding::default(), date(), docs(&["one", "two"]));
        assert_eq!(
            story.flowables[10..],
            [
                Flowable::paragraph("one", StyleRole::Body),
                Flowable::PageBreak,
                Flowable::paragraph("two", StyleRole::Body),
            ]
        );
    }

    #[test]
    fn empty_documents_still_get_page_breaks() {
        let story = Story::assemble(&Branding::default(), date(), docs(&["", "two"]));
        assert_eq!(
            story.flowables[10..],
            [Flowable::PageBreak, Flowable::paragraph("two", StyleRole::Body)]
        );
    }

    #[test]
    fn outline_skips_deep_headings() {
        let story = Story::assemble(
            &Branding::default(),
            date(),
            docs(&["# One\n## Two\n### Three"]),
        );
        let outline: Vec<&str> = story.outline().map(|h| h.anchor.as_str()).collect();
        assert_eq!(outline, vec!["one", "two"]);
        assert_eq!(story.headings().count(), 3);
    }

    #[test]
    fn format_date_uses_pattern() {
        assert_eq!(format_date(date(), "%Y-%m-%d"), "2025-03-07");
    }

    #[test]
    fn format_date_falls_back_on_invalid_pattern() {
        assert_eq!(format_date(date(), "%Q"), "March 07, 2025");
    }
}
