use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::{debug, warn};
use markdown_dossier_config::Branding;
use markdown_dossier_engine::{Story, TocEntry, TypesetError, TypesetReport, Typesetter};

use crate::layout::{Layout, layout_story};
use crate::writer::render_document;

/// Typesets stories into PDF files.
///
/// The table of contents needs page numbers that depend on the table of
/// contents itself, so the story is laid out repeatedly until the entries
/// stop changing.
#[derive(Debug, Clone, Copy)]
pub struct PdfTypesetter {
    pub max_passes: usize,
}

impl Default for PdfTypesetter {
    fn default() -> Self {
        Self {
            max_passes: Self::DEFAULT_PASSES,
        }
    }
}

impl PdfTypesetter {
    pub const DEFAULT_PASSES: usize = 4;

    /// Lays out `story` until its TOC is stable.
    pub fn layout(&self, story: &Story) -> Layout {
        let mut known: Vec<TocEntry> = Vec::new();
        let mut layout = layout_story(story, &known);
        for pass in 1..self.max_passes.max(1) {
            if layout.toc == known {
                debug!("toc settled after {pass} passes");
                return layout;
            }
            known = layout.toc.clone();
            layout = layout_story(story, &known);
        }
        if layout.toc != known {
            warn!(
                "table of contents did not settle after {} passes",
                self.max_passes
            );
        }
        layout
    }
}

impl Typesetter for PdfTypesetter {
    fn typeset(
        &self,
        story: &Story,
        branding: &Branding,
        output: &Path,
    ) -> Result<TypesetReport, TypesetError> {
        let layout = self.layout(story);
        let mut doc = render_document(&layout, branding, story.date)?;

        let mut writer = BufWriter::new(File::create(output)?);
        doc.save_to(&mut writer)
            .map_err(|e| TypesetError::Pdf(e.to_string()))?;

        Ok(TypesetReport {
            pages: layout.pages.len(),
            toc: layout.toc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use markdown_dossier_engine::{AnchorRegistry, parse_document};
    use pretty_assertions::assert_eq;

    fn story(docs: &[&str]) -> Story {
        let mut anchors = AnchorRegistry::new();
        let parsed = docs
            .iter()
            .map(|doc| parse_document(doc, &mut anchors))
            .collect();
        Story::assemble(
            &Branding::default(),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            parsed,
        )
    }

    #[test]
    fn toc_page_shows_settled_entries() {
        let story = story(&["# One\n## Sub", "# Two"]);
        let layout = PdfTypesetter::default().layout(&story);
        let toc_page: Vec<&str> = layout.pages[1].texts().collect();
        assert!(toc_page.contains(&"One"));
        assert!(toc_page.contains(&"Two"));
        assert_eq!(
            layout.toc.iter().map(|e| e.page).collect::<Vec<_>>(),
            vec![3, 3, 4]
        );
    }

    #[test]
    fn long_toc_pushes_documents_back() {
        let docs: Vec<String> = (0..80).map(|i| format!("# Chapter {i}")).collect();
        let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
        let layout = PdfTypesetter::default().layout(&story(&refs));
        // the TOC now spans more than one page
        assert!(layout.toc[0].page > 3);
        let first = &layout.toc[0];
        let page = &layout.pages[first.page - 1];
        assert!(page.dests.iter().any(|(anchor, _)| *anchor == first.anchor));
    }

    #[test]
    fn single_pass_still_produces_a_layout() {
        let typesetter = PdfTypesetter { max_passes: 1 };
        let layout = typesetter.layout(&story(&["# One"]));
        assert_eq!(layout.pages.len(), 3);
    }
}
