//! End-to-end build: collect, parse, assemble, typeset.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};
use markdown_dossier_config::{Branding, SourceLayout};

use crate::anchors::AnchorRegistry;
use crate::assembly::Story;
use crate::io::{BuildError, collect_sources, prepare_output, read_source};
use crate::models::SourceFile;
use crate::parsing::parse_document;

#[derive(Debug, thiserror::Error)]
pub enum TypesetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
}

/// One line of the rendered table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Outline level: 0 for H1, 1 for H2.
    pub level: u8,
    pub text: String,
    /// 1-based page number.
    pub page: usize,
    pub anchor: String,
}

/// What a typesetter reports back after writing its output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypesetReport {
    pub pages: usize,
    pub toc: Vec<TocEntry>,
}

/// Paged-output backend that renders a story to a file.
pub trait Typesetter {
    fn typeset(
        &self,
        story: &Story,
        branding: &Branding,
        output: &Path,
    ) -> Result<TypesetReport, TypesetError>;
}

/// Everything a single build needs.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub layout: SourceLayout,
    pub branding: Branding,
    /// Date printed on the cover and in the header.
    pub date: NaiveDate,
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub output: PathBuf,
    pub documents: usize,
    pub report: TypesetReport,
}

/// Parses every source of the request into a story, using a fresh anchor
/// registry so repeated builds produce identical anchors.
pub fn build_story(request: &BuildRequest) -> Result<(Story, usize), BuildError> {
    let sources = collect_sources(&request.input_dir, request.layout)?;
    parse_sources(request, &sources)
}

fn parse_sources(
    request: &BuildRequest,
    sources: &[SourceFile],
) -> Result<(Story, usize), BuildError> {
    let mut anchors = AnchorRegistry::new();
    let mut documents = Vec::with_capacity(sources.len());
    for source in sources {
        let text = read_source(source)?;
        let mut doc = parse_document(&text, &mut anchors);
        if !source.in_toc() {
            doc.exclude_from_toc();
        }
        debug!(
            "parsed {} into {} flowables",
            source.path().display(),
            doc.blocks.len()
        );
        documents.push(doc);
    }

    let count = documents.len();
    Ok((Story::assemble(&request.branding, request.date, documents), count))
}

/// Builds the dossier described by `request` with `typesetter`.
pub fn build_dossier(
    request: &BuildRequest,
    typesetter: &dyn Typesetter,
) -> Result<BuildOutcome, BuildError> {
    info!(
        "building {} from {}",
        request.output.display(),
        request.input_dir.display()
    );

    // Sources are checked before the output is touched.
    let sources = collect_sources(&request.input_dir, request.layout)?;
    prepare_output(&request.output)?;

    let (story, documents) = parse_sources(request, &sources)?;
    let report = typesetter.typeset(&story, &request.branding, &request.output)?;

    info!(
        "wrote {} pages from {} documents to {}",
        report.pages,
        documents,
        request.output.display()
    );
    Ok(BuildOutcome {
        output: request.output.clone(),
        documents,
        report,
    })
}
