//! Builds real dossiers from markdown folders and reads the PDFs back.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use lopdf::{Document, Object};
use markdown_dossier_config::{Branding, SourceLayout};
use markdown_dossier_engine::{BuildError, BuildRequest, build_dossier};
use markdown_dossier_pdf::PdfTypesetter;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn request(input: &Path, output: &Path, layout: SourceLayout) -> BuildRequest {
    BuildRequest {
        input_dir: input.to_path_buf(),
        output: output.to_path_buf(),
        layout,
        branding: Branding::for_title("Atlas"),
        date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
    }
}

fn info_title(doc: &Document) -> Vec<u8> {
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    match doc.get_dictionary(info_id).unwrap().get(b"Title").unwrap() {
        Object::String(bytes, _) => bytes.clone(),
        other => panic!("unexpected title {other:?}"),
    }
}

#[test]
fn builds_chapter_dossier() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("01-atlas");
    write(&docs, "01-intro.md", "# Intro\n\nWelcome to **Atlas**.\n\n- one\n- two");
    write(
        &docs,
        "02-data.md",
        "# Data\n\n| Name | Value |\n| --- | --- |\n| a | 1 |\n\n```\nlet x = 1;\n```",
    );
    write(&docs, "readme.md", "# Skipped");
    let output = temp.path().join("pdf/atlas.pdf");

    let outcome = build_dossier(
        &request(&docs, &output, SourceLayout::Chapters),
        &PdfTypesetter::default(),
    )
    .unwrap();

    assert_eq!(outcome.documents, 2);
    assert_eq!(outcome.report.pages, 4);
    let anchors: Vec<&str> = outcome.report.toc.iter().map(|e| e.anchor.as_str()).collect();
    assert_eq!(anchors, vec!["intro", "data"]);

    let pdf = Document::load(&output).unwrap();
    assert_eq!(pdf.get_pages().len(), 4);
    assert_eq!(info_title(&pdf), b"Atlas");
}

#[test]
fn builds_systems_dossier_without_stories_in_toc() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("systems");
    write(&docs, "readme.md", "# Systems");
    write(&docs, "billing/readme.md", "# Billing");
    write(&docs, "billing/stories/01-refund.md", "# Refund");
    let output = temp.path().join("systems.pdf");

    let outcome = build_dossier(
        &request(&docs, &output, SourceLayout::Systems),
        &PdfTypesetter::default(),
    )
    .unwrap();

    assert_eq!(outcome.documents, 3);
    let titles: Vec<&str> = outcome.report.toc.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(titles, vec!["Systems", "Billing"]);
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 5);
}

#[test]
fn rebuild_replaces_previous_output() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write(&docs, "01-a.md", "# A");
    let output = temp.path().join("out.pdf");
    fs::write(&output, b"not a pdf").unwrap();

    build_dossier(
        &request(&docs, &output, SourceLayout::Chapters),
        &PdfTypesetter::default(),
    )
    .unwrap();

    assert!(fs::read(&output).unwrap().starts_with(b"%PDF-1.5"));
}

#[test]
fn missing_input_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.pdf");

    let result = build_dossier(
        &request(&temp.path().join("absent"), &output, SourceLayout::Chapters),
        &PdfTypesetter::default(),
    );

    assert!(matches!(result, Err(BuildError::InputMissing { .. })));
    assert!(!output.exists());
}
