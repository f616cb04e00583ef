use crate::models::SourceFile;
use crate::pipeline::TypesetError;
use log::debug;
use markdown_dossier_config::SourceLayout;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Input directory '{path}' does not exist")]
    InputMissing { path: PathBuf },
    #[error("No markdown files found in '{path}'")]
    NoSources { path: PathBuf },
    #[error("Output path '{path}' is a directory, expected a file path")]
    OutputIsDirectory { path: PathBuf },
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Typesetting failed: {0}")]
    Typeset(#[from] TypesetError),
}

/// Name of the per-folder overview document.
pub const README: &str = "readme.md";

fn is_markdown(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn is_readme(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(README))
}

/// Entries of a directory matching `keep`, sorted by file name.
fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>, BuildError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if keep(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Every markdown chapter directly inside `input_dir`, except the readme.
pub fn collect_chapters(input_dir: &Path) -> Result<Vec<SourceFile>, BuildError> {
    let files = sorted_entries(input_dir, |path| is_markdown(path) && !is_readme(path))?;
    Ok(files.into_iter().map(SourceFile::new).collect())
}

/// The root readme, then per system folder its readme and its stories.
pub fn collect_systems(input_dir: &Path) -> Result<Vec<SourceFile>, BuildError> {
    let mut files = Vec::new();

    let root_readme = input_dir.join(README);
    if root_readme.is_file() {
        files.push(root_readme);
    }

    for system in sorted_entries(input_dir, Path::is_dir)? {
        let readme = system.join(README);
        if readme.is_file() {
            files.push(readme);
        }

        let stories = system.join(SourceFile::STORIES_DIR);
        if stories.is_dir() {
            files.extend(sorted_entries(&stories, is_markdown)?);
        }
    }

    Ok(files.into_iter().map(SourceFile::new).collect())
}

/// Collects the documents of a build in reading order.
pub fn collect_sources(
    input_dir: &Path,
    layout: SourceLayout,
) -> Result<Vec<SourceFile>, BuildError> {
    if !input_dir.is_dir() {
        return Err(BuildError::InputMissing {
            path: input_dir.to_path_buf(),
        });
    }

    let files = match layout {
        SourceLayout::Chapters => collect_chapters(input_dir)?,
        SourceLayout::Systems => collect_systems(input_dir)?,
    };
    if files.is_empty() {
        return Err(BuildError::NoSources {
            path: input_dir.to_path_buf(),
        });
    }

    debug!(
        "collected {} source files from {}",
        files.len(),
        input_dir.display()
    );
    Ok(files)
}

/// Read a markdown source in full
pub fn read_source(file: &SourceFile) -> Result<String, BuildError> {
    fs::read_to_string(file.path()).map_err(|source| BuildError::Read {
        path: file.path().to_path_buf(),
        source,
    })
}

/// Makes `output` writable: refuses directories, creates parent directories
/// and removes a previous file.
pub fn prepare_output(output: &Path) -> Result<(), BuildError> {
    if output.is_dir() {
        return Err(BuildError::OutputIsDirectory {
            path: output.to_path_buf(),
        });
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    if output.exists() {
        fs::remove_file(output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_docs_dir, create_test_file, relative_names};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collect_chapters_sorted_without_readme() {
        let docs = create_test_docs_dir();
        create_test_file(&docs, "02-data.md", "# Data");
        create_test_file(&docs, "01-intro.MD", "# Intro");
        create_test_file(&docs, "README.md", "# Readme");
        create_test_file(&docs, "notes.txt", "ignored");
        create_test_file(&docs, "nested/03-deep.md", "# Not collected");

        let files = collect_sources(docs.path(), SourceLayout::Chapters).unwrap();

        assert_eq!(relative_names(&docs, &files), vec!["01-intro.MD", "02-data.md"]);
        assert!(files.iter().all(SourceFile::in_toc));
    }

    #[test]
    fn test_collect_systems_order() {
        let docs = create_test_docs_dir();
        create_test_file(&docs, "readme.md", "# Systems");
        create_test_file(&docs, "billing/readme.md", "# Billing");
        create_test_file(&docs, "billing/stories/02-refund.md", "# Refund");
        create_test_file(&docs, "billing/stories/01-invoice.md", "# Invoice");
        create_test_file(&docs, "billing/notes.md", "# Ignored");
        create_test_file(&docs, "auth/stories/01-login.md", "# Login");
        create_test_file(&docs, "stray.md", "# Ignored");

        let files = collect_sources(docs.path(), SourceLayout::Systems).unwrap();

        assert_eq!(
            relative_names(&docs, &files),
            vec![
                "readme.md",
                "auth/stories/01-login.md",
                "billing/readme.md",
                "billing/stories/01-invoice.md",
                "billing/stories/02-refund.md",
            ]
        );
        let in_toc: Vec<bool> = files.iter().map(SourceFile::in_toc).collect();
        assert_eq!(in_toc, vec![true, false, true, false, false]);
    }

    #[test]
    fn test_missing_input_dir() {
        let result = collect_sources(Path::new("/this/path/does/not/exist"), SourceLayout::Chapters);
        assert!(matches!(result, Err(BuildError::InputMissing { .. })));
    }

    #[test]
    fn test_no_sources() {
        let docs = create_test_docs_dir();
        create_test_file(&docs, "readme.md", "# Only readme");

        let result = collect_sources(docs.path(), SourceLayout::Chapters);
        assert!(matches!(result, Err(BuildError::NoSources { .. })));
        assert!(result.unwrap_err().to_string().contains("No markdown files"));
    }

    #[test]
    fn test_systems_without_documents() {
        let docs = create_test_docs_dir();
        create_test_file(&docs, "billing/diagram.png", "fake");

        let result = collect_sources(docs.path(), SourceLayout::Systems);
        assert!(matches!(result, Err(BuildError::NoSources { .. })));
    }

    #[test]
    fn test_read_source() {
        let docs = create_test_docs_dir();
        let path = create_test_file(&docs, "test.md", "# Test Content\n\nParagraph");

        let content = read_source(&SourceFile::new(path)).unwrap();
        assert_eq!(content, "# Test Content\n\nParagraph");
    }

    #[test]
    fn test_read_source_not_found() {
        let docs = create_test_docs_dir();
        let result = read_source(&SourceFile::new(docs.path().join("missing.md")));
        assert!(matches!(result, Err(BuildError::Read { .. })));
    }

    #[test]
    fn test_prepare_output_creates_parents_and_removes_old_file() {
        let docs = create_test_docs_dir();
        let existing = create_test_file(&docs, "out/old.pdf", "stale");
        prepare_output(&existing).unwrap();
        assert!(!existing.exists());
        assert!(existing.parent().unwrap().is_dir());

        let nested = docs.path().join("a/b/new.pdf");
        prepare_output(&nested).unwrap();
        assert!(docs.path().join("a/b").is_dir());
    }

    #[test]
    fn test_prepare_output_rejects_directory() {
        let docs = create_test_docs_dir();
        let result = prepare_output(docs.path());
        assert!(matches!(result, Err(BuildError::OutputIsDirectory { .. })));
    }
}
