use std::path::{Path, PathBuf};

/// A markdown document selected for a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    in_toc: bool,
}

impl SourceFile {
    /// Name of directories whose documents stay out of the table of contents.
    pub const STORIES_DIR: &'static str = "stories";

    /// Create a SourceFile; documents inside a `stories/` directory are kept
    /// out of the table of contents.
    pub fn new(path: PathBuf) -> Self {
        let in_toc = !path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case(Self::STORIES_DIR));
        Self { path, in_toc }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this document's headings feed the TOC and bookmarks.
    pub fn in_toc(&self) -> bool {
        self.in_toc
    }

    /// Get the display name (file name without the .md extension)
    pub fn display_name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Untitled")
    }
}

impl From<PathBuf> for SourceFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}
