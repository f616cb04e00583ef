//! Heading anchors.
//!
//! Every heading in a build gets a URL-safe slug that is unique across all
//! documents of that build. The registry is per-build state: construct one
//! per build (or [`AnchorRegistry::reset`] it) before parsing any document.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

fn strip_pattern() -> &'static Regex {
    static STRIP_REGEX: OnceLock<Regex> = OnceLock::new();
    STRIP_REGEX.get_or_init(|| Regex::new(r"[^\w\s-]").expect("Invalid slug strip regex"))
}

fn whitespace_pattern() -> &'static Regex {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid slug whitespace regex"))
}

fn hyphens_pattern() -> &'static Regex {
    static HYPHENS_REGEX: OnceLock<Regex> = OnceLock::new();
    HYPHENS_REGEX.get_or_init(|| Regex::new(r"-+").expect("Invalid slug hyphen regex"))
}

/// GitHub-style heading slug.
///
/// Lower-cases, drops everything but word characters, whitespace and `-`,
/// turns whitespace runs into single hyphens, collapses hyphen runs and trims
/// hyphens from both ends.
///
/// ```
/// use markdown_dossier_engine::anchors::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("  Q&A: Costs / Risks  "), "qa-costs-risks");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = strip_pattern().replace_all(&lowered, "");
    let hyphenated = whitespace_pattern().replace_all(&stripped, "-");
    let collapsed = hyphens_pattern().replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Slug of a link fragment such as `#Getting Started`, comparable with
/// registered anchors.
pub fn normalize_target(fragment: &str) -> String {
    slugify(fragment.trim_start_matches('#'))
}

/// Assigns unique anchors to headings for the lifetime of one build.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    /// Occurrences seen per base slug; drives the `-n` suffix.
    counts: HashMap<String, usize>,
    /// Every slug handed out so far.
    issued: HashSet<String>,
    /// Last `section-N` number used for headings with an empty slug.
    fallback_index: usize,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every issued anchor.
    pub fn reset(&mut self) {
        self.counts.clear();
        self.issued.clear();
        self.fallback_index = 0;
    }

    /// Returns a unique anchor for a heading's text.
    ///
    /// The first occurrence of a slug is returned unchanged; later occurrences
    /// get `-1`, `-2`, ... appended. Text with no sluggable characters gets
    /// `section-N`. Suffixed candidates that were already issued verbatim
    /// (a heading titled "Intro 1" after two "Intro" headings) are skipped.
    pub fn register(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            self.fallback_index += 1;
            base = format!("section-{}", self.fallback_index);
        }

        let count = self.counts.entry(base.clone()).or_insert(0);
        loop {
            let candidate = if *count == 0 {
                base.clone()
            } else {
                format!("{base}-{count}")
            };
            *count += 1;
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Number of anchors issued.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
