//! # markdown-dossier-engine
//!
//! Translates a folder of constrained markdown into the ordered layout
//! primitives of a branded dossier, and drives a [`Typesetter`] to render them.
//!
//! ## Modules
//!
//! - **`parsing`**: inline formatter, block parser and its sub-parsers
//! - **`anchors`**: build-wide unique heading anchors
//! - **`assembly`**: cover page, TOC page and document concatenation
//! - **`io`**: source collection, reading and output preparation
//! - **`models`**: source files and folder-name derived titles
//! - **`pipeline`**: `build_dossier()` and the `Typesetter` seam

pub mod anchors;
pub mod assembly;
pub mod io;
pub mod models;
pub mod parsing;
pub mod pipeline;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use anchors::AnchorRegistry;
pub use assembly::{Story, format_date};
pub use io::*;
pub use models::{SourceFile, derive_filename, derive_title};
pub use parsing::blocks::{Flowable, Heading, StyleRole, TableGrid};
pub use parsing::inline::{STANDARD_FONTS, format_inline, plain_text};
pub use parsing::{ParsedDoc, parse_document};
pub use pipeline::*;
