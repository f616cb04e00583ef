//! # markdown-dossier-pdf
//!
//! Renders an assembled [`markdown_dossier_engine::Story`] into a paged PDF
//! with the standard Type1 fonts, a bookmark outline and a clickable table
//! of contents.
//!
//! ## Modules
//!
//! - **`markup`**: reads the inline markup into styled runs
//! - **`text`**: line breaking
//! - **`layout`**: flows the story onto pages and collects TOC entries
//! - **`writer`**: page decorations and PDF serialisation
//! - **`typesetter`**: `PdfTypesetter`, the `Typesetter` implementation

pub mod encoding;
pub mod fonts;
pub mod layout;
pub mod markup;
pub mod page;
pub mod style;
pub mod text;
pub mod typesetter;
pub mod writer;

pub use layout::{Layout, layout_story};
pub use typesetter::PdfTypesetter;
pub use writer::render_document;
