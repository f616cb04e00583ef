//! # Inline Formatting
//!
//! Converts inline markdown spans into the small markup language the
//! typesetter understands (`<b>`, `<i>`, `<u>`, `<link href>`,
//! `<span backcolor>`, `<font face>`, `<br/>` and XML entities).
//!
//! ## Architecture
//!
//! Formatting is an ordered sequence of pure text passes rather than a tree
//! parse. Each pass states what it must not touch; in particular code spans
//! are raw zones, lifted out into placeholders before escaping and emphasis,
//! and restored last. Links get the same treatment around the emphasis
//! passes, with their labels formatted on their own.
//!
//! ## Modules
//!
//! - **`kinds`**: `CodeSpan`, `Link`, `FontFace`, each owning its delimiters
//! - **`format`**: `format_inline()` and the pass order
//! - **`plain`**: `plain_text()`, the inverse used for TOC entries

pub mod format;
pub mod kinds;
pub mod plain;

pub use format::{escape, format_inline};
pub use kinds::STANDARD_FONTS;
pub use plain::plain_text;
