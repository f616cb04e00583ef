//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters and patterns.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `` ` `` delimited raw zone, lifted out into placeholders
//! - **`Link`**: `[label](target)` with the external-scheme policy
//! - **`FontFace`**: the `<font face>` allowlisted tag and its alias table
//!
//! The formatter calls into these types; it never hardcodes a delimiter.

pub mod code_span;
pub mod font_face;
pub mod link;

pub use code_span::CodeSpan;
pub use font_face::{FontFace, STANDARD_FONTS};
pub use link::{Link, LinkChunk};
