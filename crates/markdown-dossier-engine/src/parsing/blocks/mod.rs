//! # Block Parsing
//!
//! Line-oriented, single-pass block parsing into layout primitives.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` of local facts (blank, rule, fence, table row, heading,
//!    quote prefix, remainder text)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` walks the lines with
//!    an advancing cursor, delegates multi-line constructs to the sub-parsers
//!    in `kinds`, and emits `Flowable`s in document order
//!
//! ## Modules
//!
//! - **`types`**: Core types (`Flowable`, `Heading`, `TableGrid`, `StyleRole`)
//! - **`kinds`**: Block-specific types with owned delimiters (BlockQuote,
//!   BulletList, CodeFence, AtxHeading, PipeTable, Tldr)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - The cursor only moves forward; sub-parsers return where it resumes
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - Parsing never fails; malformed constructs degrade to paragraphs

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::{BLANK_GAP, BLOCK_GAP, BlockBuilder};
pub use classify::{LineClass, MarkdownLineClassifier};
pub use types::{Flowable, Heading, StyleRole, TableGrid};
