//! Block kinds, each owning its delimiters and line tests.

pub mod block_quote;
pub mod bullet_list;
pub mod code_fence;
pub mod heading;
pub mod table;
pub mod tldr;

pub use block_quote::BlockQuote;
pub use bullet_list::BulletList;
pub use code_fence::CodeFence;
pub use heading::AtxHeading;
pub use table::{PipeTable, parse_table};
pub use tldr::{Tldr, parse_tldr};
