pub mod naming;
pub mod source_file;

pub use naming::{derive_filename, derive_title};
pub use source_file::SourceFile;
