pub mod io;
pub mod markdown;
pub mod models;
pub mod parsing;
pub mod placeholder;

// Re-export key types for easier usage
pub use models::{post::*, tag::*};
pub use parsing::{Block, BlockKind, Document, ScanError, Scanner, is_source, scan_reader, scan_str};
pub use placeholder::Replacer;
