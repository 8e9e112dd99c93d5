//! # Post source parsing
//!
//! A post source is a fenced TOML front-matter block followed by markdown
//! content. Parsing is a single pass: each line feeds the [`Scanner`] state
//! machine, which partitions the stream into an ordered [`Block`] sequence.
//! The first block of any document must be the front-matter variant; the
//! scanner fails otherwise, with no partial output.

pub mod block;
pub mod scanner;

pub use block::{Block, BlockKind, FENCE_MARKER, META_TAG};
pub use scanner::{ScanError, Scanner};

use std::io::BufRead;

/// Ordered block sequence produced by one scan.
///
/// If non-empty, the first block is the front-matter variant. Documents are
/// transient: consumed once by post normalization and then discarded.
#[derive(Debug, Default)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
}

impl Document {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

/// Scans a reader line by line into a document.
///
/// Read failures abort the scan immediately; there is no retry.
pub fn scan_reader<R: BufRead>(reader: R) -> Result<Document, ScanError> {
    let mut scanner = Scanner::new();
    for line in reader.lines() {
        scanner.push_line(&line?)?;
    }
    Ok(scanner.finish())
}

/// Scans an in-memory source. Empty input is an empty document, not an error.
pub fn scan_str(src: &str) -> Result<Document, ScanError> {
    if src.is_empty() {
        return Ok(Document::default());
    }
    scan_reader(src.as_bytes())
}

/// Whether `data` looks like a post source: the first bytes after any leading
/// newlines must be the fence marker.
pub fn is_source(data: &str) -> bool {
    data.trim_start_matches('\n').starts_with(FENCE_MARKER)
}
