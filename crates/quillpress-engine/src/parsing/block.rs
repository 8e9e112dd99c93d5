//! Block variants for post sources.
//!
//! A post source carries two kinds of blocks: a TOML front-matter block and a
//! markdown content block. Detection walks an ordered table of
//! (predicate, kind) pairs and takes the first match; the markdown variant
//! accepts any marker and therefore sits last.

/// Literal fence delimiter opening and closing the front-matter block.
pub const FENCE_MARKER: &str = "```";

/// Marker tag recognized as the front-matter variant.
pub const META_TAG: &str = "toml";

/// The kind of a block within a post source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// TOML front matter.
    Meta,
    /// Markdown content (default when no other kind matches).
    Markdown,
}

/// A unit of raw text accumulated line by line during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    buf: String,
}

fn is_meta_marker(marker: &str) -> bool {
    marker == META_TAG
}

fn is_markdown_marker(_marker: &str) -> bool {
    true
}

// Order matters: the markdown fallback matches anything and must stay last.
const DETECTORS: &[(fn(&str) -> bool, BlockKind)] = &[
    (is_meta_marker, BlockKind::Meta),
    (is_markdown_marker, BlockKind::Markdown),
];

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            buf: String::new(),
        }
    }

    /// Returns a fresh empty block of the first kind whose predicate accepts
    /// `marker`. Pure: no block state is touched.
    pub fn detect(marker: &str) -> Option<Self> {
        DETECTORS
            .iter()
            .find(|(matches, _)| matches(marker))
            .map(|(_, kind)| Self::new(*kind))
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn is_meta(&self) -> bool {
        self.kind == BlockKind::Meta
    }

    /// Appends a line plus its separator to the block's buffer.
    pub fn append_line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    /// All bytes written so far, including inserted line separators.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_meta_tag() {
        let block = Block::detect("toml").unwrap();
        assert_eq!(block.kind(), BlockKind::Meta);
    }

    #[test]
    fn unknown_marker_falls_back_to_markdown() {
        let block = Block::detect("yaml").unwrap();
        assert_eq!(block.kind(), BlockKind::Markdown);
    }

    #[test]
    fn empty_marker_falls_back_to_markdown() {
        let block = Block::detect("").unwrap();
        assert_eq!(block.kind(), BlockKind::Markdown);
    }

    #[test]
    fn append_inserts_line_separators() {
        let mut block = Block::new(BlockKind::Markdown);
        block.append_line("first");
        block.append_line("second");
        assert_eq!(block.as_str(), "first\nsecond\n");
    }

    #[test]
    fn fresh_block_is_empty() {
        assert!(Block::new(BlockKind::Meta).is_empty());
    }
}
