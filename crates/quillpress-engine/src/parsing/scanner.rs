use super::Document;
use super::block::{Block, BlockKind, FENCE_MARKER};

/// Errors produced while scanning a post source.
///
/// Scanning is all-or-nothing per document: the first error aborts the scan
/// and no blocks are returned.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read post source: {0}")]
    Io(#[from] std::io::Error),
    #[error("first block marker {marker:?} is not a recognized front-matter tag")]
    FirstBlockUnrecognized { marker: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing opened yet; leading empty lines are skipped.
    AwaitingInput,
    /// Inside the front-matter block, watching for the closing fence.
    FirstBlock,
    /// Inside the trailing content block.
    SubsequentBlock,
    /// Terminal: the scan finished or failed.
    Done,
}

/// Single-pass line scanner partitioning a post source into blocks.
///
/// Feed lines with [`Scanner::push_line`] and collect the result with
/// [`Scanner::finish`]. Exactly one block is open at any time once scanning
/// has started, and the first block of any document must be the front-matter
/// variant.
#[derive(Debug)]
pub struct Scanner {
    state: State,
    current: Option<Block>,
    blocks: Vec<Block>,
    /// Armed once a line lands in a block after the first block closed; until
    /// then empty lines are suppressed rather than written.
    lined: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: State::AwaitingInput,
            current: None,
            blocks: Vec::new(),
            lined: false,
        }
    }

    /// Consumes one line, given without its terminator.
    pub fn push_line(&mut self, line: &str) -> Result<(), ScanError> {
        match self.state {
            State::AwaitingInput => self.open_first_block(line),
            State::FirstBlock => {
                if line == FENCE_MARKER {
                    self.close_first_block();
                } else {
                    self.write_line(line);
                }
                Ok(())
            }
            State::SubsequentBlock => {
                self.write_line(line);
                Ok(())
            }
            State::Done => Ok(()),
        }
    }

    /// Flushes the active block and returns the scanned document.
    pub fn finish(mut self) -> Document {
        self.state = State::Done;
        if let Some(block) = self.current.take() {
            // A trailing block that never received a byte is dropped, so a
            // source without a content block matches one that never opened
            // the second block at all.
            if !block.is_empty() {
                self.blocks.push(block);
            }
        }
        Document {
            blocks: self.blocks,
        }
    }

    fn open_first_block(&mut self, line: &str) -> Result<(), ScanError> {
        if line.is_empty() {
            return Ok(());
        }
        // The fence is treated as a cutset: any run of leading backticks is
        // stripped and the remainder is the detection marker.
        let marker = line.trim_start_matches('`');
        match Block::detect(marker) {
            Some(block) if block.is_meta() => {
                self.current = Some(block);
                self.state = State::FirstBlock;
                Ok(())
            }
            _ => {
                self.state = State::Done;
                Err(ScanError::FirstBlockUnrecognized {
                    marker: marker.to_string(),
                })
            }
        }
    }

    fn close_first_block(&mut self) {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
        self.current = Some(Block::new(BlockKind::Markdown));
        self.state = State::SubsequentBlock;
    }

    /// Ragged-start rule: an empty line is written only once some line has
    /// already landed in a block after the first block closed. The empty line
    /// right after the closing fence vanishes; later empty lines survive.
    fn write_line(&mut self, line: &str) {
        if line.is_empty() && !self.lined {
            return;
        }
        if let Some(block) = self.current.as_mut() {
            block.append_line(line);
            if !self.blocks.is_empty() {
                self.lined = true;
            }
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
