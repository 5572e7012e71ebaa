//! Structured document model
//!
//! When lesson content lives in a rich-text document rather than a flat
//! string, annotation offsets are measured against a flattened plain-text
//! projection. This module defines the document shape and the projection
//! with its offset table.

use serde::{Deserialize, Serialize};

/// Kind of a top-level document block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Heading { level: u8 },
    ListItem,
    Quote,
}

/// A top-level block holding inline text runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    pub kind: BlockKind,
    /// Inline text runs in order; styling splits text into multiple runs
    pub runs: Vec<String>,
}

impl DocBlock {
    /// A paragraph with a single run
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self { kind: BlockKind::Paragraph, runs: vec![text.into()] }
    }
}

/// A structured rich-text document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<DocBlock>,
}

impl Document {
    /// Build a document from plain text, one paragraph per line
    ///
    /// Round-trips through [`Document::flatten`]: the projection of the
    /// result equals the input text.
    pub fn from_plain_text(text: &str) -> Self {
        Self { blocks: text.split('\n').map(DocBlock::paragraph).collect() }
    }

    /// Flatten all text runs into one string, recording each run's starting
    /// plain-text offset so plain offsets can be mapped back to structured
    /// positions
    pub fn flatten(&self) -> FlatDocument {
        let mut text = String::new();
        let mut spans = Vec::new();
        let mut offset = 0;

        for (block_index, block) in self.blocks.iter().enumerate() {
            if block_index > 0 {
                // Blocks are separated by a newline in the projection; the
                // separator belongs to no run.
                text.push('\n');
                offset += 1;
            }
            for (run_index, run) in block.runs.iter().enumerate() {
                let len = run.chars().count();
                spans.push(FlatSpan {
                    plain_start: offset,
                    len,
                    block: block_index,
                    run: run_index,
                });
                text.push_str(run);
                offset += len;
            }
        }

        FlatDocument { text, spans, char_len: offset }
    }
}

/// A position inside the structured document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocPosition {
    /// Block index
    pub block: usize,
    /// Run index within the block
    pub run: usize,
    /// Char offset within the run
    pub offset: usize,
}

/// One text run's location in the plain-text projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatSpan {
    /// Starting char offset in the projection
    pub plain_start: usize,
    /// Run length in chars
    pub len: usize,
    /// Owning block index
    pub block: usize,
    /// Run index within the block
    pub run: usize,
}

/// The plain-text projection of a document plus its offset table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatDocument {
    /// The flattened text, blocks joined by `\n`
    pub text: String,
    spans: Vec<FlatSpan>,
    char_len: usize,
}

impl FlatDocument {
    /// Projection length in chars
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// The recorded run spans, in order
    pub fn spans(&self) -> &[FlatSpan] {
        &self.spans
    }

    /// Map a plain-text char offset to a structured position
    ///
    /// Linear scan of the span table; documents have few runs, so this
    /// stays cheap without interval machinery. An offset on a block
    /// separator resolves to the end of the preceding run, which is where
    /// decoration boundaries at block ends belong. Returns `None` when the
    /// offset lies beyond the projection.
    pub fn resolve_position(&self, offset: usize) -> Option<DocPosition> {
        self.spans
            .iter()
            .find(|span| offset >= span.plain_start && offset <= span.plain_start + span.len)
            .map(|span| DocPosition {
                block: span.block,
                run: span.run,
                offset: offset - span.plain_start,
            })
    }
}
