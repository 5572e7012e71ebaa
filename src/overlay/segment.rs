//! Segment builder
//!
//! Converts an annotated string into a linear sequence of non-overlapping
//! pieces: plain text runs and annotated blocks. Segments are maximal runs of
//! content whose covering-annotation set is constant; consecutive annotated
//! segments merge into a single block. All offsets are char offsets.

use std::collections::BTreeMap;

use crate::annotation::NormalizedAnnotation;

/// A maximal run of content with a constant covering-annotation set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Start char offset (inclusive)
    pub start: usize,
    /// End char offset (exclusive)
    pub end: usize,
    /// The covered substring
    pub text: String,
    /// Ids of all annotations covering this segment, in normalized
    /// (start, end) order
    pub highlight_ids: Vec<String>,
    /// The same set sorted by priority (longest span first)
    pub ordered_highlight_ids: Vec<String>,
}

impl Segment {
    /// Space-joined id list for the host page's `data-highlight-ids` hook,
    /// so plain-DOM event delegation can locate the relevant annotations
    /// without re-running the algorithm
    pub fn data_highlight_ids(&self) -> String {
        self.highlight_ids.join(" ")
    }
}

/// A contiguous run of annotated segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Start char offset of the first segment
    pub start: usize,
    /// End char offset of the last segment
    pub end: usize,
    /// Member segments in left-to-right order; each carries at least one id
    pub segments: Vec<Segment>,
    /// Union of member segments' annotation ids, sorted by priority
    pub highlight_ids: Vec<String>,
}

impl Block {
    /// Number of distinct annotations in this block
    pub fn highlight_count(&self) -> usize {
        self.highlight_ids.len()
    }

    /// Full text of the block
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Space-joined union id list for the host page's
    /// `data-highlight-block` hook
    pub fn data_highlight_block(&self) -> String {
        self.highlight_ids.join(" ")
    }
}

/// The externally-visible unit of rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Plain text with zero annotations
    Text { start: usize, end: usize, text: String },
    /// One or more contiguous annotated segments
    Block(Block),
}

impl Piece {
    /// Start char offset
    pub fn start(&self) -> usize {
        match self {
            Piece::Text { start, .. } => *start,
            Piece::Block(block) => block.start,
        }
    }

    /// End char offset
    pub fn end(&self) -> usize {
        match self {
            Piece::Text { end, .. } => *end,
            Piece::Block(block) => block.end,
        }
    }

    /// Covered text
    pub fn text(&self) -> String {
        match self {
            Piece::Text { text, .. } => text.clone(),
            Piece::Block(block) => block.text(),
        }
    }
}

/// The full segmentation of one content string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayLayout {
    /// Pieces in left-to-right order, tiling the content exactly
    pub pieces: Vec<Piece>,
    /// Annotation ids grouped by the char offset they start at, used for
    /// scroll-to-highlight
    pub anchors: BTreeMap<usize, Vec<String>>,
}

impl OverlayLayout {
    /// Ids of annotations anchored at the given char offset
    pub fn ids_starting_at(&self, offset: usize) -> &[String] {
        self.anchors.get(&offset).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All segments across all blocks, in order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Block(block) => Some(block.segments.iter()),
            Piece::Text { .. } => None,
        })
        .flatten()
    }
}

/// Build the segmentation of `content` under the given normalized annotations
///
/// The covering set can only change at an annotation boundary, so segments
/// are cut at the sorted set of all starts and ends. O(A log A + A * B) for
/// A annotations and B <= 2A + 2 boundaries, rebuilt from scratch on every
/// input change.
pub fn build_layout(content: &str, annotations: &[NormalizedAnnotation]) -> OverlayLayout {
    let byte_at: Vec<usize> = content
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(content.len()))
        .collect();
    let char_count = byte_at.len() - 1;

    if char_count == 0 {
        return OverlayLayout::default();
    }

    let slice = |from: usize, to: usize| content[byte_at[from]..byte_at[to]].to_string();

    if annotations.is_empty() {
        return OverlayLayout {
            pieces: vec![Piece::Text { start: 0, end: char_count, text: content.to_string() }],
            anchors: BTreeMap::new(),
        };
    }

    let mut anchors: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for ann in annotations {
        anchors.entry(ann.start).or_default().push(ann.id.clone());
    }

    let mut bounds: Vec<usize> = Vec::with_capacity(annotations.len() * 2 + 2);
    bounds.push(0);
    bounds.push(char_count);
    for ann in annotations {
        bounds.push(ann.start);
        bounds.push(ann.end);
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut pieces = Vec::new();
    let mut open_block: Vec<Segment> = Vec::new();

    for pair in bounds.windows(2) {
        let (from, to) = (pair[0], pair[1]);

        let covering: Vec<&NormalizedAnnotation> =
            annotations.iter().filter(|a| a.overlaps(from, to)).collect();

        if covering.is_empty() {
            if !open_block.is_empty() {
                pieces.push(close_block(std::mem::take(&mut open_block), annotations));
            }
            pieces.push(Piece::Text { start: from, end: to, text: slice(from, to) });
            continue;
        }

        let highlight_ids: Vec<String> = covering.iter().map(|a| a.id.clone()).collect();
        let mut by_priority = covering;
        by_priority.sort_by(|a, b| a.cmp_priority(b));
        let ordered_highlight_ids: Vec<String> =
            by_priority.into_iter().map(|a| a.id.clone()).collect();

        open_block.push(Segment {
            start: from,
            end: to,
            text: slice(from, to),
            highlight_ids,
            ordered_highlight_ids,
        });
    }

    if !open_block.is_empty() {
        pieces.push(close_block(open_block, annotations));
    }

    OverlayLayout { pieces, anchors }
}

/// Close a run of annotated segments into a block piece
fn close_block(segments: Vec<Segment>, annotations: &[NormalizedAnnotation]) -> Piece {
    let start = segments[0].start;
    let end = segments[segments.len() - 1].end;

    // Segments tile the block, so the id union is exactly the annotations
    // intersecting the block span.
    let mut members: Vec<&NormalizedAnnotation> =
        annotations.iter().filter(|a| a.overlaps(start, end)).collect();
    members.sort_by(|a, b| a.cmp_priority(b));
    let highlight_ids = members.into_iter().map(|a| a.id.clone()).collect();

    Piece::Block(Block { start, end, segments, highlight_ids })
}
