//! Click/selection resolution
//!
//! Turns a pointer event on an annotated segment into the candidate
//! annotation set and the initial selection for the overlap selector.

use super::geometry::Rect;
use super::segment::{Block, Segment};

/// Pointer-event context supplied by the host page
#[derive(Debug, Clone, Copy)]
pub struct PointerContext {
    /// Bounding rectangle of the clicked element
    pub target: Rect,
    /// Length in chars of the user's live text selection
    pub selection_len: usize,
}

impl PointerContext {
    /// A click with no live selection
    pub fn click(target: Rect) -> Self {
        Self { target, selection_len: 0 }
    }
}

/// A resolved activation: what the selector popover opens with
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    /// The initially selected annotation id
    pub initial_id: String,
    /// All candidate ids at the clicked position, in priority order
    pub candidate_ids: Vec<String>,
    /// Anchor rectangle for the selector popover
    pub anchor: Rect,
}

/// Resolve a click on a segment
///
/// Returns `None` while the user has a live text selection: annotation
/// clicks must not fire while a selection is being made to create a new
/// annotation. Candidates come from the block; the initial id keeps the
/// currently active annotation if it is among them, otherwise prefers an
/// annotation actually covering the clicked segment over the block's
/// top-priority one.
pub fn activate(
    block: &Block,
    segment: &Segment,
    active_id: Option<&str>,
    pointer: &PointerContext,
) -> Option<Activation> {
    if pointer.selection_len > 0 {
        return None;
    }

    let candidate_ids = if block.highlight_ids.is_empty() {
        segment.ordered_highlight_ids.clone()
    } else {
        block.highlight_ids.clone()
    };
    if candidate_ids.is_empty() {
        return None;
    }

    let initial_id = active_id
        .filter(|&id| candidate_ids.iter().any(|c| c == id))
        .map(str::to_string)
        .or_else(|| {
            candidate_ids.iter().find(|c| segment.highlight_ids.contains(*c)).cloned()
        })
        .unwrap_or_else(|| candidate_ids[0].clone());

    Some(Activation { initial_id, candidate_ids, anchor: pointer.target })
}
