//! Overlay engine
//!
//! The pure core of the highlight overlay: segmentation of annotated
//! content, per-segment emphasis resolution, and click/selection handling.
//! Everything here is a synchronous function of its inputs; re-renders are
//! idempotent and side-effect-free given the same
//! `(content, annotations, active_id, preview_id)` tuple.

pub mod emphasis;
pub mod geometry;
pub mod interaction;
pub mod popover;
pub mod segment;

// Re-export commonly used types
pub use emphasis::{EmphasisInput, EmphasisVariant, SegmentEmphasis, resolve_block};
pub use geometry::{Rect, Size};
pub use interaction::{Activation, PointerContext, activate};
pub use popover::{SelectorEvent, SelectorKey, SelectorPopover};
pub use segment::{Block, OverlayLayout, Piece, Segment, build_layout};
