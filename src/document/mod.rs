//! Structured-document support
//!
//! The position-mapping adapter for rich-text lesson content: a flattened
//! plain-text projection with an offset table, plus drift-tolerant
//! re-location of annotations whose offsets no longer match the document.

pub mod locate;
pub mod model;

// Re-exports
pub use locate::{Decoration, decorations, relocate};
pub use model::{BlockKind, DocBlock, DocPosition, Document, FlatDocument};
