//! Annotation model and normalization
//!
//! Annotations are tagged character ranges over lesson content, created
//! externally (by a selection-to-chat-thread action) and pushed into the
//! engine as an immutable list on every render.

pub mod model;
pub mod normalize;

// Re-exports
pub use model::{Annotation, AnnotationAction, NormalizedAnnotation};
pub use normalize::normalize;
