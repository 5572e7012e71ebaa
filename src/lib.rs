//! Marginalia - highlight overlay engine for AI-generated lesson content
//!
//! Takes lesson text plus a set of possibly-overlapping character-range
//! annotations and produces a clickable segmentation: plain-text pieces and
//! annotated blocks, per-segment emphasis, anchors for scroll-to-highlight,
//! and drift-tolerant decoration of rich-text documents.

pub mod annotation;
pub mod config;
pub mod document;
pub mod lesson;
pub mod overlay;
pub mod style;

pub use annotation::{Annotation, AnnotationAction, NormalizedAnnotation, normalize};
pub use config::Config;
pub use lesson::Lesson;
pub use overlay::{OverlayLayout, Piece, build_layout};
pub use style::Palette;
