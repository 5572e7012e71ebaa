//! Highlight styling
//!
//! Maps annotation action tags to visual styles through an explicit lookup
//! table with a mandatory default entry, so unrecognized tags always render
//! with the fallback treatment instead of breaking the overlay.

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationAction;

/// Idle underline treatment for non-emphasized annotated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlineStyle {
    Dotted,
    Solid,
    None,
}

/// Visual style for one action tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyle {
    /// CSS class hook emitted on rendered segments
    pub class_name: String,
    /// Base (idle) color, hex
    pub color: String,
    /// Color when the annotation is emphasized (active/preview)
    pub emphasis_color: String,
    /// Idle underline treatment
    pub underline: UnderlineStyle,
}

impl HighlightStyle {
    fn new(class_name: &str, color: &str, emphasis_color: &str) -> Self {
        Self {
            class_name: class_name.into(),
            color: color.into(),
            emphasis_color: emphasis_color.into(),
            underline: UnderlineStyle::Dotted,
        }
    }
}

/// The full action-to-style table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub ask: HighlightStyle,
    pub explain: HighlightStyle,
    pub expand: HighlightStyle,
    pub simplify: HighlightStyle,
    pub exercises: HighlightStyle,
    /// Applied to any action without a dedicated entry
    pub fallback: HighlightStyle,
}

impl Palette {
    /// Style for an action; unrecognized actions get the fallback
    pub fn style_for(&self, action: AnnotationAction) -> &HighlightStyle {
        match action {
            AnnotationAction::Ask => &self.ask,
            AnnotationAction::Explain => &self.explain,
            AnnotationAction::Expand => &self.expand,
            AnnotationAction::Simplify => &self.simplify,
            AnnotationAction::Exercises => &self.exercises,
            AnnotationAction::Other => &self.fallback,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            name: "Chalkboard".into(),
            ask: HighlightStyle::new("highlight-ask", "#7aa2f7", "#3d59a1"),
            explain: HighlightStyle::new("highlight-explain", "#9ece6a", "#33635c"),
            expand: HighlightStyle::new("highlight-expand", "#bb9af7", "#5a4a78"),
            simplify: HighlightStyle::new("highlight-simplify", "#e0af68", "#8f5e15"),
            exercises: HighlightStyle::new("highlight-exercises", "#f7768e", "#8c4351"),
            fallback: HighlightStyle::new("highlight-default", "#a9b1d6", "#565f89"),
        }
    }
}
