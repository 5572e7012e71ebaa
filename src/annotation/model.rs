//! Annotation data model
//!
//! This module defines the annotation ("highlight") records fed into the overlay
//! engine: the raw form as it arrives from the product API, and the normalized
//! form every downstream stage works with.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

/// Action tag attached to an annotation
///
/// A closed set used only to select a visual style. Tags the engine does not
/// recognize deserialize to [`AnnotationAction::Other`] and fall back to the
/// default style rather than failing the whole annotation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationAction {
    #[default]
    Ask,
    Explain,
    Expand,
    Simplify,
    Exercises,
    Other,
}

impl AnnotationAction {
    /// Look up an action by its wire tag; unknown tags map to `Other`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ask" => Self::Ask,
            "explain" => Self::Explain,
            "expand" => Self::Expand,
            "simplify" => Self::Simplify,
            "exercises" => Self::Exercises,
            _ => Self::Other,
        }
    }
}

impl<'de> Deserialize<'de> for AnnotationAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// A raw annotation as received from the surrounding application
///
/// Offsets are half-open char offsets into the lesson content. Bounds are
/// lenient on the wire: non-numeric values deserialize to `None` and the
/// normalizer drops the record, so one corrupt highlight never blocks
/// rendering of otherwise-valid lesson content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Unique identifier, stable across re-renders
    pub id: String,
    /// Start offset (inclusive)
    #[serde(default, deserialize_with = "lenient_offset")]
    pub start: Option<i64>,
    /// End offset (exclusive)
    #[serde(default, deserialize_with = "lenient_offset")]
    pub end: Option<i64>,
    /// Action tag selecting the visual style
    #[serde(default)]
    pub action: AnnotationAction,
    /// The literal substring the annotation was created from, used to
    /// re-locate it after the underlying document shifts
    #[serde(default)]
    pub text: String,
    /// Human-readable label of the context the annotation belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    /// Insertion index; preserved through normalization so priority
    /// tie-breaks stay deterministic across re-normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
}

impl Annotation {
    /// Create an annotation with known bounds
    pub fn new(
        id: impl Into<String>,
        start: i64,
        end: i64,
        action: AnnotationAction,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start: Some(start),
            end: Some(end),
            action,
            text: text.into(),
            section_title: None,
            order: None,
        }
    }
}

/// Accept any JSON value for an offset; only numbers survive
fn lenient_offset<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
}

/// A validated annotation with bounds clamped to the content
///
/// Invariant: `start < end <= content_len` in char offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAnnotation {
    pub id: String,
    pub start: usize,
    pub end: usize,
    pub action: AnnotationAction,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    pub order: usize,
}

impl NormalizedAnnotation {
    /// Span length in chars
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers the given char offset
    pub fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether the span intersects the half-open range `[from, to)`
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        self.start < to && self.end > from
    }

    /// Priority ordering: longer spans first, then smaller start, then
    /// insertion order
    ///
    /// Larger outer annotations are visually dominant and are the default
    /// target of interaction unless an active/preview id overrides them.
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        other
            .len()
            .cmp(&self.len())
            .then(self.start.cmp(&other.start))
            .then(self.order.cmp(&other.order))
    }
}

impl From<&NormalizedAnnotation> for Annotation {
    fn from(norm: &NormalizedAnnotation) -> Self {
        Self {
            id: norm.id.clone(),
            start: Some(norm.start as i64),
            end: Some(norm.end as i64),
            action: norm.action,
            text: norm.text.clone(),
            section_title: norm.section_title.clone(),
            order: Some(norm.order),
        }
    }
}
