//! Annotation re-location
//!
//! Edits shift annotation offsets, so decorations are re-targeted by
//! searching for the annotation's stored text near its last known offset
//! first, then by whitespace-normalized fuzzy matching, and only then by
//! trusting the raw stored offsets. Annotations that cannot be resolved are
//! dropped from the render pass, never surfaced as errors.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::annotation::{AnnotationAction, NormalizedAnnotation};

use super::model::{DocPosition, Document, FlatDocument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A decoration ready to draw over the structured document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub id: String,
    pub action: AnnotationAction,
    pub from: DocPosition,
    pub to: DocPosition,
}

/// Re-locate an annotation inside the flattened projection
///
/// Returns the half-open char range the annotation currently occupies, or
/// `None` when its text is gone and its stored offsets are out of bounds.
/// When the stored text occurs more than once, the occurrence nearest the
/// last known start offset wins; ties go to the earlier occurrence.
pub fn relocate(flat: &FlatDocument, ann: &NormalizedAnnotation) -> Option<(usize, usize)> {
    if !ann.text.is_empty() {
        if let Some(start) = nearest_exact(&flat.text, &ann.text, ann.start) {
            return Some((start, start + ann.text.chars().count()));
        }
        if let Some(range) = nearest_fuzzy(&flat.text, &ann.text, ann.start) {
            return Some(range);
        }
    }

    if ann.start < ann.end && ann.end <= flat.char_len() {
        return Some((ann.start, ann.end));
    }

    debug!(id = %ann.id, "annotation text not found and offsets out of bounds; dropping");
    None
}

/// Resolve all annotations against a document, skipping the unresolvable
pub fn decorations(doc: &Document, annotations: &[NormalizedAnnotation]) -> Vec<Decoration> {
    let flat = doc.flatten();
    annotations
        .iter()
        .filter_map(|ann| {
            let (start, end) = relocate(&flat, ann)?;
            let from = flat.resolve_position(start)?;
            let to = flat.resolve_position(end)?;
            Some(Decoration { id: ann.id.clone(), action: ann.action, from, to })
        })
        .collect()
}

/// Char-offset occurrences of `needle` in `haystack`, nearest to `near`
fn nearest_exact(haystack: &str, needle: &str, near: usize) -> Option<usize> {
    let occurrences = haystack.match_indices(needle).map(|(byte, _)| byte);
    nearest_char_offset(haystack, occurrences, near)
}

/// Whitespace-normalized fuzzy match mapped back to original char offsets
///
/// Collapses every whitespace run to a single space in both needle and
/// haystack, records which original char each normalized char came from,
/// and maps the nearest normalized occurrence back through that table.
fn nearest_fuzzy(haystack: &str, needle: &str, near: usize) -> Option<(usize, usize)> {
    let needle_norm = WHITESPACE.replace_all(needle.trim(), " ");
    if needle_norm.is_empty() {
        return None;
    }

    // Normalized haystack plus normalized-char -> original-char table.
    let mut norm = String::new();
    let mut back: Vec<usize> = Vec::new();
    let mut pending_ws: Option<usize> = None;
    for (char_index, ch) in haystack.chars().enumerate() {
        if ch.is_whitespace() {
            if !norm.is_empty() {
                pending_ws.get_or_insert(char_index);
            }
        } else {
            if let Some(ws_start) = pending_ws.take() {
                norm.push(' ');
                back.push(ws_start);
            }
            norm.push(ch);
            back.push(char_index);
        }
    }

    // Translate `near` into normalized space for the distance comparison.
    let near_norm = back.partition_point(|&orig| orig < near);

    let occurrences = norm.match_indices(needle_norm.as_ref()).map(|(byte, _)| byte);
    let start_norm = nearest_char_offset(&norm, occurrences, near_norm)?;

    let needle_len = needle_norm.chars().count();
    let start = back[start_norm];
    let end = back[start_norm + needle_len - 1] + 1;
    Some((start, end))
}

/// Pick the byte-offset occurrence nearest to `near` (a char offset),
/// returning it as a char offset
fn nearest_char_offset(
    haystack: &str,
    byte_offsets: impl Iterator<Item = usize>,
    near: usize,
) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for byte in byte_offsets {
        let char_offset = haystack[..byte].chars().count();
        let distance = char_offset.abs_diff(near);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((char_offset, distance));
        }
    }
    best.map(|(offset, _)| offset)
}
