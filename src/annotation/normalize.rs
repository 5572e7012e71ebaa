//! Annotation normalization
//!
//! Validates and clamps raw annotation ranges against the current content
//! length and derives a stable ordering. Malformed entries are silently
//! dropped so the UI degrades gracefully instead of refusing to render
//! lesson content over one bad highlight.

use tracing::debug;

use super::model::{Annotation, NormalizedAnnotation};

/// Normalize a raw annotation list against the given content length
///
/// - entries with non-numeric bounds are dropped;
/// - `start` is clamped to `[0, content_len]`, then `end` to
///   `[start, content_len]`;
/// - entries that are empty after clamping are dropped;
/// - `order` is the original array index unless the entry already carries
///   one (which keeps re-normalization the identity);
/// - output is sorted by `(start asc, end asc)`.
pub fn normalize(content_len: usize, raw: &[Annotation]) -> Vec<NormalizedAnnotation> {
    let mut out = Vec::with_capacity(raw.len());

    for (index, ann) in raw.iter().enumerate() {
        let (Some(start), Some(end)) = (ann.start, ann.end) else {
            debug!(id = %ann.id, "dropping annotation with non-numeric bounds");
            continue;
        };

        let start = start.clamp(0, content_len as i64) as usize;
        let end = end.clamp(start as i64, content_len as i64) as usize;

        if start == end {
            debug!(id = %ann.id, "dropping annotation empty after clamping");
            continue;
        }

        out.push(NormalizedAnnotation {
            id: ann.id.clone(),
            start,
            end,
            action: ann.action,
            text: ann.text.clone(),
            section_title: ann.section_title.clone(),
            order: ann.order.unwrap_or(index),
        });
    }

    out.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::annotation::model::AnnotationAction;

    fn raw(id: &str, start: i64, end: i64) -> Annotation {
        Annotation::new(id, start, end, AnnotationAction::Ask, "")
    }

    #[test]
    fn clamps_out_of_range_bounds() {
        let anns = normalize(10, &[raw("a", -3, 25)]);
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].start, 0);
        assert_eq!(anns[0].end, 10);
    }

    #[test]
    fn drops_empty_after_clamping() {
        let anns = normalize(10, &[raw("a", 12, 20), raw("b", 4, 4), raw("c", 7, 2)]);
        assert!(anns.is_empty());
    }

    #[test]
    fn drops_non_numeric_bounds() {
        let mut bad = raw("bad", 0, 5);
        bad.start = None;
        let anns = normalize(10, &[bad, raw("good", 0, 5)]);
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].id, "good");
    }

    #[test]
    fn sorts_by_start_then_end() {
        let anns = normalize(20, &[raw("c", 5, 9), raw("a", 1, 4), raw("b", 5, 7)]);
        let ids: Vec<&str> = anns.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn order_follows_input_index_not_sorted_position() {
        let anns = normalize(20, &[raw("late", 10, 15), raw("early", 0, 5)]);
        assert_eq!(anns[0].id, "early");
        assert_eq!(anns[0].order, 1);
        assert_eq!(anns[1].order, 0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let input = vec![raw("a", -2, 30), raw("b", 5, 5), raw("c", 8, 3), raw("d", 1, 9)];
        let once = normalize(20, &input);
        let back: Vec<Annotation> = once.iter().map(Annotation::from).collect();
        let twice = normalize(20, &back);
        assert_eq!(once, twice);
    }

    proptest! {
        #[test]
        fn normalized_bounds_always_valid(
            content_len in 0usize..200,
            ranges in prop::collection::vec((-50i64..250, -50i64..250), 0..16),
        ) {
            let raw: Vec<Annotation> = ranges
                .iter()
                .enumerate()
                .map(|(i, (s, e))| Annotation::new(format!("a{i}"), *s, *e, AnnotationAction::Ask, ""))
                .collect();
            let anns = normalize(content_len, &raw);
            for ann in &anns {
                prop_assert!(ann.start < ann.end);
                prop_assert!(ann.end <= content_len);
            }
            for pair in anns.windows(2) {
                prop_assert!(pair[0].start <= pair[1].start);
            }
        }

        #[test]
        fn idempotent_for_arbitrary_input(
            content_len in 0usize..100,
            ranges in prop::collection::vec((-20i64..120, -20i64..120), 0..12),
        ) {
            let raw: Vec<Annotation> = ranges
                .iter()
                .enumerate()
                .map(|(i, (s, e))| Annotation::new(format!("a{i}"), *s, *e, AnnotationAction::Ask, ""))
                .collect();
            let once = normalize(content_len, &raw);
            let back: Vec<Annotation> = once.iter().map(Annotation::from).collect();
            prop_assert_eq!(normalize(content_len, &back), once);
        }
    }
}
