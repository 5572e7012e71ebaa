//! Emphasis resolution
//!
//! Given a block and the UI's active/preview annotation ids, decides which
//! single annotation (if any) is emphasized in each segment and which style
//! variant applies. Segments not carrying the emphasized annotation stay in
//! the idle state so the user still sees the whole annotated span.

use super::segment::Block;

/// Visual variant applied to an emphasized annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisVariant {
    Active,
    Preview,
}

/// The UI's current interaction state
#[derive(Debug, Clone, Copy, Default)]
pub struct EmphasisInput<'a> {
    /// Annotation id whose chat thread is open
    pub active_id: Option<&'a str>,
    /// Annotation id hovered in the chat side-panel
    pub preview_id: Option<&'a str>,
    /// When neither id is supplied, emphasize each block's highest-priority
    /// annotation so a never-interacted-with document still shows its
    /// primary highlights
    pub fallback_to_primary: bool,
}

impl<'a> EmphasisInput<'a> {
    /// Input with the primary fallback enabled and no ids set
    pub fn idle() -> Self {
        Self { active_id: None, preview_id: None, fallback_to_primary: true }
    }
}

/// Resolved emphasis for one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentEmphasis {
    /// The emphasized annotation id, if any
    pub id: Option<String>,
    /// Style variant for the emphasized annotation
    pub variant: Option<EmphasisVariant>,
    /// The emphasized annotation also covers the previous segment of this
    /// block; used to suppress the leading rounded corner
    pub continues_left: bool,
    /// The emphasized annotation also covers the next segment of this block
    pub continues_right: bool,
}

impl SegmentEmphasis {
    fn idle() -> Self {
        Self { id: None, variant: None, continues_left: false, continues_right: false }
    }
}

/// Resolve emphasis for every segment of a block
///
/// Preview wins over active; either wins over the primary fallback. A
/// segment not covered by the winning id renders idle.
pub fn resolve_block(block: &Block, input: &EmphasisInput) -> Vec<SegmentEmphasis> {
    block
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let covered = |id: &str| segment.highlight_ids.iter().any(|h| h == id);

            let winner: Option<(String, EmphasisVariant)> = if let Some(preview) =
                input.preview_id.filter(|&id| covered(id))
            {
                Some((preview.to_string(), EmphasisVariant::Preview))
            } else if let Some(active) = input.active_id.filter(|&id| covered(id)) {
                Some((active.to_string(), EmphasisVariant::Active))
            } else if input.active_id.is_none()
                && input.preview_id.is_none()
                && input.fallback_to_primary
            {
                block
                    .highlight_ids
                    .first()
                    .filter(|id| covered(id.as_str()))
                    .map(|id| (id.clone(), EmphasisVariant::Active))
            } else {
                None
            };

            match winner {
                Some((id, variant)) => {
                    let continues_left = index > 0
                        && block.segments[index - 1].highlight_ids.contains(&id);
                    let continues_right = index + 1 < block.segments.len()
                        && block.segments[index + 1].highlight_ids.contains(&id);
                    SegmentEmphasis {
                        id: Some(id),
                        variant: Some(variant),
                        continues_left,
                        continues_right,
                    }
                }
                None => SegmentEmphasis::idle(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::annotation::{Annotation, AnnotationAction, normalize};
    use crate::overlay::segment::{Piece, build_layout};

    /// Block from "abcdefghijkl" with long=[0,12) and short=[4,8):
    /// segments [0,4) [long], [4,8) [long, short], [8,12) [long].
    fn sample_block() -> Block {
        let raw = vec![
            Annotation::new("long", 0, 12, AnnotationAction::Explain, ""),
            Annotation::new("short", 4, 8, AnnotationAction::Ask, ""),
        ];
        let anns = normalize(12, &raw);
        let out = build_layout("abcdefghijkl", &anns);
        match out.pieces.into_iter().next() {
            Some(Piece::Block(block)) => block,
            _ => panic!("expected a block piece"),
        }
    }

    #[test]
    fn preview_wins_over_active() {
        let block = sample_block();
        let input = EmphasisInput {
            active_id: Some("long"),
            preview_id: Some("short"),
            fallback_to_primary: true,
        };
        let resolved = resolve_block(&block, &input);

        // Middle segment carries both; preview takes it.
        assert_eq!(resolved[1].id.as_deref(), Some("short"));
        assert_eq!(resolved[1].variant, Some(EmphasisVariant::Preview));
        // Outer segments only carry "long", which is active.
        assert_eq!(resolved[0].id.as_deref(), Some("long"));
        assert_eq!(resolved[0].variant, Some(EmphasisVariant::Active));
    }

    #[test]
    fn active_only_emphasizes_covered_segments() {
        let block = sample_block();
        let input =
            EmphasisInput { active_id: Some("short"), preview_id: None, fallback_to_primary: true };
        let resolved = resolve_block(&block, &input);

        assert_eq!(resolved[0].id, None);
        assert_eq!(resolved[1].id.as_deref(), Some("short"));
        assert_eq!(resolved[2].id, None);
    }

    #[test]
    fn no_ids_falls_back_to_block_primary() {
        let block = sample_block();
        let resolved = resolve_block(&block, &EmphasisInput::idle());

        for emphasis in &resolved {
            assert_eq!(emphasis.id.as_deref(), Some("long"));
            assert_eq!(emphasis.variant, Some(EmphasisVariant::Active));
        }
    }

    #[test]
    fn fallback_can_be_disabled() {
        let block = sample_block();
        let input = EmphasisInput { fallback_to_primary: false, ..EmphasisInput::idle() };
        let resolved = resolve_block(&block, &input);
        assert!(resolved.iter().all(|e| e.id.is_none()));
    }

    #[test]
    fn active_id_outside_block_leaves_segments_idle() {
        // An id is supplied but covers nothing here; the primary fallback
        // must not kick in.
        let block = sample_block();
        let input =
            EmphasisInput { active_id: Some("other"), preview_id: None, fallback_to_primary: true };
        let resolved = resolve_block(&block, &input);
        assert!(resolved.iter().all(|e| e.id.is_none()));
    }

    #[test]
    fn continuation_flags_join_segments_of_one_annotation() {
        let block = sample_block();
        let resolved = resolve_block(&block, &EmphasisInput::idle());

        assert!(!resolved[0].continues_left);
        assert!(resolved[0].continues_right);
        assert!(resolved[1].continues_left);
        assert!(resolved[1].continues_right);
        assert!(resolved[2].continues_left);
        assert!(!resolved[2].continues_right);
    }

    #[test]
    fn continuation_stops_where_annotation_ends() {
        let block = sample_block();
        let input =
            EmphasisInput { active_id: Some("short"), preview_id: None, fallback_to_primary: true };
        let resolved = resolve_block(&block, &input);

        // "short" only covers the middle segment.
        assert!(!resolved[1].continues_left);
        assert!(!resolved[1].continues_right);
    }
}
