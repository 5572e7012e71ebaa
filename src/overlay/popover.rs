//! Overlap selector popover
//!
//! When a click lands on text covered by several annotations, a small
//! cycling selector opens anchored at the clicked span so the user can pick
//! which annotation's thread to jump to.

use super::geometry::{Rect, Size};
use super::interaction::Activation;

/// Keys the popover responds to while it has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
}

/// Outcome of a key press or outside click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    /// Selection moved to another candidate
    Moved(String),
    /// The user picked the current candidate
    Chosen(String),
    /// The popover should close without a pick
    Closed,
    /// Nothing to do
    Ignored,
}

/// Cycling selector over the candidate annotations at a clicked position
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorPopover {
    candidate_ids: Vec<String>,
    index: usize,
    rect: Rect,
}

impl SelectorPopover {
    /// Open the selector for an activation, placed relative to its anchor
    pub fn open(activation: &Activation, size: Size, viewport: Size, gap: f64) -> Self {
        let index = activation
            .candidate_ids
            .iter()
            .position(|id| *id == activation.initial_id)
            .unwrap_or(0);
        let rect = place(&activation.anchor, size, viewport, gap);
        Self { candidate_ids: activation.candidate_ids.clone(), index, rect }
    }

    /// Currently selected candidate id
    pub fn current_id(&self) -> &str {
        &self.candidate_ids[self.index]
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidate_ids.len()
    }

    /// Whether there is nothing to cycle through
    pub fn is_empty(&self) -> bool {
        self.candidate_ids.is_empty()
    }

    /// Where the popover was placed
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Move to the next candidate, wrapping around
    pub fn cycle_next(&mut self) -> &str {
        self.index = (self.index + 1) % self.candidate_ids.len();
        self.current_id()
    }

    /// Move to the previous candidate, wrapping around
    pub fn cycle_prev(&mut self) -> &str {
        self.index = (self.index + self.candidate_ids.len() - 1) % self.candidate_ids.len();
        self.current_id()
    }

    /// Handle a key press while the popover has focus
    pub fn handle_key(&mut self, key: SelectorKey) -> SelectorEvent {
        match key {
            SelectorKey::ArrowRight => SelectorEvent::Moved(self.cycle_next().to_string()),
            SelectorKey::ArrowLeft => SelectorEvent::Moved(self.cycle_prev().to_string()),
            SelectorKey::Enter => SelectorEvent::Chosen(self.current_id().to_string()),
            SelectorKey::Escape => SelectorEvent::Closed,
        }
    }

    /// Handle a click anywhere on the page; clicks outside the popover
    /// close it
    pub fn handle_click(&self, x: f64, y: f64) -> SelectorEvent {
        if self.rect.contains(x, y) {
            SelectorEvent::Chosen(self.current_id().to_string())
        } else {
            SelectorEvent::Closed
        }
    }
}

/// Place a popover of the given size near an anchor rectangle
///
/// Centered under the anchor, clamped horizontally to the viewport and
/// flipped above the anchor when it would overflow the bottom edge.
pub fn place(anchor: &Rect, size: Size, viewport: Size, gap: f64) -> Rect {
    let max_x = (viewport.width - size.width).max(0.0);
    let x = (anchor.x + anchor.width / 2.0 - size.width / 2.0).clamp(0.0, max_x);

    let below = anchor.bottom() + gap;
    let y = if below + size.height > viewport.height {
        (anchor.y - gap - size.height).max(0.0)
    } else {
        below
    };

    Rect::new(x, y, size.width, size.height)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn activation(initial: &str) -> Activation {
        Activation {
            initial_id: initial.into(),
            candidate_ids: vec!["a".into(), "b".into(), "c".into()],
            anchor: Rect::new(100.0, 200.0, 60.0, 20.0),
        }
    }

    fn viewport() -> Size {
        Size::new(1280.0, 800.0)
    }

    fn popover(initial: &str) -> SelectorPopover {
        SelectorPopover::open(&activation(initial), Size::new(240.0, 48.0), viewport(), 8.0)
    }

    #[test]
    fn opens_on_the_initial_candidate() {
        assert_eq!(popover("b").current_id(), "b");
        assert_eq!(popover("a").len(), 3);
    }

    #[test]
    fn unknown_initial_defaults_to_first() {
        assert_eq!(popover("nope").current_id(), "a");
    }

    #[test]
    fn cycling_wraps_both_directions() {
        let mut selector = popover("c");
        assert_eq!(selector.cycle_next(), "a");
        assert_eq!(selector.cycle_next(), "b");

        let mut selector = popover("a");
        assert_eq!(selector.cycle_prev(), "c");
    }

    #[test]
    fn arrow_keys_cycle_and_escape_closes() {
        let mut selector = popover("a");
        assert_eq!(selector.handle_key(SelectorKey::ArrowRight), SelectorEvent::Moved("b".into()));
        assert_eq!(selector.handle_key(SelectorKey::ArrowLeft), SelectorEvent::Moved("a".into()));
        assert_eq!(selector.handle_key(SelectorKey::Enter), SelectorEvent::Chosen("a".into()));
        assert_eq!(selector.handle_key(SelectorKey::Escape), SelectorEvent::Closed);
    }

    #[test]
    fn outside_click_closes() {
        let selector = popover("a");
        assert_eq!(selector.handle_click(5.0, 5.0), SelectorEvent::Closed);
        let rect = *selector.rect();
        assert_eq!(
            selector.handle_click(rect.x + 1.0, rect.y + 1.0),
            SelectorEvent::Chosen("a".into())
        );
    }

    #[test]
    fn placed_below_anchor_by_default() {
        let selector = popover("a");
        let rect = selector.rect();
        assert_eq!(rect.y, 228.0 + 8.0);
        // Centered: anchor center 130, popover width 240.
        assert_eq!(rect.x, 10.0);
    }

    #[test]
    fn clamped_to_left_viewport_edge() {
        let mut act = activation("a");
        act.anchor = Rect::new(0.0, 200.0, 20.0, 20.0);
        let selector = SelectorPopover::open(&act, Size::new(240.0, 48.0), viewport(), 8.0);
        assert_eq!(selector.rect().x, 0.0);
    }

    #[test]
    fn clamped_to_right_viewport_edge() {
        let mut act = activation("a");
        act.anchor = Rect::new(1250.0, 200.0, 20.0, 20.0);
        let selector = SelectorPopover::open(&act, Size::new(240.0, 48.0), viewport(), 8.0);
        assert_eq!(selector.rect().right(), viewport().width);
    }

    #[test]
    fn flips_above_when_bottom_overflows() {
        let mut act = activation("a");
        act.anchor = Rect::new(100.0, 780.0, 60.0, 15.0);
        let selector = SelectorPopover::open(&act, Size::new(240.0, 48.0), viewport(), 8.0);
        assert_eq!(selector.rect().y, 780.0 - 8.0 - 48.0);
    }
}
