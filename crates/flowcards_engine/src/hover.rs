// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hover tracking: pauses autoplay and dulls the other items.

/// Index of the hovered original item, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverState {
    index: Option<usize>,
}

impl HoverState {
    /// Currently hovered original index
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether any item is hovered
    pub fn is_active(&self) -> bool {
        self.index.is_some()
    }

    /// Apply an enter or leave event for `index`; returns whether the state changed.
    ///
    /// The last enter wins. A leave only clears the state when it matches the
    /// tracked index, so a late leave from the previous item cannot clear a
    /// newer hover.
    pub fn apply(&mut self, index: usize, entering: bool) -> bool {
        let next = if entering {
            Some(index)
        } else if self.index == Some(index) {
            None
        } else {
            return false;
        };

        let changed = next != self.index;
        self.index = next;
        changed
    }

    /// Forget the hovered item
    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Whether a slot mapped to `original` is the hovered one
    pub fn is_hovered(&self, original: usize) -> bool {
        self.index == Some(original)
    }

    /// Whether a slot mapped to `original` is de-emphasized
    pub fn is_dulled(&self, original: usize) -> bool {
        matches!(self.index, Some(hovered) if hovered != original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_leave() {
        let mut hover = HoverState::default();
        assert!(hover.apply(2, true));
        assert_eq!(hover.index(), Some(2));
        assert!(hover.is_hovered(2));
        assert!(hover.is_dulled(0));
        assert!(!hover.is_dulled(2));

        assert!(hover.apply(2, false));
        assert!(!hover.is_active());
        assert!(!hover.is_dulled(0));
    }

    #[test]
    fn test_last_enter_wins() {
        let mut hover = HoverState::default();
        hover.apply(1, true);
        assert!(hover.apply(3, true));
        assert_eq!(hover.index(), Some(3));
        assert!(!hover.apply(3, true));
    }

    #[test]
    fn test_stale_leave_between_adjacent_items() {
        // Pointer crosses from item 1 to item 2, and the leave for 1 is
        // delivered after the enter for 2
        let mut hover = HoverState::default();
        hover.apply(1, true);
        hover.apply(2, true);
        assert!(!hover.apply(1, false));
        assert_eq!(hover.index(), Some(2));
    }

    #[test]
    fn test_reordered_events_can_leave_hover_stuck() {
        // Leave for 2 arrives before its enter: nothing clears the hover
        let mut hover = HoverState::default();
        hover.apply(1, true);
        hover.apply(1, false);
        hover.apply(2, false);
        hover.apply(2, true);
        assert_eq!(hover.index(), Some(2));
    }
}
