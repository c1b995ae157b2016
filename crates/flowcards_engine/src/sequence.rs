// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tripled item sequence for seamless wraparound.

use crate::config::{CarouselConfig, Geometry};

/// Number of times the item list is repeated in the rendered strip
pub const COPIES: usize = 3;

/// Stable identity of one rendered slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// Index into the original item list
    pub original: usize,
    /// Which repetition this slot belongs to (`0..COPIES`)
    pub copy: usize,
}

/// The item list concatenated [`COPIES`] times.
///
/// Items are opaque: the sequence only clones and hands them back.
#[derive(Debug, Clone)]
pub struct ItemSequence<T> {
    slots: Vec<T>,
    count: usize,
}

impl<T> Default for ItemSequence<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            count: 0,
        }
    }
}

impl<T: Clone> ItemSequence<T> {
    /// Build the tripled sequence from `items`
    pub fn new(items: &[T]) -> Self {
        let mut slots = Vec::with_capacity(items.len() * COPIES);
        for _ in 0..COPIES {
            slots.extend_from_slice(items);
        }

        Self {
            slots,
            count: items.len(),
        }
    }
}

impl<T> ItemSequence<T> {
    /// Number of rendered slots, always `COPIES * distinct_count()`
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the sequence has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of distinct items
    pub fn distinct_count(&self) -> usize {
        self.count
    }

    /// Original index of a rendered position.
    ///
    /// Returns `None` for an empty sequence or an out-of-range position.
    pub fn original_index(&self, position: usize) -> Option<usize> {
        (position < self.slots.len()).then(|| position % self.count)
    }

    /// Stable key of a rendered position
    pub fn key(&self, position: usize) -> Option<SlotKey> {
        (position < self.slots.len()).then(|| SlotKey {
            original: position % self.count,
            copy: position / self.count,
        })
    }

    /// Get the item at a rendered position
    pub fn get(&self, position: usize) -> Option<&T> {
        self.slots.get(position)
    }

    /// Iterate `(key, item)` pairs in render order
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> {
        let count = self.count;
        self.slots.iter().enumerate().map(move |(position, item)| {
            (
                SlotKey {
                    original: position % count,
                    copy: position / count,
                },
                item,
            )
        })
    }
}

/// Build the render sequence and the geometry it needs.
///
/// Pure; an empty `items` yields an empty sequence and a zero total width.
pub fn build_sequence<T: Clone>(items: &[T], config: &CarouselConfig) -> (ItemSequence<T>, Geometry) {
    (ItemSequence::new(items), Geometry::new(config, items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tripled_length_and_mapping() {
        for n in 1..=7 {
            let items: Vec<usize> = (0..n).collect();
            let (sequence, geometry) = build_sequence(&items, &CarouselConfig::default());

            assert_eq!(sequence.len(), 3 * n);
            assert_eq!(geometry.count, n);
            for position in 0..sequence.len() {
                assert_eq!(sequence.original_index(position), Some(position % n));
                assert_eq!(sequence.get(position), Some(&(position % n)));
            }
        }
    }

    #[test]
    fn test_empty() {
        let (sequence, geometry) = build_sequence::<&str>(&[], &CarouselConfig::default());
        assert!(sequence.is_empty());
        assert_eq!(sequence.original_index(0), None);
        assert_eq!(sequence.key(0), None);
        assert_eq!(geometry.total_width, 0.0);
        assert_eq!(sequence.iter().count(), 0);
    }

    #[test]
    fn test_keys() {
        let sequence = ItemSequence::new(&["a", "b"]);
        let keys: Vec<_> = sequence.iter().map(|(key, _)| (key.original, key.copy)).collect();
        assert_eq!(keys, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
        assert_eq!(sequence.key(6), None);
    }
}
