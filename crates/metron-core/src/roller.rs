//! Cyclic cursors over immutable lists

use serde::{Deserialize, Serialize};

/// A stateful cyclic cursor over a non-empty list.
///
/// `next` returns the element under the cursor and advances it, wrapping
/// after the last element. The position is retained across calls until
/// `rewind` puts it back on the first element. Non-emptiness is enforced at
/// construction, so `next` itself can never fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roller<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> Roller<T> {
    /// Roller over `items`. Returns `None` when `items` is empty.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { items, cursor: 0 })
    }

    /// Roller over a single fallback element.
    pub fn single(item: T) -> Self {
        Self {
            items: vec![item],
            cursor: 0,
        }
    }

    /// Return the element under the cursor and advance, wrapping at the end.
    pub fn next(&mut self) -> &T {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.items.len();
        &self.items[index]
    }

    /// Put the cursor back on the first element.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_and_wraps() {
        let mut roller = Roller::new(vec![1, 2, 3]).unwrap();
        assert_eq!(*roller.next(), 1);
        assert_eq!(*roller.next(), 2);
        assert_eq!(*roller.next(), 3);
        assert_eq!(*roller.next(), 1);
    }

    #[test]
    fn rewind_restarts_the_cycle() {
        let mut roller = Roller::new(vec!["a", "b"]).unwrap();
        roller.next();
        roller.rewind();
        assert_eq!(*roller.next(), "a");
    }

    #[test]
    fn single_repeats_forever() {
        let mut roller = Roller::single(7);
        assert_eq!(*roller.next(), 7);
        assert_eq!(*roller.next(), 7);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(Roller::<u8>::new(vec![]).is_none());
    }
}
