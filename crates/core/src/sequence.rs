use crate::model::{Subchapter, SubchapterId};

//
// ─── POSITION ──────────────────────────────────────────────────────────────────
//

/// Where a subchapter sits inside its module's flat sequence.
///
/// `next` is the successor to navigate to after advancing; `None` means the
/// module is complete and the caller should return to the module overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<'a> {
    pub index: usize,
    pub next: Option<&'a Subchapter>,
}

//
// ─── FLAT SEQUENCE ─────────────────────────────────────────────────────────────
//

/// Module-wide ordered list of all subchapters across all chapters.
///
/// Ordering is `(order_sequence, id)` ascending, a total order: ids are unique,
/// so two subchapters never compare equal. The sequence is rebuilt from fresh
/// fetches on every page load and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSequence {
    items: Vec<Subchapter>,
}

impl FlatSequence {
    /// Builds the sequence, sorting into canonical order.
    ///
    /// The result depends only on the sort key, never on the order the
    /// per-chapter fetches completed in.
    #[must_use]
    pub fn new(mut items: Vec<Subchapter>) -> Self {
        items.sort_by_key(Subchapter::sort_key);
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// An empty sequence is a valid terminal state for a module with no
    /// content, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Subchapter> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subchapter> {
        self.items.iter()
    }

    /// Locates a subchapter and its successor within the sequence.
    ///
    /// Returns `None` when the id is not part of this module's sequence;
    /// callers must treat that as an error condition rather than guess a
    /// position.
    #[must_use]
    pub fn locate(&self, id: SubchapterId) -> Option<Position<'_>> {
        let index = self.items.iter().position(|s| s.id() == id)?;
        Some(Position {
            index,
            next: self.items.get(index + 1),
        })
    }
}

impl<'a> IntoIterator for &'a FlatSequence {
    type Item = &'a Subchapter;
    type IntoIter = std::slice::Iter<'a, Subchapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChapterId;

    fn sub(id: u64, chapter: u64, order: i64) -> Subchapter {
        Subchapter::new(
            SubchapterId::new(id),
            ChapterId::new(chapter),
            format!("Sub {id}"),
            order,
            "<p>body</p>",
            None,
        )
    }

    fn ids(seq: &FlatSequence) -> Vec<u64> {
        seq.iter().map(|s| s.id().value()).collect()
    }

    #[test]
    fn orders_by_order_sequence_then_id() {
        let seq = FlatSequence::new(vec![sub(3, 1, 2), sub(1, 1, 1), sub(2, 2, 1)]);
        assert_eq!(ids(&seq), vec![1, 2, 3]);
    }

    #[test]
    fn id_breaks_ties_when_order_collides() {
        let seq = FlatSequence::new(vec![sub(9, 1, 0), sub(4, 2, 0), sub(7, 1, 0)]);
        assert_eq!(ids(&seq), vec![4, 7, 9]);
    }

    #[test]
    fn order_is_independent_of_input_order() {
        let a = FlatSequence::new(vec![sub(1, 1, 5), sub(2, 1, 3), sub(3, 2, 4)]);
        let b = FlatSequence::new(vec![sub(3, 2, 4), sub(1, 1, 5), sub(2, 1, 3)]);
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(ids(&a), vec![2, 3, 1]);
    }

    #[test]
    fn locate_finds_index_and_successor() {
        let seq = FlatSequence::new(vec![sub(1, 1, 1), sub(2, 1, 2), sub(3, 1, 3)]);
        let pos = seq.locate(SubchapterId::new(2)).unwrap();
        assert_eq!(pos.index, 1);
        assert_eq!(pos.next.unwrap().id(), SubchapterId::new(3));
    }

    #[test]
    fn locate_on_last_element_has_no_successor() {
        let seq = FlatSequence::new(vec![sub(1, 1, 1), sub(2, 1, 2)]);
        let pos = seq.locate(SubchapterId::new(2)).unwrap();
        assert_eq!(pos.index, 1);
        assert!(pos.next.is_none());
    }

    #[test]
    fn locate_misses_for_foreign_id() {
        let seq = FlatSequence::new(vec![sub(1, 1, 1)]);
        assert!(seq.locate(SubchapterId::new(99)).is_none());
    }

    #[test]
    fn empty_sequence_is_valid() {
        let seq = FlatSequence::new(Vec::new());
        assert!(seq.is_empty());
        assert!(seq.locate(SubchapterId::new(1)).is_none());
    }
}
