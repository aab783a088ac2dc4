//! Block ordering with a staged reorder draft.
//!
//! The admin can move blocks up and down several times before saving; those
//! moves are staged locally and only the diff against the server's sequence
//! is kept. A move is always a pairwise swap of the two neighbors'
//! `sort_order` values - never a renumbering of the whole sequence - so every
//! block outside a given swap keeps the sort_order the server assigned it.

use meridian_core::BlockId;

use crate::types::Block;

/// Direction of a staged block move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(format!("invalid direction: {s}")),
        }
    }
}

/// The layout's block sequence: the last known server state plus an optional
/// pending draft produced by local moves.
#[derive(Debug, Clone)]
pub struct LayoutOrdering {
    committed: Vec<Block>,
    pending: Option<Vec<Block>>,
}

impl LayoutOrdering {
    /// Build from the blocks of a freshly fetched bundle.
    #[must_use]
    pub fn new(mut committed: Vec<Block>) -> Self {
        committed.sort_by_key(Block::sort_key);
        Self {
            committed,
            pending: None,
        }
    }

    /// The sequence to display: the draft when one exists, otherwise the
    /// committed sequence. Always sorted ascending by `(sort_order, id)`.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        self.pending.as_deref().unwrap_or(&self.committed)
    }

    /// Whether local moves have not been committed to the server yet.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|draft| draft != &self.committed)
    }

    /// Stage a move of `block_id` one position up or down.
    ///
    /// Swaps the `sort_order` values of the block and its adjacent neighbor in
    /// the current sorted sequence; every other block is untouched. Moving the
    /// first block up, the last block down, or an unknown id is a silent
    /// no-op. Returns whether anything changed.
    pub fn move_block(&mut self, block_id: BlockId, direction: Direction) -> bool {
        let draft = self
            .pending
            .get_or_insert_with(|| self.committed.clone());

        let Some(position) = draft.iter().position(|b| b.id == block_id) else {
            return false;
        };
        let neighbor = match direction {
            Direction::Up => position.checked_sub(1),
            Direction::Down => {
                let next = position + 1;
                (next < draft.len()).then_some(next)
            }
        };
        let Some(neighbor) = neighbor else {
            // already at the edge
            return false;
        };

        if let (Some(a), Some(b)) = (draft.get(position), draft.get(neighbor)) {
            let (ka, kb) = (a.sort_order, b.sort_order);
            if let Some(a) = draft.get_mut(position) {
                a.sort_order = kb;
            }
            if let Some(b) = draft.get_mut(neighbor) {
                b.sort_order = ka;
            }
        }
        draft.sort_by_key(Block::sort_key);
        true
    }

    /// The staged diff: `(block_id, sort_order)` for every block whose
    /// sort_order differs from the committed sequence. Empty when clean.
    #[must_use]
    pub fn overrides(&self) -> Vec<(BlockId, i32)> {
        let Some(draft) = &self.pending else {
            return Vec::new();
        };
        draft
            .iter()
            .filter(|b| {
                self.committed
                    .iter()
                    .find(|c| c.id == b.id)
                    .is_none_or(|c| c.sort_order != b.sort_order)
            })
            .map(|b| (b.id, b.sort_order))
            .collect()
    }

    /// Rebuild the draft from a previously staged diff (e.g. restored from a
    /// cookie). Overrides naming unknown block ids are dropped - the server
    /// sequence may have changed since they were staged.
    pub fn apply_overrides(&mut self, overrides: &[(BlockId, i32)]) {
        if overrides.is_empty() {
            return;
        }
        let mut draft = self.committed.clone();
        for (id, sort_order) in overrides {
            if let Some(block) = draft.iter_mut().find(|b| b.id == *id) {
                block.sort_order = *sort_order;
            }
        }
        draft.sort_by_key(Block::sort_key);
        self.pending = Some(draft);
    }

    /// Discard the draft.
    pub fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockContent, SystemBlockKind};
    use meridian_core::ParagraphId;

    fn block(id: i32, sort_order: i32) -> Block {
        Block {
            id: BlockId::new(id),
            sort_order,
            content: if id % 2 == 0 {
                BlockContent::System(SystemBlockKind::Basic)
            } else {
                BlockContent::Paragraph(ParagraphId::new(id * 10))
            },
        }
    }

    fn ids(ordering: &LayoutOrdering) -> Vec<i32> {
        ordering.blocks().iter().map(|b| b.id.as_i32()).collect()
    }

    #[test]
    fn test_total_deterministic_order() {
        // equal sort_order values are disambiguated by id
        let ordering = LayoutOrdering::new(vec![block(5, 1), block(2, 1), block(9, 0)]);
        assert_eq!(ids(&ordering), vec![9, 2, 5]);
        assert!(!ordering.is_dirty());
    }

    #[test]
    fn test_move_swaps_only_the_pair() {
        let mut ordering = LayoutOrdering::new(vec![
            block(1, 10),
            block(2, 20),
            block(3, 30),
            block(4, 40),
        ]);
        assert!(ordering.move_block(BlockId::new(3), Direction::Up));
        assert_eq!(ids(&ordering), vec![1, 3, 2, 4]);

        // the two swapped blocks exchanged sort_order values...
        let orders: Vec<(i32, i32)> = ordering
            .blocks()
            .iter()
            .map(|b| (b.id.as_i32(), b.sort_order))
            .collect();
        assert_eq!(orders, vec![(1, 10), (3, 20), (2, 30), (4, 40)]);
        assert!(ordering.is_dirty());
    }

    #[test]
    fn test_edge_moves_are_noops() {
        let mut ordering = LayoutOrdering::new(vec![block(1, 0), block(2, 1)]);
        assert!(!ordering.move_block(BlockId::new(1), Direction::Up));
        assert!(!ordering.move_block(BlockId::new(2), Direction::Down));
        assert!(!ordering.move_block(BlockId::new(99), Direction::Down));
        assert_eq!(ids(&ordering), vec![1, 2]);
        assert!(!ordering.is_dirty());
    }

    #[test]
    fn test_move_down_then_up_restores_clean_state() {
        let mut ordering = LayoutOrdering::new(vec![block(1, 0), block(2, 1), block(3, 2)]);
        assert!(ordering.move_block(BlockId::new(2), Direction::Down));
        assert!(ordering.is_dirty());
        assert!(ordering.move_block(BlockId::new(2), Direction::Up));
        // back to the committed order: nothing left to save
        assert_eq!(ids(&ordering), vec![1, 2, 3]);
        assert!(!ordering.is_dirty());
        assert!(ordering.overrides().is_empty());
    }

    #[test]
    fn test_overrides_round_trip() {
        let blocks = vec![block(1, 0), block(2, 1), block(3, 2)];
        let mut staged = LayoutOrdering::new(blocks.clone());
        staged.move_block(BlockId::new(3), Direction::Up);
        let overrides = staged.overrides();
        assert_eq!(overrides.len(), 2);

        // a fresh ordering (new request) restored from the cookie diff
        let mut restored = LayoutOrdering::new(blocks);
        restored.apply_overrides(&overrides);
        assert_eq!(ids(&restored), ids(&staged));
        assert!(restored.is_dirty());
    }

    #[test]
    fn test_stale_overrides_for_removed_blocks_dropped() {
        let mut ordering = LayoutOrdering::new(vec![block(1, 0), block(2, 1)]);
        ordering.apply_overrides(&[(BlockId::new(77), 5)]);
        assert_eq!(ids(&ordering), vec![1, 2]);
        assert!(!ordering.is_dirty());
    }

    #[test]
    fn test_reset_discards_draft() {
        let mut ordering = LayoutOrdering::new(vec![block(1, 0), block(2, 1)]);
        ordering.move_block(BlockId::new(2), Direction::Up);
        assert!(ordering.is_dirty());
        ordering.reset();
        assert!(!ordering.is_dirty());
        assert_eq!(ids(&ordering), vec![1, 2]);
    }

    #[test]
    fn test_swap_with_equal_sort_orders_still_moves() {
        // ties are legal; the swap exchanges equal values, so the id
        // tie-break decides and the pair keeps its relative order
        let mut ordering = LayoutOrdering::new(vec![block(1, 5), block(2, 5), block(3, 9)]);
        assert_eq!(ids(&ordering), vec![1, 2, 3]);
        assert!(ordering.move_block(BlockId::new(3), Direction::Up));
        assert_eq!(ids(&ordering), vec![1, 3, 2]);
    }
}
