//! Identifiers for leaves owned by a player.

use serde::{Deserialize, Serialize};

/// Index of a leaf in a player's arena. Only meaningful for the player that
/// issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeafId(pub u32);

impl LeafId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Monotonic allocator for `LeafId`.
#[derive(Default, Debug)]
pub struct LeafIdAllocator {
    next: u32,
}

impl LeafIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> LeafId {
        let id = LeafId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
