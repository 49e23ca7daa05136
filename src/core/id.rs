use std::cell::Cell;
use std::rc::Rc;

use super::BlockId;

/// Monotonic block id source shared by every editor of one editing session.
///
/// Clones share the same counter, so ids stay unique across the seven days
/// of a weekly template. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct BlockIdAllocator {
    last: Rc<Cell<u64>>,
}

impl BlockIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> BlockId {
        let next = self.last.get() + 1;
        self.last.set(next);
        BlockId::from_raw(next)
    }

    #[must_use]
    pub fn issued(&self) -> u64 {
        self.last.get()
    }

    /// Moves the counter past an id minted elsewhere so it is never handed out again.
    pub fn reserve(&self, id: BlockId) {
        if id.raw() > self.last.get() {
            self.last.set(id.raw());
        }
    }
}
