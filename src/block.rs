/// Fixed size of every block's backing buffer, in bytes.
pub const BLOCK_SIZE: usize = 512;

/// Index of a [`Block`] within its owning file's [`BlockPool`].
///
/// Blocks never outlive the file they belong to and are never shared
/// between files, so a plain arena index (rather than a pointer or an
/// `Rc`) is enough to express the doubly-linked chain described by the
/// storage model.
pub(crate) type BlockId = usize;

/// One fixed-size chunk of a file's contents.
///
/// Every block except the tail has `occupied == BLOCK_SIZE`; the tail's
/// `occupied` equals `file_length % BLOCK_SIZE` when that is nonzero, or
/// `BLOCK_SIZE` for a fully-filled tail.
pub(crate) struct Block {
    data: Box<[u8; BLOCK_SIZE]>,
    occupied: usize,
    prev: Option<BlockId>,
    next: Option<BlockId>,
}

impl Block {
    fn new(prev: Option<BlockId>, next: Option<BlockId>) -> Self {
        Self {
            data: Box::new([0u8; BLOCK_SIZE]),
            occupied: 0,
            prev,
            next,
        }
    }

    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    pub(crate) fn next(&self) -> Option<BlockId> {
        self.next
    }

    pub(crate) fn prev(&self) -> Option<BlockId> {
        self.prev
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.data[..]
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data[..]
    }

    pub(crate) fn set_occupied(&mut self, occupied: usize) {
        debug_assert!(occupied <= BLOCK_SIZE);
        self.occupied = occupied;
    }

    pub(crate) fn set_next(&mut self, next: Option<BlockId>) {
        self.next = next;
    }
}

/// A per-file pool of blocks, indexed by [`BlockId`] and backed by a free
/// list so that slots freed by a shrink-resize are reused by the next
/// grow-resize or write, instead of leaking indices.
#[derive(Default)]
pub(crate) struct BlockPool {
    slots: Vec<Option<Block>>,
    free: Vec<BlockId>,
}

impl BlockPool {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Allocates a new block chained to the given neighbors.
    ///
    /// Returns `None` if the backing storage cannot be grown, which callers
    /// surface to the caller as `NoMemory`.
    pub(crate) fn allocate(&mut self, prev: Option<BlockId>, next: Option<BlockId>) -> Option<BlockId> {
        let block = Block::new(prev, next);
        if let Some(id) = self.free.pop() {
            self.slots[id] = Some(block);
            return Some(id);
        }
        if self.slots.try_reserve(1).is_err() {
            return None;
        }
        self.slots.push(Some(block));
        Some(self.slots.len() - 1)
    }

    pub(crate) fn free(&mut self, id: BlockId) {
        self.slots[id] = None;
        self.free.push(id);
    }

    pub(crate) fn get(&self, id: BlockId) -> &Block {
        self.slots[id].as_ref().expect("dangling block id")
    }

    pub(crate) fn get_mut(&mut self, id: BlockId) -> &mut Block {
        self.slots[id].as_mut().expect("dangling block id")
    }
}
