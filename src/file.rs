use crate::block::{BlockId, BlockPool, BLOCK_SIZE};
use crate::descriptor::Descriptor;
use crate::error::ErrorCode;

/// Upper bound on a single file's logical length: 100 MiB.
pub const MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

/// A named file: a chain of blocks plus the bookkeeping the store needs to
/// keep that chain consistent across descriptors.
///
/// A file with `length == 0` always has `head == tail == None`. The chain's
/// total occupied bytes always equal `length`.
pub(crate) struct File {
    name: String,
    pool: BlockPool,
    head: Option<BlockId>,
    tail: Option<BlockId>,
    length: usize,
}

impl File {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            pool: BlockPool::new(),
            head: None,
            tail: None,
            length: 0,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn length(&self) -> usize {
        self.length
    }

    /// The block a freshly opened descriptor should start from: the head of
    /// the chain, or `None` for an empty file. Every new descriptor begins
    /// at `file_pos == 0`, so this is always correct without walking.
    pub(crate) fn head_for_new_descriptor(&self) -> Option<BlockId> {
        self.head
    }

    /// Walks from the head, advancing one block per `BLOCK_SIZE` bytes,
    /// until the block containing byte `pos` is found. `pos` must not
    /// exceed `length`.
    fn locate(&self, pos: usize) -> Option<BlockId> {
        let mut id = self.head?;
        let mut offset = 0usize;
        loop {
            if offset + BLOCK_SIZE >= pos || self.pool.get(id).next().is_none() {
                return Some(id);
            }
            offset += BLOCK_SIZE;
            id = self.pool.get(id).next().unwrap();
        }
    }

    /// Clamps a descriptor whose position has been left stale by another
    /// descriptor's shrink-resize, and re-anchors its current block. Must
    /// run before any byte is touched by `read` or `write`.
    fn reanchor(&self, desc: &mut Descriptor) {
        if desc.file_pos() > self.length {
            desc.set_file_pos(self.length);
            desc.set_current_block(self.locate(self.length));
        }
    }

    pub(crate) fn write(&mut self, desc: &mut Descriptor, buf: &[u8]) -> Result<usize, ErrorCode> {
        if self.head.is_none() {
            let id = self.pool.allocate(None, None).ok_or(ErrorCode::NoMemory)?;
            self.head = Some(id);
            self.tail = Some(id);
            desc.set_current_block(Some(id));
        }
        self.reanchor(desc);

        if desc.file_pos().saturating_add(buf.len()) > MAX_FILE_SIZE {
            return Err(ErrorCode::NoMemory);
        }

        let mut block_id = desc
            .current_block()
            .expect("current block is set once the file has a head");
        let mut bo = in_block_offset(desc.file_pos());

        let mut written = 0usize;
        let mut remaining = buf.len();
        while remaining > 0 {
            let space = BLOCK_SIZE - bo;
            let copy_size = remaining.min(space);

            let block = self.pool.get_mut(block_id);
            block.bytes_mut()[bo..bo + copy_size].copy_from_slice(&buf[written..written + copy_size]);
            let new_occupied = block.occupied().max(bo + copy_size);
            block.set_occupied(new_occupied);

            written += copy_size;
            remaining -= copy_size;
            bo += copy_size;
            desc.advance(copy_size);
            self.length = self.length.max(desc.file_pos());

            if bo == BLOCK_SIZE && remaining > 0 {
                let next = self.pool.get(block_id).next();
                let next = match next {
                    Some(n) => n,
                    None => {
                        let new_id = self.pool.allocate(Some(block_id), None).ok_or(ErrorCode::NoMemory)?;
                        self.pool.get_mut(block_id).set_next(Some(new_id));
                        self.tail = Some(new_id);
                        new_id
                    }
                };
                block_id = next;
                bo = 0;
            }
        }
        desc.set_current_block(Some(block_id));
        Ok(written)
    }

    pub(crate) fn read(&self, desc: &mut Descriptor, buf: &mut [u8]) -> usize {
        if self.head.is_none() {
            return 0;
        }
        self.reanchor(desc);

        let mut block_id = desc.current_block().or(self.head);
        let mut bo = desc.file_pos() % BLOCK_SIZE;
        let mut remaining = buf.len().min(self.length - desc.file_pos());

        let mut read = 0usize;
        while remaining > 0 {
            let Some(id) = block_id else { break };
            let block = self.pool.get(id);
            let available = block.occupied() - bo;
            let copy_size = remaining.min(available);

            buf[read..read + copy_size].copy_from_slice(&block.bytes()[bo..bo + copy_size]);

            read += copy_size;
            remaining -= copy_size;
            bo += copy_size;
            desc.advance(copy_size);

            if bo == block.occupied() && remaining > 0 {
                block_id = block.next();
                bo = 0;
            }
        }
        desc.set_current_block(block_id);
        read
    }

    pub(crate) fn resize(&mut self, new_size: usize) -> Result<(), ErrorCode> {
        if new_size > MAX_FILE_SIZE {
            return Err(ErrorCode::NoMemory);
        }
        if new_size < self.length {
            self.shrink_to(new_size);
        } else if new_size > self.length {
            self.grow_to(new_size)?;
        }
        Ok(())
    }

    fn shrink_to(&mut self, new_size: usize) {
        let mut to_release = self.length - new_size;
        while to_release > 0 {
            let tail_id = self.tail.expect("length > 0 implies a tail block exists");
            let occupied = self.pool.get(tail_id).occupied();
            let reduce = to_release.min(occupied);
            let remaining_occupied = occupied - reduce;
            self.pool.get_mut(tail_id).set_occupied(remaining_occupied);
            to_release -= reduce;

            if remaining_occupied == 0 {
                let prev = self.pool.get(tail_id).prev();
                self.pool.free(tail_id);
                if let Some(p) = prev {
                    self.pool.get_mut(p).set_next(None);
                }
                self.tail = prev;
                if self.tail.is_none() {
                    self.head = None;
                }
            }
        }
        self.length = new_size;
    }

    fn grow_to(&mut self, new_size: usize) -> Result<(), ErrorCode> {
        if self.tail.is_none() {
            let id = self.pool.allocate(None, None).ok_or(ErrorCode::NoMemory)?;
            self.head = Some(id);
            self.tail = Some(id);
        }

        let mut to_add = new_size - self.length;
        while to_add > 0 {
            let tail_id = self.tail.unwrap();
            let occupied = self.pool.get(tail_id).occupied();
            let space = BLOCK_SIZE - occupied;
            let fill = to_add.min(space);
            self.pool.get_mut(tail_id).set_occupied(occupied + fill);
            to_add -= fill;

            if to_add > 0 {
                let new_id = self.pool.allocate(Some(tail_id), None).ok_or(ErrorCode::NoMemory)?;
                self.pool.get_mut(tail_id).set_next(Some(new_id));
                self.tail = Some(new_id);
            }
        }
        self.length = new_size;
        Ok(())
    }
}

/// `file_pos % BLOCK_SIZE`, except that a position sitting exactly on a
/// block boundary past the start of the file means "append to the block
/// that just filled up", not "start of a not-yet-allocated next block".
fn in_block_offset(file_pos: usize) -> usize {
    if file_pos > 0 && file_pos % BLOCK_SIZE == 0 {
        BLOCK_SIZE
    } else {
        file_pos % BLOCK_SIZE
    }
}
