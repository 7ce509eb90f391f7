use std::sync::Arc;

use spin::Mutex;

use crate::block::BlockId;
use crate::file::File;
use crate::flags::AccessMode;

pub(crate) type FileHandle = Arc<Mutex<File>>;

/// An independent cursor into a file: its own position, its own current
/// block, and the access mode it was opened with.
///
/// A descriptor does not own its file -- it shares a [`FileHandle`] with
/// the registry entry (if any) and every other descriptor open on the same
/// file. The file is only dropped once every handle to it, registry
/// included, has gone away, which is exactly the refcount/tombstone
/// lifecycle the storage model calls for.
pub(crate) struct Descriptor {
    file: FileHandle,
    current_block: Option<BlockId>,
    file_pos: usize,
    mode: AccessMode,
}

impl Descriptor {
    pub(crate) fn new(file: FileHandle, current_block: Option<BlockId>, mode: AccessMode) -> Self {
        Self {
            file,
            current_block,
            file_pos: 0,
            mode,
        }
    }

    pub(crate) fn file(&self) -> &FileHandle {
        &self.file
    }

    pub(crate) fn mode(&self) -> AccessMode {
        self.mode
    }

    pub(crate) fn file_pos(&self) -> usize {
        self.file_pos
    }

    pub(crate) fn set_file_pos(&mut self, pos: usize) {
        self.file_pos = pos;
    }

    pub(crate) fn advance(&mut self, by: usize) {
        self.file_pos += by;
    }

    pub(crate) fn current_block(&self) -> Option<BlockId> {
        self.current_block
    }

    pub(crate) fn set_current_block(&mut self, block: Option<BlockId>) {
        self.current_block = block;
    }
}
