use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::error::ErrorCode;
use crate::flags::{AccessMode, OpenFlags};
use crate::registry::Registry;

/// An in-process, in-memory file store.
///
/// `Store` owns the file registry and the descriptor table and dispatches
/// every operation through the descriptor table, exactly as the storage
/// model's data flow describes: descriptor lookup and mode check, then
/// file, then block. A `Store` is plain, owned state with no internal
/// locking; callers that want the process-wide C-shaped API in
/// [`crate`]'s top level get that for free via a single global instance
/// guarded by one lock, but nothing stops an embedder from keeping several
/// independent stores side by side.
pub struct Store {
    registry: Registry,
    descriptors: Vec<Option<Descriptor>>,
    free_slots: Vec<usize>,
    last_error: ErrorCode,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            descriptors: Vec::new(),
            free_slots: Vec::new(),
            last_error: ErrorCode::NoError,
        }
    }

    fn fail(&mut self, code: ErrorCode) -> i32 {
        self.last_error = code;
        -1
    }

    /// Returns the error code set by the most recently completed
    /// operation. Reset to `NoError` at the start of every operation, so
    /// read it before the next call.
    pub fn errno(&self) -> ErrorCode {
        self.last_error
    }

    pub fn open(&mut self, name: Option<&str>, flags: OpenFlags) -> i32 {
        self.last_error = ErrorCode::NoError;

        let Some(name) = name else {
            return self.fail(ErrorCode::NoFile);
        };

        let handle = match self.registry.find(name) {
            Some(handle) => handle,
            None if flags.contains(OpenFlags::CREATE) => match self.registry.insert(name) {
                Ok(handle) => handle,
                Err(code) => return self.fail(code),
            },
            None => return self.fail(ErrorCode::NoFile),
        };

        let current_block = handle.lock().head_for_new_descriptor();
        let mode = AccessMode::from_flags(flags);
        let descriptor = Descriptor::new(handle, current_block, mode);

        let fd = if let Some(slot) = self.free_slots.pop() {
            self.descriptors[slot] = Some(descriptor);
            slot
        } else {
            if self.descriptors.try_reserve(1).is_err() {
                return self.fail(ErrorCode::NoMemory);
            }
            self.descriptors.push(Some(descriptor));
            self.descriptors.len() - 1
        };

        log::trace!("open({name:?}, {flags:?}) -> fd {fd}");
        fd as i32
    }

    fn descriptor_mut(&mut self, fd: i32) -> Result<&mut Descriptor, ErrorCode> {
        if fd < 0 {
            return Err(ErrorCode::NoFile);
        }
        self.descriptors
            .get_mut(fd as usize)
            .and_then(|slot| slot.as_mut())
            .ok_or(ErrorCode::NoFile)
    }

    pub fn write(&mut self, fd: i32, buf: &[u8]) -> isize {
        self.last_error = ErrorCode::NoError;

        let desc = match self.descriptor_mut(fd) {
            Ok(desc) => desc,
            Err(code) => return self.fail(code) as isize,
        };
        if !desc.mode().can_write() {
            return self.fail(ErrorCode::NoPermission) as isize;
        }

        let file = Arc::clone(desc.file());
        let mut file = file.lock();
        match file.write(desc, buf) {
            Ok(written) => written as isize,
            Err(code) => self.fail(code) as isize,
        }
    }

    pub fn read(&mut self, fd: i32, buf: &mut [u8]) -> isize {
        self.last_error = ErrorCode::NoError;

        let desc = match self.descriptor_mut(fd) {
            Ok(desc) => desc,
            Err(code) => return self.fail(code) as isize,
        };
        if !desc.mode().can_read() {
            return self.fail(ErrorCode::NoPermission) as isize;
        }

        let file = Arc::clone(desc.file());
        let file = file.lock();
        file.read(desc, buf) as isize
    }

    pub fn resize(&mut self, fd: i32, new_size: usize) -> i32 {
        self.last_error = ErrorCode::NoError;

        let desc = match self.descriptor_mut(fd) {
            Ok(desc) => desc,
            Err(code) => return self.fail(code),
        };
        if !desc.mode().can_write() {
            return self.fail(ErrorCode::NoPermission);
        }

        let file = Arc::clone(desc.file());
        let mut file = file.lock();
        match file.resize(new_size) {
            Ok(()) => 0,
            Err(code) => self.fail(code),
        }
    }

    pub fn close(&mut self, fd: i32) -> i32 {
        self.last_error = ErrorCode::NoError;

        if fd < 0 {
            return self.fail(ErrorCode::NoFile);
        }
        let idx = fd as usize;
        match self.descriptors.get_mut(idx) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.free_slots.push(idx);
                log::trace!("close(fd {fd})");
                0
            }
            _ => self.fail(ErrorCode::NoFile),
        }
    }

    pub fn delete(&mut self, name: Option<&str>) -> i32 {
        self.last_error = ErrorCode::NoError;

        let Some(name) = name else {
            return self.fail(ErrorCode::NoFile);
        };
        match self.registry.detach(name) {
            Some(_handle) => {
                // Dropping `_handle` here releases the registry's own
                // reference; the file itself is freed once every
                // descriptor still open on it closes too.
                log::trace!("delete({name:?})");
                0
            }
            None => self.fail(ErrorCode::NoFile),
        }
    }

    /// Closes every live descriptor and detaches every remaining file. With
    /// no descriptors left referencing them, files are freed immediately as
    /// their last `Arc` handle is dropped.
    pub fn destroy(&mut self) {
        self.descriptors.clear();
        self.free_slots.clear();
        self.registry = Registry::new();
        self.last_error = ErrorCode::NoError;
        log::trace!("destroy()");
    }
}
