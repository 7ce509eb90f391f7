use crate::descriptor::FileHandle;
use crate::error::ErrorCode;
use crate::file::File;
use spin::Mutex;
use std::sync::Arc;

/// The flat, name-keyed collection of live files.
///
/// `find` is a linear scan by name equality, same as the original name
/// lookup this store is modeled on -- the registry is expected to hold at
/// most a few thousand entries, so there is no bitmap or hash index to
/// keep consistent with the block chains.
#[derive(Default)]
pub(crate) struct Registry {
    files: Vec<(String, FileHandle)>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub(crate) fn find(&self, name: &str) -> Option<FileHandle> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| Arc::clone(f))
    }

    /// Allocates a new, empty file and prepends it to the registry.
    pub(crate) fn insert(&mut self, name: &str) -> Result<FileHandle, ErrorCode> {
        if self.files.try_reserve(1).is_err() {
            return Err(ErrorCode::NoMemory);
        }
        let handle = Arc::new(Mutex::new(File::new(name.to_string())));
        self.files.insert(0, (name.to_string(), Arc::clone(&handle)));
        Ok(handle)
    }

    /// Unlinks the named file from the registry. Does not free the file or
    /// its blocks -- freeing happens when the last `Arc` to it is dropped,
    /// whether that is this call or the close of its last descriptor.
    pub(crate) fn detach(&mut self, name: &str) -> Option<FileHandle> {
        let pos = self.files.iter().position(|(n, _)| n == name)?;
        Some(self.files.remove(pos).1)
    }
}
