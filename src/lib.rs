//! An in-process, in-memory file store with a POSIX-shaped descriptor API.
//!
//! Files and their contents live only in this process's heap: there is no
//! persistence, no directory hierarchy (names form a flat namespace), and no
//! sharing across processes. The store is built from three collaborating
//! pieces, leaves first: a per-file chain of fixed-size [`block`]s, a
//! name-keyed [`registry`] of [`file`]s, and a [`descriptor`] table that
//! dispatches every caller-facing operation. [`store::Store`] assembles the
//! three into one handle; the functions at this crate's top level wrap a
//! single global `Store` behind one lock for callers that want the classic
//! free-function, process-wide API instead of passing a handle around.

mod block;
mod descriptor;
mod error;
mod file;
mod flags;
mod registry;
mod store;

pub use error::ErrorCode;
pub use file::MAX_FILE_SIZE;
pub use flags::OpenFlags;
pub use store::Store;

use lazy_static::lazy_static;
use spin::Mutex;

lazy_static! {
    static ref STORE: Mutex<Store> = Mutex::new(Store::new());
}

/// Opens (optionally creating) the named file and returns a fresh
/// descriptor, or `-1` on failure (see [`errno`]).
///
/// `name` mirrors the nul-terminated C string the original API takes:
/// passing `None` is the Rust spelling of a null name pointer and always
/// fails with [`ErrorCode::NoFile`].
pub fn open(name: Option<&str>, flags: OpenFlags) -> i32 {
    STORE.lock().open(name, flags)
}

/// Closes a descriptor previously returned by [`open`]. Returns `0` on
/// success, `-1` if `fd` does not refer to a live descriptor.
pub fn close(fd: i32) -> i32 {
    STORE.lock().close(fd)
}

/// Reads up to `buf.len()` bytes starting at the descriptor's current
/// position. Returns the number of bytes read, `0` at end of file (not an
/// error), or `-1` on failure.
pub fn read(fd: i32, buf: &mut [u8]) -> isize {
    STORE.lock().read(fd, buf)
}

/// Writes `buf` at the descriptor's current position, extending the file if
/// needed. Returns the number of bytes written (always `buf.len()` on
/// success) or `-1` on failure.
pub fn write(fd: i32, buf: &[u8]) -> isize {
    STORE.lock().write(fd, buf)
}

/// Shrinks or grows the file behind `fd` to exactly `new_size` bytes.
/// Shrinking releases blocks; growing extends the logical length without
/// necessarily touching the newly exposed bytes. Returns `0` or `-1`.
pub fn resize(fd: i32, new_size: usize) -> i32 {
    STORE.lock().resize(fd, new_size)
}

/// Removes the named file from the registry. A file with descriptors still
/// open on it is kept alive, tombstoned, until its last descriptor closes.
/// Returns `0` or `-1`.
pub fn delete(name: Option<&str>) -> i32 {
    STORE.lock().delete(name)
}

/// The error code set by the most recently completed operation on the
/// global store. Every entry point resets this to [`ErrorCode::NoError`]
/// before it does any work, so read it immediately after the call that may
/// have failed.
pub fn errno() -> ErrorCode {
    STORE.lock().errno()
}

/// Closes every live descriptor and deletes every remaining file, resetting
/// the global store to its initial empty state.
pub fn destroy() {
    STORE.lock().destroy();
}
