use core::fmt::{self, Display, Formatter};

/// Error codes reported through the store's [`errno`](crate::errno) channel.
///
/// Every entry point resets this to [`ErrorCode::NoError`] before it does any
/// work, so a caller must read it immediately after the call that may have
/// failed -- the next call clobbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The previous operation succeeded.
    NoError,
    /// `fd` was out of range, its slot was empty, or a name lookup found
    /// nothing (including a null/absent name).
    NoFile,
    /// An allocation failed, or a size bound (`MAX_FILE_SIZE`) was exceeded.
    NoMemory,
    /// The descriptor's access mode forbids the attempted operation.
    NoPermission,
    /// Reserved for optional operations a build did not include.
    NotImplemented,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorCode::NoError => "no error",
            ErrorCode::NoFile => "no such file or descriptor",
            ErrorCode::NoMemory => "out of memory or size bound exceeded",
            ErrorCode::NoPermission => "operation not permitted by descriptor mode",
            ErrorCode::NotImplemented => "operation not implemented",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ErrorCode {}
