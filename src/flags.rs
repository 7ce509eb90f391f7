use bitflags::bitflags;

bitflags! {
    /// Bit flags accepted by [`open`](crate::open).
    ///
    /// `CREATE` is composable with any mode bit. Absent `READ_ONLY` and
    /// `WRITE_ONLY` implies read-write, which is also exposed as an explicit
    /// bit so callers can spell out the default.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// Create the file if it does not already exist.
        const CREATE = 0b0001;
        /// Open for reading only; `write` on the returned descriptor fails.
        const READ_ONLY = 0b0010;
        /// Open for writing only; `read` on the returned descriptor fails.
        const WRITE_ONLY = 0b0100;
        /// Open for both reading and writing. This is the default mode when
        /// neither `READ_ONLY` nor `WRITE_ONLY` is set.
        const READ_WRITE = 0b1000;
    }
}

/// The access mode a descriptor was opened with, resolved once at `open`
/// time from the raw [`OpenFlags`] bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessMode {
    pub(crate) fn from_flags(flags: OpenFlags) -> Self {
        if flags.contains(OpenFlags::READ_ONLY) {
            AccessMode::ReadOnly
        } else if flags.contains(OpenFlags::WRITE_ONLY) {
            AccessMode::WriteOnly
        } else {
            AccessMode::ReadWrite
        }
    }

    pub(crate) fn can_read(self) -> bool {
        !matches!(self, AccessMode::WriteOnly)
    }

    pub(crate) fn can_write(self) -> bool {
        !matches!(self, AccessMode::ReadOnly)
    }
}
