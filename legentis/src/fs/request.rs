//! Single enumeration operations.
//!
//! Each directory operation is built as a fresh [`DirRequest`] value
//! owning everything the operation needs, so it can run inline on the
//! caller or be shipped to the blocking pool as one unit of work.
//! Both paths funnel through the same [`DirRequest::execute`].

use super::entry::DirEntry;
use super::handle::DirHandle;
use super::read_dir::DirFlags;

use std::ffi::CString;
use std::io;

/// One directory enumeration operation.
pub(crate) enum DirRequest {
    /// Acquire the stream for `path`.
    Open { path: CString, flags: DirFlags },

    /// Produce the next entry from the stream.
    Read { handle: DirHandle },

    /// Release the stream.
    Close { handle: DirHandle },
}

/// What a [`DirRequest`] produced.
pub(crate) enum DirOutcome {
    /// The live handle, or the open error that left nothing open.
    Open(io::Result<DirHandle>),

    /// The handle comes back regardless of the read's result, so a
    /// failed read still leaves the stream closeable.
    Read {
        handle: DirHandle,
        entry: io::Result<Option<DirEntry>>,
    },

    /// The stream was released.
    Close,
}

impl DirRequest {
    /// Runs the operation to completion on the calling thread.
    pub(crate) fn execute(self) -> DirOutcome {
        match self {
            DirRequest::Open { path, flags } => DirOutcome::Open(DirHandle::open(&path, flags)),
            DirRequest::Read { mut handle } => {
                let entry = handle.read_one();
                DirOutcome::Read { handle, entry }
            }
            DirRequest::Close { handle } => {
                handle.close();
                DirOutcome::Close
            }
        }
    }
}
