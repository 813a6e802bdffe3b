//! Directory enumeration surface.
//!
//! [`ReadDir`] is the caller-facing side of enumeration: open a
//! directory, pull entries one at a time, close. Every operation
//! exists in two disciplines over the same machinery: an async form
//! that runs the platform call on the blocking pool, and a
//! `*_blocking` form that runs it inline on the calling thread.

use super::entry::DirEntry;
use super::handle::DirHandle;
use super::request::{DirOutcome, DirRequest};
use super::to_c_path;
use crate::runtime::blocking::unblock;

use std::io;
use std::path::Path;

/// Flags accepted when opening a directory enumeration.
///
/// Mirrors the flags argument of the platform open call. No bits are
/// currently defined; [`DirFlags::NONE`] is the only value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirFlags(u32);

impl DirFlags {
    /// No options.
    pub const NONE: DirFlags = DirFlags(0);
}

/// An open directory enumeration.
///
/// Yields one entry per call, in whatever order the platform produces
/// them. The pseudo entries `.` and `..` are reported like any other
/// name; an empty directory therefore yields exactly two entries
/// before the end of the stream.
///
/// One operation may be in flight per `ReadDir` at a time. The stream
/// is owned by whichever call is currently driving it, so no internal
/// locking is involved. Dropping a `ReadDir` without closing releases
/// the stream.
///
/// # Examples
///
/// ```rust,ignore
/// let mut dir = ReadDir::open("/tmp/inbox").await?;
///
/// while let Some(entry) = dir.next_entry().await? {
///     println!("{} ({:?})", entry.name(), entry.kind());
/// }
///
/// dir.close().await;
/// ```
pub struct ReadDir {
    /// The stream. Absent while an operation owns it.
    handle: Option<DirHandle>,
}

impl ReadDir {
    /// Opens a directory enumeration over `path`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the path does not exist and `NotADirectory` if it
    /// names something else; other platform errors pass through. On
    /// error nothing is left open.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::open_with_flags(path, DirFlags::NONE).await
    }

    /// Opens a directory enumeration with explicit flags.
    pub async fn open_with_flags(path: impl AsRef<Path>, flags: DirFlags) -> io::Result<Self> {
        let request = DirRequest::Open {
            path: to_c_path(path.as_ref())?,
            flags,
        };

        Self::absorb_open(unblock(move || request.execute()).await)
    }

    /// Opens a directory enumeration, blocking the calling thread.
    pub fn open_blocking(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::open_with_flags_blocking(path, DirFlags::NONE)
    }

    /// Opens with explicit flags, blocking the calling thread.
    pub fn open_with_flags_blocking(path: impl AsRef<Path>, flags: DirFlags) -> io::Result<Self> {
        let request = DirRequest::Open {
            path: to_c_path(path.as_ref())?,
            flags,
        };

        Self::absorb_open(request.execute())
    }

    /// Produces the next entry, or `None` at the end of the stream.
    ///
    /// The end of the stream is terminal: once `None` is returned,
    /// every further call returns `None` again without touching the
    /// platform. A read error does not end the stream; the handle
    /// stays open and the enumeration remains closeable.
    pub async fn next_entry(&mut self) -> io::Result<Option<DirEntry>> {
        let Some(handle) = self.take_handle() else {
            return Ok(None);
        };

        let request = DirRequest::Read { handle };
        let outcome = unblock(move || request.execute()).await;

        self.absorb_read(outcome)
    }

    /// Produces the next entry, blocking the calling thread.
    pub fn next_entry_blocking(&mut self) -> io::Result<Option<DirEntry>> {
        let Some(handle) = self.take_handle() else {
            return Ok(None);
        };

        let request = DirRequest::Read { handle };

        self.absorb_read(request.execute())
    }

    /// Closes the enumeration and releases the stream.
    ///
    /// Close always succeeds from the caller's perspective and
    /// resolves exactly once. Consuming the receiver makes a second
    /// close unrepresentable.
    pub async fn close(mut self) {
        if let Some(handle) = self.handle.take() {
            let request = DirRequest::Close { handle };
            let _ = unblock(move || request.execute()).await;
        }
    }

    /// Closes the enumeration, blocking the calling thread.
    pub fn close_blocking(mut self) {
        if let Some(handle) = self.handle.take() {
            DirRequest::Close { handle }.execute();
        }
    }

    /// Takes the stream for one operation.
    ///
    /// A missing handle means a previous operation never returned it,
    /// which only happens when the caller abandoned that operation
    /// mid-flight. Debug builds flag the misuse; release builds treat
    /// the stream as over.
    fn take_handle(&mut self) -> Option<DirHandle> {
        let handle = self.handle.take();
        debug_assert!(handle.is_some(), "enumeration driven after losing its stream");

        handle
    }

    fn absorb_open(outcome: DirOutcome) -> io::Result<Self> {
        let DirOutcome::Open(result) = outcome else {
            unreachable!("open request produced a mismatched outcome");
        };

        Ok(Self {
            handle: Some(result?),
        })
    }

    fn absorb_read(&mut self, outcome: DirOutcome) -> io::Result<Option<DirEntry>> {
        let DirOutcome::Read { handle, entry } = outcome else {
            unreachable!("read request produced a mismatched outcome");
        };

        self.handle = Some(handle);
        entry
    }
}
