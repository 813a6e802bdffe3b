//! Platform directory stream ownership.
//!
//! [`DirHandle`] wraps the platform enumeration stream and its cursor.
//! It is the single place that touches the raw stream; everything
//! above it deals in owned [`DirEntry`] values and `io::Result`s.

use super::entry::DirEntry;
use super::read_dir::DirFlags;
use crate::reactor::poller::platform;

use std::ffi::CStr;
use std::io;

#[cfg(unix)]
use super::entry::decode_dirent;

#[cfg(windows)]
use super::entry::decode_find_data;
#[cfg(windows)]
use windows_sys::Win32::Foundation::{HANDLE, INVALID_HANDLE_VALUE};
#[cfg(windows)]
use windows_sys::Win32::Storage::FileSystem::WIN32_FIND_DATAA;

/// An open platform directory stream.
///
/// The handle owns the stream and the cursor position within it.
/// Reads advance the cursor one entry at a time; once the platform
/// reports exhaustion the handle remembers it and never touches the
/// stream again. A read error does not end the stream: the handle
/// stays live and closeable.
///
/// The handle moves between threads (a task and the blocking pool)
/// but is only ever used by one of them at a time, so it carries no
/// locking. Dropping a live handle releases the stream.
pub(crate) struct DirHandle {
    /// The `opendir(3)` stream. Null once released.
    #[cfg(unix)]
    stream: *mut libc::DIR,

    /// The find handle. Invalid once released.
    #[cfg(windows)]
    find: HANDLE,

    /// The record the open call itself produced, handed out first.
    #[cfg(windows)]
    first: Option<WIN32_FIND_DATAA>,

    /// End of stream was observed; no further platform calls.
    exhausted: bool,
}

// The raw stream moves with the handle and is never aliased across
// threads.
unsafe impl Send for DirHandle {}

impl DirHandle {
    /// Opens the directory stream for `path`.
    ///
    /// On failure nothing is retained. `NotFound` and `NotADirectory`
    /// surface through the error's kind; other platform codes pass
    /// through untouched.
    #[cfg(unix)]
    pub(crate) fn open(path: &CStr, _flags: DirFlags) -> io::Result<Self> {
        let stream = platform::sys_opendir(path.as_ptr())?;

        Ok(Self {
            stream,
            exhausted: false,
        })
    }

    #[cfg(windows)]
    pub(crate) fn open(path: &CStr, _flags: DirFlags) -> io::Result<Self> {
        let (find, data) = platform::sys_opendir(path.as_ptr())?;

        Ok(Self {
            find,
            first: Some(data),
            exhausted: false,
        })
    }

    /// Reads the next entry, or `None` once the stream is exhausted.
    ///
    /// Exhaustion is terminal: after the first `None` every further
    /// call answers `None` again without another platform call.
    pub(crate) fn read_one(&mut self) -> io::Result<Option<DirEntry>> {
        if self.exhausted {
            return Ok(None);
        }

        let next = self.read_platform()?;

        if next.is_none() {
            self.exhausted = true;
        }

        Ok(next)
    }

    #[cfg(unix)]
    fn read_platform(&mut self) -> io::Result<Option<DirEntry>> {
        match platform::sys_readdir(self.stream)? {
            // Safety: readdir keeps the record alive until the next
            // call on this stream, and it is decoded before that.
            Some(entry) => Ok(Some(decode_dirent(unsafe { &*entry }))),
            None => Ok(None),
        }
    }

    #[cfg(windows)]
    fn read_platform(&mut self) -> io::Result<Option<DirEntry>> {
        if let Some(data) = self.first.take() {
            return Ok(Some(decode_find_data(&data)));
        }

        match platform::sys_readdir(self.find)? {
            Some(data) => Ok(Some(decode_find_data(&data))),
            None => Ok(None),
        }
    }

    /// Releases the stream.
    ///
    /// Consuming the handle makes a second close unrepresentable, and
    /// teardown is never surfaced as a failure.
    pub(crate) fn close(mut self) {
        self.release();
    }

    #[cfg(unix)]
    fn release(&mut self) {
        if !self.stream.is_null() {
            platform::sys_closedir(self.stream);
            self.stream = std::ptr::null_mut();
        }
    }

    #[cfg(windows)]
    fn release(&mut self) {
        if self.find != INVALID_HANDLE_VALUE {
            platform::sys_closedir(self.find);
            self.find = INVALID_HANDLE_VALUE;
        }
    }
}

impl Drop for DirHandle {
    fn drop(&mut self) {
        self.release();
    }
}
