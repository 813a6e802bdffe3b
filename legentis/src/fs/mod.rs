//! Asynchronous filesystem primitives.
//!
//! This module provides non-blocking filesystem abstractions built
//! on top of the runtime.
//!
//! It exposes high-level types for:
//! - enumerating directories ([`ReadDir`]),
//! - creating and removing directories ([`Dir`]),
//! - reading from and writing to files ([`File`]).
//!
//! Filesystem calls have no readiness to wait on, so the async forms
//! run them on the blocking pool instead of the executor threads.
//! Enumeration additionally offers `*_blocking` forms that run the
//! same machinery inline on the calling thread.

mod dir;
mod entry;
mod file;
mod handle;
mod read_dir;
mod request;

pub use dir::Dir;
pub use entry::{DirEntry, EntryKind};
pub use file::File;
pub use read_dir::{DirFlags, ReadDir};

use std::ffi::CString;
use std::io;
use std::path::Path;

/// Converts a path into the NUL-terminated form the platform expects.
pub(crate) fn to_c_path(path: &Path) -> io::Result<CString> {
    let text = path
        .to_str()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "non UTF-8 path"))?;

    Ok(CString::new(text)?)
}
