use libc::{
    O_CREAT, O_NONBLOCK, O_RDONLY, O_TRUNC, O_WRONLY, c_char, close, closedir, dirent, mkdir,
    mode_t, open, opendir, read, readdir, rmdir, write,
};
use std::ffi::c_uint;
use std::io;

pub(crate) use std::os::fd::RawFd;

/// Default flags used when opening a file for reading.
pub(crate) const OPENFLAGS: i32 = O_RDONLY | O_NONBLOCK;

/// Default flags used when creating a file for writing.
pub(crate) const CREATEFLAGS: i32 = O_WRONLY | O_CREAT | O_TRUNC | O_NONBLOCK;

/// Resets `errno` to zero.
///
/// Needed before calls such as `readdir(3)` whose null return is
/// ambiguous: end of stream leaves `errno` untouched, failure sets it.
fn clear_errno() {
    unsafe {
        #[cfg(any(target_os = "linux", target_os = "android"))]
        {
            *libc::__errno_location() = 0;
        }

        #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
        {
            *libc::__error() = 0;
        }

        #[cfg(any(target_os = "netbsd", target_os = "openbsd"))]
        {
            *libc::__errno() = 0;
        }

        #[cfg(any(target_os = "solaris", target_os = "illumos"))]
        {
            *libc::___errno() = 0;
        }
    }
}

/// Reads from a file descriptor into the given buffer.
///
/// Returns the number of bytes read, or a negative value on error.
/// The file descriptor **must** be non-blocking.
pub(crate) fn sys_read(fd: RawFd, buffer: &mut [u8]) -> isize {
    unsafe { read(fd, buffer.as_mut_ptr() as *mut _, buffer.len()) }
}

/// Writes the buffer to a file descriptor.
///
/// Returns the number of bytes written, or a negative value on error.
/// The file descriptor **must** be non-blocking.
pub(crate) fn sys_write(fd: RawFd, buffer: &[u8]) -> isize {
    unsafe { write(fd, buffer.as_ptr() as *const _, buffer.len()) }
}

/// Closes a file descriptor.
pub(crate) fn sys_close(fd: RawFd) {
    unsafe { close(fd) };
}

/// Opens a file using `open(2)`.
pub(crate) fn sys_open(path: *const c_char, flags: i32, mode: mode_t) -> RawFd {
    unsafe { open(path, flags, mode as c_uint) }
}

/// Returns `true` if a raw descriptor-style return signals failure.
pub(crate) fn sys_failed(rc: RawFd) -> bool {
    rc < 0
}

/// Creates a directory using `mkdir(2)`.
pub(crate) fn sys_mkdir(path: *const c_char, mode: mode_t) -> RawFd {
    unsafe { mkdir(path, mode) }
}

/// Removes an empty directory using `rmdir(2)`.
pub(crate) fn sys_rmdir(path: *const c_char) -> RawFd {
    unsafe { rmdir(path) }
}

/// Opens a directory stream using `opendir(3)`.
///
/// The caller owns the returned stream and must release it with
/// [`sys_closedir`]. `ENOENT` and `ENOTDIR` surface through the
/// returned error's kind.
pub(crate) fn sys_opendir(path: *const c_char) -> io::Result<*mut libc::DIR> {
    let stream = unsafe { opendir(path) };

    if stream.is_null() {
        Err(io::Error::last_os_error())
    } else {
        Ok(stream)
    }
}

/// Advances a directory stream by one entry using `readdir(3)`.
///
/// Returns `Ok(None)` once the stream is exhausted. On success the
/// returned pointer stays owned by the stream and is invalidated by
/// the next call on the same stream, so callers must copy out what
/// they need before advancing again.
pub(crate) fn sys_readdir(stream: *mut libc::DIR) -> io::Result<Option<*const dirent>> {
    clear_errno();

    let entry = unsafe { readdir(stream) };

    if entry.is_null() {
        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(0) => Ok(None),
            _ => Err(err),
        }
    } else {
        Ok(Some(entry))
    }
}

/// Releases a directory stream using `closedir(3)`.
pub(crate) fn sys_closedir(stream: *mut libc::DIR) {
    unsafe { closedir(stream) };
}
