//! Windows platform abstraction layer.
//!
//! This module provides the Windows implementation of low-level
//! system primitives required by the Legentis runtime.
//!
//! It mirrors the Unix platform layer and exposes identical
//! function names and semantics where possible.
//!
//! Both SOCKETs and file HANDLEs are supported. The implementation
//! dynamically distinguishes between them when performing I/O.
//! Directory enumeration is backed by the `FindFirstFileA` family,
//! which hands out the first entry together with the search handle;
//! that record is surfaced to the caller so no entry is lost.

use std::ffi::{CStr, CString, c_char};
use std::io;
use std::mem;
use std::path::{Component, Path, PathBuf};
use std::ptr;
use std::sync::Once;

use windows_sys::Win32::Foundation::{
    CloseHandle, ERROR_ALREADY_EXISTS, ERROR_NO_MORE_FILES, GetLastError, HANDLE,
    INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Networking::WinSock::{
    SO_TYPE, SOCKET, SOCKET_ERROR, SOL_SOCKET, WSADATA, WSAStartup, closesocket, getsockopt, recv,
    send,
};
use windows_sys::Win32::Storage::FileSystem::{
    CREATE_ALWAYS, CREATE_NEW, CreateDirectoryA, CreateFileA, FILE_ATTRIBUTE_NORMAL,
    FILE_FLAG_BACKUP_SEMANTICS, FILE_GENERIC_READ, FILE_GENERIC_WRITE, FILE_SHARE_DELETE,
    FILE_SHARE_READ, FILE_SHARE_WRITE, FindClose, FindFirstFileA, FindNextFileA, OPEN_EXISTING,
    ReadFile, RemoveDirectoryA, WIN32_FIND_DATAA, WriteFile,
};

/// Raw file descriptor type on Windows.
///
/// Internally this is either:
/// - a WinSock `SOCKET`, or
/// - a Win32 file `HANDLE`.
///
/// The runtime dynamically detects which kind it is.
pub type RawFd = std::os::windows::io::RawSocket;

/// POSIX-style open flags (partial).
const O_RDONLY: i32 = 0x0000;
const O_WRONLY: i32 = 0x0001;
const O_RDWR: i32 = 0x0002;
const O_CREAT: i32 = 0x0100;
const O_EXCL: i32 = 0x0080;

/// Default flags used when opening a file for reading.
pub(crate) const OPENFLAGS: i32 = O_RDONLY;

/// Default flags used when creating a file for writing.
pub(crate) const CREATEFLAGS: i32 = O_CREAT | O_RDWR;

/// Returns `true` if the given descriptor refers to a socket.
fn is_socket(fd: RawFd) -> bool {
    if fd == u64::MAX {
        return false;
    }

    unsafe {
        let mut ty: i32 = 0;
        let mut len = mem::size_of::<i32>() as i32;

        getsockopt(
            fd as SOCKET,
            SOL_SOCKET,
            SO_TYPE,
            &mut ty as *mut _ as *mut u8,
            &mut len,
        ) == 0
    }
}

/// Creates a MAKEWORD value for Winsock version.
#[inline]
const fn makeword(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | (low as u16)
}

/// Winsock initialization guard.
static WINSOCK_INIT: Once = Once::new();

/// Initialize Winsock if not already initialized.
pub(crate) fn ensure_winsock() {
    WINSOCK_INIT.call_once(|| unsafe {
        let mut data: WSADATA = mem::zeroed();
        let rc = WSAStartup(makeword(2, 2), &mut data as *mut _);
        assert_eq!(rc, 0, "WSAStartup failed: {}", rc);
    });
}

/// Reads from a file descriptor into the given buffer.
///
/// Returns the number of bytes read, or `-1` on error.
pub(crate) fn sys_read(fd: RawFd, buffer: &mut [u8]) -> isize {
    unsafe {
        if is_socket(fd) {
            let rc = recv(fd as SOCKET, buffer.as_mut_ptr(), buffer.len() as i32, 0);
            if rc == SOCKET_ERROR { -1 } else { rc as isize }
        } else {
            let mut read = 0u32;
            let ok = ReadFile(
                fd as HANDLE,
                buffer.as_mut_ptr() as *mut _,
                buffer.len() as u32,
                &mut read,
                ptr::null_mut(),
            );
            if ok == 0 { -1 } else { read as isize }
        }
    }
}

/// Writes the buffer to a file descriptor.
///
/// Returns the number of bytes written, or `-1` on error.
pub(crate) fn sys_write(fd: RawFd, buffer: &[u8]) -> isize {
    unsafe {
        if is_socket(fd) {
            let rc = send(fd as SOCKET, buffer.as_ptr(), buffer.len() as i32, 0);
            if rc == SOCKET_ERROR { -1 } else { rc as isize }
        } else {
            let mut written = 0u32;
            let ok = WriteFile(
                fd as HANDLE,
                buffer.as_ptr() as *const _,
                buffer.len() as u32,
                &mut written,
                ptr::null_mut(),
            );
            if ok == 0 { -1 } else { written as isize }
        }
    }
}

/// Closes a file descriptor.
pub(crate) fn sys_close(fd: RawFd) {
    unsafe {
        if is_socket(fd) {
            let _ = closesocket(fd as SOCKET);
        } else {
            let _ = CloseHandle(fd as HANDLE);
        }
    }
}

/// Opens or creates a file.
pub(crate) fn sys_open(path: *const c_char, flags: i32, _mode: u32) -> RawFd {
    unsafe {
        let access = if flags & O_RDWR != 0 {
            FILE_GENERIC_READ | FILE_GENERIC_WRITE
        } else if flags & O_WRONLY != 0 {
            FILE_GENERIC_WRITE
        } else {
            FILE_GENERIC_READ
        };

        let mut disposition = if flags & O_CREAT != 0 {
            if flags & O_EXCL != 0 {
                CREATE_NEW
            } else {
                CREATE_ALWAYS
            }
        } else {
            OPEN_EXISTING
        };

        let mut handle = CreateFileA(
            path as *const u8,
            access,
            FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
            ptr::null(),
            disposition,
            FILE_ATTRIBUTE_NORMAL | FILE_FLAG_BACKUP_SEMANTICS,
            ptr::null_mut(),
        );

        if handle == INVALID_HANDLE_VALUE
            && flags & O_CREAT != 0
            && flags & O_EXCL == 0
            && GetLastError() == ERROR_ALREADY_EXISTS
        {
            disposition = OPEN_EXISTING;
            handle = CreateFileA(
                path as *const u8,
                access,
                FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
                ptr::null(),
                disposition,
                FILE_ATTRIBUTE_NORMAL | FILE_FLAG_BACKUP_SEMANTICS,
                ptr::null_mut(),
            );
        }

        if handle == INVALID_HANDLE_VALUE {
            u64::MAX
        } else {
            handle as RawFd
        }
    }
}

/// Returns `true` if a raw descriptor-style return signals failure.
pub(crate) fn sys_failed(rc: RawFd) -> bool {
    rc == RawFd::MAX
}

/// Converts a path to a lexical absolute path.
fn to_lexical_absolute(path: &Path) -> io::Result<PathBuf> {
    let mut out = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir()?
    };

    for c in path.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(p) => out.push(p),
            Component::RootDir => out.push("\\"),
            Component::Prefix(p) => out.push(p.as_os_str()),
        }
    }

    Ok(out)
}

/// Normalizes a raw C path into the form the `*DirectoryA` calls accept:
/// backslash-separated, lexically absolute, no trailing separator.
fn normalize_dir_path(path: *const c_char) -> Option<CString> {
    let s = unsafe { CStr::from_ptr(path) }.to_str().ok()?.replace('/', "\\");

    let abs = to_lexical_absolute(Path::new(&s)).ok()?;

    let mut normalized = abs.to_string_lossy().to_string();
    while normalized.ends_with('\\') && normalized.len() > 3 && !normalized.ends_with(":\\") {
        normalized.pop();
    }

    CString::new(normalized).ok()
}

/// Creates a directory.
pub(crate) fn sys_mkdir(path: *const c_char, _mode: u32) -> RawFd {
    let Some(c) = normalize_dir_path(path) else {
        return u64::MAX;
    };

    unsafe {
        if CreateDirectoryA(c.as_ptr() as *const u8, ptr::null()) == 0 {
            u64::MAX
        } else {
            0
        }
    }
}

/// Removes an empty directory.
pub(crate) fn sys_rmdir(path: *const c_char) -> RawFd {
    let Some(c) = normalize_dir_path(path) else {
        return u64::MAX;
    };

    unsafe {
        if RemoveDirectoryA(c.as_ptr() as *const u8) == 0 {
            u64::MAX
        } else {
            0
        }
    }
}

/// Opens a directory enumeration over `path`.
///
/// Starts a `FindFirstFileA` search on `path\*`. The find handle and
/// the first entry it already produced are returned together; the
/// caller must hand that record out before asking for the next one.
/// A path naming a regular file fails with `ERROR_DIRECTORY`, which
/// surfaces as `NotADirectory`.
pub(crate) fn sys_opendir(path: *const c_char) -> io::Result<(HANDLE, WIN32_FIND_DATAA)> {
    let s = unsafe { CStr::from_ptr(path) }
        .to_str()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "non UTF-8 path"))?
        .replace('/', "\\");

    let mut pattern = s;
    if !pattern.ends_with('\\') {
        pattern.push('\\');
    }
    pattern.push('*');

    let c = CString::new(pattern)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))?;

    unsafe {
        let mut data: WIN32_FIND_DATAA = mem::zeroed();
        let handle = FindFirstFileA(c.as_ptr() as *const u8, &mut data);

        if handle == INVALID_HANDLE_VALUE {
            Err(io::Error::last_os_error())
        } else {
            Ok((handle, data))
        }
    }
}

/// Advances a directory enumeration by one entry.
///
/// Returns `Ok(None)` once `ERROR_NO_MORE_FILES` is reported.
pub(crate) fn sys_readdir(find: HANDLE) -> io::Result<Option<WIN32_FIND_DATAA>> {
    unsafe {
        let mut data: WIN32_FIND_DATAA = mem::zeroed();

        if FindNextFileA(find, &mut data) != 0 {
            Ok(Some(data))
        } else if GetLastError() == ERROR_NO_MORE_FILES {
            Ok(None)
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

/// Releases a directory enumeration handle.
pub(crate) fn sys_closedir(find: HANDLE) {
    unsafe {
        let _ = FindClose(find);
    }
}
