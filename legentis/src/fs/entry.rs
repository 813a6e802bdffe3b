//! Directory entry decoding.
//!
//! Turns the raw record a platform enumeration call produces into an
//! owned [`DirEntry`]. Decoding uses only what the enumeration data
//! already carries; it never issues an extra status call to classify
//! an entry, so [`EntryKind::Unknown`] is a legitimate result.

#[cfg(unix)]
use std::ffi::CStr;

#[cfg(windows)]
use windows_sys::Win32::Storage::FileSystem::{
    FILE_ATTRIBUTE_DIRECTORY, FILE_ATTRIBUTE_REPARSE_POINT, WIN32_FIND_DATAA,
};

/// Classification of a directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symbolic link.
    Symlink,
    /// Named pipe.
    Fifo,
    /// Unix domain socket.
    Socket,
    /// Character device.
    CharDevice,
    /// Block device.
    BlockDevice,
    /// The platform reported no usable classification.
    Unknown,
}

/// One entry produced by directory enumeration.
///
/// Carries the name (final path component only) and the kind the
/// platform reported. The pseudo entries `.` and `..` come through
/// like any other name.
#[derive(Clone, Debug)]
pub struct DirEntry {
    name: String,
    kind: EntryKind,
}

impl DirEntry {
    /// The entry's file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's classification.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Consumes the entry, returning its name.
    pub fn into_name(self) -> String {
        self.name
    }
}

/// Decodes one `readdir(3)` record.
///
/// Copies the name out of the platform buffer, so the returned entry
/// stays valid after the stream advances or closes.
#[cfg(unix)]
pub(crate) fn decode_dirent(entry: &libc::dirent) -> DirEntry {
    let name = unsafe { CStr::from_ptr(entry.d_name.as_ptr()) }
        .to_string_lossy()
        .into_owned();

    DirEntry {
        name,
        kind: kind_of(entry),
    }
}

#[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos"))))]
fn kind_of(entry: &libc::dirent) -> EntryKind {
    match entry.d_type {
        libc::DT_REG => EntryKind::File,
        libc::DT_DIR => EntryKind::Dir,
        libc::DT_LNK => EntryKind::Symlink,
        libc::DT_FIFO => EntryKind::Fifo,
        libc::DT_SOCK => EntryKind::Socket,
        libc::DT_CHR => EntryKind::CharDevice,
        libc::DT_BLK => EntryKind::BlockDevice,
        _ => EntryKind::Unknown,
    }
}

/// These platforms carry no type in `dirent`; classifying would cost
/// one `stat(2)` per entry, so everything is `Unknown`.
#[cfg(all(unix, any(target_os = "solaris", target_os = "illumos")))]
fn kind_of(_entry: &libc::dirent) -> EntryKind {
    EntryKind::Unknown
}

/// Reparse tag for symbolic links (`IO_REPARSE_TAG_SYMLINK`).
#[cfg(windows)]
const SYMLINK_TAG: u32 = 0xA000_000C;

/// Decodes one `WIN32_FIND_DATAA` record.
#[cfg(windows)]
pub(crate) fn decode_find_data(data: &WIN32_FIND_DATAA) -> DirEntry {
    let len = data
        .cFileName
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(data.cFileName.len());

    let name = String::from_utf8_lossy(&data.cFileName[..len]).into_owned();

    let kind = if data.dwFileAttributes & FILE_ATTRIBUTE_REPARSE_POINT != 0
        && data.dwReserved0 == SYMLINK_TAG
    {
        EntryKind::Symlink
    } else if data.dwFileAttributes & FILE_ATTRIBUTE_DIRECTORY != 0 {
        EntryKind::Dir
    } else {
        EntryKind::File
    };

    DirEntry { name, kind }
}
