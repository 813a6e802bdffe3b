use super::to_c_path;
use crate::reactor::poller::platform::{sys_failed, sys_mkdir, sys_rmdir};
use crate::runtime::blocking::unblock;

use std::io;
use std::path::{Component, Path, PathBuf};

/// A filesystem directory handle.
///
/// `Dir` provides directory creation and removal. The platform calls
/// are not awaitable at the OS level, so the async methods run them
/// on the blocking pool and resolve when the call returns.
pub struct Dir {
    /// Path to the directory.
    path: PathBuf,
}

impl Dir {
    /// Creates a single directory.
    ///
    /// This is the async equivalent of `std::fs::create_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let target = path.as_ref().to_path_buf();

        unblock(move || {
            make_directory(&target)?;

            Ok(Self { path: target })
        })
        .await
    }

    /// Recursively creates a directory and all of its parent components.
    ///
    /// This is the async equivalent of `std::fs::create_dir_all`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is empty,
    /// - a parent directory (`..`) is encountered,
    /// - a component is invalid or unsupported,
    /// - a directory cannot be created.
    pub async fn create_all(path: impl AsRef<Path>) -> io::Result<Self> {
        let target = path.as_ref().to_path_buf();

        unblock(move || {
            make_all(&target)?;

            Ok(Self { path: target })
        })
        .await
    }

    /// Removes this directory, which must be empty.
    ///
    /// This is the async equivalent of `std::fs::remove_dir`. The
    /// handle is consumed; on success the path no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, not empty, or
    /// cannot be removed.
    pub async fn remove(self) -> io::Result<()> {
        unblock(move || {
            let c_path = to_c_path(&self.path)?;
            let rc = sys_rmdir(c_path.as_ptr());

            if sys_failed(rc) {
                return Err(io::Error::last_os_error());
            }

            Ok(())
        })
        .await
    }

    /// Returns the path of this directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the directory exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }
}

/// Creates a directory at the specified path.
fn make_directory(path: &Path) -> io::Result<()> {
    let c_path = to_c_path(path)?;
    let rc = sys_mkdir(c_path.as_ptr(), 0o755);

    if sys_failed(rc) {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

/// Walks the path components, creating each missing directory.
fn make_all(target: &Path) -> io::Result<()> {
    if target.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }

    let mut acc = PathBuf::new();
    let mut components = target.components();

    if let Some(first) = components.next() {
        match first {
            Component::Prefix(p) => {
                acc.push(p.as_os_str());

                if let Some(Component::RootDir) = components.next() {
                    acc.push(Path::new("/"));
                }
            }
            Component::RootDir => {
                acc.push(Path::new("/"));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "parent directory (..) not supported",
                ));
            }
            Component::Normal(seg) => {
                acc.push(seg);
                tolerate_existing(make_directory(&acc), &acc)?;
            }
        }
    }

    for component in components {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "parent directory (..) not supported",
                ));
            }
            Component::Normal(seg) => {
                acc.push(seg);
                tolerate_existing(make_directory(&acc), &acc)?;
            }
            Component::RootDir => {}
            Component::Prefix(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "unsupported path component",
                ));
            }
        }
    }

    Ok(())
}

/// Accepts an `AlreadyExists` failure when the path is a directory.
fn tolerate_existing(result: io::Result<()>, path: &Path) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        other => other,
    }
}
