//! Platform-specific I/O poller abstraction.
//!
//! This module provides a unified interface over platform-specific
//! I/O polling mechanisms (`epoll` on Linux, `WSAPoll` on Windows).
//!
//! The poller is used by the reactor to:
//! - wait for I/O readiness events,
//! - wake the reactor when new commands arrive,
//! - integrate OS-level notifications with async tasks.
//!
//! The concrete implementation is selected at compile time
//! depending on the target operating system. The `platform`
//! alias exposes the raw syscall wrappers for the current target.

pub(crate) mod common;

pub(crate) use common::Waker;

#[cfg(target_os = "linux")]
mod epoll;

#[cfg(windows)]
mod wsapoll;

#[cfg(target_os = "linux")]
pub(crate) type Poller = epoll::EpollPoller;

#[cfg(windows)]
pub(crate) type Poller = wsapoll::WSAPollPoller;

#[cfg(unix)]
pub(crate) mod unix;

#[cfg(unix)]
pub(crate) use unix as platform;

#[cfg(windows)]
pub(crate) mod windows;

#[cfg(windows)]
pub(crate) use windows as platform;
