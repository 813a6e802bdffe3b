#[cfg(unix)]
use std::os::fd::RawFd;

#[cfg(windows)]
use super::platform::RawFd;

/// Readiness interests a registration asks the poller to watch.
#[derive(Clone, Copy)]
pub(crate) struct Interest {
    pub(crate) read: bool,
    pub(crate) write: bool,
}

/// Handle to the poller's wake-up descriptor.
///
/// The backend-specific `wake` implementation lives next to each
/// poller. Sending on this from any thread interrupts a blocking
/// poll call.
pub(crate) struct Waker(pub(crate) RawFd);

unsafe impl Send for Waker {}
unsafe impl Sync for Waker {}
