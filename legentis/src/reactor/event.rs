/// An I/O readiness event reported by the poller.
///
/// Events carry the token under which a file descriptor was
/// registered, plus the directions that became ready. The reactor
/// uses the token to find the waiting task.
pub(crate) struct Event {
    /// Token of the registration that became ready.
    pub(crate) token: usize,

    /// The file descriptor is readable.
    pub(crate) readable: bool,

    /// The file descriptor is writable.
    pub(crate) writable: bool,
}
