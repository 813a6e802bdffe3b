use crate::reactor::poller::common::Interest;

use std::task::Waker;

/// A single I/O wait registration.
///
/// `Waiting` represents one task parked on one readiness condition.
/// Registrations are one-shot: the reactor wakes the stored waker the
/// first time the interest is satisfied and releases the slot.
pub(crate) struct Waiting {
    /// Waker to notify when the I/O event occurs.
    pub(crate) waker: Waker,

    /// I/O interest being waited on.
    pub(crate) interest: Interest,
}
