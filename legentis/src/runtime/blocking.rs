//! Blocking work offloading.
//!
//! This module contains the pool of threads the runtime uses for
//! operations that must block: filesystem calls have no readiness
//! notification, so they run here instead of on executor workers.
//!
//! It is responsible for:
//! - running [`unblock`] closures off the executor threads,
//! - waking the awaiting task once a closure finishes,
//! - draining submitted work before the runtime shuts down.

use crate::runtime::context::CURRENT_BLOCKING;

use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc::{Sender, channel};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};
use std::thread::{self, JoinHandle};

/// A unit of blocking work shipped to the pool.
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Pool of threads dedicated to blocking operations.
///
/// The pool owns a fixed set of worker threads sharing one job
/// channel. Workers run jobs to completion in submission order and
/// exit once the channel is closed and drained.
pub(crate) struct BlockingPool {
    /// Submission side of the job channel.
    ///
    /// Taken on shutdown so workers observe the disconnect.
    sender: Option<Sender<Job>>,

    /// Join handles for pool threads.
    handles: Vec<JoinHandle<()>>,
}

impl BlockingPool {
    /// Creates a pool with the given number of threads.
    ///
    /// # Arguments
    ///
    /// * `threads` - Number of pool threads
    pub(crate) fn new(threads: usize) -> Self {
        let (transmitter, receiver) = channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut handles = Vec::with_capacity(threads);

        for _ in 0..threads {
            let receiver = receiver.clone();

            handles.push(thread::spawn(move || {
                loop {
                    let job = {
                        let guard = receiver.lock().unwrap();
                        guard.recv()
                    };

                    match job {
                        Ok(job) => job(),
                        Err(_) => break,
                    }
                }
            }));
        }

        Self {
            sender: Some(transmitter),
            handles,
        }
    }

    /// Returns a submission handle to this pool.
    ///
    /// # Panics
    ///
    /// Panics if called after [`shutdown`](Self::shutdown).
    pub(crate) fn handle(&self) -> BlockingHandle {
        let sender = self
            .sender
            .as_ref()
            .expect("blocking pool already shut down")
            .clone();

        BlockingHandle { sender }
    }

    /// Shuts the pool down.
    ///
    /// Closes the job channel and joins all pool threads. Jobs already
    /// submitted still run to completion before the threads exit.
    pub(crate) fn shutdown(&mut self) {
        drop(self.sender.take());

        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Cloneable submission handle to the blocking pool.
#[derive(Clone)]
pub(crate) struct BlockingHandle {
    sender: Sender<Job>,
}

impl BlockingHandle {
    /// Submits a job to the pool.
    ///
    /// Jobs submitted after shutdown are silently dropped.
    pub(crate) fn submit(&self, job: Job) {
        let _ = self.sender.send(job);
    }
}

/// Shared slot a pool job fills with its outcome.
struct OpSlot<T> {
    /// Outcome of the work, present once the job has run.
    value: Option<T>,

    /// Waker of the task awaiting the outcome.
    waker: Option<Waker>,
}

/// Runs a blocking closure on the pool without blocking the executor.
///
/// The closure is shipped to the blocking pool on first poll and the
/// awaiting task is woken once it returns. Dropping the future does
/// **not** cancel work that was already submitted; the closure still
/// runs, its outcome is discarded.
///
/// # Panics
///
/// Panics if polled outside of a running runtime.
///
/// # Examples
///
/// ```rust,ignore
/// let contents = unblock(|| std::fs::read("data.bin")).await?;
/// ```
pub fn unblock<T, F>(work: F) -> Unblock<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    Unblock {
        work: Some(Box::new(work)),
        slot: Arc::new(Mutex::new(OpSlot {
            value: None,
            waker: None,
        })),
    }
}

/// Future resolving to the outcome of a closure run on the blocking pool.
///
/// Created by [`unblock`]. The closure is not submitted until the
/// future is first polled.
pub struct Unblock<T> {
    /// The pending closure, consumed on first poll.
    work: Option<Box<dyn FnOnce() -> T + Send + 'static>>,

    /// Slot shared with the pool job.
    slot: Arc<Mutex<OpSlot<T>>>,
}

impl<T: Send + 'static> Future for Unblock<T> {
    type Output = T;

    /// Polls for the outcome of the blocking closure.
    ///
    /// The waker is stored **before** the closure is submitted, so a
    /// job finishing on the pool always finds a waker to notify.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        {
            let mut slot = this.slot.lock().unwrap();

            if let Some(value) = slot.value.take() {
                return Poll::Ready(value);
            }

            slot.waker = Some(cx.waker().clone());
        }

        if let Some(work) = this.work.take() {
            let slot = this.slot.clone();

            let handle = CURRENT_BLOCKING.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .expect("no blocking pool in context")
                    .clone()
            });

            handle.submit(Box::new(move || {
                let value = work();

                let waker = {
                    let mut slot = slot.lock().unwrap();
                    slot.value = Some(value);
                    slot.waker.take()
                };

                if let Some(waker) = waker {
                    waker.wake();
                }
            }));
        }

        Poll::Pending
    }
}
