use super::command::Command;
use super::event::Event;
use super::io::Waiting;
use super::poller::{Poller, Waker};
use super::timer::TimerEntry;
use crate::utils::Slab;

use std::collections::BinaryHeap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{Receiver, SendError, Sender, channel};
use std::thread;
use std::time::Instant;

/// Cloneable handle to the reactor thread.
///
/// A `ReactorHandle` is the only way the rest of the runtime talks to
/// the reactor. Commands are pushed onto a channel and the poller is
/// woken afterwards, so a reactor parked inside `poll()` picks the
/// command up immediately.
#[derive(Clone)]
pub(crate) struct ReactorHandle {
    /// Command channel into the reactor loop.
    sender: Sender<Command>,

    /// Waker interrupting a blocking poll.
    waker: Arc<Waker>,
}

impl ReactorHandle {
    /// Sends a command to the reactor and wakes the poller.
    ///
    /// Returns an error if the reactor thread has already exited.
    pub(crate) fn send(&self, command: Command) -> Result<(), SendError<Command>> {
        self.sender.send(command)?;
        self.waker.wake();

        Ok(())
    }
}

/// The reactor event loop.
///
/// The reactor runs on its own thread and is responsible for:
/// - polling registered file descriptors for readiness,
/// - dispatching readiness events to waiting tasks,
/// - firing timers at their deadlines.
///
/// It owns the platform poller and the registrations; no other thread
/// touches them.
pub(crate) struct Reactor {
    /// Command channel from runtime handles.
    receiver: Receiver<Command>,

    /// Platform poller (`epoll` on Linux, `WSAPoll` on Windows).
    poller: Poller,

    /// Readiness events drained from the poller.
    events: Vec<Event>,

    /// Pending timers, earliest deadline first.
    timers: BinaryHeap<TimerEntry>,

    /// Registered one-shot I/O waiters, indexed by token.
    io: Slab<Waiting>,
}

impl Reactor {
    /// Starts the reactor on a dedicated thread.
    ///
    /// The returned handle is used to submit commands; cloning it is
    /// cheap. The thread exits once [`Command::Shutdown`] is received.
    pub(crate) fn start() -> ReactorHandle {
        let (transmitter, receiver) = channel();

        let poller = Poller::new();
        let waker = poller.waker();

        let mut reactor = Self {
            receiver,
            poller,
            events: Vec::with_capacity(64),
            timers: BinaryHeap::new(),
            io: Slab::new(64),
        };

        thread::spawn(move || {
            let _ = reactor.run();
        });

        ReactorHandle {
            sender: transmitter,
            waker,
        }
    }

    /// Runs the reactor loop until shutdown.
    ///
    /// Each iteration:
    /// 1. dispatches readiness events from the previous poll,
    /// 2. drains pending commands,
    /// 3. polls with a timeout derived from the earliest timer,
    /// 4. fires expired timers.
    fn run(&mut self) -> io::Result<()> {
        loop {
            let events: Vec<Event> = self.events.drain(..).collect();
            for event in events {
                self.handle_event(event);
            }

            while let Ok(command) = self.receiver.try_recv() {
                match command {
                    Command::Register {
                        fd,
                        entry,
                        interest,
                    } => {
                        let token = self.io.insert(entry);
                        self.poller.register(fd, token, interest);
                    }
                    Command::Deregister { fd } => {
                        self.poller.deregister(fd);
                    }
                    Command::SetTimer {
                        deadline,
                        waker,
                        cancelled,
                    } => {
                        self.timers.push(TimerEntry {
                            deadline,
                            waker,
                            cancelled,
                        });
                    }
                    Command::Shutdown => {
                        return Ok(());
                    }
                }
            }

            let timeout = self
                .timers
                .peek()
                .map(|timer| timer.deadline.saturating_duration_since(Instant::now()));

            self.poller.poll(&mut self.events, timeout)?;

            let now = Instant::now();
            while self.timers.peek().is_some_and(|timer| timer.deadline <= now) {
                if let Some(timer) = self.timers.pop() {
                    if !timer.cancelled.load(Ordering::Acquire) {
                        timer.waker.wake();
                    }
                }
            }
        }
    }

    /// Dispatches one readiness event to its registered waiter.
    ///
    /// The registration is one-shot: once the waiter is woken, its
    /// slot is released. Events for already-released tokens (e.g.
    /// merged read/write readiness delivered twice) are ignored.
    fn handle_event(&mut self, event: Event) {
        let Some(waiting) = self.io.get_mut(event.token) else {
            return;
        };

        let ready = (event.readable && waiting.interest.read)
            || (event.writable && waiting.interest.write);

        if ready {
            self.io.remove(event.token).waker.wake();
        }
    }
}
