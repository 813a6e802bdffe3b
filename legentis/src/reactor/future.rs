use crate::reactor::command::Command;
use crate::reactor::io::Waiting;
use crate::reactor::poller::common::Interest;
use crate::reactor::poller::platform::{RawFd, sys_read, sys_write};
use crate::runtime::context::CURRENT_REACTOR;

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Asynchronous read operation on a raw file descriptor.
///
/// This future attempts to read data into the provided buffer.
/// If the operation would block, it registers interest with the
/// reactor and yields until the file descriptor becomes readable.
///
/// The file descriptor **must** be in non-blocking mode.
pub struct ReadFuture<'a> {
    fd: RawFd,
    buffer: &'a mut [u8],
    registered: bool,
}

impl<'a> ReadFuture<'a> {
    /// Creates a new `ReadFuture`.
    pub(crate) fn new(fd: RawFd, buffer: &'a mut [u8]) -> Self {
        Self {
            fd,
            buffer,
            registered: false,
        }
    }
}

impl<'a> Future for ReadFuture<'a> {
    /// Returns the number of bytes read.
    type Output = io::Result<usize>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let n = sys_read(this.fd, this.buffer);

        if n > 0 {
            deregister(this.fd, this.registered);
            return Poll::Ready(Ok(n as usize));
        }

        if n == 0 {
            deregister(this.fd, this.registered);
            return Poll::Ready(Ok(0));
        }

        let err = io::Error::last_os_error();

        if err.kind() == io::ErrorKind::WouldBlock {
            if !this.registered {
                CURRENT_REACTOR.with(|cell| {
                    let binding = cell.borrow();
                    let reactor = binding.as_ref().expect("no reactor in context");

                    let interest = Interest {
                        read: true,
                        write: false,
                    };

                    let _ = reactor.send(Command::Register {
                        fd: this.fd,
                        interest,
                        entry: Waiting {
                            waker: cx.waker().clone(),
                            interest,
                        },
                    });
                });

                this.registered = true;
            }

            return Poll::Pending;
        }

        deregister(this.fd, this.registered);
        Poll::Ready(Err(err))
    }
}

/// Asynchronous write operation on a raw file descriptor.
///
/// This future writes the entire buffer, yielding whenever the
/// operation would block. Partial writes are handled internally.
///
/// The file descriptor **must** be in non-blocking mode.
pub struct WriteFuture<'a> {
    fd: RawFd,
    buffer: &'a [u8],
    written: usize,
    registered: bool,
}

impl<'a> WriteFuture<'a> {
    /// Creates a new `WriteFuture`.
    pub(crate) fn new(fd: RawFd, buffer: &'a [u8]) -> Self {
        Self {
            fd,
            buffer,
            written: 0,
            registered: false,
        }
    }
}

impl<'a> Future for WriteFuture<'a> {
    type Output = io::Result<usize>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        while this.written < this.buffer.len() {
            let n = sys_write(this.fd, &this.buffer[this.written..]);

            if n > 0 {
                this.written += n as usize;
                continue;
            }

            if n == 0 {
                deregister(this.fd, this.registered);
                return Poll::Ready(Ok(this.written));
            }

            let err = io::Error::last_os_error();

            if err.kind() == io::ErrorKind::WouldBlock {
                if !this.registered {
                    CURRENT_REACTOR.with(|cell| {
                        let binding = cell.borrow();
                        let reactor = binding.as_ref().expect("no reactor in context");

                        let interest = Interest {
                            read: false,
                            write: true,
                        };

                        let _ = reactor.send(Command::Register {
                            fd: this.fd,
                            interest,
                            entry: Waiting {
                                waker: cx.waker().clone(),
                                interest,
                            },
                        });
                    });

                    this.registered = true;
                }

                return Poll::Pending;
            }

            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }

            deregister(this.fd, this.registered);
            return Poll::Ready(Err(err));
        }

        deregister(this.fd, this.registered);
        Poll::Ready(Ok(this.written))
    }
}

/// Deregisters an I/O interest from the reactor if it was previously registered.
fn deregister(fd: RawFd, registered: bool) {
    if registered {
        CURRENT_REACTOR.with(|cell| {
            if let Some(reactor) = cell.borrow().as_ref() {
                let _ = reactor.send(Command::Deregister { fd });
            }
        });
    }
}
