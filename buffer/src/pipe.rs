//! Buffered pipe implementation.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::error::PipeError;

/// A thread-safe in-memory pipe with an unbounded buffer.
///
/// `BufferedPipe` connects one writer to one reader. Writes never block;
/// reads block until data is available or the pipe is closed.
///
/// # Semantics
///
/// - **Read**: Blocks when empty, returns `Ok(0)` once the read side is closed.
///   The first read marks the pipe as having a reader.
/// - **Write**: Never blocks (auto-grows), fails once `close()` was called
/// - **Close**: If a reader ever attached, blocks until the buffer is drained.
///   Otherwise buffered bytes are discarded and close returns immediately.
///
/// Cloning a `BufferedPipe` yields another handle to the same pipe.
///
/// # Example
///
/// ```
/// use vchlog_buffer::BufferedPipe;
/// use std::thread;
///
/// let pipe = BufferedPipe::new();
/// let reader = pipe.clone();
///
/// let consumer = thread::spawn(move || {
///     let mut out = Vec::new();
///     let mut chunk = [0u8; 4];
///     loop {
///         match reader.read(&mut chunk).unwrap() {
///             0 => break,
///             n => out.extend_from_slice(&chunk[..n]),
///         }
///     }
///     out
/// });
///
/// // Wait for the consumer so close() flushes instead of discarding.
/// while !pipe.has_reader() {
///     thread::yield_now();
/// }
/// pipe.write(b"hello world").unwrap();
/// pipe.close().unwrap();
///
/// assert_eq!(consumer.join().unwrap(), b"hello world");
/// ```
pub struct BufferedPipe {
    inner: Arc<PipeInner>,
}

struct PipeInner {
    state: Mutex<PipeState>,
    cond: Condvar,
}

struct PipeState {
    buf: VecDeque<u8>,
    read_closed: bool,
    write_closed: bool,
    reader_ready: bool,
}

impl Clone for BufferedPipe {
    fn clone(&self) -> Self {
        BufferedPipe {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for BufferedPipe {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferedPipe {
    /// Creates a new pipe with an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new pipe with the specified initial buffer capacity.
    ///
    /// The capacity is a hint; the buffer grows without bound as data is written.
    pub fn with_capacity(capacity: usize) -> Self {
        BufferedPipe {
            inner: Arc::new(PipeInner {
                state: Mutex::new(PipeState {
                    buf: VecDeque::with_capacity(capacity),
                    read_closed: false,
                    write_closed: false,
                    reader_ready: false,
                }),
                cond: Condvar::new(),
            }),
        }
    }

    /// Returns the number of unread bytes in the pipe.
    pub fn len(&self) -> usize {
        self.inner.state.lock().buf.len()
    }

    /// Returns true if there are no unread bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once any read has been issued on the pipe.
    pub fn has_reader(&self) -> bool {
        self.inner.state.lock().reader_ready
    }

    /// Returns true once `close()` has been called, even if it is still draining.
    pub fn is_write_closed(&self) -> bool {
        self.inner.state.lock().write_closed
    }

    /// Returns true once the read side is closed and the pipe is terminal.
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().read_closed
    }

    /// Reads bytes from the pipe.
    ///
    /// Blocks until at least one byte is available or the read side is closed.
    /// Returns the number of bytes copied into `buf`, which may be fewer than
    /// requested. Returns `Ok(0)` at end of stream.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, PipeError> {
        let mut state = self.inner.state.lock();
        state.reader_ready = true;

        while state.buf.is_empty() && !state.read_closed {
            self.inner.cond.wait(&mut state);
        }
        if state.read_closed {
            self.inner.cond.notify_all();
            return Ok(0);
        }

        let n = std::cmp::min(buf.len(), state.buf.len());
        for (dst, src) in buf.iter_mut().zip(state.buf.drain(..n)) {
            *dst = src;
        }
        // A pending close may be waiting for the buffer to drain.
        self.inner.cond.notify_all();
        Ok(n)
    }

    /// Writes data to the pipe.
    ///
    /// Appends all of `data` and returns its length. Never blocks.
    /// Returns [`PipeError::WriteClosed`] once the pipe has been closed.
    pub fn write(&self, data: &[u8]) -> Result<usize, PipeError> {
        let mut state = self.inner.state.lock();
        if state.write_closed {
            return Err(PipeError::WriteClosed);
        }
        state.buf.extend(data);
        self.inner.cond.notify_all();
        Ok(data.len())
    }

    /// Closes the pipe.
    ///
    /// Further writes fail immediately. If a reader has attached, blocks until
    /// every buffered byte has been read; otherwise unread bytes are dropped.
    /// Afterwards all reads return end of stream. Closing a closed pipe is a no-op.
    pub fn close(&self) -> Result<(), PipeError> {
        let mut state = self.inner.state.lock();
        if state.read_closed {
            return Ok(());
        }

        state.write_closed = true;
        self.inner.cond.notify_all();

        if state.reader_ready {
            while !state.buf.is_empty() {
                self.inner.cond.wait(&mut state);
            }
        } else {
            state.buf.clear();
        }

        state.read_closed = true;
        self.inner.cond.notify_all();
        Ok(())
    }
}

impl io::Read for BufferedPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        BufferedPipe::read(self, buf).map_err(io::Error::from)
    }
}

impl io::Read for &BufferedPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        BufferedPipe::read(self, buf).map_err(io::Error::from)
    }
}

impl io::Write for BufferedPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        BufferedPipe::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for &BufferedPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        BufferedPipe::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
