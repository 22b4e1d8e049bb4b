//! Thread-safe in-memory byte pipe.
//!
//! This crate provides [`BufferedPipe`], an unbounded buffer that streams
//! bytes from one producer to one consumer running on different threads.
//!
//! # Semantics
//!
//! - Writes append to the buffer and never block.
//! - Reads block until data is available or the pipe is closed.
//! - `close()` flushes to the reader: if any read was ever issued, it waits
//!   until the buffer is drained before reporting end of stream. If no reader
//!   ever attached, buffered bytes are dropped and close returns immediately.
//!
//! ```
//! use vchlog_buffer::{BufferedPipe, PipeError};
//!
//! let pipe = BufferedPipe::new();
//! pipe.write(b"abc").unwrap();
//!
//! let mut data = [0u8; 3];
//! assert_eq!(pipe.read(&mut data).unwrap(), 3);
//! assert_eq!(&data, b"abc");
//!
//! pipe.close().unwrap();
//! assert_eq!(pipe.read(&mut data).unwrap(), 0);
//! assert_eq!(pipe.write(b"late"), Err(PipeError::WriteClosed));
//! ```
//!
//! # Thread Safety
//!
//! `BufferedPipe` is `Send + Sync`. `Clone` shares the underlying pipe via `Arc`,
//! and both `BufferedPipe` and `&BufferedPipe` implement [`std::io::Read`] and
//! [`std::io::Write`].
//!
//! There is no backpressure: a producer that outpaces its consumer grows the
//! buffer without bound.

mod error;
mod pipe;

pub use error::PipeError;
pub use pipe::BufferedPipe;
