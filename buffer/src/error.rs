//! Error types for pipe operations.

use std::io;

use thiserror::Error;

/// Pipe operation error.
///
/// End of stream is not an error: reads report it as `Ok(0)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeError {
    /// The write side has been closed.
    #[error("pipe: write past close")]
    WriteClosed,
}

impl From<PipeError> for io::Error {
    fn from(err: PipeError) -> Self {
        match err {
            PipeError::WriteClosed => io::Error::new(io::ErrorKind::UnexpectedEof, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_error_display() {
        assert_eq!(PipeError::WriteClosed.to_string(), "pipe: write past close");
    }

    #[test]
    fn test_into_io_error() {
        let err: io::Error = PipeError::WriteClosed.into();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(err.to_string().contains("write past close"));
    }
}
