use std::io;

use thiserror::Error;
use vchlog_buffer::PipeError;

#[derive(Error, Debug)]
pub enum VchLogError {
    #[error("vchlog: logger already run")]
    AlreadyRun,

    #[error("vchlog: signal channel closed")]
    SignalClosed,

    #[error(transparent)]
    Upload(#[from] io::Error),

    #[error("vchlog: {0}")]
    Pipe(#[from] PipeError),

    #[error("vchlog: config: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, VchLogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_is_transparent() {
        let err: VchLogError = io::Error::new(io::ErrorKind::NotFound, "no such folder").into();
        assert_eq!(err.to_string(), "no such folder");
    }

    #[test]
    fn test_pipe_error_display() {
        let err: VchLogError = PipeError::WriteClosed.into();
        assert_eq!(err.to_string(), "vchlog: pipe: write past close");
    }
}
