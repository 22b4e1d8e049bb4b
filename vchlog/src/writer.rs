//! Tracing writer that streams formatted log lines into the pipe.

use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;
use vchlog_buffer::BufferedPipe;

/// Implements `io::Write` and `MakeWriter` over a [`BufferedPipe`].
///
/// ```no_run
/// use vchlog::VchLogger;
///
/// let logger = VchLogger::new();
/// tracing_subscriber::fmt()
///     .with_writer(logger.writer())
///     .with_ansi(false)
///     .init();
/// ```
///
/// Once the pipe is closed, writes fail with `UnexpectedEof` and the
/// subscriber drops the event.
#[derive(Clone)]
pub struct PipeWriter {
    pipe: BufferedPipe,
}

impl PipeWriter {
    pub fn new(pipe: BufferedPipe) -> Self {
        Self { pipe }
    }

    pub fn pipe(&self) -> &BufferedPipe {
        &self.pipe
    }
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pipe.write(buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for PipeWriter {
    type Writer = PipeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
