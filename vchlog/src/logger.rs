//! The VCH logger: buffers a process log until its datastore is ready.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver as ChannelReceiver, SyncSender};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use vchlog_buffer::BufferedPipe;

use crate::config::Config;
use crate::error::{Result, VchLogError};
use crate::signal::{datastore_path, log_file_name, ReadySignal, Receiver};
use crate::writer::PipeWriter;

/// Streams log output through a [`BufferedPipe`] and uploads it once a
/// [`ReadySignal`] names the destination.
///
/// The producer writes into [`pipe`](Self::pipe) (or logs through
/// [`writer`](Self::writer)) from the start of the process. Independently,
/// [`run`](Self::run) waits for the signal and then streams the pipe to the
/// datastore until the pipe is closed with [`close`](Self::close).
///
/// Close only flushes to the datastore if the upload has already started
/// reading. Closing before that discards the buffered log.
pub struct VchLogger {
    pipe: BufferedPipe,
    prefix: String,
    signal_tx: SyncSender<ReadySignal>,
    signal_rx: Mutex<ChannelReceiver<ReadySignal>>,
    started: AtomicBool,
}

impl Default for VchLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl VchLogger {
    /// Creates a logger with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a logger with the given configuration.
    pub fn with_config(config: Config) -> Self {
        // Zero capacity: signal() hands off directly to run().
        let (signal_tx, signal_rx) = mpsc::sync_channel(0);
        Self {
            pipe: BufferedPipe::with_capacity(config.initial_capacity),
            prefix: config.prefix,
            signal_tx,
            signal_rx: Mutex::new(signal_rx),
            started: AtomicBool::new(false),
        }
    }

    /// Returns a handle to the streaming pipe.
    pub fn pipe(&self) -> BufferedPipe {
        self.pipe.clone()
    }

    /// Returns a writer for `tracing_subscriber` that logs into the pipe.
    pub fn writer(&self) -> PipeWriter {
        PipeWriter::new(self.pipe.clone())
    }

    /// Returns the file name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Waits for the ready signal, then uploads the pipe to the datastore.
    ///
    /// The upload reads the pipe until end of stream, so this returns after
    /// [`close`](Self::close) has been called and the pipe drained. Can only
    /// be called once.
    pub fn run(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(VchLogError::AlreadyRun);
        }

        debug!("vchlog: waiting for datastore ready signal");
        let sig = self
            .signal_rx
            .lock()
            .recv()
            .map_err(|_| VchLogError::SignalClosed)?;

        let file_name = log_file_name(&self.prefix, &sig);
        let path = datastore_path(&sig.vm_path_name, &file_name);

        let _enter = sig.operation.span().enter();
        info!(name = %sig.name, path = %path, "vchlog: uploading log");

        let mut source = self.pipe.clone();
        match sig.datastore.upload(&sig.operation, &mut source, &path) {
            Ok(()) => {
                info!(path = %path, "vchlog: upload complete");
                Ok(())
            }
            Err(err) => {
                warn!(path = %path, error = %err, "vchlog: upload failed");
                Err(VchLogError::Upload(err))
            }
        }
    }

    /// Runs [`run`](Self::run) on a background thread.
    pub fn spawn(self: &Arc<Self>) -> std::io::Result<thread::JoinHandle<Result<()>>> {
        let logger = Arc::clone(self);
        thread::Builder::new()
            .name("vchlog-upload".to_string())
            .spawn(move || logger.run())
    }

    /// Hands the ready signal to [`run`](Self::run), blocking until it is accepted.
    pub fn signal(&self, sig: ReadySignal) {
        if self.signal_tx.send(sig).is_err() {
            warn!("vchlog: ready signal dropped, receiver gone");
        }
    }

    /// Closes the pipe, waiting for an active upload to drain it.
    pub fn close(&self) -> Result<()> {
        Ok(self.pipe.close()?)
    }
}

impl Receiver for VchLogger {
    fn signal(&self, sig: ReadySignal) {
        VchLogger::signal(self, sig)
    }
}
