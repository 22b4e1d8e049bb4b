//! Streams a process log to a datastore that becomes available later.
//!
//! A [`VchLogger`] owns a [`BufferedPipe`]. The process writes its log into the
//! pipe from the start; once the datastore folder exists, a [`ReadySignal`] is
//! handed to the logger and [`VchLogger::run`] uploads the pipe as
//! `<prefix>_<timestamp>_<name>_<operation id>.log` in that folder.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vchlog::{Datastore, Operation, ReadySignal, VchLogger};
//!
//! # fn datastore() -> Arc<dyn Datastore> { unimplemented!() }
//! let logger = Arc::new(VchLogger::new());
//! let upload = logger.spawn().unwrap();
//!
//! logger.pipe().write(b"starting\n").unwrap();
//!
//! // Later, once the folder exists:
//! logger.signal(ReadySignal::new(datastore(), "create", Operation::generate(), "[ds1] vch"));
//!
//! logger.close().unwrap();
//! upload.join().unwrap().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod signal;
pub mod writer;

pub use config::{Config, DEFAULT_PREFIX};
pub use error::{Result, VchLogError};
pub use logger::VchLogger;
pub use signal::{
    datastore_path, log_file_name, timestamp_now, Datastore, Operation, ReadySignal, Receiver,
    TIMESTAMP_FORMAT,
};
pub use vchlog_buffer::{BufferedPipe, PipeError};
pub use writer::PipeWriter;
