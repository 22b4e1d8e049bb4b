//! Readiness signal and the destination it names.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use tracing::Span;

/// Timestamp format used in log file names (file-name safe).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%z";

/// A destination that accepts a streamed upload.
///
/// `upload` reads `source` until end of stream and stores the bytes at `path`.
/// Errors are returned to the caller of [`VchLogger::run`](crate::VchLogger::run)
/// untouched.
pub trait Datastore: Send + Sync {
    fn upload(&self, op: &Operation, source: &mut dyn Read, path: &str) -> io::Result<()>;
}

/// Anything that accepts a readiness signal.
pub trait Receiver {
    fn signal(&self, sig: ReadySignal);
}

/// An operation identifier scoping the work done on behalf of one caller.
///
/// Each operation carries a tracing span with its id, so log output produced
/// while the span is entered can be traced back to the operation.
#[derive(Clone)]
pub struct Operation {
    id: String,
    span: Span,
}

impl Operation {
    /// Wraps an existing operation id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let span = tracing::info_span!("operation", id = %id);
        Self { id, span }
    }

    /// Creates an operation with a fresh unique id.
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation").field("id", &self.id).finish()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Signals that the datastore folder is available for the log upload.
#[derive(Clone)]
pub struct ReadySignal {
    /// Destination of the upload.
    pub datastore: Arc<dyn Datastore>,
    /// Process name, e.g. "create" or "inspect".
    pub name: String,
    /// The operation from which the signal is sent.
    pub operation: Operation,
    /// Datastore folder the log file is placed in.
    pub vm_path_name: String,
    /// Time at which the signal is sent.
    pub timestamp: String,
}

impl ReadySignal {
    /// Creates a signal stamped with the current time.
    pub fn new(
        datastore: Arc<dyn Datastore>,
        name: impl Into<String>,
        operation: Operation,
        vm_path_name: impl Into<String>,
    ) -> Self {
        Self {
            datastore,
            name: name.into(),
            operation,
            vm_path_name: vm_path_name.into(),
            timestamp: timestamp_now(),
        }
    }
}

impl fmt::Debug for ReadySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadySignal")
            .field("name", &self.name)
            .field("operation", &self.operation)
            .field("vm_path_name", &self.vm_path_name)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

/// Returns the current UTC time in [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the log file name `<prefix>_<timestamp>_<name>_<operation id>.log`.
pub fn log_file_name(prefix: &str, sig: &ReadySignal) -> String {
    format!(
        "{}_{}_{}_{}.log",
        prefix,
        sig.timestamp,
        sig.name,
        sig.operation.id()
    )
}

/// Joins a datastore folder and a file name with `/`.
///
/// Empty segments are skipped and redundant slashes at the join collapse,
/// so `"[ds] vch/"` and `"log"` give `"[ds] vch/log"`.
pub fn datastore_path(folder: &str, file: &str) -> String {
    let folder = folder.trim_end_matches('/');
    let file = file.trim_start_matches('/');
    match (folder.is_empty(), file.is_empty()) {
        (true, _) => file.to_string(),
        (false, true) => folder.to_string(),
        (false, false) => format!("{}/{}", folder, file),
    }
}
