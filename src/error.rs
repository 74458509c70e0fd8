//! Fault types for the aggregation core
//!
//! Every failure the library can produce is a [`Fault`]. Nothing is recovered
//! locally: a fault aborts the current operation and is handed to the caller.

use std::path::PathBuf;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Fault>;

#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// A per-record computation failed (degenerate field, overflow)
    #[error("data fault in record '{record}': {reason}")]
    Data { record: String, reason: String },

    /// An external collaborator could not locate, open or read its resource
    #[error("resource fault for {}: {source}", resource.display())]
    Resource {
        resource: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A resource was read but its content could not be decoded
    #[error("resource fault for {}: {reason}", resource.display())]
    Malformed { resource: PathBuf, reason: String },

    /// Cancellation was observed while work was in flight
    #[error("interrupted after {processed} record(s)")]
    Interrupted { processed: usize },

    /// A worker thread panicked before reporting its partition
    #[error("worker thread panicked during parallel aggregation")]
    WorkerPanic,

    /// The work-stealing pool could not be created
    #[error("failed to build worker pool: {0}")]
    Pool(String),
}

impl Fault {
    pub fn data(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Fault::Data {
            record: record.into(),
            reason: reason.into(),
        }
    }

    pub fn resource(resource: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Fault::Resource {
            resource: resource.into(),
            source,
        }
    }

    /// Whether this fault came from cancellation rather than bad input
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Fault::Interrupted { .. })
    }
}
