//! Per-attempt request tracing to a file.
//!
//! Each HTTP attempt made by a transport with a trace log attached appends one
//! JSON line. Only the method and URL path are written; the query string
//! carries provider credentials and never reaches the file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use ratingforge_common::{Error, Result};
use serde::Serialize;

use super::HttpTransport;

/// One line of the trace log.
#[derive(Debug, Serialize)]
pub struct TraceEntry<'a> {
    pub timestamp: String,
    pub method: &'a str,
    pub path: &'a str,
    pub attempt: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// Append-only JSON-lines sink shared by clones of a transport.
#[derive(Debug)]
pub struct TraceLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl TraceLog {
    /// Open (or create) the trace file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(Error::config("log file path cannot be empty"));
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry. Write failures are logged, never surfaced to the
    /// request that produced the entry.
    pub fn record(&self, entry: &TraceEntry<'_>) {
        let line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to serialize trace entry: {e}");
                return;
            }
        };

        let mut file = self.file.lock();
        if let Err(e) = writeln!(file, "{line}") {
            tracing::warn!(path = %self.path.display(), "Failed to write trace entry: {e}");
        }
    }
}

/// Attach request/response tracing to `transport`, writing to `log_file_path`.
///
/// An empty path is a configuration error.
pub fn setup_logging(transport: &mut HttpTransport, log_file_path: &Path) -> Result<()> {
    let log = TraceLog::open(log_file_path)?;
    tracing::debug!(path = %log_file_path.display(), "HTTP trace log attached");
    transport.set_trace_log(Arc::new(log));
    Ok(())
}
