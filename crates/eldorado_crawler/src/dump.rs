use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

/// Diagnostic name for the body of a non-200 response.
pub const RESPONSE_DUMP: &str = "debug_response.html";

/// Diagnostic name for a page that parsed to zero records.
pub const DOM_DUMP: &str = "debug_dom_dump.html";

/// Receiver for raw HTML snapshots taken on debug-enabled fetches.
///
/// A sink must never fail the fetch that feeds it; implementations swallow
/// their own errors.
pub trait DumpSink: Send + Sync {
    fn dump(&self, name: &str, html: &str);
}

/// Default sink: writes the snapshot as a file, into `dir` when set and the
/// working directory otherwise.
#[derive(Debug, Default)]
pub struct FileDump {
    dir: Option<PathBuf>,
}

impl FileDump {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl DumpSink for FileDump {
    fn dump(&self, name: &str, html: &str) {
        let path = match &self.dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        };
        match fs::write(&path, html) {
            Ok(()) => info!(path = %path.display(), "wrote diagnostic HTML dump"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to write diagnostic dump"),
        }
    }
}
