use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load one metadata file. Recorded in the report and skipped;
/// never aborts a scan.
#[derive(Debug, Error)]
pub enum RecordReadError {
    #[error("Error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
