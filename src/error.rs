use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy for one period's fetch pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network error, non-success HTTP status, or a URL with no usable
    /// filename. No archive is left on disk.
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// The downloaded file is not a valid zip container. The archive is
    /// retained on disk for inspection.
    #[error("{path} is not a valid zip archive: {source}")]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Any other I/O error while extracting. The archive is retained on disk.
    #[error("extraction of {path} failed: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl FetchError {
    /// Process exit code for this failure category. Success is 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            FetchError::Download { .. } => 2,
            FetchError::CorruptArchive { .. } => 3,
            FetchError::Extraction { .. } => 4,
        }
    }
}
