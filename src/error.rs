use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the expenses file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access expenses file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("expenses file {path} is not a valid expense list: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode expenses: {0}")]
    Encode(#[source] serde_json::Error),
}
