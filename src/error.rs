use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or decoding a resource container
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to resolve file path: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A read would run past the end of the buffer
    #[error("Container truncated: need {needed} bytes at offset {offset}, only {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Container invalid or corrupt: headers are not identical at offset {offset}")]
    HeaderMismatch { offset: usize },

    #[error("Container invalid or corrupt: block count {count} exceeds limit {limit}")]
    BlockCountExceeded { count: usize, limit: usize },

    /// Entry records reuse payloads until more bytes are copied than the input holds
    #[error("Container invalid or corrupt: entry at offset {offset} brings copied payload to {copied} bytes, input has {available}")]
    PayloadOverrun {
        offset: usize,
        copied: usize,
        available: usize,
    },

    #[error("Filename at offset {offset} is not valid UTF-8")]
    InvalidFilename { offset: usize },
}

impl Error {
    /// True for errors caused by a short buffer
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }

    /// True for structural corruption of an otherwise readable buffer
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Error::HeaderMismatch { .. }
                | Error::BlockCountExceeded { .. }
                | Error::PayloadOverrun { .. }
                | Error::InvalidFilename { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
