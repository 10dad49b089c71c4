use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the challenge catalog. Any of these prevents a session
/// from being created.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("challenge catalog is empty")]
    Empty,
    #[error("challenge id {0} appears more than once in the catalog")]
    DuplicateId(u32),
    #[error("challenge {id} has no code")]
    EmptyCode { id: u32 },
    #[error("challenge {id} has no answer")]
    EmptyAnswer { id: u32 },
    #[error("challenge {id} lists options that do not include its answer")]
    AnswerNotInOptions { id: u32 },
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by a progress backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}
