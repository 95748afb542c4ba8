use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of splitting and verification. Each aborts the current file
/// only; already-written chunk files are left on disk.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("unknown checksum algorithm: {0}")]
    UnsupportedAlgo(String),

    #[error("cannot read source {path:?}: {source}")]
    SourceUnreadable { path: PathBuf, source: io::Error },

    #[error("cannot create chunk {path:?}: {source}")]
    ChunkCreate { path: PathBuf, source: io::Error },

    #[error("copy failed on chunk {path:?}: {source}")]
    CopyFailed { path: PathBuf, source: io::Error },

    #[error("malformed checksum text: {0}")]
    MalformedChecksum(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("splitfile decode: {0}")]
    ManifestDecode(#[from] serde_json::Error),
}
