//! Error types raised while caching compatibility results.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use kindred_core::CompatibilityError;
use thiserror::Error;

/// Errors raised while fingerprinting, scoring, or persisting cached results.
#[derive(Debug, Error)]
pub enum ResultCacheError {
    /// A profile or configuration could not be rendered for hashing.
    #[error("failed to render value for fingerprinting")]
    Fingerprint {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Scoring a pair missing from the cache failed.
    #[error(transparent)]
    Score(#[from] CompatibilityError),
    /// Opening or reading the cache file failed.
    #[error("failed to read result cache at {path}")]
    ReadFile {
        /// Cache file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The cache file exists but does not decode.
    #[error("failed to decode result cache at {path}")]
    Deserialise {
        /// Cache file path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// Creating the cache file or its parent directories failed.
    #[error("failed to write result cache at {path}")]
    WriteFile {
        /// Cache file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the cache to `bincode` failed.
    #[error("failed to serialise result cache into {path}")]
    Serialise {
        /// Cache file path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
}
