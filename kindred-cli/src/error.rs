//! Error types emitted by the Kindred CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use kindred_core::{CompatibilityError, ConfigError};
use kindred_scorer::ResultCacheError;
use thiserror::Error;

/// Errors emitted by the Kindred CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass <{field}> or set {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input document failed.
    #[error("failed to open {field} document at {path:?}: {source}")]
    OpenDocument {
        /// Argument naming the document.
        field: &'static str,
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// An input document was not valid JSON for its type.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseDocument {
        /// Argument naming the document.
        field: &'static str,
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The engine configuration decoded but failed validation.
    #[error("engine configuration in {path:?} is invalid: {source}")]
    InvalidEngineConfig {
        /// Configuration path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: ConfigError,
    },
    /// Scoring failed because a profile is incomplete.
    #[error(transparent)]
    Score(#[from] CompatibilityError),
    /// Reading, writing, or filling the result cache failed.
    #[error(transparent)]
    Cache(#[from] ResultCacheError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
