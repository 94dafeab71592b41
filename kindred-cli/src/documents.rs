//! Shared input and output plumbing for the CLI commands.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use kindred_core::CompatibilityConfig;
use kindred_fs::open_utf8_file;
use kindred_scorer::CompatibilityEngine;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ARG_ENGINE_CONFIG, CliError};

/// Builds the engine used by one command invocation.
pub(crate) trait EngineBuilder {
    fn build(&self, engine_config: Option<&Utf8Path>) -> Result<CompatibilityEngine, CliError>;
}

/// Builds a [`CompatibilityEngine`], reading its configuration when given.
pub(crate) struct DefaultEngineBuilder;

impl EngineBuilder for DefaultEngineBuilder {
    fn build(&self, engine_config: Option<&Utf8Path>) -> Result<CompatibilityEngine, CliError> {
        let Some(path) = engine_config else {
            return Ok(CompatibilityEngine::default());
        };
        let config: CompatibilityConfig = load_document(path, ARG_ENGINE_CONFIG)?;
        let engine =
            CompatibilityEngine::new(config).map_err(|source| CliError::InvalidEngineConfig {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("loaded engine configuration from {path}");
        Ok(engine)
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    let inspect_error = |source| CliError::InspectSourcePath {
        field,
        path: path.to_path_buf(),
        source,
    };
    if kindred_fs::file_is_file(path).map_err(inspect_error)? {
        return Ok(());
    }
    if kindred_fs::path_exists(path).map_err(inspect_error)? {
        Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        })
    } else {
        Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        })
    }
}

/// Decode a JSON document from disk.
pub(crate) fn load_document<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenDocument {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseDocument {
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
