//! Temporary workspaces holding party documents for CLI tests.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use kindred_core::PartyProfile;
use kindred_scorer::Candidate;
use serde::de::DeserializeOwned;
use tempfile::TempDir;

#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write_raw(&self, file: &str, bytes: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(file);
        std::fs::write(&path, bytes).expect("write test file");
        path
    }

    pub(super) fn write_party(&self, file: &str, id: &str, profile: PartyProfile) -> Utf8PathBuf {
        let payload =
            serde_json::to_vec_pretty(&Candidate::new(id, profile)).expect("serialise party");
        self.write_raw(file, &payload)
    }

    pub(super) fn write_pool(&self, file: &str, pool: &[Candidate]) -> Utf8PathBuf {
        let payload = serde_json::to_vec_pretty(pool).expect("serialise pool");
        self.write_raw(file, &payload)
    }
}

pub(super) fn decode_output<T: DeserializeOwned>(buffer: &[u8]) -> T {
    serde_json::from_slice(buffer).expect("output should be JSON")
}

pub(super) fn expect_error(result: Result<(), CliError>) -> CliError {
    match result {
        Ok(()) => panic!("expected the command to fail"),
        Err(err) => err,
    }
}
