//! Filesystem helpers for caches and documents, built on `cap-std` and
//! `camino`.
//!
//! Every path is resolved against an ambient directory handle: the root for
//! absolute paths and the working directory for relative ones.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Write};

/// Open an existing file for reading.
///
/// # Errors
/// Propagates the I/O error, including [`io::ErrorKind::NotFound`].
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Replace `path` with `contents`, creating missing parent directories first.
///
/// The bytes land in a hidden sibling file that is renamed over `path` once
/// fully written, so readers see either the old contents or the new ones.
///
/// # Errors
/// Returns an error when a parent cannot be created or the staging file
/// cannot be written or renamed.
pub fn write_utf8_file_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = parent_dir_and_name(path)?;
    let staging = format!(".{name}.tmp");
    let mut file = dir.create(&staging)?;
    let written = file.write_all(contents).and_then(|()| file.sync_all());
    drop(file);
    if let Err(err) = written {
        drop(dir.remove_file(&staging));
        return Err(err);
    }
    dir.rename(&staging, &dir, &name)
}

/// Report whether `path` names an existing regular file.
///
/// A missing file yields `Ok(false)`.
///
/// # Errors
/// Returns other I/O errors raised while inspecting the path.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    Ok(metadata(path)?.is_some_and(|meta| meta.is_file()))
}

/// Report whether anything, file or directory, exists at `path`.
///
/// # Errors
/// Returns I/O errors other than [`io::ErrorKind::NotFound`].
pub fn path_exists(path: &Utf8Path) -> io::Result<bool> {
    Ok(metadata(path)?.is_some())
}

fn metadata(path: &Utf8Path) -> io::Result<Option<cap_std::fs::Metadata>> {
    let (dir, name) = match parent_dir_and_name(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(Some(meta)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates I/O errors from directory creation.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    let (base, relative) = split_base(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an ambient base handle and the path beneath it.
fn split_base(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut base = Utf8PathBuf::from(".");
    let mut relative = Utf8PathBuf::new();
    for component in dir.components() {
        match component {
            Utf8Component::Prefix(prefix) => base = Utf8PathBuf::from(prefix.as_str()),
            // Pushing a rooted path replaces the `.` placeholder.
            Utf8Component::RootDir => base.push(std::path::MAIN_SEPARATOR_STR),
            other => relative.push(other.as_str()),
        }
    }
    let handle = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((handle, relative))
}
