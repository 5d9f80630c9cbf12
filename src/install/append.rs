// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Idempotent file appending.

use crate::install::{InstallError, Result};

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::Path,
    time::SystemTime,
};
use tracing::debug;

/// What a call to append did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// File already contained content somewhere.
    AlreadyPresent,

    /// Content written to end of file.
    Appended,
}

/// Append content to file once.
///
/// Opens file without truncation, creating it if needed, and bumps its
/// modification time when allowed to. The whole file is then searched for
/// `content` as a raw substring. Only when it is missing is `content` written to the end,
/// followed by a newline unless it already ends with one. An empty `content`
/// is trivially present. Parent directories must already exist.
pub(crate) fn append_once(path: &Path, content: &str) -> Result<AppendOutcome> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| InstallError::OpenFile {
            source: err,
            path: path.to_path_buf(),
        })?;
    touch(&file, path)?;

    let mut current = Vec::new();
    file.read_to_end(&mut current)
        .map_err(|err| InstallError::ReadFile {
            source: err,
            path: path.to_path_buf(),
        })?;

    if contains(&current, content.as_bytes()) {
        return Ok(AppendOutcome::AlreadyPresent);
    }

    let mut line = String::from(content);
    if !line.ends_with('\n') {
        line.push('\n');
    }

    file.write_all(line.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|err| InstallError::AppendFile {
            source: err,
            path: path.to_path_buf(),
        })?;

    Ok(AppendOutcome::Appended)
}

/// Bump modification time of opened file to now.
///
/// Setting an explicit timestamp requires owning the file, while being able
/// to write to it is enough for appending. Files owned by someone else keep
/// their timestamp until content is actually written.
fn touch(file: &File, path: &Path) -> Result<()> {
    tolerate_foreign_owner(file.set_modified(SystemTime::now()), path)
}

fn tolerate_foreign_owner(result: io::Result<()>, path: &Path) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            debug!("keep modification time of {:?}: {err}", path.display());
            Ok(())
        }
        Err(err) => Err(InstallError::TouchFile {
            source: err,
            path: path.to_path_buf(),
        }),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}
