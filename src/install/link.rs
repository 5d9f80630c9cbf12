// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Symbolic link primitives.

use crate::{
    install::{InstallError, Result},
    path::real_path,
};

use std::{fs, io, path::Path};

/// State of a path that a link should be placed at.
///
/// Always derived fresh from the file system. Never cache it, because the
/// user or some other program may change things between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at path.
    Absent,

    /// Regular file or directory exists at path.
    Occupied,

    /// Link exists at path, and resolves to same real path as link target.
    SameTarget,

    /// Link exists at path, but resolves elsewhere or nowhere at all.
    OtherTarget,
}

impl LinkState {
    /// Determine state of `new` with respect to link target `existing`.
    ///
    /// Links are compared by real path, so a chain of links ending at
    /// `existing` counts as [`LinkState::SameTarget`]. Broken links never
    /// match, since they have no real path.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::Inspect`] if `new` cannot be inspected.
    /// - Return [`InstallError::Path`] if either real path cannot be resolved.
    pub fn probe(existing: &Path, new: &Path) -> Result<Self> {
        let metadata = match fs::symlink_metadata(new) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::Absent),
            Err(err) => {
                return Err(InstallError::Inspect {
                    source: err,
                    path: new.to_path_buf(),
                })
            }
        };

        if !metadata.is_symlink() {
            return Ok(Self::Occupied);
        }

        match (real_path(new)?, real_path(existing)?) {
            (Some(new), Some(existing)) if new == existing => Ok(Self::SameTarget),
            _ => Ok(Self::OtherTarget),
        }
    }
}

/// What a call to link did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Link already in place.
    Unchanged,

    /// Link created where nothing existed before.
    Created,

    /// Existing entry replaced by link after user said yes.
    Replaced,

    /// Existing entry kept after user said no.
    Declined,
}

/// Remove entry at path, whatever it is.
///
/// Links are removed without touching their target. Directories are removed
/// recursively. Missing entries are ignored.
pub(crate) fn remove_entry(path: &Path) -> Result<()> {
    let result = match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => remove_link_or_file(path),
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(InstallError::RemoveEntry {
            source: err,
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(unix)]
fn remove_link_or_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

// Directory links on Windows must be removed like directories.
#[cfg(windows)]
fn remove_link_or_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

/// Create link at `link` pointing to `target`.
pub(crate) fn create_link(target: &Path, link: &Path) -> Result<()> {
    symlink(target, link).map_err(|err| InstallError::CreateLink {
        source: err,
        target: target.to_path_buf(),
        link: link.to_path_buf(),
    })
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
