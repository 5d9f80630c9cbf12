// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Dotfile installation.
//!
//! Installing a dotfile means one of two things: linking it from the dotfiles
//! repository into its expected location, or appending a snippet to a file
//! that the dotfiles repository does not own outright, e.g., sourcing a shell
//! script from the system provided `.bashrc`.
//!
//! # Idempotence
//!
//! Both operations inspect the file system before touching it. A link that
//! already resolves to the right place is left alone, and a snippet that is
//! already present in its target file is not written again. Thus, a bootstrap
//! script made of these operations can be re-run at will.
//!
//! # Overwrites
//!
//! A link will only replace an existing entry after the user confirms it
//! through the installer's [`Confirm`] handle. Declining is not an error. The
//! entry is simply left where it is.
//!
//! # Atomicity
//!
//! There is none. If an existing entry is removed, but the new link cannot be
//! created, then the target path stays empty. Nothing is backed up.

mod append;
mod link;

pub use append::AppendOutcome;
pub use link::{LinkOutcome, LinkState};

use crate::{
    path::expand_path,
    prompt::{Confirm, Prompter},
};

use std::{
    io::{Stdin, StdinLock, Stdout},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

/// Dotfile installer.
///
/// Owns the confirmation handle used to ask the user before destructive
/// overwrites. Every operation derives the state of the file system afresh,
/// so one installer can be reused for any number of calls.
#[derive(Debug)]
pub struct Installer<C = Prompter<StdinLock<'static>, Stdout>>
where
    C: Confirm,
{
    confirm: C,
}

impl Installer {
    /// Construct installer that prompts through standard input and output.
    pub fn from_stdio(stdin: Stdin, stdout: Stdout) -> Self {
        Self::new(Prompter::new(stdin.lock(), stdout))
    }
}

impl<C> Installer<C>
where
    C: Confirm,
{
    /// Construct new installer.
    pub fn new(confirm: C) -> Self {
        Self { confirm }
    }

    /// Link existing file to new location.
    ///
    /// Both paths are expanded first, see [`expand_path`]. Then the state of
    /// `new` decides what happens:
    ///
    /// - Link that resolves to the same real path as `existing`: nothing.
    /// - Link to anywhere else, broken link, file, or directory: ask the user
    ///   to overwrite. On yes, remove the entry recursively and link it. On
    ///   no, leave it be.
    /// - Nothing at all: create missing parent directories, and link it.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::Path`] if either path cannot be expanded or
    ///   resolved.
    /// - Return [`InstallError::Prompt`] if the user cannot be asked, or gave
    ///   no valid answer before input ended.
    /// - Return any other [`InstallError`] variant if a file system operation
    ///   fails.
    #[instrument(skip(self, existing, new), level = "debug")]
    pub fn symlink(
        &mut self,
        existing: impl AsRef<Path>,
        new: impl AsRef<Path>,
    ) -> Result<LinkOutcome> {
        let existing = expand_path(existing)?;
        let new = expand_path(new)?;

        let state = LinkState::probe(&existing, &new)?;
        debug!("{:?} is {state:?}", new.display());

        match state {
            LinkState::SameTarget => Ok(LinkOutcome::Unchanged),
            LinkState::OtherTarget | LinkState::Occupied => {
                let message = format!("Overwrite {:?}? [y/n]", new.display());
                if !self.confirm.confirm(&message)? {
                    warn!("keep {:?} as is", new.display());
                    return Ok(LinkOutcome::Declined);
                }

                link::remove_entry(&new)?;
                link::create_link(&existing, &new)?;
                info!("replace {:?} with link to {:?}", new.display(), existing.display());

                Ok(LinkOutcome::Replaced)
            }
            LinkState::Absent => {
                ensure_parent_dir(&new)?;
                link::create_link(&existing, &new)?;
                info!("link {:?} to {:?}", new.display(), existing.display());

                Ok(LinkOutcome::Created)
            }
        }
    }

    /// Append content to file unless file already contains it.
    ///
    /// The file and its parent directories are created when missing. An
    /// existing file is never truncated. Containment is checked by exact
    /// substring match over the whole file, not line by line. Content is
    /// written with a trailing newline.
    ///
    /// Does not need to ask the user anything, see [`append`] for a version
    /// that needs no installer at all.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::Path`] if file path cannot be expanded.
    /// - Return any other [`InstallError`] variant if a file system operation
    ///   fails.
    #[instrument(skip(self, file, content), level = "debug")]
    pub fn append(&self, file: impl AsRef<Path>, content: impl AsRef<str>) -> Result<AppendOutcome> {
        append(file, content)
    }

    /// Take back ownership of confirmation handle.
    pub fn into_inner(self) -> C {
        self.confirm
    }
}

/// Append content to file unless file already contains it.
///
/// See [`Installer::append`].
///
/// # Errors
///
/// - Return [`InstallError::Path`] if file path cannot be expanded.
/// - Return any other [`InstallError`] variant if a file system operation
///   fails.
pub fn append(file: impl AsRef<Path>, content: impl AsRef<str>) -> Result<AppendOutcome> {
    let file = expand_path(file)?;
    ensure_parent_dir(&file)?;

    let outcome = append::append_once(&file, content.as_ref())?;
    match outcome {
        AppendOutcome::AlreadyPresent => debug!("{:?} already has content", file.display()),
        AppendOutcome::Appended => info!("append content to {:?}", file.display()),
    }

    Ok(outcome)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| InstallError::CreateParentDir {
            source: err,
            path: parent.to_path_buf(),
        })?;
    }

    Ok(())
}

/// Installation error types.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// Path expansion or resolution fails.
    #[error(transparent)]
    Path(#[from] crate::path::PathError),

    /// User cannot be asked for confirmation.
    #[error(transparent)]
    Prompt(#[from] crate::prompt::PromptError),

    /// Entry cannot be inspected.
    #[error("failed to inspect {:?}", path.display())]
    Inspect {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Parent directory cannot be created.
    #[error("failed to create directory {:?}", path.display())]
    CreateParentDir {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Existing entry cannot be removed.
    #[error("failed to remove {:?}", path.display())]
    RemoveEntry {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Symbolic link cannot be created.
    #[error("failed to link {:?} to {:?}", link.display(), target.display())]
    CreateLink {
        #[source]
        source: std::io::Error,
        target: PathBuf,
        link: PathBuf,
    },

    /// File cannot be opened or created.
    #[error("failed to open {:?}", path.display())]
    OpenFile {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Modification time of file cannot be updated.
    #[error("failed to touch {:?}", path.display())]
    TouchFile {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// File cannot be read from.
    #[error("failed to read from {:?}", path.display())]
    ReadFile {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// File cannot be appended to.
    #[error("failed to append to {:?}", path.display())]
    AppendFile {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = InstallError> = std::result::Result<T, E>;
