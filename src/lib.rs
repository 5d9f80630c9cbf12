// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Minimal dotfile bootstrapper.
//!
//! Dotstrap does two things: it links files from a canonical dotfiles
//! repository into the user's home directory, and it appends configuration
//! snippets into existing files without duplicating them. Both operations are
//! idempotent, so running the same bootstrap script twice leaves the home
//! directory exactly as one run would.
//!
//! Destructive overwrites are never performed silently. Whenever a link would
//! replace something that already exists, the user is asked first through a
//! [`Confirm`] handle. The handle is injected, so the whole thing can be driven
//! by scripted input in tests.
//!
//! # Example
//!
//! ```no_run
//! use dotstrap::{Installer, Prompter};
//! use std::io;
//!
//! let mut installer = Installer::new(Prompter::new(io::stdin().lock(), io::stdout()));
//! installer.symlink("~/dotfiles/vimrc", "~/.vimrc")?;
//! installer.append("~/.bashrc", "source ~/dotfiles/bashrc")?;
//! # Ok::<(), dotstrap::InstallError>(())
//! ```

pub mod install;
pub mod path;
pub mod prompt;

pub use install::{AppendOutcome, InstallError, Installer, LinkOutcome, LinkState};
pub use prompt::{Confirm, PromptError, Prompter};
