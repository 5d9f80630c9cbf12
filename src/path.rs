// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine absolute and real paths for the files that need to be linked or
//! edited. Paths given to dotstrap may use `~` as shorthand for the user's
//! home directory, and may be relative to the current working directory.

use std::{
    io,
    path::{Component, Path, PathBuf},
};

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if home directory path cannot be
///   determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(PathError::NoWayHome)
}

/// Expand path into absolute form.
///
/// A leading `~` is replaced with the user's home directory. Relative paths
/// are then made absolute against the current working directory, and `.` or
/// `..` components are folded lexically. Symbolic links are __not__ followed,
/// so the result may still point through a link. Use [`real_path`] for that.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if path uses `~` but home directory
///   cannot be determined.
/// - Return [`PathError::Absolute`] if current working directory cannot be
///   determined for a relative path.
pub fn expand_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let expanded = match path.to_str() {
        Some(raw) if raw.starts_with('~') => {
            let home = home_dir()?;
            let expanded = shellexpand::tilde_with_context(raw, || {
                Some(home.to_string_lossy().into_owned())
            });
            PathBuf::from(expanded.into_owned())
        }
        _ => path.to_path_buf(),
    };

    let absolute = std::path::absolute(&expanded).map_err(|err| PathError::Absolute {
        source: err,
        path: expanded.clone(),
    })?;

    Ok(fold_components(&absolute))
}

/// Resolve real path of target path.
///
/// Follows every symbolic link in the path. Returns `None` when the path, or
/// the final target of a link chain, does not exist. Broken links thus have
/// no real path.
///
/// # Errors
///
/// - Return [`PathError::RealPath`] if resolution fails for any reason other
///   than a missing entry, e.g., permission denied or a link loop.
pub fn real_path(path: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    match std::fs::canonicalize(path.as_ref()) {
        Ok(real) => Ok(Some(real)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(PathError::RealPath {
            source: err,
            path: path.as_ref().to_path_buf(),
        }),
    }
}

fn fold_components(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => continue,
            // INVARIANT: Never pop past the root or prefix.
            Component::ParentDir => {
                if folded.parent().is_some() {
                    folded.pop();
                }
            }
            other => folded.push(other.as_os_str()),
        }
    }

    folded
}

/// Path resolution error types.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// No way to determine user's home directory.
    ///
    /// # See Also
    ///
    /// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
    #[error("cannot determine absolute path to user's home directory")]
    NoWayHome,

    /// Relative path cannot be made absolute.
    #[error("failed to make {:?} absolute", path.display())]
    Absolute {
        #[source]
        source: io::Error,
        path: PathBuf,
    },

    /// Real path cannot be resolved.
    #[error("failed to resolve real path of {:?}", path.display())]
    RealPath {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test(env = [("HOME", "/home/blah")])]
    fn expand_path_replaces_home_shorthand() -> anyhow::Result<()> {
        assert_eq!(expand_path("~/.bashrc")?, PathBuf::from("/home/blah/.bashrc"));
        assert_eq!(expand_path("~")?, PathBuf::from("/home/blah"));
        assert_eq!(
            expand_path("~/dotfiles/../.vimrc")?,
            PathBuf::from("/home/blah/.vimrc")
        );

        Ok(())
    }

    #[sealed_test]
    fn expand_path_absolutizes_relative_path() -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        assert_eq!(expand_path("foo/./bar")?, cwd.join("foo").join("bar"));
        assert_eq!(expand_path("foo/../bar")?, cwd.join("bar"));

        Ok(())
    }

    #[test]
    fn expand_path_keeps_absolute_path() -> anyhow::Result<()> {
        assert_eq!(expand_path("/etc/./profile")?, PathBuf::from("/etc/profile"));
        assert_eq!(expand_path("/../etc")?, PathBuf::from("/etc"));

        Ok(())
    }

    #[cfg(unix)]
    #[sealed_test]
    fn real_path_follows_links() -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?.canonicalize()?;
        std::fs::write("target", "blah")?;
        std::os::unix::fs::symlink(cwd.join("target"), "link")?;
        std::os::unix::fs::symlink(cwd.join("missing"), "broken")?;

        assert_eq!(real_path("link")?, Some(cwd.join("target")));
        assert_eq!(real_path("target")?, Some(cwd.join("target")));
        assert_eq!(real_path("broken")?, None);
        assert_eq!(real_path("nothing")?, None);

        Ok(())
    }
}
