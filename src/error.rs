//! Error types for shutil.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during copy and move operations, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | IO | [`Error::Io`], [`Error::SizeMismatch`] |
//! | Validation | [`Error::NotADirectory`], [`Error::IsADirectory`], [`Error::SpecialFile`], [`Error::NoFileName`], [`Error::InvalidPattern`] |
//! | Conflict | [`Error::SameFile`], [`Error::AlreadyExists`], [`Error::MoveOntoSelf`] |
//! | Safety | [`Error::SymlinkLoop`] |

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for shutil operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during copy and move operations.
///
/// Every variant carries the path(s) involved. Operations stop at the first
/// error; nothing already written to the destination is cleaned up.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error, tagged with the path the failing call was made on
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Source and destination resolve to the same file
    #[error("{src} and {dst} are the same file")]
    SameFile {
        /// Source path
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
    },

    /// Path is a named pipe
    #[error("`{0}` is a named pipe")]
    SpecialFile(PathBuf),

    /// Source is not a directory
    #[error("`{0}` is not a directory")]
    NotADirectory(PathBuf),

    /// Destination already exists
    #[error("`{0}` already exists")]
    AlreadyExists(PathBuf),

    /// A directory would be moved inside itself
    #[error("Cannot move a directory `{src}` into itself `{dst}`")]
    MoveOntoSelf {
        /// Directory being moved
        src: PathBuf,
        /// Destination inside `src`
        dst: PathBuf,
    },

    /// Source is a directory, use `copy_tree` instead
    #[error("Source is a directory, use copy_tree instead: {0}")]
    IsADirectory(PathBuf),

    /// Number of bytes written differs from the source size
    #[error("{path}: {copied}/{expected} bytes copied")]
    SizeMismatch {
        /// Source file
        path: PathBuf,
        /// Bytes actually copied
        copied: u64,
        /// Size of the source before the copy started
        expected: u64,
    },

    /// Following symlinks led back to a directory already being copied
    #[error("Symlink loop detected: {0}")]
    SymlinkLoop(PathBuf),

    /// Path has no final component to use as a name
    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),

    /// Ignore pattern failed to compile
    #[error("Invalid ignore pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Underlying error
        #[source]
        source: globset::Error,
    },
}

impl Error {
    /// Create an [`Error::Io`] with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The underlying IO error, if this error wraps one.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Attach a path to an [`io::Result`].
pub(crate) trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    #[inline]
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}
