//! Core copy operations.
//!
//! This module provides the single-file primitives ([`copy_file`],
//! [`copy_mode`], [`copy`]), the recursive [`copy_tree`], and the
//! [`CopyFunction`] capability that ties them together.

mod dir;
mod file;
pub(crate) mod utils;

use crate::error::Result;
use std::path::{Path, PathBuf};

// Re-export public API
pub use dir::{TreeCopier, copy_tree};
pub use file::{copy, copy_file, copy_mode};

/// A pluggable per-entry copy operation.
///
/// Called with a source, a destination and whether symlinks at `src` should
/// be followed; returns the path actually written. Implementations may be
/// called many times with different destinations and must not assume either
/// path has been validated.
///
/// Any `Fn(&Path, &Path, bool) -> Result<PathBuf>` implements this trait, so
/// [`copy`] itself is a copy function, and so is a closure wrapping it:
///
/// ```no_run
/// use shutil::{TreeCopyOptions, copy, copy_tree};
/// use std::path::Path;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// let count = Arc::new(AtomicU64::new(0));
/// let counter = Arc::clone(&count);
/// let options = TreeCopyOptions::default().with_copy_function(
///     move |src: &Path, dst: &Path, follow: bool| {
///         counter.fetch_add(1, Ordering::Relaxed);
///         copy(src, dst, follow)
///     },
/// );
/// copy_tree(Path::new("src"), Path::new("dst"), &options)?;
/// println!("{} files", count.load(Ordering::Relaxed));
/// # Ok::<(), shutil::Error>(())
/// ```
pub trait CopyFunction: Send + Sync {
    /// Copy `src` to `dst`, returning the final destination.
    fn copy(&self, src: &Path, dst: &Path, follow_symlinks: bool) -> Result<PathBuf>;
}

impl<F> CopyFunction for F
where
    F: Fn(&Path, &Path, bool) -> Result<PathBuf> + Send + Sync,
{
    fn copy(&self, src: &Path, dst: &Path, follow_symlinks: bool) -> Result<PathBuf> {
        self(src, dst, follow_symlinks)
    }
}
