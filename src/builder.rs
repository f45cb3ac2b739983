//! Builder API for copy and move operations.
//!
//! The builders wrap the free functions with a fluent interface, which is
//! often more convenient than constructing [`TreeCopyOptions`] or
//! [`MoveOptions`] by hand.
//!
//! # Examples
//!
//! ## Copying
//!
//! ```no_run
//! use shutil::CopyBuilder;
//!
//! // A directory is copied as a tree, anything else with `copy`
//! let dst = CopyBuilder::new("assets", "public/assets").run()?;
//! println!("copied to {}", dst.display());
//! # Ok::<(), shutil::Error>(())
//! ```
//!
//! ## Preserving Links and Skipping Build Output
//!
//! ```no_run
//! use shutil::{CopyBuilder, IgnorePatterns};
//!
//! CopyBuilder::new("project", "project.bak")
//!     .symlinks()
//!     .ignore(IgnorePatterns::new(["target", "*.o"])?)
//!     .run_tree()?;
//! # Ok::<(), shutil::Error>(())
//! ```
//!
//! ## Moving
//!
//! ```no_run
//! use shutil::MoveBuilder;
//!
//! let dst = MoveBuilder::new("download.part", "inbox/").run()?;
//! # Ok::<(), shutil::Error>(())
//! ```

use crate::copy::utils::is_directory;
use crate::copy::{CopyFunction, copy, copy_tree};
use crate::error::Result;
use crate::ignore::IgnoreFunction;
use crate::move_op::move_path;
use crate::options::{MoveOptions, TreeCopyOptions};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing copy operations.
///
/// `CopyBuilder` detects whether the source is a directory and calls
/// [`copy_tree`] or [`copy`] accordingly.
///
/// # Example
///
/// ```no_run
/// use shutil::CopyBuilder;
///
/// CopyBuilder::new("/data/project", "/backup/project")
///     .ignore_dangling_symlinks()
///     .on_warning(|msg| eprintln!("warning: {msg}"))
///     .run()?;
/// # Ok::<(), shutil::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    follow_symlinks: bool,
    options: TreeCopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Symlinks are followed and every entry is copied.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            follow_symlinks: true,
            options: TreeCopyOptions::default(),
        }
    }

    /// Recreate symlinks found inside a tree instead of copying their targets.
    #[must_use]
    pub fn symlinks(mut self) -> Self {
        self.options = self.options.with_symlinks(true);
        self
    }

    /// Whether a symlink given as the source of a single-file copy is
    /// followed (default: true).
    ///
    /// When false the link itself is recreated at the destination.
    #[must_use]
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Skip links whose target is missing instead of failing.
    ///
    /// Has no effect together with [`symlinks`](Self::symlinks), since
    /// preserved links are never resolved.
    #[must_use]
    pub fn ignore_dangling_symlinks(mut self) -> Self {
        self.options = self.options.with_ignore_dangling_symlinks(true);
        self
    }

    /// Leave out the entries chosen by `ignore` in every directory.
    #[must_use]
    pub fn ignore(mut self, ignore: impl IgnoreFunction + 'static) -> Self {
        self.options = self.options.with_ignore(ignore);
        self
    }

    /// Use a different function to copy each file of a tree.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shutil::{CopyBuilder, copy_file};
    /// use std::path::{Path, PathBuf};
    ///
    /// // Contents only, no permission bits
    /// CopyBuilder::new("src", "dst")
    ///     .copy_function(|src: &Path, dst: &Path, follow: bool| -> shutil::Result<PathBuf> {
    ///         copy_file(src, dst, follow)?;
    ///         Ok(dst.to_path_buf())
    ///     })
    ///     .run_tree()?;
    /// # Ok::<(), shutil::Error>(())
    /// ```
    #[must_use]
    pub fn copy_function(mut self, copy_function: impl CopyFunction + 'static) -> Self {
        self.options = self.options.with_copy_function(copy_function);
        self
    }

    /// Set a warning handler for non-fatal issues, such as skipped dangling
    /// links.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Get a reference to the tree options built so far.
    pub fn options(&self) -> &TreeCopyOptions {
        &self.options
    }

    /// Execute the copy operation, returning the path written.
    ///
    /// A source that is a directory (or a link to one) is copied with
    /// [`copy_tree`] and the destination is returned unchanged. Anything
    /// else goes through [`copy`], so a directory destination receives a
    /// file of the same name.
    ///
    /// # Errors
    ///
    /// Returns whatever the selected operation returns.
    pub fn run(self) -> Result<PathBuf> {
        if is_directory(&self.src) {
            self.run_tree()
        } else {
            self.run_file()
        }
    }

    /// Execute a tree copy regardless of the source type.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotADirectory`](crate::Error::NotADirectory) if the
    /// source is not a directory, otherwise as [`copy_tree`].
    pub fn run_tree(self) -> Result<PathBuf> {
        copy_tree(&self.src, &self.dst, &self.options)?;
        Ok(self.dst)
    }

    /// Execute a single-file copy with [`copy`].
    ///
    /// The configured copy function and tree options are not used.
    ///
    /// # Errors
    ///
    /// As [`copy`].
    pub fn run_file(self) -> Result<PathBuf> {
        copy(&self.src, &self.dst, self.follow_symlinks)
    }
}

/// A builder for move operations.
///
/// ```no_run
/// use shutil::{MoveBuilder, copy};
/// use std::path::Path;
///
/// let dst = MoveBuilder::new("/tmp/report.pdf", "/mnt/archive/")
///     .copy_function(|src: &Path, dst: &Path, follow: bool| {
///         eprintln!("rename failed, copying {}", src.display());
///         copy(src, dst, follow)
///     })
///     .run()?;
/// # Ok::<(), shutil::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MoveBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: MoveOptions,
}

impl MoveBuilder {
    /// Create a new `MoveBuilder` with the given source and destination paths.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: MoveOptions::default(),
        }
    }

    /// Use a different function for the copy-then-delete fallback.
    #[must_use]
    pub fn copy_function(mut self, copy_function: impl CopyFunction + 'static) -> Self {
        self.options = self.options.with_copy_function(copy_function);
        self
    }

    /// Execute the move, returning the final destination.
    ///
    /// # Errors
    ///
    /// As [`move_path`].
    pub fn run(self) -> Result<PathBuf> {
        move_path(&self.src, &self.dst, &self.options)
    }
}
