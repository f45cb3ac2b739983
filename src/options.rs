//! Configuration options for tree copy and move operations.
//!
//! This module provides [`TreeCopyOptions`] for [`copy_tree`](crate::copy_tree)
//! and [`MoveOptions`] for [`move_path`](crate::move_path).
//!
//! # Example
//!
//! ```
//! use shutil::{IgnoreNames, TreeCopyOptions};
//!
//! let options = TreeCopyOptions::default()
//!     .with_symlinks(true)
//!     .with_ignore(IgnoreNames::new(["target", ".git"]));
//! ```

use crate::copy::{CopyFunction, copy};
use crate::ignore::IgnoreFunction;
use std::fmt;
use std::sync::Arc;

fn default_copy_function() -> Arc<dyn CopyFunction> {
    Arc::new(copy)
}

/// Options for [`copy_tree`](crate::copy_tree).
///
/// Use [`Default::default()`] to get `cp -R`-like defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `symlinks` | `false` | Follow symlinks and copy what they point to |
/// | `ignore_dangling_symlinks` | `false` | Broken links are an error |
/// | `copy_function` | [`copy`] | Per-file copy |
/// | `ignore` | `None` | Copy every entry |
/// | `warn_handler` | `None` | Warnings go to `tracing` if enabled |
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeCopyOptions {
    /// Recreate symlinks in the destination instead of following them
    /// (default: false)
    ///
    /// The new link gets the same target string as the original. When false,
    /// the contents of the file (or directory) a link points to are copied.
    pub symlinks: bool,

    /// Skip links whose target does not exist (default: false)
    ///
    /// Only consulted when `symlinks` is false. Without it, a dangling link
    /// aborts the copy.
    pub ignore_dangling_symlinks: bool,

    /// Function used to copy each non-directory entry (default: [`copy`])
    ///
    /// Always called with `follow_symlinks = false`.
    #[cfg_attr(feature = "serde", serde(skip, default = "default_copy_function"))]
    pub copy_function: Arc<dyn CopyFunction>,

    /// Predicate selecting entries to leave out, called once per directory
    #[cfg_attr(feature = "serde", serde(skip))]
    pub ignore: Option<Arc<dyn IgnoreFunction>>,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for TreeCopyOptions {
    fn default() -> Self {
        Self {
            symlinks: false,
            ignore_dangling_symlinks: false,
            copy_function: default_copy_function(),
            ignore: None,
            warn_handler: None,
        }
    }
}

impl fmt::Debug for TreeCopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeCopyOptions")
            .field("symlinks", &self.symlinks)
            .field("ignore_dangling_symlinks", &self.ignore_dangling_symlinks)
            .field("ignore", &self.ignore.is_some())
            .field("warn_handler", &self.warn_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl TreeCopyOptions {
    /// Preserve symlinks (`true`) or follow them (`false`)
    #[must_use]
    pub fn with_symlinks(mut self, symlinks: bool) -> Self {
        self.symlinks = symlinks;
        self
    }

    /// Skip dangling symlinks instead of failing when following links
    #[must_use]
    pub fn with_ignore_dangling_symlinks(mut self, ignore: bool) -> Self {
        self.ignore_dangling_symlinks = ignore;
        self
    }

    /// Use a different function to copy each file
    #[must_use]
    pub fn with_copy_function(mut self, copy_function: impl CopyFunction + 'static) -> Self {
        self.copy_function = Arc::new(copy_function);
        self
    }

    /// Leave out the entries chosen by `ignore` in every directory
    #[must_use]
    pub fn with_ignore(mut self, ignore: impl IgnoreFunction + 'static) -> Self {
        self.ignore = Some(Arc::new(ignore));
        self
    }

    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}

/// Options for [`move_path`](crate::move_path).
///
/// The copy function is only used when a rename is not possible, typically
/// because source and destination are on different filesystems. It defaults
/// to [`copy`].
#[derive(Clone)]
pub struct MoveOptions {
    /// Function used to copy a file (or each file of a directory) when the
    /// rename fails
    pub copy_function: Arc<dyn CopyFunction>,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            copy_function: default_copy_function(),
        }
    }
}

impl fmt::Debug for MoveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveOptions").finish_non_exhaustive()
    }
}

impl MoveOptions {
    /// Use a different function for the copy-then-delete fallback
    #[must_use]
    pub fn with_copy_function(mut self, copy_function: impl CopyFunction + 'static) -> Self {
        self.copy_function = Arc::new(copy_function);
        self
    }
}
