//! # shutil
//!
//! High-level file operations in the style of `cp` and `mv`: copy a file,
//! its permission bits, or a whole directory tree, and move files or trees
//! across filesystems.
//!
//! ## Core Features
//!
//! - **`cp`-like copy**: [`copy`] copies contents and permission bits, into a
//!   directory when the destination is one
//! - **Symlink aware**: every operation can follow links or recreate them
//!   with the same target
//! - **Tree copy**: [`copy_tree`] duplicates a directory into a new location,
//!   with ignore predicates and a pluggable per-file copy function
//! - **Safe move**: [`move_path`] renames when possible and falls back to
//!   copy-then-delete, refusing to move a directory into itself
//! - **Kernel-side copies**: file contents go through `copy_file_range` on
//!   Linux
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use shutil::{CopyBuilder, IgnoreNames, MoveBuilder};
//!
//! CopyBuilder::new("project", "project.bak")
//!     .symlinks()
//!     .ignore(IgnoreNames::new(["target", ".git"]))
//!     .run()?;
//!
//! MoveBuilder::new("project.bak", "/mnt/backup/").run()?;
//! # Ok::<(), shutil::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use shutil::{MoveOptions, TreeCopyOptions, copy, copy_tree, move_path};
//! use std::path::Path;
//!
//! // Like `cp notes.txt backup/`
//! let written = copy(Path::new("notes.txt"), Path::new("backup"), true)?;
//!
//! // Like `cp -R site site.old`, following symlinks
//! copy_tree(Path::new("site"), Path::new("site.old"), &TreeCopyOptions::default())?;
//!
//! // Like `mv site.old /srv/`
//! move_path(Path::new("site.old"), Path::new("/srv"), &MoveOptions::default())?;
//! # Ok::<(), shutil::Error>(())
//! ```
//!
//! ## Guarantees and Limits
//!
//! - Copying a file onto itself fails with [`Error::SameFile`] before the
//!   destination is touched.
//! - Named pipes are refused with [`Error::SpecialFile`] instead of blocking.
//! - [`copy_tree`] never merges into an existing directory.
//! - Operations stop at the first error and do not roll back.
//! - Only permission bits are preserved; timestamps, ownership and extended
//!   attributes are not.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`TreeCopyOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod ignore;
mod move_op;
mod options;
mod utils;

pub use builder::{CopyBuilder, MoveBuilder};
pub use copy::utils::{is_directory, is_special_file, is_symlink, same_file};
pub use copy::{CopyFunction, TreeCopier, copy, copy_file, copy_mode, copy_tree};
pub use error::{Error, Result};
pub use ignore::{IgnoreFunction, IgnoreNames, IgnorePatterns};
pub use move_op::move_path;
pub use options::{MoveOptions, TreeCopyOptions};
pub use utils::path::dest_in_src;
