//! Move operation, like `mv`.
//!
//! A move is a rename whenever the filesystem allows it. When it does not
//! (typically across filesystems), the source is recreated at the
//! destination and then removed:
//!
//! | Source | Fallback |
//! |--------|----------|
//! | symlink | new link with the same target, then unlink |
//! | directory | [`copy_tree`] with symlinks preserved, then remove the tree |
//! | anything else | the configured [`CopyFunction`](crate::CopyFunction), then unlink |
//!
//! None of the fallbacks roll back: if removing the source fails, both
//! copies remain.

use crate::copy::utils::{is_directory, same_file, symlink};
use crate::copy::{TreeCopier, copy_tree};
use crate::error::{Error, IoResultExt, Result};
use crate::options::{MoveOptions, TreeCopyOptions};
use crate::utils::path::{basename, dest_in_src};
use std::fs;
use std::path::{Path, PathBuf};

/// Move a file or directory to another location. Returns the final
/// destination.
///
/// If `dst` is an existing directory (or a symlink to one), `src` is moved
/// inside it and nothing may already exist there under `src`'s name. Otherwise
/// `dst` is the new path, and an existing non-directory `dst` may be replaced
/// following the platform's rename rules.
///
/// # Example
///
/// ```no_run
/// use shutil::{MoveOptions, move_path};
/// use std::path::Path;
///
/// let dst = move_path(Path::new("build/app"), Path::new("/opt/"), &MoveOptions::default())?;
/// assert_eq!(dst, Path::new("/opt/app"));
/// # Ok::<(), shutil::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - `dst` is a directory already holding an entry named like `src` ([`Error::AlreadyExists`])
/// - A directory would be moved into its own subtree ([`Error::MoveOntoSelf`])
/// - `src` has no final component to move under `dst` ([`Error::NoFileName`])
/// - The fallback copy fails (its error is returned as-is)
/// - IO operations fail ([`Error::Io`])
pub fn move_path(src: &Path, dst: &Path, options: &MoveOptions) -> Result<PathBuf> {
    let mut real_dst = dst.to_path_buf();

    if is_directory(dst) {
        if same_file(src, dst) {
            // Possibly a case change on a case-insensitive filesystem
            fs::rename(src, dst).at(src)?;
            return Ok(dst.to_path_buf());
        }

        real_dst = dst.join(basename(src)?);
        if fs::symlink_metadata(&real_dst).is_ok() {
            return Err(Error::AlreadyExists(real_dst));
        }
    }

    match fs::rename(src, &real_dst) {
        Ok(()) => return Ok(real_dst),
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                src = %src.display(),
                dst = %real_dst.display(),
                error = %e,
                "rename failed, falling back to copy"
            );
        }
    }

    let src_meta = fs::symlink_metadata(src).at(src)?;

    if src_meta.file_type().is_symlink() {
        let target = fs::read_link(src).at(src)?;
        symlink(&target, &real_dst).at(&real_dst)?;
        fs::remove_file(src).at(src)?;
    } else if src_meta.is_dir() {
        if dest_in_src(src, dst)? {
            return Err(Error::MoveOntoSelf {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
            });
        }
        let copier = TreeCopier::for_move(options);
        copy_tree(src, &real_dst, copier.options())?;
        fs::remove_dir_all(src).at(src)?;
    } else {
        options.copy_function.copy(src, &real_dst, true)?;
        fs::remove_file(src).at(src)?;
    }

    Ok(real_dst)
}

impl TreeCopier {
    /// A tree copier configured the way [`move_path`] copies directories:
    /// symlinks preserved, dangling links copied as links.
    #[must_use]
    pub fn for_move(options: &MoveOptions) -> Self {
        Self::new(TreeCopyOptions {
            symlinks: true,
            ignore_dangling_symlinks: false,
            copy_function: options.copy_function.clone(),
            ignore: None,
            warn_handler: None,
        })
    }
}
