//! Single file copy operations.
//!
//! This module provides [`copy_file`] (content or link), [`copy_mode`]
//! (permission bits) and [`copy`], which composes the two the way `cp` does.

use crate::error::{Error, IoResultExt, Result};
use crate::utils::path::basename;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use super::utils::{copy_file_contents, is_special_file, same_file, symlink};

/// Copy the contents of `src` to `dst`.
///
/// If `follow_symlinks` is false and `src` is a symlink, a new symlink is
/// created at `dst` pointing to `src` instead of copying the file it points
/// to. Otherwise a symlink is resolved one level and its target copied.
///
/// `dst` is created or truncated. It is not removed if the copy fails
/// part-way.
///
/// # Errors
///
/// Returns an error if:
/// - `src` and `dst` are the same file ([`Error::SameFile`])
/// - `src` or an existing `dst` is a named pipe ([`Error::SpecialFile`])
/// - The source is a directory ([`Error::IsADirectory`])
/// - Fewer or more bytes were written than the source held ([`Error::SizeMismatch`])
/// - IO operations fail ([`Error::Io`])
pub fn copy_file(src: &Path, dst: &Path, follow_symlinks: bool) -> Result<()> {
    if same_file(src, dst) {
        return Err(Error::SameFile {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    let mut src_meta = fs::symlink_metadata(src).at(src)?;
    if is_special_file(src_meta.file_type()) {
        return Err(Error::SpecialFile(src.to_path_buf()));
    }

    match fs::metadata(dst) {
        Ok(dst_meta) if is_special_file(dst_meta.file_type()) => {
            return Err(Error::SpecialFile(dst.to_path_buf()));
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(dst, e)),
    }

    let is_link = src_meta.file_type().is_symlink();

    if !follow_symlinks && is_link {
        return symlink(src, dst).at(dst);
    }

    let mut src = src.to_path_buf();
    if is_link {
        let target = fs::read_link(&src).at(&src)?;
        src = match src.parent() {
            Some(parent) if target.is_relative() => parent.join(target),
            _ => target,
        };
        src_meta = fs::metadata(&src).at(&src)?;
    }

    if src_meta.is_dir() {
        return Err(Error::IsADirectory(src));
    }

    let expected = src_meta.len();
    let src_file = File::open(&src).at(&src)?;
    let dst_file = File::create(dst).at(dst)?;
    let copied = copy_file_contents(&src_file, &dst_file).at(dst)?;

    if copied != expected {
        return Err(Error::SizeMismatch {
            path: src,
            copied,
            expected,
        });
    }

    Ok(())
}

/// Copy the permission bits of `src` onto `dst`.
///
/// If `follow_symlinks` is false and both paths are symlinks this does
/// nothing, since a link's own mode cannot be set portably. Otherwise the
/// mode of the file `src` refers to is applied to the file `dst` refers to.
///
/// # Errors
///
/// Returns [`Error::Io`] if either path cannot be stat'ed or the mode
/// cannot be set.
pub fn copy_mode(src: &Path, dst: &Path, follow_symlinks: bool) -> Result<()> {
    let src_lmeta = fs::symlink_metadata(src).at(src)?;
    let dst_lmeta = fs::symlink_metadata(dst).at(dst)?;

    if !follow_symlinks && src_lmeta.file_type().is_symlink() && dst_lmeta.file_type().is_symlink()
    {
        return Ok(());
    }

    let src_meta = fs::metadata(src).at(src)?;
    fs::set_permissions(dst, src_meta.permissions()).at(dst)
}

/// Copy data and mode bits, like `cp src dst`. Returns the file's destination.
///
/// If `dst` is an existing directory the file is copied into it under the
/// same name as `src`. If `follow_symlinks` is false a symlink `src` is
/// recreated rather than followed, like `cp -P`.
///
/// This function is the default [`CopyFunction`](crate::CopyFunction) for
/// [`copy_tree`](crate::copy_tree) and [`move_path`](crate::move_path).
///
/// # Example
///
/// ```no_run
/// use shutil::copy;
/// use std::path::Path;
///
/// let dst = copy(Path::new("notes.txt"), Path::new("backup/"), true)?;
/// assert_eq!(dst, Path::new("backup/notes.txt"));
/// # Ok::<(), shutil::Error>(())
/// ```
///
/// # Errors
///
/// Any error from [`copy_file`] or [`copy_mode`], plus [`Error::NoFileName`]
/// when `dst` is a directory and `src` has no final component.
pub fn copy(src: &Path, dst: &Path, follow_symlinks: bool) -> Result<PathBuf> {
    let dst = match fs::metadata(dst) {
        Ok(meta) if meta.is_dir() => dst.join(basename(src)?),
        Ok(_) => dst.to_path_buf(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => dst.to_path_buf(),
        Err(e) => return Err(Error::io(dst, e)),
    };

    copy_file(src, &dst, follow_symlinks)?;
    copy_mode(src, &dst, follow_symlinks)?;

    Ok(dst)
}

// =============================================================================
// Tests
// =============================================================================
