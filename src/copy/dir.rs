//! Directory tree copy.
//!
//! [`copy_tree`] walks the source with an explicit stack instead of
//! recursion, so deep trees cannot overflow the call stack. Each directory
//! is listed before its destination is created, which keeps a destination
//! nested inside the source out of its own listing.

use crate::copy::CopyFunction;
use crate::error::{Error, IoResultExt, Result};
use crate::options::TreeCopyOptions;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::utils::{create_dir_with_mode, file_key, mode_of, symlink};

/// A source directory waiting to be copied.
struct PendingDir {
    src: PathBuf,
    dst: PathBuf,
    mode: u32,
    /// `(dev, ino)` of every directory above this one in the walk
    ancestors: Vec<(u64, u64)>,
}

/// State of one [`copy_tree`] call.
struct TreeWalk<'a> {
    options: &'a TreeCopyOptions,
    stack: Vec<PendingDir>,
    /// Key of the destination root once created, so a destination nested
    /// inside the source is never copied into itself
    dst_root: Option<(u64, u64)>,
}

/// Recursively copy a directory tree.
///
/// `dst` must not exist yet; it is created (along with any missing parents)
/// with the permission bits of `src`. Each directory is listed, filtered
/// through [`TreeCopyOptions::ignore`], and its entries copied:
///
/// - symlinks are recreated verbatim when [`TreeCopyOptions::symlinks`] is
///   set, otherwise the file or directory they point to is copied
/// - directories are copied recursively with the same options
/// - everything else goes through [`TreeCopyOptions::copy_function`] with
///   `follow_symlinks = false`
///
/// The first error aborts the copy. Whatever was created before it stays in
/// place.
///
/// # Example
///
/// ```no_run
/// use shutil::{TreeCopyOptions, copy_tree};
/// use std::path::Path;
///
/// let options = TreeCopyOptions::default().with_symlinks(true);
/// copy_tree(Path::new("site"), Path::new("site.bak"), &options)?;
/// # Ok::<(), shutil::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Source is not a directory ([`Error::NotADirectory`])
/// - Destination exists ([`Error::AlreadyExists`])
/// - A followed symlink leads back into its own ancestry ([`Error::SymlinkLoop`])
/// - A symlink is dangling, unless `ignore_dangling_symlinks` is set ([`Error::Io`])
/// - The copy function fails for any entry (its error is returned as-is)
/// - IO operations fail ([`Error::Io`])
pub fn copy_tree(src: &Path, dst: &Path, options: &TreeCopyOptions) -> Result<()> {
    let src_meta = fs::metadata(src).at(src)?;
    if !src_meta.is_dir() {
        return Err(Error::NotADirectory(src.to_path_buf()));
    }

    match fs::symlink_metadata(dst) {
        Ok(_) => return Err(Error::AlreadyExists(dst.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(dst, e)),
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(src = %src.display(), dst = %dst.display(), "copying tree");

    let mut walk = TreeWalk {
        options,
        stack: Vec::new(),
        dst_root: None,
    };
    walk.copy_dir(PendingDir {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        mode: mode_of(&src_meta),
        ancestors: Vec::new(),
    })?;

    while let Some(pending) = walk.stack.pop() {
        walk.copy_dir(pending)?;
    }

    Ok(())
}

impl TreeWalk<'_> {
    /// Copy one directory level, queueing its subdirectories.
    fn copy_dir(&mut self, dir: PendingDir) -> Result<()> {
        let PendingDir {
            src,
            dst,
            mode,
            mut ancestors,
        } = dir;

        let key = file_key(&src).at(&src)?;
        if ancestors.contains(&key) {
            return Err(Error::SymlinkLoop(src));
        }
        ancestors.push(key);

        let entries = fs::read_dir(&src)
            .at(&src)?
            .collect::<io::Result<Vec<_>>>()
            .at(&src)?;

        self.create_dst_dir(&dst, mode)?;

        let ignored: HashSet<OsString> = match &self.options.ignore {
            Some(ignore) => ignore.ignore(&src, &entries),
            None => HashSet::new(),
        };

        for entry in &entries {
            let name = entry.file_name();
            if ignored.contains(&name) {
                continue;
            }

            let src_path = entry.path();
            let dst_path = dst.join(&name);

            // Check symlink FIRST (DirEntry::file_type does not follow links)
            let file_type = entry.file_type().at(&src_path)?;

            if file_type.is_symlink() {
                self.copy_symlink(src_path, dst_path, &ancestors)?;
            } else if file_type.is_dir() {
                if self.is_dst_root(&src_path) {
                    continue;
                }
                let meta = entry.metadata().at(&src_path)?;
                self.stack.push(PendingDir {
                    src: src_path,
                    dst: dst_path,
                    mode: mode_of(&meta),
                    ancestors: ancestors.clone(),
                });
            } else {
                self.options
                    .copy_function
                    .copy(&src_path, &dst_path, false)?;
            }
        }

        Ok(())
    }

    /// The root is created with its parents; nested directories must be new.
    fn create_dst_dir(&mut self, dst: &Path, mode: u32) -> Result<()> {
        let is_root = self.dst_root.is_none();
        match create_dir_with_mode(dst, mode, is_root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyExists(dst.to_path_buf()));
            }
            Err(e) => return Err(Error::io(dst, e)),
        }
        if is_root {
            self.dst_root = Some(file_key(dst).at(dst)?);
        }
        Ok(())
    }

    fn is_dst_root(&self, path: &Path) -> bool {
        match (self.dst_root, file_key(path)) {
            (Some(root), Ok(key)) => root == key,
            _ => false,
        }
    }

    fn copy_symlink(&mut self, src: PathBuf, dst: PathBuf, ancestors: &[(u64, u64)]) -> Result<()> {
        if self.options.symlinks {
            let target = fs::read_link(&src).at(&src)?;
            return symlink(&target, &dst).at(&dst);
        }

        let target_meta = match fs::metadata(&src) {
            Ok(meta) => meta,
            Err(e)
                if e.kind() == io::ErrorKind::NotFound && self.options.ignore_dangling_symlinks =>
            {
                self.options
                    .warn(&format!("Skipping dangling symlink {}", src.display()));
                return Ok(());
            }
            Err(e) => return Err(Error::io(&src, e)),
        };

        if target_meta.is_dir() {
            if self.is_dst_root(&src) {
                return Ok(());
            }
            self.stack.push(PendingDir {
                src,
                dst,
                mode: mode_of(&target_meta),
                ancestors: ancestors.to_vec(),
            });
        } else {
            let resolved = fs::canonicalize(&src).at(&src)?;
            self.options.copy_function.copy(&resolved, &dst, false)?;
        }
        Ok(())
    }
}

/// [`copy_tree`] packaged as a [`CopyFunction`].
///
/// Lets a whole directory be handed to anything that accepts a copy
/// function. `follow_symlinks` is ignored; symlink handling comes from the
/// wrapped [`TreeCopyOptions`]. Returns `dst`.
#[derive(Debug, Clone, Default)]
pub struct TreeCopier {
    options: TreeCopyOptions,
}

impl TreeCopier {
    /// Wrap the given options.
    #[must_use]
    pub fn new(options: TreeCopyOptions) -> Self {
        Self { options }
    }

    /// The options every copy uses.
    #[must_use]
    pub fn options(&self) -> &TreeCopyOptions {
        &self.options
    }
}

impl CopyFunction for TreeCopier {
    fn copy(&self, src: &Path, dst: &Path, _follow_symlinks: bool) -> Result<PathBuf> {
        copy_tree(src, dst, &self.options)?;
        Ok(dst.to_path_buf())
    }
}

// =============================================================================
// Tests
// =============================================================================
