//! Path classification and low-level helpers for copy operations.
//!
//! The classification functions never fail: a path that cannot be stat'ed
//! simply is not a directory, not a symlink, and not the same file as
//! anything else.

use std::fs::{self, File, FileType};
use std::io;
use std::path::Path;

// =============================================================================
// File content copying
// =============================================================================

/// Copy all remaining bytes from `src` to `dst`, returning the count.
///
/// On Linux this uses `copy_file_range` so data stays in the kernel.
/// Falls back to `std::io::copy` on other platforms or when the syscall is
/// not usable for this pair of files.
pub(crate) fn copy_file_contents(src: &File, dst: &File) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        copy_file_range_all(src, dst)
    }
    #[cfg(not(target_os = "linux"))]
    {
        use std::io::BufReader;
        io::copy(&mut BufReader::new(src), &mut &*dst)
    }
}

/// Linux-specific: copy using copy_file_range(2) until EOF.
///
/// The loop runs to end of file rather than to the size observed before the
/// copy, so a file that changes underneath us shows up as a size mismatch.
#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    const CHUNK_SIZE: usize = 128 * 1024 * 1024;

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut copied: u64 = 0;

    loop {
        // SAFETY: both descriptors are open for the lifetime of the borrowed
        // files; null offsets mean "use and advance the file position".
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(),
                dst_fd,
                std::ptr::null_mut(),
                CHUNK_SIZE,
                0,
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            // EXDEV: cross-device, ENOSYS: not supported, EINVAL: fs doesn't support it
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV)
                        | Some(libc::ENOSYS)
                        | Some(libc::EINVAL)
                        | Some(libc::EOPNOTSUPP)
                )
            {
                use std::io::BufReader;
                return io::copy(&mut BufReader::new(src), &mut &*dst);
            }
            return Err(err);
        }

        if result == 0 {
            break;
        }

        copied += result as u64;
    }

    Ok(copied)
}

// =============================================================================
// Classification
// =============================================================================

/// Check if `path` itself is a symlink, without following it.
#[inline]
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Check if `path` is a directory, following symlinks.
///
/// Errors (including a missing path) count as "not a directory".
#[inline]
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Check if a file type is a named pipe.
///
/// Sockets and device nodes are not treated as special.
#[inline]
pub fn is_special_file(file_type: FileType) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        file_type.is_fifo()
    }
    #[cfg(not(unix))]
    {
        let _ = file_type;
        false
    }
}

/// Check if two paths refer to the same underlying file after following
/// symlinks. Returns false if either path cannot be stat'ed.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (file_key(a), file_key(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get a unique key for a file based on device and inode.
///
/// On Unix, returns (dev, ino). On non-Unix, falls back to a hash of the
/// canonical path.
#[cfg(unix)]
pub(crate) fn file_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    let meta = fs::metadata(path)?;
    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
pub(crate) fn file_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}

// =============================================================================
// Platform shims
// =============================================================================

#[cfg(unix)]
pub(crate) use std::os::unix::fs::symlink;

#[cfg(windows)]
pub(crate) fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = link.parent().map_or_else(|| target.to_path_buf(), |p| p.join(target));
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(any(unix, windows)))]
pub(crate) fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Symlinks not supported on this platform",
    ))
}

/// Create a directory with the given permission bits (umask applies).
#[cfg(unix)]
pub(crate) fn create_dir_with_mode(path: &Path, mode: u32, recursive: bool) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(recursive)
        .mode(mode)
        .create(path)
}

#[cfg(not(unix))]
pub(crate) fn create_dir_with_mode(path: &Path, _mode: u32, recursive: bool) -> io::Result<()> {
    fs::DirBuilder::new().recursive(recursive).create(path)
}

/// Permission bits of a metadata record, as passed to [`create_dir_with_mode`].
#[cfg(unix)]
pub(crate) fn mode_of(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
pub(crate) fn mode_of(_meta: &fs::Metadata) -> u32 {
    0o777
}

// =============================================================================
// Tests
// =============================================================================
