//! Lexical path helpers.
//!
//! Nothing in this module touches the filesystem except to read the current
//! working directory when making a relative path absolute.

use crate::error::{Error, IoResultExt, Result};
use std::ffi::OsStr;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

/// Make `path` absolute against the current directory and remove `.`, `..`
/// and redundant separators without resolving symlinks.
pub(crate) fn absolute_clean(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().at(path)?.join(path)
    };
    Ok(clean(&absolute))
}

/// Lexically normalize a path. `..` at the root stays at the root.
pub(crate) fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Whether `dst` lies inside (or is) the directory `src`.
///
/// Both paths are made absolute and cleaned, then compared as strings with a
/// trailing separator, so `/a/b` does not contain `/a/bc`.
pub fn dest_in_src(src: &Path, dst: &Path) -> Result<bool> {
    let src = with_trailing_separator(&absolute_clean(src)?);
    let dst = with_trailing_separator(&absolute_clean(dst)?);
    Ok(dst
        .as_os_str()
        .as_encoded_bytes()
        .starts_with(src.as_os_str().as_encoded_bytes()))
}

fn with_trailing_separator(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    if !s
        .as_encoded_bytes()
        .ends_with(MAIN_SEPARATOR_STR.as_bytes())
    {
        s.push(MAIN_SEPARATOR_STR);
    }
    PathBuf::from(s)
}

/// Final component of `path`, as `cp`/`mv` use it when the destination is a
/// directory.
pub(crate) fn basename(path: &Path) -> Result<&OsStr> {
    path.file_name()
        .ok_or_else(|| Error::NoFileName(path.to_path_buf()))
}
