//! Ignore predicates for [`copy_tree`](crate::copy_tree).
//!
//! An [`IgnoreFunction`] is asked once per directory which of its entries to
//! leave out. Closures with the right signature implement it directly; two
//! ready-made implementations cover the common cases:
//!
//! - [`IgnoreNames`] drops entries with one of a fixed set of names.
//! - [`IgnorePatterns`] drops entries whose name matches a glob.
//!
//! # Example
//!
//! ```no_run
//! use shutil::{IgnorePatterns, TreeCopyOptions, copy_tree};
//! use std::path::Path;
//!
//! let options = TreeCopyOptions::default()
//!     .with_ignore(IgnorePatterns::new(["*.pyc", "target", ".git"])?);
//! copy_tree(Path::new("project"), Path::new("project.bak"), &options)?;
//! # Ok::<(), shutil::Error>(())
//! ```

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::DirEntry;
use std::path::Path;

/// Decides which entries of a directory [`copy_tree`](crate::copy_tree) skips.
///
/// `dir` is the source directory being visited and `entries` its contents.
/// The returned names are basenames relative to `dir`, compared exactly.
/// Skipped directories are not descended into.
pub trait IgnoreFunction: Send + Sync {
    /// Names in `dir` to leave out of the copy.
    fn ignore(&self, dir: &Path, entries: &[DirEntry]) -> HashSet<OsString>;
}

impl<F> IgnoreFunction for F
where
    F: Fn(&Path, &[DirEntry]) -> HashSet<OsString> + Send + Sync,
{
    fn ignore(&self, dir: &Path, entries: &[DirEntry]) -> HashSet<OsString> {
        self(dir, entries)
    }
}

/// Ignore entries with any of the given names, in every directory.
#[derive(Debug, Clone, Default)]
pub struct IgnoreNames {
    names: HashSet<OsString>,
}

impl IgnoreNames {
    /// Create a predicate ignoring exactly these names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl IgnoreFunction for IgnoreNames {
    fn ignore(&self, _dir: &Path, entries: &[DirEntry]) -> HashSet<OsString> {
        entries
            .iter()
            .map(DirEntry::file_name)
            .filter(|name| self.names.contains(name))
            .collect()
    }
}

/// Ignore entries whose name matches any of a set of glob patterns.
///
/// Patterns match the entry's name only, never its full path, so `*.o`
/// applies at every depth.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
    set: GlobSet,
}

impl IgnorePatterns {
    /// Compile the given glob patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first pattern that does not
    /// parse.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }
        let set = builder.build().map_err(|source| Error::InvalidPattern {
            pattern: kept.join(", "),
            source,
        })?;
        Ok(Self {
            patterns: kept,
            set,
        })
    }

    /// The patterns this predicate was built from.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn is_match(&self, name: &OsString) -> bool {
        self.set.is_match(Path::new(name))
    }
}

impl IgnoreFunction for IgnorePatterns {
    fn ignore(&self, _dir: &Path, entries: &[DirEntry]) -> HashSet<OsString> {
        entries
            .iter()
            .map(DirEntry::file_name)
            .filter(|name| self.is_match(name))
            .collect()
    }
}
