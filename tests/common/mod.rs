//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture with a source tree root and an empty scratch directory
/// for destinations.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Path under the source directory.
    pub fn src_path(&self, rel: &str) -> PathBuf {
        self.src.path().join(rel)
    }

    /// Path under the destination directory. Nothing is created there.
    pub fn dst_path(&self, rel: &str) -> PathBuf {
        self.dst.path().join(rel)
    }

    /// Write a file under the source directory, creating parents.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.src_path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create a directory under the source directory.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.src_path(rel);
        fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    /// Create a symlink under the source directory pointing at `target`
    /// exactly as given.
    #[cfg(unix)]
    pub fn symlink(&self, target: &str, rel: &str) -> PathBuf {
        let path = self.src_path(rel);
        std::os::unix::fs::symlink(target, &path).expect("Failed to create symlink");
        path
    }

    /// Build the tree used by most tree-copy tests:
    ///
    /// ```text
    /// build/a
    /// src/main.c
    /// src/build/b
    /// docs/readme.txt
    /// ```
    pub fn create_project(&self) {
        self.write("build/a", "artifact a");
        self.write("src/main.c", "int main() {}");
        self.write("src/build/b", "artifact b");
        self.write("docs/readme.txt", "read me");
    }

    /// Check if a file exists and has the expected content.
    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Every path under `root`, relative to it and sorted. Symlinks are listed
/// but not descended into.
pub fn list_tree(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).expect("Failed to read directory") {
            let entry = entry.expect("Failed to read entry");
            let path = entry.path();
            out.push(path.strip_prefix(root).expect("Entry outside root").to_path_buf());
            let file_type = entry.file_type().expect("Failed to read file type");
            if file_type.is_dir() {
                stack.push(path);
            }
        }
    }
    out.sort();
    out
}

/// Assert that two trees hold the same paths, the same file contents and
/// the same symlink targets.
pub fn assert_same_tree(expected: &Path, actual: &Path) {
    let paths = list_tree(expected);
    assert_eq!(paths, list_tree(actual), "Tree layout mismatch");

    for rel in paths {
        let a = expected.join(&rel);
        let b = actual.join(&rel);
        let meta_a = fs::symlink_metadata(&a).expect("Failed to stat expected");
        let meta_b = fs::symlink_metadata(&b).expect("Failed to stat actual");
        assert_eq!(
            meta_a.file_type().is_symlink(),
            meta_b.file_type().is_symlink(),
            "Symlink mismatch at {:?}",
            rel
        );
        if meta_a.file_type().is_symlink() {
            assert_eq!(
                fs::read_link(&a).expect("Failed to read link"),
                fs::read_link(&b).expect("Failed to read link"),
                "Link target mismatch at {:?}",
                rel
            );
        } else if meta_a.is_file() {
            assert_eq!(
                fs::read(&a).expect("Failed to read file"),
                fs::read(&b).expect("Failed to read file"),
                "Content mismatch at {:?}",
                rel
            );
        }
    }
}
