//! Move integration tests.

#[path = "../common/mod.rs"]
mod common;

use common::{TestFixture, assert_same_tree};
use shutil::{Error, MoveBuilder, MoveOptions, TreeCopyOptions, copy_tree, move_path};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_move_file_same_volume() {
    let fx = TestFixture::new();
    let src = fx.write("report.txt", "quarterly numbers");
    let dst = fx.dst_path("report-final.txt");

    let out = move_path(&src, &dst, &MoveOptions::default()).unwrap();

    assert_eq!(out, dst);
    assert!(fs::symlink_metadata(&src).is_err());
    fx.assert_file_content(&dst, "quarterly numbers");
}

#[test]
fn test_move_file_into_directory() {
    let fx = TestFixture::new();
    let src = fx.write("report.txt", "numbers");

    let out = move_path(&src, fx.dst.path(), &MoveOptions::default()).unwrap();

    assert_eq!(out, fx.dst_path("report.txt"));
    fx.assert_file_content(&out, "numbers");
}

#[test]
fn test_move_refuses_existing_name_in_directory() {
    let fx = TestFixture::new();
    let src = fx.write("report.txt", "new");
    fs::write(fx.dst_path("report.txt"), "old").unwrap();

    let result = move_path(&src, fx.dst.path(), &MoveOptions::default());

    assert!(matches!(result, Err(Error::AlreadyExists(p)) if p == fx.dst_path("report.txt")));
    fx.assert_file_content(&src, "new");
    fx.assert_file_content(&fx.dst_path("report.txt"), "old");
}

#[test]
fn test_move_directory_into_itself() {
    let fx = TestFixture::new();
    fx.create_project();
    let before = fx.dst_path("snapshot");
    copy_tree(fx.src.path(), &before, &TreeCopyOptions::default()).unwrap();

    let dir_a = fx.src.path();
    let result = move_path(dir_a, &fx.src_path("src"), &MoveOptions::default());

    assert!(matches!(result, Err(Error::MoveOntoSelf { .. })));
    assert_same_tree(&before, dir_a);
}

#[test]
fn test_move_tree_keeps_contents() {
    let fx = TestFixture::new();
    fx.create_project();
    let snapshot = fx.dst_path("snapshot");
    copy_tree(fx.src.path(), &snapshot, &TreeCopyOptions::default()).unwrap();

    let moved = fx.dst_path("moved");
    let out = move_path(&fx.src_path("src"), &moved, &MoveOptions::default()).unwrap();

    assert_eq!(out, moved);
    assert!(!fx.src_path("src").exists());
    assert_same_tree(&snapshot.join("src"), &moved);
}

#[test]
fn test_move_fast_path_skips_copy_function() {
    let fx = TestFixture::new();
    let src = fx.write("a.bin", "bytes");

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let out = MoveBuilder::new(&src, fx.dst.path())
        .copy_function(move |src: &Path, dst: &Path, follow: bool| -> shutil::Result<PathBuf> {
            counter.fetch_add(1, Ordering::SeqCst);
            shutil::copy(src, dst, follow)
        })
        .run()
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    fx.assert_file_content(&out, "bytes");
}

#[cfg(unix)]
#[test]
fn test_move_symlink_moves_the_link() {
    let fx = TestFixture::new();
    fx.write("target.txt", "t");
    let link = fx.symlink("target.txt", "link");

    let dst = fx.dst_path("link");
    move_path(&link, &dst, &MoveOptions::default()).unwrap();

    assert!(fs::symlink_metadata(&link).is_err());
    assert!(fs::symlink_metadata(&dst).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&dst).unwrap(), Path::new("target.txt"));
}

/// Moves between tmpfs and the default temp directory, where `rename` fails
/// with `EXDEV` and the copy-then-delete fallback runs.
#[cfg(target_os = "linux")]
mod cross_device {
    use super::*;
    use std::os::unix::fs::{MetadataExt, symlink};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// A source directory on `/dev/shm` and a destination directory on a
    /// different device, or `None` when no such pair exists here.
    fn split_dirs() -> Option<(TempDir, TempDir)> {
        let src = tempfile::Builder::new().tempdir_in("/dev/shm").ok()?;
        let dst = TempDir::new().expect("Failed to create temp dest dir");
        let src_dev = fs::metadata(src.path()).ok()?.dev();
        let dst_dev = fs::metadata(dst.path()).ok()?.dev();
        if src_dev == dst_dev {
            eprintln!("skipping: /dev/shm and temp dir share a device");
            return None;
        }
        Some((src, dst))
    }

    #[test]
    fn test_move_tree_across_devices() {
        let Some((src_root, dst_root)) = split_dirs() else {
            return;
        };
        let tree = src_root.path().join("tree");
        fs::create_dir_all(tree.join("sub")).unwrap();
        fs::write(tree.join("sub/f"), "payload").unwrap();
        symlink("sub/f", tree.join("l")).unwrap();
        symlink("missing", tree.join("dang")).unwrap();

        let out = move_path(&tree, dst_root.path(), &MoveOptions::default()).unwrap();

        assert_eq!(out, dst_root.path().join("tree"));
        assert!(fs::symlink_metadata(&tree).is_err());
        assert_eq!(fs::read_to_string(out.join("sub/f")).unwrap(), "payload");
        assert_eq!(fs::read_link(out.join("l")).unwrap(), Path::new("sub/f"));
        assert_eq!(fs::read_link(out.join("dang")).unwrap(), Path::new("missing"));
    }

    #[test]
    fn test_move_symlink_across_devices() {
        let Some((src_root, dst_root)) = split_dirs() else {
            return;
        };
        let link = src_root.path().join("link");
        symlink("rel/target", &link).unwrap();

        let dst = dst_root.path().join("moved");
        let out = move_path(&link, &dst, &MoveOptions::default()).unwrap();

        assert_eq!(out, dst);
        assert!(fs::symlink_metadata(&link).is_err());
        assert_eq!(fs::read_link(&dst).unwrap(), Path::new("rel/target"));
    }

    #[test]
    fn test_move_file_across_devices_uses_copy_function() {
        let Some((src_root, dst_root)) = split_dirs() else {
            return;
        };
        let src = src_root.path().join("data.bin");
        fs::write(&src, "bytes").unwrap();

        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&calls);
        let options = MoveOptions::default().with_copy_function(
            move |src: &Path, dst: &Path, follow: bool| -> shutil::Result<PathBuf> {
                recorder.lock().unwrap().push(follow);
                shutil::copy(src, dst, follow)
            },
        );

        let dst = dst_root.path().join("data.bin");
        let out = move_path(&src, &dst, &options).unwrap();

        assert_eq!(out, dst);
        assert_eq!(*calls.lock().unwrap(), [true]);
        assert!(fs::symlink_metadata(&src).is_err());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "bytes");
    }

    #[test]
    fn test_move_file_across_devices_into_directory() {
        let Some((src_root, dst_root)) = split_dirs() else {
            return;
        };
        let src = src_root.path().join("notes.txt");
        fs::write(&src, "notes").unwrap();

        let out = move_path(&src, dst_root.path(), &MoveOptions::default()).unwrap();

        assert_eq!(out, dst_root.path().join("notes.txt"));
        assert!(fs::symlink_metadata(&src).is_err());
        assert_eq!(fs::read_to_string(&out).unwrap(), "notes");
    }
}
