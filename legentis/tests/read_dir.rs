use legentis::fs::{DirFlags, EntryKind, ReadDir};
use legentis::join;
use legentis::time::sleep;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn unique_temp_base() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let base = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);

    base.join(format!("legentis_read_dir_test_{}_{}_{}", pid, nanos, seq))
}

async fn collect_names(path: &Path) -> HashSet<String> {
    let mut dir = ReadDir::open(path).await.expect("open");
    let mut names = HashSet::new();

    while let Some(entry) = dir.next_entry().await.expect("next_entry") {
        names.insert(entry.into_name());
    }

    dir.close().await;
    names
}

#[legentis::test]
fn read_dir_open_missing_path_is_not_found() {
    let base = unique_temp_base();

    let err = ReadDir::open(&base).await.err().expect("expected error");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);

    let err = ReadDir::open_blocking(&base).err().expect("expected error");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[legentis::test]
fn read_dir_open_file_is_not_a_directory() {
    let base = unique_temp_base();
    fs::write(&base, b"plain file").expect("setup file");

    let err = ReadDir::open(&base).await.err().expect("expected error");
    assert_eq!(err.kind(), io::ErrorKind::NotADirectory);

    let err = ReadDir::open_blocking(&base).err().expect("expected error");
    assert_eq!(err.kind(), io::ErrorKind::NotADirectory);

    fs::remove_file(&base).expect("cleanup");
}

#[legentis::test]
fn read_dir_empty_directory_yields_only_pseudo_entries() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");

    let mut dir = ReadDir::open(&base).await.expect("open");

    let mut names = Vec::new();
    while let Some(entry) = dir.next_entry().await.expect("next_entry") {
        names.push(entry.into_name());
    }

    assert_eq!(names.len(), 2, "empty directory holds only . and ..");
    assert!(names.contains(&".".to_string()));
    assert!(names.contains(&"..".to_string()));

    // The end of the stream is sticky.
    for _ in 0..3 {
        let again = dir.next_entry().await.expect("read after end");
        assert!(again.is_none());
    }

    dir.close().await;
    fs::remove_dir_all(&base).expect("cleanup");
}

#[legentis::test]
fn read_dir_lists_every_entry_exactly_once() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");

    for i in 0..12 {
        fs::write(base.join(format!("entry_{i}.txt")), b"x").expect("setup file");
    }

    let mut dir = ReadDir::open(&base).await.expect("open");

    let mut seen = HashSet::new();
    let mut total = 0usize;

    while let Some(entry) = dir.next_entry().await.expect("next_entry") {
        seen.insert(entry.into_name());
        total += 1;
    }

    assert_eq!(total, 14, "12 files plus . and ..");
    assert_eq!(seen.len(), 14, "no duplicates");

    for i in 0..12 {
        assert!(seen.contains(&format!("entry_{i}.txt")));
    }

    dir.close().await;
    fs::remove_dir_all(&base).expect("cleanup");
}

#[cfg(unix)]
#[legentis::test]
fn read_dir_reports_entry_kinds() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");
    fs::write(base.join("plain"), b"x").expect("setup file");
    fs::create_dir(base.join("sub")).expect("setup subdir");
    std::os::unix::fs::symlink(base.join("plain"), base.join("link")).expect("setup symlink");

    let mut dir = ReadDir::open(&base).await.expect("open");

    let mut kinds = HashMap::new();
    while let Some(entry) = dir.next_entry().await.expect("next_entry") {
        kinds.insert(entry.name().to_string(), entry.kind());
    }

    assert_eq!(kinds.len(), 5, "3 real entries plus . and ..");
    assert_eq!(kinds.get("plain"), Some(&EntryKind::File));
    assert_eq!(kinds.get("sub"), Some(&EntryKind::Dir));
    assert_eq!(kinds.get("link"), Some(&EntryKind::Symlink));
    assert_eq!(kinds.get("."), Some(&EntryKind::Dir));

    dir.close().await;
    fs::remove_dir_all(&base).expect("cleanup");
}

#[legentis::test]
fn read_dir_close_without_reading() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");
    fs::write(base.join("ignored.txt"), b"x").expect("setup file");

    let dir = ReadDir::open(&base).await.expect("open");
    dir.close().await;

    fs::remove_dir_all(&base).expect("cleanup");
}

#[legentis::test]
fn read_dir_entries_outlive_the_stream() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");
    fs::write(base.join("keep.txt"), b"x").expect("setup file");

    let mut dir = ReadDir::open(&base).await.expect("open");

    let mut entries = Vec::new();
    while let Some(entry) = dir.next_entry().await.expect("next_entry") {
        entries.push(entry);
    }

    dir.close().await;
    fs::remove_dir_all(&base).expect("cleanup");

    assert!(entries.iter().any(|e| e.name() == "keep.txt"));
}

#[legentis::test]
fn read_dir_open_with_explicit_flags() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");

    let dir = ReadDir::open_with_flags(&base, DirFlags::NONE)
        .await
        .expect("open");
    dir.close().await;

    let dir = ReadDir::open_with_flags_blocking(&base, DirFlags::NONE).expect("open blocking");
    dir.close_blocking();

    fs::remove_dir_all(&base).expect("cleanup");
}

#[test]
fn read_dir_blocking_runs_without_a_runtime() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");
    fs::write(base.join("only.txt"), b"x").expect("setup file");

    let mut dir = ReadDir::open_blocking(&base).expect("open");

    let mut names = HashSet::new();
    while let Some(entry) = dir.next_entry_blocking().expect("next_entry") {
        names.insert(entry.into_name());
    }

    assert_eq!(names.len(), 3);
    assert!(names.contains("only.txt"));

    assert!(dir.next_entry_blocking().expect("read after end").is_none());

    dir.close_blocking();
    fs::remove_dir_all(&base).expect("cleanup");
}

#[legentis::test]
fn read_dir_async_and_blocking_agree() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");

    for name in ["alpha", "beta", "gamma"] {
        fs::write(base.join(name), b"x").expect("setup file");
    }

    let from_async = collect_names(&base).await;

    let mut dir = ReadDir::open_blocking(&base).expect("open blocking");
    let mut from_blocking = HashSet::new();
    while let Some(entry) = dir.next_entry_blocking().expect("next_entry") {
        from_blocking.insert(entry.into_name());
    }
    dir.close_blocking();

    assert_eq!(from_async, from_blocking);

    fs::remove_dir_all(&base).expect("cleanup");
}

#[legentis::test]
fn read_dir_interleaves_with_timers() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");

    for i in 0..3 {
        fs::write(base.join(format!("slow_{i}")), b"x").expect("setup file");
    }

    let mut dir = ReadDir::open(&base).await.expect("open");

    let mut count = 0usize;
    while let Some(_entry) = dir.next_entry().await.expect("next_entry") {
        sleep(Duration::from_millis(1)).await;
        count += 1;
    }

    assert_eq!(count, 5, "3 files plus . and ..");

    dir.close().await;
    fs::remove_dir_all(&base).expect("cleanup");
}

#[legentis::test]
fn read_dir_two_streams_run_concurrently() {
    let left = unique_temp_base();
    let right = unique_temp_base();
    fs::create_dir(&left).expect("setup left");
    fs::create_dir(&right).expect("setup right");
    fs::write(left.join("l.txt"), b"x").expect("setup file");
    fs::write(right.join("r.txt"), b"x").expect("setup file");

    let (from_left, from_right) = join!(collect_names(&left), collect_names(&right));

    assert!(from_left.contains("l.txt"));
    assert!(!from_left.contains("r.txt"));
    assert!(from_right.contains("r.txt"));
    assert!(!from_right.contains("l.txt"));

    fs::remove_dir_all(&left).expect("cleanup left");
    fs::remove_dir_all(&right).expect("cleanup right");
}

#[cfg(target_os = "linux")]
#[legentis::test]
fn read_dir_drop_releases_the_stream() {
    let base = unique_temp_base();
    fs::create_dir(&base).expect("setup dir");

    // Warm up so the pool and reactor descriptors already exist.
    let first = ReadDir::open(&base).await.expect("open");
    first.close().await;

    let open_fds = || fs::read_dir("/proc/self/fd").expect("proc").count();
    let before = open_fds();

    for _ in 0..8 {
        let dir = ReadDir::open(&base).await.expect("open");
        drop(dir);
    }

    assert_eq!(open_fds(), before, "dropped streams must not leak");

    fs::remove_dir_all(&base).expect("cleanup");
}
