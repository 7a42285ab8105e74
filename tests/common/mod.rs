//! Shared helpers for integration tests

#![allow(dead_code)]

use std::io::Read;

use filterfs::path;
use filterfs::storage::{DirEntry, ReadOnlyFs, read_dir, stat, walk};

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Check that `fsys` exposes exactly `expected` and behaves consistently
///
/// `expected` lists every path below the root in walk order. Every path
/// must stat with its base name, files must read back their stated length,
/// and reading a directory one entry at a time must match a full read.
pub fn check_fs<F: ReadOnlyFs>(fsys: &F, expected: &[&str]) {
    let found = walk(fsys, ".").expect("walk root");
    assert_eq!(found, expected, "visible paths");

    check_dir(fsys, path::ROOT);
    for name in expected {
        let metadata = stat(fsys, name).unwrap_or_else(|e| panic!("stat {}: {}", name, e));
        assert_eq!(metadata.name, path::base(name), "name of {}", name);

        if metadata.is_dir {
            check_dir(fsys, name);
        } else {
            let mut file = fsys.open(name).expect("open file");
            let mut data = Vec::new();
            file.read_to_end(&mut data).expect("read file");
            assert_eq!(data.len() as u64, metadata.len, "length of {}", name);
        }
    }
}

fn check_dir<F: ReadOnlyFs>(fsys: &F, name: &str) {
    let mut full = fsys.open(name).expect("open dir");
    let all = full.read_dir(-1).expect("read whole dir");

    let mut paged = fsys.open(name).expect("open dir");
    let mut one_by_one: Vec<DirEntry> = Vec::new();
    loop {
        match paged.read_dir(1) {
            Ok(batch) => {
                assert_eq!(batch.len(), 1, "bounded read of {} came back short", name);
                one_by_one.extend(batch);
            }
            Err(e) if e.is_end_of_listing() => break,
            Err(e) => panic!("read_dir {}: {}", name, e),
        }
    }
    assert_eq!(one_by_one, all, "paged listing of {}", name);

    let mut sorted = all.clone();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(read_dir(fsys, name).expect("read_dir"), sorted);
}
