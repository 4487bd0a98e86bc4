#![allow(non_snake_case)]

use super::*;

#[test]
fn StagedFiles___new___is_empty() {
    let staged = StagedFiles::new();

    assert!(staged.is_empty());
    assert_eq!(staged.len(), 0);
}

#[test]
fn StagedFiles___insert___preserves_insertion_order() {
    let mut staged = StagedFiles::new();
    staged.insert("z.txt", b"z".to_vec());
    staged.insert("a.txt", b"a".to_vec());
    staged.insert("m.txt", b"m".to_vec());

    let paths: Vec<&str> = staged.paths().collect();
    assert_eq!(paths, vec!["z.txt", "a.txt", "m.txt"]);
}

#[test]
fn StagedFiles___insert___same_path_replaces_in_place() {
    let mut staged = StagedFiles::new();
    staged.insert("first.txt", b"one".to_vec());
    staged.insert("second.txt", b"two".to_vec());
    staged.insert("first.txt", b"uno".to_vec());

    let entries: Vec<(&str, &[u8])> = staged.iter().collect();
    assert_eq!(
        entries,
        vec![("first.txt", &b"uno"[..]), ("second.txt", &b"two"[..])]
    );
}

#[test]
fn StagedFiles___contains___reports_staged_paths() {
    let staged: StagedFiles = [("pkg/data.bin", vec![1u8, 2, 3])].into_iter().collect();

    assert!(staged.contains("pkg/data.bin"));
    assert!(!staged.contains("pkg/other.bin"));
    assert_eq!(staged.get("pkg/data.bin"), Some(&[1u8, 2, 3][..]));
}

#[test]
fn StagedFiles___clear___removes_everything() {
    let mut staged: StagedFiles = [("a", b"a".to_vec()), ("b", b"b".to_vec())]
        .into_iter()
        .collect();

    staged.clear();

    assert!(staged.is_empty());
}
