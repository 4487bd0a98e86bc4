//! Fixture wheels for command tests.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

pub const DIST_INFO: &str = "demo-0.1.dist-info";

const RECORD: &str = "\
demo/__init__.py,sha256=LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ,5
demo-0.1.dist-info/METADATA,sha256=n4bQgYhMfWWaL-qgxVrQFaO_TxsrC4Is0V1sFbDwCgg,4
demo-0.1.dist-info/RECORD,,
";

/// Write `demo-0.1-py3-none-any.whl` into `dir` and return its path.
pub fn create_test_wheel(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("demo-0.1-py3-none-any.whl");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();

    for (name, contents) in [
        ("demo/__init__.py", "hello"),
        ("demo-0.1.dist-info/METADATA", "test"),
        ("demo-0.1.dist-info/RECORD", RECORD),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();

    path
}

pub fn read_entry(wheel: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(wheel).unwrap()).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    contents
}
