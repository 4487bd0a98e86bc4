//! Fixture wheels for unit tests.

use crate::{Record, RecordEntry};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub(crate) const DIST_INFO: &str = "pkg-1.0.dist-info";
pub(crate) const RECORD_PATH: &str = "pkg-1.0.dist-info/RECORD";
pub(crate) const INIT_PY: &[u8] = b"__version__ = '1.0'\n";

/// Write a ZIP with the given entries, in order.
///
/// Entries under `pkg/data/` are stored uncompressed, everything else is deflated.
pub(crate) fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);

    for (name, contents) in entries {
        let method = if name.starts_with("pkg/data/") {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        let options = SimpleFileOptions::default().compression_method(method);
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents).unwrap();
    }

    zip.finish().unwrap();
}

/// Create `pkg-1.0-py3-none-any.whl` with a consistent RECORD.
pub(crate) fn create_test_wheel(temp_dir: &TempDir) -> PathBuf {
    let files: [(&str, &[u8]); 5] = [
        ("pkg/__init__.py", INIT_PY),
        ("pkg/data/config.json", b"{\"debug\": false}"),
        (
            "pkg/_vendor/dep-2.0.dist-info/METADATA",
            b"Name: dep\nVersion: 2.0\n",
        ),
        (
            "pkg-1.0.dist-info/METADATA",
            b"Metadata-Version: 2.1\nName: pkg\nVersion: 1.0\n",
        ),
        (
            "pkg-1.0.dist-info/WHEEL",
            b"Wheel-Version: 1.0\nTag: py3-none-any\n",
        ),
    ];

    let mut entries: Vec<RecordEntry> = files
        .iter()
        .map(|(name, contents)| RecordEntry::for_content(*name, Some(*contents)))
        .collect();
    entries.push(RecordEntry::for_content(RECORD_PATH, None));
    let record = Record::from(entries).to_csv_string().unwrap();

    let mut all = files.to_vec();
    all.push((RECORD_PATH, record.as_bytes()));

    let wheel_path = temp_dir.path().join("pkg-1.0-py3-none-any.whl");
    write_zip(&wheel_path, &all);
    wheel_path
}

/// Write a source file to add to a wheel.
pub(crate) fn create_source_file(temp_dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
