//! Wheel inspection utilities.
//!
//! Helpers shared by the patcher and the command-line tool: locating the
//! metadata directory, validity checks, RECORD verification, listing,
//! extraction and output naming.

use crate::{DIST_INFO_SUFFIX, RECORD_FILE, Record, WHEEL_EXTENSION, WheelError, WheelResult};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

/// Suffix appended to the file stem of a patched wheel.
pub const PATCHED_SUFFIX: &str = "-patched";

/// Open a wheel's ZIP archive after checking existence and extension.
pub fn open_archive(path: &Path) -> WheelResult<ZipArchive<File>> {
    if !path.exists() {
        return Err(WheelError::NotFound(path.to_path_buf()));
    }

    if path.extension().and_then(|ext| ext.to_str()) != Some(WHEEL_EXTENSION) {
        return Err(WheelError::InvalidFormat(format!(
            "Not a wheel file: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    ZipArchive::new(file).map_err(|source| WheelError::CorruptArchive {
        path: path.to_path_buf(),
        source,
    })
}

/// All entry names in archive order.
pub fn entry_names(archive: &ZipArchive<File>) -> Vec<String> {
    (0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(String::from))
        .collect()
}

/// Find the top-level `.dist-info` directory among archive entry names.
///
/// Only the first path segment is considered, so metadata directories of
/// packages vendored deeper in the wheel are ignored. More than one distinct
/// top-level metadata directory is an error.
pub fn find_dist_info_dir<'a, I>(names: I) -> WheelResult<Option<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Option<&str> = None;

    for name in names {
        let Some((top, _)) = name.split_once('/') else {
            continue;
        };
        if !top.ends_with(DIST_INFO_SUFFIX) {
            continue;
        }

        match found {
            None => found = Some(top),
            Some(existing) if existing == top => {}
            Some(existing) => {
                return Err(WheelError::InvalidFormat(format!(
                    "multiple top-level .dist-info directories: {existing}, {top}"
                )));
            }
        }
    }

    Ok(found.map(String::from))
}

/// Open a wheel and locate its top-level `.dist-info` directory.
pub fn open_wheel(path: &Path) -> WheelResult<(ZipArchive<File>, String)> {
    let archive = open_archive(path)?;
    let names = entry_names(&archive);
    let dist_info_dir = find_dist_info_dir(names.iter().map(String::as_str))?
        .ok_or_else(|| WheelError::NoMetadataDir(path.to_path_buf()))?;
    Ok((archive, dist_info_dir))
}

/// Read and parse the RECORD stored at `record_path`.
pub fn read_record(archive: &mut ZipArchive<File>, record_path: &str) -> WheelResult<Record> {
    let mut record_file = match archive.by_name(record_path) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(WheelError::InvalidFormat(format!(
                "RECORD file not found: {record_path}"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let mut content = String::new();
    record_file.read_to_string(&mut content)?;
    Record::parse(&content)
}

/// Check whether a file is a readable wheel with a metadata directory.
#[must_use]
pub fn is_valid_wheel(path: &Path) -> bool {
    open_wheel(path).is_ok()
}

/// List every entry in a wheel, in archive order.
///
/// Fails with [`WheelError::NoMetadataDir`] for archives that are not wheels.
pub fn list_contents(path: &Path) -> WheelResult<Vec<String>> {
    let (archive, _) = open_wheel(path)?;
    Ok(entry_names(&archive))
}

/// Extract a wheel into `output_dir`, creating it if needed.
///
/// Entries whose names would escape `output_dir` are rejected by the
/// archive reader.
pub fn extract(path: &Path, output_dir: &Path) -> WheelResult<()> {
    let (mut archive, _) = open_wheel(path)?;
    fs::create_dir_all(output_dir)?;
    archive.extract(output_dir)?;
    tracing::debug!(
        "Extracted {} entries from {} to {}",
        archive.len(),
        path.display(),
        output_dir.display()
    );
    Ok(())
}

/// A wheel entry that disagrees with RECORD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordMismatch {
    /// File in the archive without a RECORD row
    Unrecorded(String),
    /// RECORD row for a file the archive does not contain
    Missing(String),
    /// Hash or size differs from the file contents
    Modified(String),
}

impl RecordMismatch {
    pub fn path(&self) -> &str {
        match self {
            RecordMismatch::Unrecorded(path)
            | RecordMismatch::Missing(path)
            | RecordMismatch::Modified(path) => path,
        }
    }
}

impl std::fmt::Display for RecordMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordMismatch::Unrecorded(path) => write!(f, "not in RECORD: {path}"),
            RecordMismatch::Missing(path) => write!(f, "missing from wheel: {path}"),
            RecordMismatch::Modified(path) => write!(f, "hash or size mismatch: {path}"),
        }
    }
}

/// Compare every file in a wheel with its RECORD row.
///
/// Directory entries and RECORD itself are skipped. An empty result means
/// the wheel is consistent.
pub fn verify_record(path: &Path) -> WheelResult<Vec<RecordMismatch>> {
    let (mut archive, dist_info_dir) = open_wheel(path)?;
    let record_path = format!("{dist_info_dir}/{RECORD_FILE}");
    let record = read_record(&mut archive, &record_path)?;

    let mut mismatches = Vec::new();
    let mut present = HashSet::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();
        if file.is_dir() || name == record_path {
            continue;
        }

        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        match record.get(&name) {
            None => mismatches.push(RecordMismatch::Unrecorded(name.clone())),
            Some(entry) if !entry.verify(&content) => {
                mismatches.push(RecordMismatch::Modified(name.clone()));
            }
            Some(_) => {}
        }
        present.insert(name);
    }

    for entry in &record {
        if entry.path != record_path && !present.contains(entry.path.as_str()) {
            mismatches.push(RecordMismatch::Missing(entry.path.clone()));
        }
    }

    tracing::debug!(
        "Verified {} against {} RECORD rows: {} mismatch(es)",
        path.display(),
        record.len(),
        mismatches.len()
    );
    Ok(mismatches)
}

/// Default output path for a patched wheel: `<stem>-patched.whl` beside the input.
#[must_use]
pub fn patched_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}{PATCHED_SUFFIX}.{WHEEL_EXTENSION}");

    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
