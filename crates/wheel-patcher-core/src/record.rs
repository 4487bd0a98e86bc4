//! RECORD manifest parsing, hashing, merging and serialization.
//!
//! A RECORD is a headerless CSV file with one `path,hash,size` row per file
//! in the wheel. Hashes use the form `sha256=<urlsafe-base64, no padding>`.
//! The row for RECORD itself carries an empty hash and size.

use crate::{StagedFiles, WheelError, WheelResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Prefix of every hash value written to RECORD.
pub const HASH_PREFIX: &str = "sha256=";

/// A single row of a RECORD file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Path within the wheel.
    pub path: String,
    /// `sha256=...` or empty.
    pub hash: String,
    /// Decimal byte count or empty.
    pub size: String,
}

impl RecordEntry {
    /// Create an entry from raw field values.
    pub fn new(
        path: impl Into<String>,
        hash: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
            size: size.into(),
        }
    }

    /// Create the entry describing `content` stored at `path`.
    ///
    /// `None` produces an entry with empty hash and size, which is what
    /// RECORD lists for itself.
    pub fn for_content(path: impl Into<String>, content: Option<&[u8]>) -> Self {
        match content {
            Some(content) => Self::new(path, hash_sha256(content), content.len().to_string()),
            None => Self::new(path, "", ""),
        }
    }

    /// Build an entry from a CSV row, padding missing fields and ignoring extras.
    fn from_csv_row(row: &csv::StringRecord) -> Self {
        let field = |i: usize| row.get(i).unwrap_or_default();
        Self::new(field(0), field(1), field(2))
    }

    /// Check that this entry's hash and size describe `content`.
    #[must_use]
    pub fn verify(&self, content: &[u8]) -> bool {
        self.hash == hash_sha256(content) && self.size == content.len().to_string()
    }
}

/// Ordered list of RECORD entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<RecordEntry>,
}

impl Record {
    /// Parse RECORD content.
    ///
    /// Blank lines are skipped. Hash and size values are not validated so
    /// that legacy or hand-edited manifests still load.
    pub fn parse(content: &str) -> WheelResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut entries = Vec::new();
        for row in reader.records() {
            let row =
                row.map_err(|e| WheelError::InvalidFormat(format!("malformed RECORD: {e}")))?;
            if row.is_empty() {
                continue;
            }
            entries.push(RecordEntry::from_csv_row(&row));
        }

        Ok(Self { entries })
    }

    /// Serialize to RECORD content with `\n` line endings.
    ///
    /// Fields are quoted only when they contain a comma, quote or newline.
    pub fn to_csv_string(&self) -> WheelResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for entry in &self.entries {
            writer.write_record([&entry.path, &entry.hash, &entry.size])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| WheelError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| WheelError::InvalidFormat(e.to_string()))
    }

    /// Merge staged files into this record.
    ///
    /// Existing rows for `record_path` are dropped, each staged file replaces
    /// any row with the same path and is appended in staging order, and a
    /// single empty-hash row for `record_path` is appended last.
    #[must_use]
    pub fn update(&self, new_files: &StagedFiles, record_path: &str) -> Record {
        let mut entries: Vec<RecordEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.path != record_path)
            .cloned()
            .collect();

        for (path, content) in new_files.iter() {
            entries.retain(|entry| entry.path != path);
            entries.push(RecordEntry::for_content(path, Some(content)));
        }

        entries.push(RecordEntry::for_content(record_path, None));

        Record { entries }
    }

    /// Find the entry for a path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&RecordEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    #[must_use]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<RecordEntry>> for Record {
    fn from(entries: Vec<RecordEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a RecordEntry;
    type IntoIter = std::slice::Iter<'a, RecordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compute the RECORD hash of data: `sha256=` plus unpadded urlsafe base64.
pub fn hash_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{HASH_PREFIX}{}", URL_SAFE_NO_PAD.encode(result))
}
