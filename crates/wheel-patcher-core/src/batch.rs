//! Batch patch manifests.
//!
//! A batch manifest is a JSON file listing files to add in one pass:
//!
//! ```json
//! {
//!   "files": [
//!     { "source": "build/sbom.json", "dest": ".dist-info/sbom.json" },
//!     { "source": "LICENSE-THIRD-PARTY", "dest": ".dist-info/licenses/LICENSE-THIRD-PARTY" }
//!   ]
//! }
//! ```

use crate::{WheelError, WheelResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw batch manifest as read from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchManifest {
    #[serde(default)]
    pub files: Option<Vec<BatchFileSpec>>,
}

/// One element of the `files` array, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFileSpec {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub dest: Option<String>,
}

/// A validated `(source, dest)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub source: PathBuf,
    pub dest: String,
}

impl BatchManifest {
    /// Load a batch manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> WheelResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WheelError::InvalidBatch(format!(
                "manifest file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a batch manifest from JSON
    pub fn from_json(content: &str) -> WheelResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate every element and return the entries in array order.
    ///
    /// Nothing is returned unless all elements carry both `source` and `dest`.
    pub fn entries(&self) -> WheelResult<Vec<BatchEntry>> {
        let files = self.files.as_ref().ok_or_else(|| {
            WheelError::InvalidBatch("manifest must contain 'files' array".to_string())
        })?;

        files
            .iter()
            .enumerate()
            .map(|(index, spec)| match (&spec.source, &spec.dest) {
                (Some(source), Some(dest)) => Ok(BatchEntry {
                    source: PathBuf::from(source),
                    dest: dest.clone(),
                }),
                _ => Err(WheelError::InvalidBatch(format!(
                    "entry {index}: each file entry must have 'source' and 'dest'"
                ))),
            })
            .collect()
    }
}
