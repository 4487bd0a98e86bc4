//! In-memory staging area for files waiting to be written.

/// A file to include in the patched wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Normalized path within the wheel.
    pub archive_path: String,
    /// File contents.
    pub contents: Vec<u8>,
}

/// Insertion-ordered map from archive path to file contents.
///
/// Order matters: it decides where entries land in the regenerated RECORD.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFiles {
    files: Vec<StagedFile>,
}

impl StagedFiles {
    /// Create an empty staging area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `contents` at `archive_path`.
    ///
    /// Re-staging a path replaces its contents but keeps its original position.
    pub fn insert(&mut self, archive_path: impl Into<String>, contents: Vec<u8>) {
        let archive_path = archive_path.into();
        match self
            .files
            .iter_mut()
            .find(|file| file.archive_path == archive_path)
        {
            Some(existing) => existing.contents = contents,
            None => self.files.push(StagedFile {
                archive_path,
                contents,
            }),
        }
    }

    /// Check whether a path is staged.
    #[must_use]
    pub fn contains(&self, archive_path: &str) -> bool {
        self.files.iter().any(|file| file.archive_path == archive_path)
    }

    /// Get the staged contents for a path.
    #[must_use]
    pub fn get(&self, archive_path: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|file| file.archive_path == archive_path)
            .map(|file| file.contents.as_slice())
    }

    /// Iterate `(path, contents)` pairs in staging order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|file| (file.archive_path.as_str(), file.contents.as_slice()))
    }

    /// Staged paths in staging order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.archive_path.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drop everything staged.
    pub fn clear(&mut self) {
        self.files.clear();
    }
}

impl<P: Into<String>> FromIterator<(P, Vec<u8>)> for StagedFiles {
    fn from_iter<I: IntoIterator<Item = (P, Vec<u8>)>>(iter: I) -> Self {
        let mut staged = StagedFiles::new();
        for (path, contents) in iter {
            staged.insert(path, contents);
        }
        staged
    }
}

#[cfg(test)]
#[path = "staging/staging_tests.rs"]
mod staging_tests;
