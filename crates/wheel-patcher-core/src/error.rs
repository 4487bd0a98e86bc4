//! Error types for wheel operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening, staging or saving a wheel.
#[derive(Debug, Error)]
pub enum WheelError {
    /// Wheel file does not exist.
    #[error("Wheel file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File is not a usable wheel (wrong extension, missing RECORD, ...).
    #[error("Invalid wheel: {0}")]
    InvalidFormat(String),

    /// No top-level `.dist-info` directory in the archive.
    #[error("No .dist-info directory found in {}", .0.display())]
    NoMetadataDir(PathBuf),

    /// The ZIP central directory could not be read.
    #[error("Invalid ZIP file: {}: {source}", path.display())]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// File to add does not exist.
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// File to add is a directory or other non-regular file.
    #[error("Source must be a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Destination is already present in the source wheel.
    #[error("File already exists in wheel: {0} (use --force to overwrite)")]
    AlreadyExists(String),

    /// Destination has already been staged in this session.
    #[error("File already queued for addition: {0}")]
    AlreadyQueued(String),

    /// Destination contains a `..` segment.
    #[error("Path traversal detected in path: {0}")]
    PathTraversal(String),

    /// Destination is an absolute path.
    #[error("Absolute paths not allowed: {0}")]
    AbsolutePath(String),

    /// Destination is generated by the patcher and cannot be supplied.
    #[error("Cannot add {0}: it is regenerated when the wheel is saved")]
    ReservedPath(String),

    /// `save` was called with nothing staged.
    #[error("No files to add. Use add_file() first.")]
    NothingToSave,

    /// Building or renaming the patched wheel failed.
    #[error("Failed to save patched wheel {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: Box<WheelError>,
    },

    /// Operation not allowed in the current session state.
    #[error("Invalid state: cannot {operation} a {state} wheel")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Batch manifest is malformed.
    #[error("Invalid batch manifest: {0}")]
    InvalidBatch(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// RECORD CSV error.
    #[error("RECORD error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WheelError {
    /// Wrap an error raised while building the output archive.
    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: impl Into<WheelError>) -> Self {
        WheelError::WriteFailure {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }
}
