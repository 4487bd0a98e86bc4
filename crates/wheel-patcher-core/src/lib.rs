//! RECORD-consistent patching for Python wheels
//!
//! This crate adds files to existing `.whl` archives and regenerates the
//! `RECORD` manifest so the patched wheel stays internally consistent.
//!
//! # Wheel Structure
//!
//! ```text
//! mypackage-1.0-py3-none-any.whl
//! ├── mypackage/
//! │   └── __init__.py
//! └── mypackage-1.0.dist-info/
//!     ├── METADATA
//!     ├── WHEEL
//!     ├── sbom.json              # added by the patcher
//!     └── RECORD                 # regenerated, always last
//! ```
//!
//! # Example
//!
//! ```no_run
//! use wheel_patcher_core::WheelPatcher;
//!
//! let mut patcher = WheelPatcher::open("mypackage-1.0-py3-none-any.whl")?;
//! patcher.add_file("sbom.json", Some(".dist-info/sbom.json"), false)?;
//! patcher.save("mypackage-1.0-py3-none-any-patched.whl")?;
//! patcher.close();
//! # Ok::<(), wheel_patcher_core::WheelError>(())
//! ```

mod error;

pub mod batch;
pub mod path;
pub mod patcher;
pub mod record;
pub mod staging;
pub mod wheel;

#[cfg(test)]
mod test_support;

pub use batch::{BatchEntry, BatchFileSpec, BatchManifest};
pub use error::WheelError;
pub use patcher::{SessionState, WheelPatcher};
pub use record::{Record, RecordEntry, hash_sha256};
pub use staging::StagedFiles;

/// Result type for wheel operations.
pub type WheelResult<T> = Result<T, WheelError>;

/// Wheel file extension.
pub const WHEEL_EXTENSION: &str = "whl";

/// Suffix of the metadata directory name.
pub const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Destination prefix resolved to the actual metadata directory.
pub const DIST_INFO_PLACEHOLDER: &str = ".dist-info/";

/// Manifest file name within the metadata directory.
pub const RECORD_FILE: &str = "RECORD";
