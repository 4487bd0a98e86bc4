//! Wheel patching session.
//!
//! The [`WheelPatcher`] opens a wheel, stages files in memory and writes a
//! patched copy with a regenerated RECORD.

use crate::wheel::{entry_names, open_wheel, read_record};
use crate::{BatchManifest, RECORD_FILE, Record, StagedFiles, WheelError, WheelResult, path};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Patching session states.
///
/// State transitions:
/// ```text
/// Open ──save──→ Saved
///   │              │
///   └───close──→ Closed ←──close──┘
/// ```
/// A failed `save` leaves the session `Open` with its staged files intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Wheel is open and files may be staged
    #[default]
    Open,
    /// Patched wheel has been written
    Saved,
    /// Read handle has been released
    Closed,
}

impl SessionState {
    /// Check if files can be staged in this state
    pub fn can_stage(&self) -> bool {
        matches!(self, SessionState::Open)
    }

    /// Check if the session can be saved in this state
    pub fn can_save(&self) -> bool {
        matches!(self, SessionState::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Open => "open",
            SessionState::Saved => "saved",
            SessionState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patcher for a single wheel.
///
/// # Example
///
/// ```no_run
/// use wheel_patcher_core::WheelPatcher;
///
/// let mut patcher = WheelPatcher::open("requests-2.32.5-py3-none-any.whl")?;
/// assert_eq!(patcher.dist_info_dir(), "requests-2.32.5.dist-info");
///
/// // `.dist-info/` resolves to the wheel's metadata directory
/// patcher.add_file("sbom.json", Some(".dist-info/sboms/sbom.json"), false)?;
/// patcher.save("requests-2.32.5-py3-none-any-patched.whl")?;
/// # Ok::<(), wheel_patcher_core::WheelError>(())
/// ```
#[derive(Debug)]
pub struct WheelPatcher {
    wheel_path: PathBuf,
    archive: Option<ZipArchive<File>>,
    names: Vec<String>,
    dist_info_dir: String,
    record_path: String,
    record: Record,
    staged: StagedFiles,
    state: SessionState,
}

impl WheelPatcher {
    /// Open a wheel for patching.
    ///
    /// Fails if the file is missing, is not a `.whl`, is not a readable ZIP,
    /// has no top-level `.dist-info` directory, or has no RECORD.
    pub fn open<P: AsRef<Path>>(path: P) -> WheelResult<Self> {
        let path = path.as_ref();
        let (mut archive, dist_info_dir) = open_wheel(path)?;
        let names = entry_names(&archive);
        let record_path = format!("{dist_info_dir}/{RECORD_FILE}");
        let record = read_record(&mut archive, &record_path)?;

        tracing::debug!(
            "Opened {} ({} entries, {} RECORD rows, metadata in {})",
            path.display(),
            names.len(),
            record.len(),
            dist_info_dir
        );

        Ok(Self {
            wheel_path: path.to_path_buf(),
            archive: Some(archive),
            names,
            dist_info_dir,
            record_path,
            record,
            staged: StagedFiles::new(),
            state: SessionState::Open,
        })
    }

    /// Stage a file from disk.
    ///
    /// `dest` may start with `.dist-info/` to target the metadata directory.
    /// Without `dest` the source's file name is used at the wheel root.
    /// Returns the resolved destination path.
    pub fn add_file<P: AsRef<Path>>(
        &mut self,
        source: P,
        dest: Option<&str>,
        overwrite: bool,
    ) -> WheelResult<String> {
        self.ensure_can_stage()?;
        let source = source.as_ref();

        if !source.exists() {
            return Err(WheelError::SourceNotFound(source.to_path_buf()));
        }

        if !source.is_file() {
            return Err(WheelError::NotAFile(source.to_path_buf()));
        }

        let dest = match dest {
            Some(dest) => path::destination(dest, &self.dist_info_dir)?,
            None => {
                let file_name = source
                    .file_name()
                    .ok_or_else(|| WheelError::NotAFile(source.to_path_buf()))?
                    .to_string_lossy();
                let normalized = path::normalize(&file_name);
                path::validate_safe(&normalized)?;
                normalized
            }
        };

        self.check_destination(&dest, overwrite)?;

        // Read now so later changes to the source cannot affect the save
        let contents = fs::read(source)?;

        tracing::debug!(
            "Staged {} -> {} ({} bytes)",
            source.display(),
            dest,
            contents.len()
        );
        self.staged.insert(dest.clone(), contents);

        Ok(dest)
    }

    /// Stage in-memory contents at `dest`.
    ///
    /// Uses the same destination rules as [`WheelPatcher::add_file`].
    pub fn add_bytes(
        &mut self,
        dest: &str,
        contents: Vec<u8>,
        overwrite: bool,
    ) -> WheelResult<String> {
        self.ensure_can_stage()?;

        let dest = path::destination(dest, &self.dist_info_dir)?;
        self.check_destination(&dest, overwrite)?;

        tracing::debug!("Staged {} bytes -> {}", contents.len(), dest);
        self.staged.insert(dest.clone(), contents);

        Ok(dest)
    }

    /// Stage every file listed in a batch manifest, in order.
    ///
    /// The manifest is validated before anything is staged, and if any file
    /// fails to stage the staging area is restored to its previous contents.
    /// Returns the number of files staged.
    pub fn apply_batch(&mut self, batch: &BatchManifest, overwrite: bool) -> WheelResult<usize> {
        self.ensure_can_stage()?;
        let entries = batch.entries()?;

        let snapshot = self.staged.clone();
        for entry in &entries {
            if let Err(e) = self.add_file(&entry.source, Some(&entry.dest), overwrite) {
                self.staged = snapshot;
                return Err(e);
            }
        }

        Ok(entries.len())
    }

    /// Write the patched wheel to `output_path`.
    ///
    /// The archive is built in a temporary file next to `output_path` and
    /// renamed into place only once complete. On failure the temporary file
    /// is removed, `output_path` is untouched and the session stays open.
    pub fn save<P: AsRef<Path>>(&mut self, output_path: P) -> WheelResult<()> {
        let output_path = output_path.as_ref();
        self.ensure_can_save()?;

        if self.staged.is_empty() {
            return Err(WheelError::NothingToSave);
        }

        self.write_patched(output_path)
            .map_err(|e| WheelError::write_failure(output_path, e))?;

        self.state = SessionState::Saved;
        tracing::info!(
            "Wrote {} with {} added file(s)",
            output_path.display(),
            self.staged.len()
        );

        Ok(())
    }

    fn write_patched(&mut self, output_path: &Path) -> WheelResult<()> {
        let archive = self.archive.as_mut().ok_or(WheelError::InvalidState {
            operation: "save",
            state: SessionState::Closed.as_str(),
        })?;

        // Same directory as the output so the final rename never crosses devices
        let output_dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".wheel-patcher-")
            .suffix(".whl")
            .tempfile_in(output_dir)?;

        let mut zip = ZipWriter::new(temp);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        // Copy original entries untouched, minus RECORD and overwritten files
        let mut copied = 0usize;
        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            let replaced = entry.name() == self.record_path || self.staged.contains(entry.name());
            if replaced {
                continue;
            }
            zip.raw_copy_file(entry)?;
            copied += 1;
        }
        tracing::debug!("Copied {copied} original entries");

        for (dest, contents) in self.staged.iter() {
            zip.start_file(dest, options)?;
            zip.write_all(contents)?;
        }

        let record = self.record.update(&self.staged, &self.record_path);
        let record_csv = record.to_csv_string()?;
        zip.start_file(self.record_path.as_str(), options)?;
        zip.write_all(record_csv.as_bytes())?;
        tracing::debug!("Wrote {} with {} rows", self.record_path, record.len());

        let temp = zip.finish()?;
        temp.persist(output_path).map_err(|e| WheelError::Io(e.error))?;

        Ok(())
    }

    /// Release the read handle and discard staged files.
    ///
    /// Safe to call more than once.
    pub fn close(&mut self) {
        if self.archive.take().is_some() {
            tracing::debug!("Closed {}", self.wheel_path.display());
        }
        self.staged.clear();
        self.state = SessionState::Closed;
    }

    fn ensure_can_stage(&self) -> WheelResult<()> {
        if self.state.can_stage() {
            Ok(())
        } else {
            Err(WheelError::InvalidState {
                operation: "add files to",
                state: self.state.as_str(),
            })
        }
    }

    fn ensure_can_save(&self) -> WheelResult<()> {
        if self.state.can_save() {
            Ok(())
        } else {
            Err(WheelError::InvalidState {
                operation: "save",
                state: self.state.as_str(),
            })
        }
    }

    fn check_destination(&self, dest: &str, overwrite: bool) -> WheelResult<()> {
        if dest == self.record_path {
            return Err(WheelError::ReservedPath(dest.to_string()));
        }

        if !overwrite {
            if self.has_file(dest) {
                return Err(WheelError::AlreadyExists(dest.to_string()));
            }
            if self.staged.contains(dest) {
                return Err(WheelError::AlreadyQueued(dest.to_string()));
            }
        }

        Ok(())
    }

    /// Path of the wheel being patched.
    #[must_use]
    pub fn wheel_path(&self) -> &Path {
        &self.wheel_path
    }

    /// Name of the top-level `.dist-info` directory.
    #[must_use]
    pub fn dist_info_dir(&self) -> &str {
        &self.dist_info_dir
    }

    /// Path of RECORD within the wheel.
    #[must_use]
    pub fn record_path(&self) -> &str {
        &self.record_path
    }

    /// RECORD as read from the source wheel.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Files staged so far.
    #[must_use]
    pub fn staged(&self) -> &StagedFiles {
        &self.staged
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// All entries of the source wheel.
    #[must_use]
    pub fn list_files(&self) -> &[String] {
        &self.names
    }

    /// Check if an entry exists in the source wheel.
    #[must_use]
    pub fn has_file(&self, path: &str) -> bool {
        self.names.iter().any(|name| name == path)
    }
}
