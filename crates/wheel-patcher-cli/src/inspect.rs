//! List and extract commands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use wheel_patcher_core::wheel;

/// List contents of a wheel, optionally checking them against RECORD.
pub fn list(wheel_path: &str, verify: bool) -> Result<()> {
    let path = Path::new(wheel_path);
    let mut names =
        wheel::list_contents(path).with_context(|| format!("Failed to open: {wheel_path}"))?;
    names.sort();

    println!("Wheel: {wheel_path}");
    println!("Files ({}):", names.len());
    for name in &names {
        println!("  {name}");
    }

    if verify {
        let mismatches = wheel::verify_record(path)
            .with_context(|| format!("Failed to verify: {wheel_path}"))?;
        if !mismatches.is_empty() {
            for mismatch in &mismatches {
                eprintln!("  {mismatch}");
            }
            anyhow::bail!(
                "RECORD verification failed for {wheel_path}: {} mismatch(es)",
                mismatches.len()
            );
        }
        println!("RECORD verified");
    }

    Ok(())
}

/// Extract a wheel to a directory.
pub fn extract(wheel_path: &str, output_dir: Option<String>) -> Result<()> {
    let path = Path::new(wheel_path);
    let output_dir = output_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| default_extract_dir(path));

    wheel::extract(path, &output_dir).with_context(|| {
        format!(
            "Failed to extract {wheel_path} to {}",
            output_dir.display()
        )
    })?;

    println!("Extracted: {}", output_dir.display());
    Ok(())
}

/// `./<wheel name without extension>`
fn default_extract_dir(wheel_path: &Path) -> PathBuf {
    let stem = wheel_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Path::new(".").join(stem)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::test_support::{DIST_INFO, create_test_wheel};
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn create_bare_wheel(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("bare-1.0-py3-none-any.whl");
        let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        zip.start_file("bare/__init__.py", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"").unwrap();
        zip.finish().unwrap();
        path
    }

    #[test]
    fn list___valid_wheel___succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let wheel = create_test_wheel(&temp_dir);

        list(&wheel.to_string_lossy(), false).unwrap();
    }

    #[test]
    fn list___not_a_wheel___fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("archive.zip");
        fs::write(&path, b"PK").unwrap();

        let err = list(&path.to_string_lossy(), false).unwrap_err();

        assert!(format!("{err:#}").contains("Not a wheel file"));
    }

    #[test]
    fn list___zip_without_metadata___fails() {
        let temp_dir = TempDir::new().unwrap();
        let wheel = create_bare_wheel(&temp_dir);

        let err = list(&wheel.to_string_lossy(), false).unwrap_err();

        assert!(format!("{err:#}").contains("No .dist-info directory"));
    }

    #[test]
    fn list___verify_consistent_wheel___succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let wheel = create_test_wheel(&temp_dir);

        list(&wheel.to_string_lossy(), true).unwrap();
    }

    #[test]
    fn list___verify_tampered_wheel___fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("demo-0.1-py3-none-any.whl");
        let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        let record_path = format!("{DIST_INFO}/RECORD");
        let record = format!("demo/__init__.py,sha256=stale,5\n{record_path},,\n");
        for (name, contents) in [
            ("demo/__init__.py", "hello"),
            (record_path.as_str(), record.as_str()),
        ] {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();

        let err = list(&path.to_string_lossy(), true).unwrap_err();

        assert!(format!("{err:#}").contains("1 mismatch(es)"));
    }

    #[test]
    fn extract___zip_without_metadata___fails() {
        let temp_dir = TempDir::new().unwrap();
        let wheel = create_bare_wheel(&temp_dir);
        let out = temp_dir.path().join("unpacked");

        let result = extract(
            &wheel.to_string_lossy(),
            Some(out.to_string_lossy().to_string()),
        );

        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn extract___explicit_dir___writes_files() {
        let temp_dir = TempDir::new().unwrap();
        let wheel = create_test_wheel(&temp_dir);
        let out = temp_dir.path().join("unpacked");

        extract(
            &wheel.to_string_lossy(),
            Some(out.to_string_lossy().to_string()),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(out.join("demo/__init__.py")).unwrap(),
            "hello"
        );
        assert!(out.join(DIST_INFO).join("RECORD").is_file());
    }

    #[test]
    fn default_extract_dir___strips_extension() {
        let dir = default_extract_dir(Path::new("dist/demo-0.1-py3-none-any.whl"));

        assert_eq!(dir, Path::new("./demo-0.1-py3-none-any"));
    }
}
