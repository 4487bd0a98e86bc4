//! Apply command.
//!
//! Stages every file from a JSON manifest and writes the patched wheel.

use crate::output;
use anyhow::{Context, Result};
use std::path::Path;
use wheel_patcher_core::{BatchManifest, WheelPatcher};

/// Run the apply command.
pub fn run(
    wheel: &str,
    manifest: &str,
    output: Option<String>,
    in_place: bool,
    force: bool,
) -> Result<()> {
    let wheel_path = Path::new(wheel);
    let output_path = output::resolve(wheel_path, output, in_place);

    let batch = BatchManifest::from_file(manifest)
        .with_context(|| format!("Failed to load manifest: {manifest}"))?;

    let mut patcher =
        WheelPatcher::open(wheel_path).with_context(|| format!("Failed to open: {wheel}"))?;

    let count = patcher
        .apply_batch(&batch, force)
        .with_context(|| format!("Failed to apply manifest: {manifest}"))?;
    for path in patcher.staged().paths() {
        println!("  Adding: {path}");
    }

    patcher
        .save(&output_path)
        .with_context(|| format!("Failed to write wheel: {}", output_path.display()))?;
    patcher.close();

    println!(
        "Patched wheel: {} ({count} file(s) added)",
        output_path.display()
    );
    Ok(())
}
