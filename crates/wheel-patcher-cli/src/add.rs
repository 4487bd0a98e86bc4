//! Add command.
//!
//! Stages a single file and writes the patched wheel.

use crate::output;
use anyhow::{Context, Result};
use std::path::Path;
use wheel_patcher_core::WheelPatcher;

/// Run the add command.
pub fn run(
    wheel: &str,
    file: &str,
    dest: Option<&str>,
    output: Option<String>,
    in_place: bool,
    force: bool,
) -> Result<()> {
    let wheel_path = Path::new(wheel);
    let output_path = output::resolve(wheel_path, output, in_place);

    let mut patcher =
        WheelPatcher::open(wheel_path).with_context(|| format!("Failed to open: {wheel}"))?;

    let added = patcher
        .add_file(file, dest, force)
        .with_context(|| format!("Failed to add file: {file}"))?;
    println!("Adding: {file} -> {added}");

    patcher
        .save(&output_path)
        .with_context(|| format!("Failed to write wheel: {}", output_path.display()))?;
    patcher.close();

    println!("Patched wheel: {}", output_path.display());
    Ok(())
}
