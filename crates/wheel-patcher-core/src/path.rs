//! Destination path normalization and safety checks

use crate::{DIST_INFO_PLACEHOLDER, WheelError, WheelResult};
use std::path::Path;

/// Convert `\` separators to `/` and strip every leading slash.
pub fn normalize(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized.trim_start_matches('/').to_string()
}

/// Replace a leading `.dist-info/` with the wheel's real metadata directory.
///
/// Paths without the placeholder are returned unchanged.
pub fn resolve_placeholder(path: &str, dist_info_dir: &str) -> String {
    match path.strip_prefix(DIST_INFO_PLACEHOLDER) {
        Some(rest) => format!("{dist_info_dir}/{rest}"),
        None => path.to_string(),
    }
}

/// Reject destinations that could escape the archive root.
///
/// Fails with [`WheelError::PathTraversal`] if any `/`-separated segment of
/// the normalized path is `..`, and with [`WheelError::AbsolutePath`] if
/// `path` is absolute on the host.
pub fn validate_safe(path: &str) -> WheelResult<()> {
    let normalized = normalize(path);

    if normalized.split('/').any(|segment| segment == "..") {
        return Err(WheelError::PathTraversal(path.to_string()));
    }

    if Path::new(path).is_absolute() {
        return Err(WheelError::AbsolutePath(path.to_string()));
    }

    Ok(())
}

/// Full destination pipeline: resolve the placeholder, normalize, validate.
///
/// A destination that normalizes to nothing (`""`, `"/"`) is rejected with
/// [`WheelError::InvalidFormat`].
pub fn destination(dest: &str, dist_info_dir: &str) -> WheelResult<String> {
    let resolved = resolve_placeholder(dest, dist_info_dir);
    let normalized = normalize(&resolved);
    if normalized.is_empty() {
        return Err(WheelError::InvalidFormat(format!(
            "empty destination path: {dest:?}"
        )));
    }
    validate_safe(&normalized)?;
    Ok(normalized)
}
