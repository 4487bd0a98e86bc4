//! Output path selection for commands that write a wheel.

use std::path::{Path, PathBuf};
use wheel_patcher_core::wheel::patched_output_path;

/// Pick where the patched wheel goes.
///
/// An explicit `--output` wins, then `--in-place`, otherwise
/// `<stem>-patched.whl` next to the input.
pub fn resolve(wheel: &Path, output: Option<String>, in_place: bool) -> PathBuf {
    match output {
        Some(output) => PathBuf::from(output),
        None if in_place => wheel.to_path_buf(),
        None => patched_output_path(wheel),
    }
}
