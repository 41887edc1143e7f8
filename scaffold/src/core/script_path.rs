//! Root-relative script paths used to namespace log output.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, anyhow};

/// Leading source-tree segment dropped from script paths.
pub const SRC_SEGMENT: &str = "src";

/// Express `script` relative to `root` as a logical module path.
///
/// A leading `src` segment is dropped and the extension of the final
/// segment is removed, so `<root>/src/scripts/example.ts` becomes
/// `scripts/example`.
pub fn script_relative_path(root: &Path, script: &Path) -> Result<PathBuf> {
    let relative = script.strip_prefix(root).map_err(|_| {
        anyhow!(
            "script {} is not inside project root {}",
            script.display(),
            root.display()
        )
    })?;
    let relative = strip_src_segment(relative);
    let stem = relative
        .file_stem()
        .ok_or_else(|| anyhow!("script path {} has no file name", script.display()))?;
    Ok(match relative.parent() {
        Some(dir) => dir.join(stem),
        None => PathBuf::from(stem),
    })
}

fn strip_src_segment(relative: &Path) -> &Path {
    let mut components = relative.components();
    match components.next() {
        Some(Component::Normal(first)) if first == OsStr::new(SRC_SEGMENT) => {
            let rest = components.as_path();
            if rest.as_os_str().is_empty() {
                relative
            } else {
                rest
            }
        }
        _ => relative,
    }
}
