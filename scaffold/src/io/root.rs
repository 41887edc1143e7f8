//! Project root discovery via a marker file.
//!
//! The project root is the nearest directory, walking upwards from a start
//! directory, that contains a marker file (`.root` by default). Only the
//! marker's presence matters; its contents are never read.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Marker file name identifying the project root.
pub const DEFAULT_MARKER: &str = ".root";

/// Search upwards from `start_dir` (inclusive) for a directory containing
/// `marker_file` and return the nearest one.
///
/// Fails when the filesystem root is reached without a match; the error
/// names both the marker and the start directory.
pub fn find_root_dir(start_dir: &Path, marker_file: &str) -> Result<PathBuf> {
    if marker_file.is_empty() {
        bail!("marker file name must not be empty");
    }
    for dir in start_dir.ancestors() {
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        if dir.join(marker_file).exists() {
            return Ok(dir.to_path_buf());
        }
    }
    bail!(
        "Could not find root directory containing '{}' starting from '{}'",
        marker_file,
        start_dir.display()
    )
}

/// Resolves the project root for a start directory.
///
/// `Ok(None)` means "no root" without a more specific failure; callers turn
/// it into their own error.
pub trait RootLocator {
    fn locate(&self, start_dir: &Path) -> Result<Option<PathBuf>>;

    /// Marker name reported in error messages.
    fn marker(&self) -> &str {
        DEFAULT_MARKER
    }
}

/// Filesystem-backed locator built on [`find_root_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerLocator {
    marker: String,
}

impl MarkerLocator {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for MarkerLocator {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl RootLocator for MarkerLocator {
    fn locate(&self, start_dir: &Path) -> Result<Option<PathBuf>> {
        find_root_dir(start_dir, &self.marker).map(Some)
    }

    fn marker(&self) -> &str {
        &self.marker
    }
}
