//! Test-only helpers for building scratch project roots.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::root::{DEFAULT_MARKER, RootLocator};

/// Temporary project root containing the default `.root` marker.
pub struct TestRoot {
    temp: TempDir,
}

impl TestRoot {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        fs::write(temp.path().join(DEFAULT_MARKER), "").context("write marker")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Create `relative` (and parents) under the root.
    pub fn mkdir(&self, relative: &str) -> Result<PathBuf> {
        let dir = self.path().join(relative);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(dir)
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

/// Locator returning a fixed answer regardless of the start directory.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    pub root: Option<PathBuf>,
}

impl FixedLocator {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// A locator that reports no root without failing.
    pub fn none() -> Self {
        Self { root: None }
    }
}

impl RootLocator for FixedLocator {
    fn locate(&self, _start_dir: &Path) -> Result<Option<PathBuf>> {
        Ok(self.root.clone())
    }
}

/// Locator that always fails, standing in for a missing marker.
#[derive(Debug, Clone, Copy)]
pub struct FailingLocator;

impl RootLocator for FailingLocator {
    fn locate(&self, start_dir: &Path) -> Result<Option<PathBuf>> {
        anyhow::bail!(
            "Could not find root directory containing '{}' starting from '{}'",
            DEFAULT_MARKER,
            start_dir.display()
        )
    }
}
