//! Load `<root>/.env` into the process environment.
//!
//! The `.env` file lives next to the `.root` marker, so binaries launched from
//! any subdirectory (or from `target/`) pick up the same configuration. Keys
//! already present in the process environment win over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use super::root::RootLocator;

pub const ENV_FILE_NAME: &str = ".env";

/// What a successful env load changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvReport {
    pub root: PathBuf,
    pub env_path: PathBuf,
    /// Keys added to the process environment.
    pub loaded: Vec<String>,
    /// Keys in the file that the process already defined.
    pub preserved: Vec<String>,
}

/// Directory the env search starts from: the running executable's directory.
pub fn env_start_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("resolve current executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))
}

/// Locate the project root from `start_dir` and merge its `.env` file into
/// the process environment.
pub fn load_env(locator: &dyn RootLocator, start_dir: &Path) -> Result<EnvReport> {
    let root = locator.locate(start_dir)?.ok_or_else(|| {
        anyhow!(
            "Could not find root directory containing '{}' starting from '{}'",
            locator.marker(),
            start_dir.display()
        )
    })?;
    let env_path = root.join(ENV_FILE_NAME);
    if !env_path.exists() {
        bail!("Could not find env file at {}", env_path.display());
    }

    let (loaded, preserved) = partition_keys(&env_path)?;
    dotenvy::from_path(&env_path)
        .with_context(|| format!("load env file {}", env_path.display()))?;

    Ok(EnvReport {
        root,
        env_path,
        loaded,
        preserved,
    })
}

/// Split the file's keys into those the merge will add and those it keeps.
fn partition_keys(env_path: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let entries = dotenvy::from_path_iter(env_path)
        .with_context(|| format!("read env file {}", env_path.display()))?;
    let mut loaded: Vec<String> = Vec::new();
    let mut preserved: Vec<String> = Vec::new();
    for entry in entries {
        let (key, _) = entry.with_context(|| format!("parse env file {}", env_path.display()))?;
        if std::env::var_os(&key).is_some() {
            if !preserved.contains(&key) {
                preserved.push(key);
            }
        } else if !loaded.contains(&key) {
            loaded.push(key);
        }
    }
    Ok((loaded, preserved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::root::MarkerLocator;
    use crate::test_support::{FailingLocator, FixedLocator, TestRoot};

    #[test]
    fn loads_env_file_next_to_marker() {
        let root = TestRoot::new().expect("root");
        root.write(".env", "SCAFFOLD_TEST_ENV_HELLO=hello\n")
            .expect("env");
        let nested = root.mkdir("src/core").expect("nested");

        let report = load_env(&MarkerLocator::default(), &nested).expect("load");

        assert_eq!(report.root, root.path());
        assert_eq!(report.env_path, root.path().join(".env"));
        assert_eq!(report.loaded, vec!["SCAFFOLD_TEST_ENV_HELLO".to_string()]);
        assert_eq!(
            std::env::var("SCAFFOLD_TEST_ENV_HELLO").expect("var"),
            "hello"
        );
    }

    #[test]
    fn existing_process_variables_are_preserved() {
        let root = TestRoot::new().expect("root");
        root.write(
            ".env",
            "SCAFFOLD_TEST_ENV_KEEP=from-file\nSCAFFOLD_TEST_ENV_ADD=added\n",
        )
        .expect("env");

        temp_env::with_var("SCAFFOLD_TEST_ENV_KEEP", Some("from-process"), || {
            let report = load_env(&FixedLocator::at(root.path()), root.path()).expect("load");
            assert_eq!(report.preserved, vec!["SCAFFOLD_TEST_ENV_KEEP".to_string()]);
            assert_eq!(report.loaded, vec!["SCAFFOLD_TEST_ENV_ADD".to_string()]);
            assert_eq!(
                std::env::var("SCAFFOLD_TEST_ENV_KEEP").expect("var"),
                "from-process"
            );
        });
        assert_eq!(
            std::env::var("SCAFFOLD_TEST_ENV_ADD").expect("var"),
            "added"
        );
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let root = TestRoot::new().expect("root");
        let err = load_env(&FixedLocator::at(root.path()), root.path()).expect_err("no env");
        let message = err.to_string();
        assert!(message.contains("Could not find env file"));
        assert!(message.contains(&root.path().join(".env").display().to_string()));
    }

    #[test]
    fn locator_failure_propagates() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_env(&FailingLocator, temp.path()).expect_err("no root");
        assert!(err.to_string().contains("Could not find root directory"));
    }

    #[test]
    fn locator_without_root_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_env(&FixedLocator::none(), temp.path()).expect_err("no root");
        assert!(err.to_string().contains("Could not find root directory containing '.root'"));
    }
}
