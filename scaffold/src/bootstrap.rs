//! Ordered process start-up: load `.env`, then build the logger.
//!
//! The env file must be merged before anything reads configuration, so the
//! logger's settings are taken from the environment only after
//! [`load_env`] has run.

use std::ffi::OsString;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::io::env::{EnvReport, env_start_dir, load_env};
use crate::io::root::{MarkerLocator, RootLocator};
use crate::logging::{LoggerSettings, ScriptLogger, resolve_script_paths};

/// Handles produced by start-up, owned by the entry point.
#[derive(Debug)]
pub struct Bootstrap {
    pub env: EnvReport,
    pub logger: ScriptLogger,
}

/// Start-up for the running process: env from the executable's directory,
/// logger from the process arguments.
pub fn init() -> Result<Bootstrap> {
    let start_dir = env_start_dir()?;
    let args: Vec<OsString> = std::env::args_os().collect();
    init_with(&MarkerLocator::default(), &start_dir, &args)
}

/// Start-up with explicit inputs.
pub fn init_with(
    locator: &dyn RootLocator,
    env_start_dir: &Path,
    args: &[OsString],
) -> Result<Bootstrap> {
    let env = load_env(locator, env_start_dir).context("load environment")?;
    let settings = LoggerSettings::from_env().context("read logger settings")?;
    let paths = resolve_script_paths(args, locator, &settings.log_base_dir)
        .context("resolve script log directory")?;
    let logger = ScriptLogger::build(settings, paths, Local::now()).context("build logger")?;
    Ok(Bootstrap { env, logger })
}
