//! Example command: summarize a file named by a validated JSON config.
//!
//! Use this as a template for commands that take `--config`, validate it
//! against a schema, and log through the per-script logger.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::io::config::{ConfigSource, ExampleConfig, parse_config};

const RULE: &str = "--------------------------------------------------";

/// Summary returned by [`run_example`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleResult {
    pub path: PathBuf,
    pub line_count: usize,
}

/// Load the `--config` value (inline JSON or a file path) and validate it.
///
/// File read errors surface unchanged; JSON and schema failures carry a
/// `parse config json` / `config schema validation failed` message.
pub fn load_example_config(arg: &str) -> Result<ExampleConfig> {
    let raw = ConfigSource::from_arg(arg).read()?;
    parse_config(&raw)
}

/// Read `config.input_path` and log a short summary of it.
pub fn run_example(config: &ExampleConfig) -> Result<ExampleResult> {
    let input_display = config.input_path.display();
    info!("=== Example Script ===");
    info!("Input path: {}", input_display);
    info!("Summary only: {}", config.summary_only);
    info!("{RULE}");

    let bytes = fs::read(&config.input_path).with_context(|| format!("read {}", input_display))?;
    let line_count = count_lines(&String::from_utf8_lossy(&bytes));

    if config.summary_only {
        info!("Summary: {} has {} lines", input_display, line_count);
    } else {
        info!("File: {}", input_display);
        info!("  Lines: {}", line_count);
        info!("{RULE}");
        info!("Done.");
    }

    Ok(ExampleResult {
        path: config.input_path.clone(),
        line_count,
    })
}

/// Number of newline-delimited segments; an empty input is one segment.
///
/// `\r\n` endings count once, and a trailing newline opens a final empty
/// segment.
pub fn count_lines(content: &str) -> usize {
    content.split('\n').count()
}
