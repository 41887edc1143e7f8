//! Example command configuration, passed inline or as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const EXAMPLE_CONFIG_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/example_config/v1.schema.json"
));

/// Configuration for `example` (JSON, camelCase keys).
///
/// Unknown keys are ignored; `summaryOnly` defaults to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExampleConfig {
    /// Path to a file to summarize.
    pub input_path: PathBuf,

    /// Only log a one-line summary.
    #[serde(default)]
    pub summary_only: bool,
}

/// Where the `--config` value points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Inline(String),
    File(PathBuf),
}

impl ConfigSource {
    /// Values starting with `{` (after trimming) are inline JSON; anything
    /// else is a path.
    pub fn from_arg(arg: &str) -> Self {
        let input = arg.trim();
        if input.starts_with('{') {
            ConfigSource::Inline(input.to_string())
        } else {
            ConfigSource::File(PathBuf::from(input))
        }
    }

    /// Raw JSON text. File read errors are returned as-is.
    pub fn read(&self) -> Result<String> {
        match self {
            ConfigSource::Inline(raw) => Ok(raw.clone()),
            ConfigSource::File(path) => read_file(path),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Parse and validate raw JSON against the example config schema.
pub fn parse_config(raw: &str) -> Result<ExampleConfig> {
    let value: Value = serde_json::from_str(raw).context("parse config json")?;
    validate_schema(&value)?;
    serde_json::from_value(value).context("deserialize config")
}

fn validate_schema(config: &Value) -> Result<()> {
    let schema: Value =
        serde_json::from_str(EXAMPLE_CONFIG_SCHEMA).context("parse example config schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(config) {
        let messages = compiled
            .iter_errors(config)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "config schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_select_inline_json() {
        assert_eq!(
            ConfigSource::from_arg("  {\"inputPath\":\"a\"} "),
            ConfigSource::Inline("{\"inputPath\":\"a\"}".to_string())
        );
        assert_eq!(
            ConfigSource::from_arg("config.json"),
            ConfigSource::File(PathBuf::from("config.json"))
        );
    }

    #[test]
    fn parses_minimal_config_with_default_summary() {
        let cfg = parse_config(r#"{"inputPath":"data.txt"}"#).expect("parse");
        assert_eq!(
            cfg,
            ExampleConfig {
                input_path: PathBuf::from("data.txt"),
                summary_only: false,
            }
        );
    }

    #[test]
    fn ignores_unknown_keys() {
        let cfg = parse_config(r#"{"inputPath":"a","summaryOnly":true,"extra":1}"#)
            .expect("parse");
        assert!(cfg.summary_only);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_config("{bad json}").expect_err("malformed");
        assert!(format!("{err:#}").contains("parse config json"));
    }

    #[test]
    fn rejects_empty_input_path() {
        let err = parse_config(r#"{"inputPath":""}"#).expect_err("empty path");
        assert!(err.to_string().contains("config schema validation failed"));
    }

    #[test]
    fn rejects_missing_input_path() {
        let err = parse_config(r#"{"summaryOnly":true}"#).expect_err("missing path");
        assert!(err.to_string().contains("inputPath"));
    }

    #[test]
    fn rejects_wrong_summary_type() {
        assert!(parse_config(r#"{"inputPath":"a","summaryOnly":"yes"}"#).is_err());
    }

    #[test]
    fn reads_config_from_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"inputPath":"x.txt"}"#).expect("write");

        let raw = ConfigSource::from_arg(&path.display().to_string())
            .read()
            .expect("read");
        assert_eq!(parse_config(&raw).expect("parse").input_path, PathBuf::from("x.txt"));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = ConfigSource::File(temp.path().join("nope.json"))
            .read()
            .expect_err("missing");
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
