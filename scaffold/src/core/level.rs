//! Log level and output format names accepted from the environment.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};

/// Minimum severity for both sinks.
///
/// Accepts the npm-style names (`error`, `warn`, `info`, `http`, `verbose`,
/// `debug`, `silly`) alongside `trace` and `off`. Values containing `=` are
/// kept as raw `tracing` filter directives such as `scaffold=debug`; any
/// other unknown name is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
    Directive(String),
}

impl LogLevel {
    /// Filter string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
            LogLevel::Directive(directive) => directive.as_str(),
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("log level must not be empty"));
        }
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "info" | "http" => LogLevel::Info,
            "verbose" | "debug" => LogLevel::Debug,
            "silly" | "trace" => LogLevel::Trace,
            _ if trimmed.contains('=') => LogLevel::Directive(trimmed.to_string()),
            _ => return Err(anyhow!("unknown log level '{trimmed}'")),
        })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// Rendering of each log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// `<timestamp> [<LEVEL>]: <stack-or-message>`
    #[default]
    Cli,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cli" | "text" => Ok(LogFormat::Cli),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!(
                "unknown log format '{other}' (expected 'cli' or 'json')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npm_style_names_map_onto_tracing_levels() {
        let cases = [
            ("error", LogLevel::Error),
            ("warn", LogLevel::Warn),
            ("info", LogLevel::Info),
            ("http", LogLevel::Info),
            ("verbose", LogLevel::Debug),
            ("debug", LogLevel::Debug),
            ("silly", LogLevel::Trace),
            ("OFF", LogLevel::Off),
        ];
        for (raw, expected) in cases {
            assert_eq!(raw.parse::<LogLevel>().expect("parse"), expected, "{raw}");
        }
    }

    #[test]
    fn default_level_is_verbose() {
        let parsed: LogLevel = "verbose".parse().expect("parse");
        assert_eq!(parsed, LogLevel::default());
        assert_eq!(parsed.as_filter(), "debug");
    }

    #[test]
    fn target_directives_pass_through() {
        let parsed: LogLevel = " scaffold=trace ".parse().expect("parse");
        assert_eq!(parsed, LogLevel::Directive("scaffold=trace".to_string()));
        let parsed: LogLevel = "warn,scaffold::io=debug".parse().expect("parse");
        assert_eq!(parsed.as_filter(), "warn,scaffold::io=debug");
    }

    #[test]
    fn misspelled_level_is_rejected() {
        let err = "verbos".parse::<LogLevel>().expect_err("typo");
        assert_eq!(err.to_string(), "unknown log level 'verbos'");
        assert!("scaffold".parse::<LogLevel>().is_err());
    }

    #[test]
    fn empty_level_is_rejected() {
        assert!("  ".parse::<LogLevel>().is_err());
    }

    #[test]
    fn parses_formats() {
        assert_eq!("JSON".parse::<LogFormat>().expect("json"), LogFormat::Json);
        assert_eq!("cli".parse::<LogFormat>().expect("cli"), LogFormat::Cli);
        let err = "xml".parse::<LogFormat>().expect_err("xml");
        assert!(err.to_string().contains("unknown log format"));
    }
}
