//! Per-script logger writing to the console and a timestamped log file.
//!
//! # Layout
//!
//! Each program gets its own log directory derived from its path relative to
//! the project root (`.root` marker), with a leading `src` segment and the
//! file extension removed:
//!
//! ```text
//! <root>/src/scripts/example.rs  ->  logs/scripts/example/2024-03-07-04-05-06.log
//! ```
//!
//! The log file name captures the process start time. Both sinks share one
//! level filter, read from `LOG_LEVEL` (default `verbose`).
//!
//! # Example
//! ```bash
//! LOG_LEVEL=info LOG_FORMAT=json cargo run --bin example -- --config config.json
//! ```

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Local};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::core::level::{LogFormat, LogLevel};
use crate::core::line::{LineFields, render_line};
use crate::core::script_path::script_relative_path;
use crate::core::timestamp::{line_timestamp, log_file_name};
use crate::io::root::RootLocator;

pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
pub const LOG_DIR_VAR: &str = "LOG_DIR";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Logger knobs taken from the (already merged) environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Base directory for per-script log directories, relative to the
    /// working directory unless absolute.
    pub log_base_dir: PathBuf,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            log_base_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl LoggerSettings {
    /// Read `LOG_LEVEL`, `LOG_FORMAT` and `LOG_DIR` from the process
    /// environment. Unset or empty values fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let level = match non_empty(LOG_LEVEL_VAR) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("parse {LOG_LEVEL_VAR}"))?,
            None => defaults.level,
        };
        let format = match non_empty(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("parse {LOG_FORMAT_VAR}"))?,
            None => defaults.format,
        };
        let log_base_dir = non_empty(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.log_base_dir);

        Ok(Self {
            level,
            format,
            log_base_dir,
        })
    }
}

/// Where the invoked program sits relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPaths {
    /// Absolute path of the invoked program.
    pub script: PathBuf,
    pub root: PathBuf,
    /// Root-relative path without `src` prefix or extension.
    pub relative: PathBuf,
    pub log_dir: PathBuf,
}

/// Derive the per-script log directory from the process arguments.
///
/// `args[0]` is the invoked program. A bare name (launched through `PATH`)
/// resolves to the running executable instead of the working directory.
/// The project root is searched from the program's directory.
pub fn resolve_script_paths(
    args: &[OsString],
    locator: &dyn RootLocator,
    log_base_dir: &Path,
) -> Result<ScriptPaths> {
    let script = match args.first() {
        Some(arg) if !arg.is_empty() => program_path(Path::new(arg))?,
        _ => bail!("Cannot determine main script path from argv[0]. Full argv: {args:?}"),
    };
    let start_dir = script.parent().unwrap_or(&script);

    let marker = locator.marker();
    let root = locator.locate(start_dir)?.ok_or_else(|| {
        anyhow!(
            "Could not find project root (marked by '{marker}') for script: {}. \
             Ensure '{marker}' exists in a parent directory. Full argv: {args:?}",
            script.display()
        )
    })?;

    let relative = script_relative_path(&root, &script)?;
    let log_dir = log_base_dir.join(&relative);
    Ok(ScriptPaths {
        script,
        root,
        relative,
        log_dir,
    })
}

fn program_path(arg0: &Path) -> Result<PathBuf> {
    if arg0.parent() == Some(Path::new("")) {
        return std::env::current_exe()
            .with_context(|| format!("resolve executable for {}", arg0.display()));
    }
    std::path::absolute(arg0).with_context(|| format!("resolve script path {}", arg0.display()))
}

/// Process-wide logger handle.
///
/// Owns the file sink's worker guard: dropping the logger flushes pending
/// file writes, so keep it alive until the process is about to exit.
#[derive(Debug)]
pub struct ScriptLogger {
    paths: ScriptPaths,
    log_file: PathBuf,
    dispatch: Dispatch,
    _guard: WorkerGuard,
}

type FilteredRegistry = Layered<EnvFilter, Registry>;
type SinkLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

impl ScriptLogger {
    /// Open `<log_dir>/<started_at>.log` and assemble the console and file
    /// sinks behind one level filter.
    pub fn build(
        settings: LoggerSettings,
        paths: ScriptPaths,
        started_at: DateTime<Local>,
    ) -> Result<Self> {
        fs::create_dir_all(&paths.log_dir)
            .with_context(|| format!("create directory {}", paths.log_dir.display()))?;
        let log_file = paths.log_dir.join(log_file_name(&started_at));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .with_context(|| format!("open log file {}", log_file.display()))?;
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        let filter = EnvFilter::try_new(settings.level.as_filter())
            .with_context(|| format!("invalid log level '{}'", settings.level))?;
        let console = std::io::stderr
            .with_max_level(Level::WARN)
            .or_else(std::io::stdout);
        let sinks: Vec<SinkLayer> = vec![
            sink_layer(settings.format, console),
            sink_layer(settings.format, file_writer),
        ];
        let subscriber = tracing_subscriber::registry().with(filter).with(sinks);

        Ok(Self {
            paths,
            log_file,
            dispatch: Dispatch::new(subscriber),
            _guard: guard,
        })
    }

    /// Make this logger the global default. Only the first call succeeds.
    pub fn install(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .context("install global logger")
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn paths(&self) -> &ScriptPaths {
        &self.paths
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

fn sink_layer<W>(format: LogFormat, writer: W) -> SinkLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Cli => fmt::layer()
            .event_format(LineFormat)
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
    }
}

/// `<YYYY-MM-DD HH:mm:ss> [<LEVEL>]: <stack-or-message>` in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut fields = LineFields::default();
        event.record(&mut fields);
        let timestamp = line_timestamp(&Local::now());
        writeln!(
            writer,
            "{}",
            render_line(&timestamp, event.metadata().level(), &fields)
        )
    }
}
