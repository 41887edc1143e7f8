//! `example`: read `--config` (inline JSON or a JSON file), validate it, and
//! log a line-count summary of the referenced file.

use clap::Parser;
use tracing::{debug, error};

use scaffold::bootstrap;
use scaffold::example::{load_example_config, run_example};
use scaffold::exit_codes;

#[derive(Parser)]
#[command(
    name = "example",
    version,
    about = "Example script: read --config (file or inline JSON), validate it, log a file summary"
)]
struct Cli {
    /// Path to a config file or inline JSON.
    #[arg(long)]
    config: String,
}

fn main() {
    let cli = Cli::parse();
    let code = run(&cli);
    std::process::exit(code);
}

/// Run the command and return its exit code.
///
/// Everything that owns the logger lives in here so the file sink is flushed
/// before `main` calls `process::exit`.
fn run(cli: &Cli) -> i32 {
    let boot = match bootstrap::init() {
        Ok(boot) => boot,
        Err(err) => {
            eprintln!("{:#}", err);
            return exit_codes::INVALID;
        }
    };
    if let Err(err) = boot.logger.install() {
        eprintln!("{:#}", err);
        return exit_codes::INVALID;
    }
    debug!(
        root = %boot.env.root.display(),
        env_path = %boot.env.env_path.display(),
        loaded = boot.env.loaded.len(),
        preserved = boot.env.preserved.len(),
        log_file = %boot.logger.log_file().display(),
        "bootstrap complete"
    );

    let config = match load_example_config(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            error!(error = as_error(&err), "Failed to parse config");
            return exit_codes::INVALID;
        }
    };

    match run_example(&config) {
        Ok(result) => {
            debug!(
                path = %result.path.display(),
                line_count = result.line_count,
                "example finished"
            );
            exit_codes::OK
        }
        Err(err) => {
            error!(error = as_error(&err), "Example failed");
            exit_codes::INVALID
        }
    }
}

fn as_error(err: &anyhow::Error) -> &(dyn std::error::Error + 'static) {
    err.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_flag() {
        let cli = Cli::parse_from(["example", "--config", "{\"inputPath\":\"a\"}"]);
        assert_eq!(cli.config, "{\"inputPath\":\"a\"}");
    }

    #[test]
    fn config_flag_is_required() {
        assert!(Cli::try_parse_from(["example"]).is_err());
    }
}
