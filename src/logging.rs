//! Logging bootstrap for the command-line front end.
//!
//! The library only talks to the `log` facade; the binary decides where the
//! records go. Diagnostics are written to stderr so stdout stays clean for
//! command output.

use crate::error::{GptRefError, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Environment variable overriding the log level
pub const LOG_ENV_VAR: &str = "GPTREF_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Start the stderr logger.
///
/// The returned handle must be kept alive for the duration of the program.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let level = resolve_level(verbose, std::env::var(LOG_ENV_VAR).ok().as_deref())?;

    Logger::try_with_str(level)
        .map_err(|e| GptRefError::Config(format!("invalid log level `{}`: {}", level, e)))?
        .log_to_stderr()
        .start()
        .map_err(|e| GptRefError::Config(format!("failed to start logger: {}", e)))
}

/// Pick the log level: the environment wins, then `--verbose`, then the default
pub fn resolve_level(verbose: bool, env_level: Option<&str>) -> Result<&'static str> {
    match env_level.map(str::trim).filter(|s| !s.is_empty()) {
        Some(level) => normalize_level(level),
        None if verbose => Ok(VERBOSE_LEVEL),
        None => Ok(DEFAULT_LEVEL),
    }
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(GptRefError::Config(format!(
            "unsupported log level `{}`; expected off|trace|debug|info|warn|error",
            other
        ))),
    }
}
