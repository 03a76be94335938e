use std::process;

use tracing_subscriber::EnvFilter;

/// Exits the program with an error message and usage information
pub fn exit_with_usage_error(message: &str, usage: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", usage);
    process::exit(1);
}

/// Verbosity levels accepted by `--log-level`.
///
/// The names mirror the levels operators already know from the platform's
/// own tooling.  CRITICAL and ERROR both map to tracing's `error` filter
/// because tracing has no separate critical level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Only unrecoverable failures.
    Critical,
    /// Errors, including per-entry dispatch failures.
    Error,
    /// Warnings and above.
    Warning,
    /// Normal operational logging.  The default.
    #[default]
    Info,
    /// Everything, including each rendered command line.
    Debug,
}

impl LogLevel {
    /// The tracing filter directive this level corresponds to.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Critical | LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(LogLevel::Critical),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(format!(
                "unknown log level '{}' (expected CRITICAL, ERROR, WARNING, INFO, or DEBUG)",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        };
        write!(f, "{}", name)
    }
}

/// Installs the global tracing subscriber at the requested level.
///
/// Call once, before any logging happens.  Later calls would panic, so the
/// binary does this exactly once at startup.
pub fn init_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.filter_directive()))
        .with_target(false)
        .init();
}
