//! Error types for seedkit operations.

use handled::Handle;

/// Errors that can occur while loading and validating a seed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The seed file could not be read.
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        message: String,
    },
    /// The seed file is not valid YAML.
    Parse {
        /// Path that was being parsed.
        path: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The document root is not a mapping of block names to entries.
    NotAMapping,
    /// A top-level key is not a scalar and cannot name a block.
    BlockNameNotScalar {
        /// Zero-based position of the key in the document.
        index: usize,
    },
    /// A block's value is not a sequence of entries.
    BlockNotASequence {
        /// Name of the offending block.
        block: String,
    },
    /// An entry within a block is not a mapping of flag names to values.
    EntryNotAMapping {
        /// Name of the offending block.
        block: String,
        /// Zero-based position of the entry within the block.
        index: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "Cannot read config file '{}': {}", path, message)
            }
            Self::Parse { path, message } => {
                write!(f, "Cannot parse config file '{}': {}", path, message)
            }
            Self::NotAMapping => {
                write!(f, "Config root must be a mapping of block names to entry lists")
            }
            Self::BlockNameNotScalar { index } => {
                write!(f, "Top-level key {} must be a scalar block name", index)
            }
            Self::BlockNotASequence { block } => {
                write!(f, "Block '{}' must hold a list of entries", block)
            }
            Self::EntryNotAMapping { block, index } => {
                write!(f, "Entry {} of block '{}' must be a mapping", index, block)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Handle<UserError> for ConfigError {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self {
            Self::Io { .. } => {
                Some("Check that the path passed to --config exists and is readable".to_string())
            }
            Self::Parse { .. } => Some("The seed file must be valid YAML".to_string()),
            Self::NotAMapping
            | Self::BlockNameNotScalar { .. }
            | Self::BlockNotASequence { .. }
            | Self::EntryNotAMapping { .. } => Some(
                "Seed files map block names to lists of entries, e.g. organizations: [{name: acme}]"
                    .to_string(),
            ),
        };
        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

/// Errors that can occur while invoking the tw CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The tw process could not be started.
    Spawn {
        /// The command line that failed to launch.
        command: String,
        /// Underlying OS error.
        message: String,
    },
    /// The tw process ran but reported failure.
    NonZeroExit {
        /// The command line that was run.
        command: String,
        /// Exit status, if the process exited normally.
        status: Option<i32>,
        /// Captured standard error output.
        stderr: String,
    },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn { command, message } => {
                write!(f, "Cannot run '{}': {}", command, message)
            }
            Self::NonZeroExit {
                command,
                status: Some(code),
                stderr,
            } => {
                write!(f, "'{}' exited with status {}: {}", command, code, stderr.trim_end())
            }
            Self::NonZeroExit {
                command,
                status: None,
                stderr,
            } => {
                write!(f, "'{}' was terminated by a signal: {}", command, stderr.trim_end())
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl Handle<UserError> for ClientError {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self {
            Self::Spawn { .. } => {
                Some("Check that the tw CLI is installed and on your PATH".to_string())
            }
            Self::NonZeroExit { .. } => {
                Some("Inspect the tw output above; the resource may already exist".to_string())
            }
        };
        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

/// Errors raised by block handlers for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// An entry lacks a field the handler requires.
    MissingField {
        /// Block the entry belongs to.
        block: String,
        /// Name of the missing field.
        field: String,
    },
    /// A field is present but its value cannot be used.
    InvalidField {
        /// Block the entry belongs to.
        block: String,
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// Writing a parameters file for the entry failed.
    ParamsFile {
        /// Underlying failure.
        message: String,
    },
    /// The tw invocation for the entry failed.
    Client(ClientError),
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { block, field } => {
                write!(f, "Block '{}' entry is missing required field '{}'", block, field)
            }
            Self::InvalidField {
                block,
                field,
                reason,
            } => {
                write!(f, "Block '{}' field '{}' is invalid: {}", block, field, reason)
            }
            Self::ParamsFile { message } => {
                write!(f, "Cannot write params file: {}", message)
            }
            Self::Client(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClientError> for HandlerError {
    fn from(e: ClientError) -> Self {
        HandlerError::Client(e)
    }
}

impl Handle<UserError> for HandlerError {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self {
            Self::MissingField { .. } | Self::InvalidField { .. } => {
                Some("Check the entry in your seed file against the tw CLI reference".to_string())
            }
            Self::ParamsFile { .. } => {
                Some("Check free space and permissions for the temp directory".to_string())
            }
            Self::Client(e) => return e.handle(),
        };
        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

/// User-friendly error information that can be extracted from various error types
#[derive(Debug, Clone)]
pub struct UserError {
    /// The main error message to display to the user
    pub message: String,
    /// Optional usage hint to help the user correct the error
    pub usage_hint: Option<String>,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Implements Handle<UserError> for itself to allow extraction
impl Handle<UserError> for UserError {
    fn handle(&self) -> Option<UserError> {
        Some(self.clone())
    }
}

/// Enhanced error formatting for CLI output
pub fn format_cli_error<E>(error: &E) -> String
where
    E: Handle<UserError> + std::fmt::Display,
{
    if let Some(user_error) = error.handle() {
        let mut output = format!("Error: {}", user_error.message);
        if let Some(hint) = user_error.usage_hint {
            output.push_str(&format!("\nHint: {}", hint));
        }
        output
    } else {
        format!("Error: {}", error)
    }
}
