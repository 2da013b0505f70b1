use thiserror::Error;

use crate::dispatch::Command;

/// Boxed error returned by host collaborators.
pub type HostError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by command execution.
///
/// A command that is not available is not an error (see
/// [`CommandOutcome::Unavailable`](crate::CommandOutcome::Unavailable)), and neither is a write
/// skipped because the selection changed underneath the command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A host command string did not name a known command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The active language has no usable comment tokens.
    #[error("no comment syntax for language '{0}'")]
    MissingCommentSyntax(String),

    /// The active language has no region markers.
    #[error("no region syntax for language '{0}'")]
    MissingRegionSyntax(String),

    /// The active document has no language.
    #[error("active document has no language")]
    NoLanguage,

    /// The active document is not backed by a file.
    #[error("active document is not saved to a file")]
    NoActiveFile,

    /// A host collaborator failed while running `command`.
    #[error("{command} failed: {source}")]
    Host {
        /// The command that was running.
        command: Command,
        /// The host's error.
        #[source]
        source: HostError,
    },
}

/// Errors loading [`EngineOptions`](crate::EngineOptions).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The options file is not valid TOML for the options schema.
    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),
}
