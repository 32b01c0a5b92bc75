//! Error types for dispatching subcommands to an external tool.
//!
//! Three failure classes are kept apart so callers can match on them:
//!   * [`LaunchError`]: the tool could not be found or started,
//!   * [`DispatchError`]: the tool ran and exited non-zero,
//!   * a parser error: the tool succeeded but its stdout could not be parsed.
//!
//! [`CallError`] is the union returned by `Dispatcher::call`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The tool could not be launched. Never produced for a non-zero exit.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Nothing found via override, environment or PATH.
    #[error("{collection} not found (set {env_var}, pass --{collection}, or add it to PATH)")]
    NotFound { collection: String, env_var: String },

    /// An explicit path was given but does not exist.
    #[error("{collection} not found at {}", path.display())]
    MissingPath { collection: String, path: PathBuf },

    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect output of {}: {source}", program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} --version produced no output on stdout/stderr", program.display())]
    NoVersion { program: PathBuf },
}

/// The tool exited with a non-zero status.
///
/// `stdout` and `stderr` hold the text seen at failure time; when the call
/// asked for split lines they are the lines joined back with `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collection} returned with error {exit_code}: stdout={stdout}, stderr={stderr}")]
pub struct DispatchError {
    pub collection: String,
    pub subcommand: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Everything `Dispatcher::call` can fail with.
#[derive(Debug, Error)]
pub enum CallError {
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A selected parser rejected the tool's stdout. The parser's own error
    /// is carried as-is.
    #[error(transparent)]
    Parse(anyhow::Error),
}

impl CallError {
    /// Exit code of the tool, if the failure was a non-zero exit.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CallError::Dispatch(e) => Some(e.exit_code),
            _ => None,
        }
    }
}

/// Lookup failures against the built-in collection catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown collection '{name}' (known: {known})")]
    UnknownCollection { name: String, known: String },

    #[error("unknown {collection} subcommand '{name}' (known: {known})")]
    UnknownSubcommand {
        collection: String,
        name: String,
        known: String,
    },
}
