use crate::database_drivers::target::redact_password;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of an [`Error`], for callers that branch on the
/// failure category rather than on the variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedUrl,
    UnsupportedProtocol,
    StrategyUnavailable,
    DbOperationFailed,
    LaunchFailed,
    DumpFailed,
    OutputPath,
}

/// dbkeeper errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid database url '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("protocol {0} is not implemented")]
    UnsupportedProtocol(String),

    #[error("cannot instantiate a strategy for protocol {protocol}: {reason}")]
    StrategyUnavailable { protocol: String, reason: String },

    #[error("cannot {operation} the db: {source}")]
    DbOperationFailed {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("couldn't execute {program}: {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} returned {code}\n<stdout>:\n{stdout}\n<stderr>:\n{stderr}")]
    DumpFailed {
        program: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("failed to create {}: {source}", .path.display())]
    OutputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// A `MalformedUrl` error. The password in `url`, if any, is masked.
    pub fn malformed_url(url: impl AsRef<str>, reason: impl ToString) -> Self {
        Error::MalformedUrl {
            url: redact_password(url.as_ref()),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedUrl { .. } => ErrorKind::MalformedUrl,
            Error::UnsupportedProtocol(_) => ErrorKind::UnsupportedProtocol,
            Error::StrategyUnavailable { .. } => ErrorKind::StrategyUnavailable,
            Error::DbOperationFailed { .. } => ErrorKind::DbOperationFailed,
            Error::LaunchFailed { .. } => ErrorKind::LaunchFailed,
            Error::DumpFailed { .. } => ErrorKind::DumpFailed,
            Error::OutputPath { .. } => ErrorKind::OutputPath,
        }
    }

    /// True when the failure was caused by user input rather than by the
    /// environment (missing tooling, unreachable server, failing dump).
    pub fn is_expected(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedUrl | ErrorKind::UnsupportedProtocol
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
