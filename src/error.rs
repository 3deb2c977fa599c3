//! Centralized error types for mailarchive.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailarchive library.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Could not establish a connection to the IMAP server.
    #[error("cannot connect to '{host}': {source}")]
    Connection { host: String, source: imap::Error },

    /// The server rejected the credentials.
    #[error("authentication failed for '{user}': {source}")]
    Auth { user: String, source: imap::Error },

    /// An IMAP command failed mid-session (SELECT, SEARCH, STORE, ...).
    #[error("IMAP command failed: {0}")]
    Imap(#[from] imap::Error),

    /// Retrieval of a single message failed.
    #[error("failed to fetch message {uid}: {source}")]
    Fetch { uid: u32, source: imap::Error },

    /// The FETCH response carried no message body.
    #[error("fetch response for message {uid} contained no body")]
    EmptyFetch { uid: u32 },

    /// The message bytes could not be parsed as a MIME message.
    #[error("MIME decoding error: {0}")]
    Mime(String),

    /// I/O error with the associated file path.
    #[error("I/O error writing '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias for `Result<T, ArchiveError>`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

impl ArchiveError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error invalidates the whole session.
    ///
    /// Connection-level failures abort the run; anything else is confined to
    /// the message being processed.
    pub fn is_connection_level(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Auth { .. } | Self::Imap(_)
        )
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `ArchiveError`
/// when no path context is available (rare — prefer `ArchiveError::io`).
impl From<std::io::Error> for ArchiveError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
