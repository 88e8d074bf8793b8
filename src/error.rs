// src/error.rs
//
// One error type per failure class, so the CLI can map each to its own
// exit code and callers can tell "file missing" from "server unreachable"
// from "page layout changed".

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural parse failures. The page no longer matches the httpd-ack
/// layout; aborting beats silently dropping data.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("table row ended under unknown sub-table '{0}'")]
    UnknownSubTable(String),

    #[error("track row has {0} value(s), expected 5")]
    BadTrackRow(usize),

    #[error("track row {field} is not a number: '{value}'")]
    BadTrackNumber {
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to find HTML file at '{}'", .0.display())]
    FileNotFound(PathBuf),

    #[error("HTML path '{}' is a directory, not a file", .0.display())]
    IsADirectory(PathBuf),

    #[error("unable to reach httpd-ack server at '{url}': {source}")]
    Server {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("HTTP error: {status} for '{url}'")]
    Http { status: String, url: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A download was requested for an entity field the page never filled.
    /// Raised before any network traffic.
    #[error("unable to find download URL for {0}")]
    MissingUrl(String),

    #[error("invalid track index {index}; valid track indices are 0-{max}")]
    BadTrackIndex { index: usize, max: usize },

    #[error("bad command line: {0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 1,
            Error::Parse(_) => 2,
            Error::FileNotFound(_) | Error::IsADirectory(_) => 3,
            Error::Server { .. } | Error::Http { .. } => 4,
            Error::MissingUrl(_) | Error::BadTrackIndex { .. } | Error::Io(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
