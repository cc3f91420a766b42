// src/error.rs

use std::io;
use thiserror::Error;

/// Every failure a conversion or deck generator can report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line that should hold a specific field could not be read
    #[error("{what}: line {line}: {message}")]
    Parse {
        what: &'static str,
        line: usize,
        message: String,
    },

    #[error("Invalid file format: {0}")]
    Format(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Unknown element '{0}'")]
    UnknownElement(String),

    #[error("Symmetry analysis failed: {0}")]
    Symmetry(String),

    #[error("Invalid geometry: {0}")]
    Geometry(String),

    /// An external program could not be run or exited with failure
    #[error("{program} failed: {message}")]
    External { program: String, message: String },
}

impl Error {
    pub(crate) fn parse(what: &'static str, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            what,
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
