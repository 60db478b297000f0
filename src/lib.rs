//! Roster Processor Library
//!
//! A Rust library for parsing student grade rosters from line-oriented,
//! whitespace-delimited text files.
//!
//! This library provides tools for:
//! - Modelling students as immutable records with an identifier, a full name,
//!   and an ordered list of grades
//! - Extracting student records from semi-structured text lines with a single
//!   regex pass (flexible whitespace, multi-word names)
//! - Accumulating records into a name-keyed roster, tolerating headers,
//!   separators, and blank lines
//! - Rendering records canonically (round-trippable) or as tab-separated
//!   columns for console display

pub mod cli;
pub mod models;
pub mod parser;

// Re-export commonly used types
pub use models::{Roster, Student};
pub use parser::{ParseResult, ParseStats, RosterParser, read_roster};

/// Result type alias for roster processing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for roster processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Roster file not found
    #[error("Roster file not found: {path}")]
    FileNotFound { path: String },

    /// Canonical student rendering could not be parsed back
    #[error("Invalid canonical student form: {message}")]
    CanonicalFormat { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a canonical format error
    pub fn canonical_format(message: impl Into<String>) -> Self {
        Self::CanonicalFormat {
            message: message.into(),
        }
    }
}

// Automatic conversion from the common I/O error type
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
