//! Error types for `TexTract`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `TexTract` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== WAD Archive Errors ====================
    /// The file is not a valid WAD archive (bad magic or directory out of bounds).
    #[error("{path} is not a WAD file: {reason}")]
    NotAnArchive {
        /// The offending path.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// An entry index past the end of the archive directory.
    #[error("entry index {index} out of range (archive has {count} entries)")]
    EntryOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries in the archive.
        count: usize,
    },

    // ==================== Source Scan Errors ====================
    /// A texture list exists without its patch name table, or the other way around.
    #[error("{archive}: {message}")]
    MissingDependency {
        /// Label of the archive being scanned.
        archive: String,
        /// Which lump is missing its counterpart.
        message: String,
    },

    /// A namespace start marker without a matching end marker.
    #[error("{archive}: {marker} without a matching end marker")]
    UnterminatedNamespace {
        /// Label of the archive being scanned.
        archive: String,
        /// The start marker that was left open.
        marker: String,
    },

    // ==================== Record Errors ====================
    /// A lump record is truncated or references data that does not exist.
    #[error("malformed {record} lump: {message}")]
    MalformedRecord {
        /// The record family (PNAMES, TEXTUREx, ANIMATED, SWITCHES).
        record: &'static str,
        /// Description of what is wrong.
        message: String,
    },

    // ==================== Request List Errors ====================
    /// A name appeared in the request list before `-texture` or `-flat`.
    #[error(
        "line {line}: name before '-texture' or '-flat' (if this list came from a texture \
         usage report, regenerate it in extractor list format)"
    )]
    RequestBeforeMode {
        /// 1-based line number of the offending name.
        line: usize,
    },

    // ==================== Invocation Errors ====================
    /// No patch WADs were given (or directories contained none).
    #[error("no input WAD files specified")]
    NoInputs,
}

impl Error {
    /// Shorthand for a [`Error::MalformedRecord`].
    pub(crate) fn malformed(record: &'static str, message: impl Into<String>) -> Self {
        Error::MalformedRecord {
            record,
            message: message.into(),
        }
    }
}

/// A specialized Result type for `TexTract` operations.
pub type Result<T> = std::result::Result<T, Error>;
