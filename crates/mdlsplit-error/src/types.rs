//! Main error type for the mdlsplit toolkit
//!
//! `MdlSplitError` is shared by every mdlsplit crate. Variants are split by
//! domain and carry the path context needed to explain a failure to a user.

use crate::kinds::*;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The main unified error type for the mdlsplit toolkit
#[derive(Error, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MdlSplitError {
    /// File system and I/O related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
    },

    /// Asset root indexing errors
    #[error("Index error: {message}")]
    Index {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        root: Option<PathBuf>,
        kind: IndexErrorKind,
    },

    /// Dependency tracing errors
    #[error("Tracer error: {message}")]
    Tracer {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        model: Option<String>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
        kind: TracerErrorKind,
    },

    /// Export errors
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
        kind: ExportErrorKind,
    },

    /// CLI and user interface errors
    #[error("CLI error: {message}")]
    Cli {
        message: String,
        kind: CliErrorKind,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        config_path: Option<PathBuf>,
        kind: ConfigErrorKind,
    },
}

/// Convenient result type for mdlsplit operations
pub type Result<T> = std::result::Result<T, MdlSplitError>;
