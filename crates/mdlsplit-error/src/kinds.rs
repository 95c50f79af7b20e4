//! Error kind enums for fine-grained categorization

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Specific kinds of asset index errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexErrorKind {
    #[error("Asset root not found")]
    RootMissing,
    #[error("Asset root is not a directory")]
    RootNotDirectory,
    #[error("Asset root is unreadable")]
    RootUnreadable,
}

/// Specific kinds of dependency tracing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TracerErrorKind {
    #[error("Model not found in asset index")]
    ModelNotFound,
    #[error("Model could not be read")]
    ModelUnreadable,
    #[error("Material could not be read")]
    MaterialUnreadable,
}

/// Specific kinds of export errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExportErrorKind {
    #[error("Output directory could not be created")]
    CreateDirFailed,
    #[error("File copy failed")]
    CopyFailed,
    #[error("Manifest could not be written")]
    ManifestFailed,
}

/// Specific kinds of CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CliErrorKind {
    #[error("Invalid command arguments")]
    InvalidArguments,
    #[error("Output formatting failed")]
    OutputFormatError,
    #[error("Cancelled by user")]
    Cancelled,
}

/// Specific kinds of configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConfigErrorKind {
    #[error("Configuration file not found")]
    NotFound,
    #[error("Invalid configuration format")]
    InvalidFormat,
    #[error("Invalid configuration value")]
    InvalidValue,
}
