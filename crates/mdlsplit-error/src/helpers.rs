//! Helper functions for creating standardized errors
//!
//! Every crate builds its errors through these constructors so that messages
//! and kinds stay consistent across the toolkit.

use crate::kinds::*;
use crate::types::MdlSplitError;
use std::path::PathBuf;

impl MdlSplitError {
    /// Create a new export error
    pub fn export<M: Into<String>>(message: M, kind: ExportErrorKind) -> Self {
        Self::Export {
            message: message.into(),
            file_path: None,
            kind,
        }
    }

    /// Create a new CLI error
    pub fn cli<M: Into<String>>(message: M, kind: CliErrorKind) -> Self {
        Self::Cli {
            message: message.into(),
            kind,
        }
    }

    /// Create a new configuration error
    pub fn config<M: Into<String>>(message: M, kind: ConfigErrorKind) -> Self {
        Self::Config {
            message: message.into(),
            config_path: None,
            kind,
        }
    }

    // === Index Domain Helpers ===

    /// The asset root does not exist
    pub fn index_root_missing<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into();
        Self::Index {
            message: format!("'{}' does not exist", root.display()),
            root: Some(root),
            kind: IndexErrorKind::RootMissing,
        }
    }

    /// The asset root exists but is a file
    pub fn index_root_not_directory<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into();
        Self::Index {
            message: format!("'{}' is not a directory", root.display()),
            root: Some(root),
            kind: IndexErrorKind::RootNotDirectory,
        }
    }

    /// The asset root could not be listed
    pub fn index_root_unreadable<M: Into<String>, P: Into<PathBuf>>(message: M, root: P) -> Self {
        Self::Index {
            message: message.into(),
            root: Some(root.into()),
            kind: IndexErrorKind::RootUnreadable,
        }
    }

    // === Tracer Domain Helpers ===

    /// The selected model is not present in the asset index
    pub fn tracer_model_not_found<M: Into<String>>(model: M) -> Self {
        let model = model.into();
        Self::Tracer {
            message: format!("model '{model}' is not in the asset index"),
            model: Some(model),
            file_path: None,
            kind: TracerErrorKind::ModelNotFound,
        }
    }

    /// The model file exists but could not be read
    pub fn tracer_model_unreadable<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::Tracer {
            message: message.into(),
            model: None,
            file_path: Some(path.into()),
            kind: TracerErrorKind::ModelUnreadable,
        }
    }

    /// A material file exists but could not be read
    pub fn tracer_material_unreadable<M: Into<String>, P: Into<PathBuf>>(
        message: M,
        path: P,
    ) -> Self {
        Self::Tracer {
            message: message.into(),
            model: None,
            file_path: Some(path.into()),
            kind: TracerErrorKind::MaterialUnreadable,
        }
    }

    // === Export Domain Helpers ===

    /// Create an export error for directory creation failures
    pub fn export_create_dir_failed<M: Into<String>>(message: M) -> Self {
        Self::export(message, ExportErrorKind::CreateDirFailed)
    }

    /// Create an export error for copy failures
    pub fn export_copy_failed<M: Into<String>>(message: M) -> Self {
        Self::export(message, ExportErrorKind::CopyFailed)
    }

    /// Create an export error for manifest write failures
    pub fn export_manifest_failed<M: Into<String>>(message: M) -> Self {
        Self::export(message, ExportErrorKind::ManifestFailed)
    }

    // === CLI Domain Helpers ===

    /// Create a CLI error for invalid arguments
    pub fn cli_invalid_arguments<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::InvalidArguments)
    }

    /// Create a CLI error for output that could not be rendered
    pub fn cli_output_format_failed<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::OutputFormatError)
    }

    /// Create a CLI error for a cancelled prompt
    pub fn cli_cancelled() -> Self {
        Self::cli("cancelled", CliErrorKind::Cancelled)
    }

    // === Config Domain Helpers ===

    /// Create a configuration error for unreadable config files
    pub fn config_not_found<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self::Config {
            message: format!("cannot read '{}'", path.display()),
            config_path: Some(path),
            kind: ConfigErrorKind::NotFound,
        }
    }

    /// Create a configuration error for malformed config files
    pub fn config_invalid_format<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::Config {
            message: message.into(),
            config_path: Some(path.into()),
            kind: ConfigErrorKind::InvalidFormat,
        }
    }

    /// Create a configuration error for out-of-range values
    pub fn config_invalid_value<M: Into<String>>(message: M) -> Self {
        Self::config(message, ConfigErrorKind::InvalidValue)
    }
}
