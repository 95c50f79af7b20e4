//! Contextual methods and conversions
//!
//! Accessors and context adders for `MdlSplitError`, plus `From`
//! implementations for the foreign errors the toolkit encounters.

use crate::kinds::*;
use crate::types::MdlSplitError;
use std::path::PathBuf;

impl MdlSplitError {
    /// Add file path context to an existing error
    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path),
            Self::Index { root, .. } => *root = Some(path),
            Self::Tracer { file_path, .. } => *file_path = Some(path),
            Self::Export { file_path, .. } => *file_path = Some(path),
            Self::Config { config_path, .. } => *config_path = Some(path),
            Self::Cli { .. } => {}
        }
        self
    }

    /// Add model context to tracer errors
    pub fn with_model<M: Into<String>>(mut self, model_path: M) -> Self {
        if let Self::Tracer { model, .. } = &mut self {
            *model = Some(model_path.into());
        }
        self
    }

    pub fn is_tracer(&self) -> bool {
        matches!(self, Self::Tracer { .. })
    }

    /// Get the tracer error kind, if this is a tracer error
    pub fn tracer_kind(&self) -> Option<&TracerErrorKind> {
        match self {
            Self::Tracer { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Get the index error kind, if this is an index error
    pub fn index_kind(&self) -> Option<&IndexErrorKind> {
        match self {
            Self::Index { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Get the file path associated with this error, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Index { root, .. } => root.as_ref(),
            Self::Tracer { file_path, .. } => file_path.as_ref(),
            Self::Export { file_path, .. } => file_path.as_ref(),
            Self::Config { config_path, .. } => config_path.as_ref(),
            Self::Cli { .. } => None,
        }
    }

    /// Get a user-friendly error message suitable for CLI display
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("File error in '{}': {}", path.display(), message)
                } else {
                    message.clone()
                }
            }
            Self::Index { message, root, .. } => {
                let mut msg = format!("Asset index failed: {message}");
                if let Some(root) = root {
                    msg.push_str(&format!(" (root: {})", root.display()));
                }
                msg
            }
            Self::Tracer {
                message,
                model,
                file_path,
                ..
            } => {
                let mut msg = format!("Dependency collection failed: {message}");
                if let Some(model) = model {
                    msg.push_str(&format!(" (model: {model})"));
                }
                if let Some(path) = file_path {
                    msg.push_str(&format!(" (file: {})", path.display()));
                }
                msg
            }
            Self::Export {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("Export failed for '{}': {}", path.display(), message)
                } else {
                    format!("Export failed: {message}")
                }
            }
            Self::Cli { message, .. } => format!("CLI error: {message}"),
            Self::Config {
                message,
                config_path,
                ..
            } => {
                if let Some(path) = config_path {
                    format!("Configuration error in '{}': {}", path.display(), message)
                } else {
                    format!("Configuration error: {message}")
                }
            }
        }
    }

    /// Get a short error summary without context details
    pub fn summary(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("I/O: {message}"),
            Self::Index { kind, .. } => format!("Index: {kind}"),
            Self::Tracer { kind, .. } => format!("Trace: {kind}"),
            Self::Export { kind, .. } => format!("Export: {kind}"),
            Self::Cli { kind, .. } => format!("CLI: {kind}"),
            Self::Config { kind, .. } => format!("Config: {kind}"),
        }
    }
}

impl From<std::io::Error> for MdlSplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: MdlSplitError = io_err.into();
        assert!(matches!(err, MdlSplitError::Io { .. }));
        assert!(err.file_path().is_none());

        let err = MdlSplitError::from(std::io::Error::other("denied")).with_file_path("/out");
        assert!(err.user_message().contains("'/out'"));
    }

    #[test]
    fn test_with_model_only_touches_tracer() {
        let err = MdlSplitError::tracer_model_unreadable("short read", "/assets/models/a.mdl")
            .with_model("models/a.mdl");
        assert!(err.user_message().contains("models/a.mdl"));

        let err = MdlSplitError::export_copy_failed("disk full").with_model("models/a.mdl");
        assert!(!err.user_message().contains("models/a.mdl"));
    }

    #[test]
    fn test_index_kind() {
        let err = MdlSplitError::index_root_not_directory("/tmp/file.txt");
        assert_eq!(err.index_kind(), Some(&IndexErrorKind::RootNotDirectory));
        assert_eq!(err.file_path(), Some(&PathBuf::from("/tmp/file.txt")));
    }
}
