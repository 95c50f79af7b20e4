//! # mdlsplit-error - Unified Error Handling
//!
//! This crate provides the error system shared by the mdlsplit crates:
//! - One error type for indexing, dependency tracing, exporting and the CLI
//! - Contextual information (file paths, model paths)
//! - User-friendly messages for the CLI and a short summary form for logs
//!
//! ## Module Organization
//!
//! - [`types`] - Main error type and Result type alias
//! - [`kinds`] - Error kind enums for fine-grained categorization
//! - [`helpers`] - Constructors for standardized errors
//! - [`conversions`] - Contextual methods and conversions from foreign errors

pub use kinds::*;
pub use types::*;

pub mod conversions;
pub mod helpers;
pub mod kinds;
pub mod types;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_creation() {
        let err = MdlSplitError::tracer_model_not_found("models/chair.mdl");
        assert!(err.is_tracer());
        assert_eq!(err.tracer_kind(), Some(&TracerErrorKind::ModelNotFound));
    }

    #[test]
    fn test_error_context() {
        let err = MdlSplitError::export_copy_failed("permission denied")
            .with_file_path("/out/EXPORTED1/models/chair.mdl");

        assert_eq!(
            err.file_path(),
            Some(&PathBuf::from("/out/EXPORTED1/models/chair.mdl"))
        );
    }

    #[test]
    fn test_user_message() {
        let err = MdlSplitError::index_root_missing("/does/not/exist");
        let msg = err.user_message();
        assert!(msg.contains("Asset index"));
        assert!(msg.contains("/does/not/exist"));
    }

    #[test]
    fn test_output_format_error() {
        let err = MdlSplitError::cli_output_format_failed("cannot render tree");
        assert_eq!(err.summary(), "CLI: Output formatting failed");
        assert_eq!(err.user_message(), "CLI error: cannot render tree");
    }

    #[test]
    fn test_summary() {
        let err = MdlSplitError::cli_invalid_arguments("Bad range token: 3-x");
        assert_eq!(err.summary(), "CLI: Invalid command arguments");
    }
}
