//! Error adapter for converting DocumlError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use documl::DocumlError;

/// Adapter for [`DocumlError`] values.
///
/// Supplies a stable diagnostic code and, where one applies, a hint on how to
/// fix the problem.
pub struct ErrorAdapter<'a>(pub &'a DocumlError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DocumlError::Config(_) => "documl::config",
            DocumlError::Destination(_) => "documl::destination",
            DocumlError::Integrity { .. } => "documl::integrity",
            DocumlError::Io { .. } => "documl::io",
            DocumlError::Charset { .. } => "documl::charset",
            DocumlError::Model(_) => "documl::model",
            DocumlError::Uml(_) => "documl::uml",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            DocumlError::Destination(_) => "pass the directory holding the generated pages with --destination",
            DocumlError::Integrity { .. } => {
                "check the [html] anchor setting, or regenerate the page and run again"
            }
            DocumlError::Charset { .. } => "set [html] charset to the encoding of the generated pages",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_codes() {
        let integrity = DocumlError::Integrity {
            path: PathBuf::from("com/acme/Widget.html"),
            message: "no anchor".to_string(),
        };
        let adapter = ErrorAdapter(&integrity);

        assert_eq!(adapter.code().unwrap().to_string(), "documl::integrity");
        assert!(adapter.help().is_some());
        assert_eq!(
            adapter.to_string(),
            "Integrity error in `com/acme/Widget.html`: no anchor"
        );
    }

    #[test]
    fn test_config_error_has_no_help() {
        let err = DocumlError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "documl::config");
        assert!(adapter.help().is_none());
    }
}
