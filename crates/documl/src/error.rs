//! Error types for documl operations.
//!
//! This module provides the main error type [`DocumlError`]. Every variant is
//! fatal for a postprocessing run; pages that no diagram claims are skipped
//! and never reported as errors.

use std::{io, path::PathBuf};

use thiserror::Error;

use documl_core::uml::UmlError;

use crate::charset::CharsetError;

/// The main error type for documl operations.
#[derive(Debug, Error)]
pub enum DocumlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Destination directory `{}` is missing or not a readable directory", .0.display())]
    Destination(PathBuf),

    #[error("Integrity error in `{}`: {message}", path.display())]
    Integrity { path: PathBuf, message: String },

    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Charset error in `{}`: {source}", path.display())]
    Charset {
        path: PathBuf,
        #[source]
        source: CharsetError,
    },

    #[error("Model error: {0}")]
    Model(#[from] serde_json::Error),

    #[error("Diagram error: {0}")]
    Uml(#[from] UmlError),
}

impl DocumlError {
    /// Returns a closure wrapping an [`io::Error`] with the offending path.
    ///
    /// Meant for `map_err`.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Returns a closure wrapping a [`CharsetError`] with the offending path.
    pub(crate) fn charset(path: impl Into<PathBuf>) -> impl FnOnce(CharsetError) -> Self {
        let path = path.into();
        move |source| Self::Charset { path, source }
    }

    /// Creates an integrity error for `path`.
    pub(crate) fn integrity(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Integrity {
            path: path.into(),
            message: message.into(),
        }
    }
}
