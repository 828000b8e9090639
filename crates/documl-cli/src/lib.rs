//! CLI logic for the documl postprocessor.
//!
//! This module contains the core CLI logic: loading the configuration and
//! the documentation model, then injecting diagrams into the generated pages.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::Path;

use log::info;

use documl::{Documl, DocumlError};

/// Run the documl CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DocumlError` for:
/// - Configuration loading errors
/// - Model loading errors
/// - A missing or unreadable destination directory
/// - Page integrity, charset and I/O errors
pub fn run(args: &Args) -> Result<(), DocumlError> {
    info!(
        model_path = args.model,
        destination = args.destination;
        "Postprocessing documentation"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let documl = Documl::new(app_config)?;
    let model = documl.load_model(Path::new(&args.model))?;
    let report = documl.postprocess(&model, Path::new(&args.destination))?;

    info!(
        done = report.done().count(),
        skipped = report.skipped().count();
        "Documentation postprocessed"
    );

    Ok(())
}
