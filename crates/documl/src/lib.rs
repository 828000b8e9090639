//! documl - UML diagrams for generated API documentation.
//!
//! Builds a UML diagram per documented namespace and type from a pre-extracted
//! documentation model, and injects each diagram into the generated page of
//! its scope.

pub mod charset;
pub mod collect;
pub mod config;
pub mod diagram;
pub mod html;
pub mod model;

mod error;

pub use documl_core::{identifier, render, uml};

pub use error::DocumlError;

use std::path::Path;

use log::{debug, info};

use collect::DiagramCollector;
use config::AppConfig;
use diagram::Diagram;
use html::{HtmlPostProcessor, PostprocessReport};
use model::Model;

/// Entry point for postprocessing a documentation tree.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use documl::{Documl, config::AppConfig};
///
/// let documl = Documl::new(AppConfig::default()).expect("Invalid configuration");
///
/// let model = documl.load_model(Path::new("model.json"))
///     .expect("Failed to load model");
///
/// let report = documl.postprocess(&model, Path::new("target/doc"))
///     .expect("Failed to postprocess");
/// assert!(report.success());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Documl {
    processor: HtmlPostProcessor,
}

impl Documl {
    /// Create a new instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Config`] for unusable page settings.
    pub fn new(config: AppConfig) -> Result<Self, DocumlError> {
        Ok(Self {
            processor: HtmlPostProcessor::new(config)?,
        })
    }

    pub fn config(&self) -> &AppConfig {
        self.processor.config()
    }

    /// Load the documentation model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `DocumlError` if the file cannot be read or parsed.
    pub fn load_model(&self, path: &Path) -> Result<Model, DocumlError> {
        let model = Model::load(path)?;
        debug!(namespaces = model.namespaces().len(); "Model loaded");
        Ok(model)
    }

    /// Build the diagrams of `model` for the documentation tree at `root`.
    ///
    /// # Errors
    ///
    /// Returns `DocumlError` if a diagram tree cannot be assembled.
    pub fn collect(&self, model: &Model, root: &Path) -> Result<Vec<Diagram>, DocumlError> {
        DiagramCollector::new(self.config()).collect(model, root)
    }

    /// Inject the diagrams of `model` into the pages below `destination`.
    ///
    /// # Errors
    ///
    /// Returns `DocumlError` for an unreadable destination, and for the first
    /// integrity, I/O or charset failure on a page. Pages after the failing
    /// one are left untouched.
    pub fn postprocess(&self, model: &Model, destination: &Path) -> Result<PostprocessReport, DocumlError> {
        info!(destination = destination.display().to_string(); "Postprocessing documentation");
        self.processor.postprocess_html(model, destination)
    }
}
