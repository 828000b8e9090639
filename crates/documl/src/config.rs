//! Configuration types for documl postprocessing.
//!
//! This module provides configuration structures that control how pages are
//! read and how diagrams are embedded. All types implement
//! [`serde::Deserialize`] for loading from external sources; every section and
//! field is optional and falls back to the defaults documented below.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining page and diagram settings.
//! - [`HtmlConfig`] - How generated pages are recognized, decoded and where diagrams go.
//! - [`DiagramConfig`] - How diagram sources are rendered and referenced.
//!
//! # Example
//!
//! ```
//! # use documl::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.html().extension(), "html");
//! assert!(config.diagram().write_sources());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use documl_core::render::DEFAULT_INDENT_WIDTH;

use crate::charset::Charset;

/// Default page marker before which diagrams are inserted.
pub const DEFAULT_ANCHOR: &str = "<div class=\"contentContainer\">";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Page configuration section.
    #[serde(default)]
    html: HtmlConfig,

    /// Diagram configuration section.
    #[serde(default)]
    diagram: DiagramConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified page and diagram configurations.
    pub fn new(html: HtmlConfig, diagram: DiagramConfig) -> Self {
        Self { html, diagram }
    }

    /// Returns the page configuration.
    pub fn html(&self) -> &HtmlConfig {
        &self.html
    }

    /// Returns the diagram configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }
}

/// Generated page settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Encoding used to read and write pages.
    charset: Charset,

    /// File extension of candidate pages, without the dot.
    extension: String,

    /// Text identifying the line before which a diagram is inserted.
    anchor: String,
}

impl HtmlConfig {
    /// Creates a new [`HtmlConfig`].
    ///
    /// # Arguments
    ///
    /// * `charset` - Page encoding.
    /// * `extension` - Extension of candidate pages, e.g. `html`.
    /// * `anchor` - Marker text of the insertion line.
    pub fn new(charset: Charset, extension: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            charset,
            extension: extension.into(),
            anchor: anchor.into(),
        }
    }

    /// Returns the page [`Charset`].
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Returns the candidate page extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the insertion anchor text.
    pub fn anchor(&self) -> &str {
        &self.anchor
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self::new(Charset::default(), "html", DEFAULT_ANCHOR)
    }
}

/// Image format produced by the external diagram renderer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    /// The file extension of rendered images.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Diagram rendering and embedding settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Format of the image referenced from each page.
    image_format: ImageFormat,

    /// Whether diagram sources are written next to their pages.
    write_sources: bool,

    /// Spaces per nesting level in diagram sources.
    indent_width: usize,
}

impl DiagramConfig {
    /// Creates a new [`DiagramConfig`].
    pub fn new(image_format: ImageFormat, write_sources: bool, indent_width: usize) -> Self {
        Self {
            image_format,
            write_sources,
            indent_width,
        }
    }

    /// Returns the referenced [`ImageFormat`].
    pub fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    /// Returns `true` if diagram sources are written next to their pages.
    pub fn write_sources(&self) -> bool {
        self.write_sources
    }

    /// Returns the indentation width of diagram sources.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self::new(ImageFormat::default(), true, DEFAULT_INDENT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.html().charset(), Charset::Utf8);
        assert_eq!(config.html().anchor(), DEFAULT_ANCHOR);
        assert_eq!(config.diagram().image_format(), ImageFormat::Svg);
        assert_eq!(config.diagram().indent_width(), 4);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "html": { "charset": "iso-8859-1" }, "diagram": { "image_format": "png" } }"#,
        )
        .unwrap();

        assert_eq!(config.html().charset(), Charset::Latin1);
        assert_eq!(config.html().extension(), "html");
        assert_eq!(config.diagram().image_format(), ImageFormat::Png);
        assert!(config.diagram().write_sources());
    }

    #[test]
    fn test_unknown_charset_rejected() {
        let result: Result<AppConfig, _> =
            serde_json::from_str(r#"{ "html": { "charset": "ebcdic" } }"#);
        assert!(result.is_err());
    }
}
