//! Diagrams and their injection into generated pages.
//!
//! A [`Diagram`] owns one part tree and the [`Scope`] it documents. For a
//! page of the same scope it hands out a [`Postprocessor`], which splices the
//! diagram's markup into the page before the configured anchor line.
//!
//! The injected region is delimited by [`BEGIN_MARKER`] and [`END_MARKER`]
//! comment lines; a page that already carries the region has it replaced, so
//! processing the same tree twice yields the same pages.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use htmlize::{escape_attribute, escape_text};
use log::{debug, info};

use documl_core::{
    identifier::{Id, Identifier},
    uml::{PartId, UmlTree},
};

use crate::{
    DocumlError,
    config::{AppConfig, ImageFormat},
    html::HtmlFile,
};

/// First line of an injected region.
pub const BEGIN_MARKER: &str = "<!-- documl diagram -->";

/// Last line of an injected region.
pub const END_MARKER: &str = "<!-- end documl diagram -->";

/// Page stem of namespace summaries.
pub const NAMESPACE_PAGE_STEM: &str = "package-summary";

/// File stem of namespace diagram artifacts.
const NAMESPACE_DIAGRAM_STEM: &str = "package";

/// What a diagram documents, and so which page it belongs on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Namespace(Id),
    Type(Identifier),
}

impl Scope {
    /// Derives the scope of a page from its path relative to the
    /// documentation root.
    ///
    /// `<ns path>/package-summary.<ext>` is a namespace page and
    /// `<ns path>/<Name>.<ext>` a type page. Returns `None` for paths with
    /// another extension or with components that are not plain UTF-8 names.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use documl::diagram::Scope;
    /// use documl_core::identifier::{Id, Identifier};
    ///
    /// let page = Path::new("com/acme/Widget.html");
    /// assert_eq!(
    ///     Scope::from_page_path(page, "html"),
    ///     Some(Scope::Type(Identifier::new("com.acme.Widget")))
    /// );
    ///
    /// let summary = Path::new("com/acme/package-summary.html");
    /// assert_eq!(
    ///     Scope::from_page_path(summary, "html"),
    ///     Some(Scope::Namespace(Id::new("com.acme")))
    /// );
    /// ```
    pub fn from_page_path(relative: &Path, extension: &str) -> Option<Self> {
        let mut segments = relative
            .components()
            .map(|component| match component {
                std::path::Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        let file_name = segments.pop()?;
        let stem = file_name
            .strip_suffix(extension)
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())?;
        let namespace = segments.join(".");

        let namespace = Id::new(&namespace);

        if stem == NAMESPACE_PAGE_STEM {
            Some(Self::Namespace(namespace))
        } else {
            let qualified = namespace.create_nested(Id::new(stem));
            Some(Self::Type(Identifier::new(&qualified.to_string())))
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace(name) => write!(f, "namespace {name}"),
            Self::Type(name) => write!(f, "type {name}"),
        }
    }
}

/// One diagram of a documentation scope.
#[derive(Debug, Clone)]
pub struct Diagram {
    scope: Scope,
    tree: UmlTree,
    root: PartId,
    file_stem: String,
    page_path: PathBuf,
}

impl Diagram {
    /// Creates a diagram rendering the tree below `root`.
    ///
    /// # Arguments
    ///
    /// * `scope` - The scope of the page this diagram belongs on.
    /// * `tree` - The arena holding the diagram parts.
    /// * `root` - The root part of the diagram inside `tree`.
    /// * `page_path` - Where the collector expects the page to be.
    pub fn new(scope: Scope, tree: UmlTree, root: PartId, page_path: PathBuf) -> Self {
        let file_stem = match &scope {
            Scope::Namespace(_) => NAMESPACE_DIAGRAM_STEM.to_string(),
            Scope::Type(_) => page_path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string(),
        };

        Self {
            scope,
            tree,
            root,
            file_stem,
            page_path,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn tree(&self) -> &UmlTree {
        &self.tree
    }

    pub fn root(&self) -> PartId {
        self.root
    }

    /// The file stem of the rendered image and source, e.g. `package` or
    /// `Widget`.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// The expected page of this diagram.
    pub fn page_path(&self) -> &Path {
        &self.page_path
    }

    /// Renders the diagram source.
    pub fn render(&self, indent_width: usize) -> String {
        self.tree.render(self.root, indent_width)
    }

    /// Returns `true` if the rendered source contains link tokens.
    pub fn has_links(&self) -> bool {
        self.tree.contains_links(self.root)
    }

    /// Returns a postprocessor injecting this diagram into `page`, or `None`
    /// if the page belongs to another scope.
    pub fn create_postprocessor<'a>(
        &'a self,
        page: &'a HtmlFile,
        config: &'a AppConfig,
    ) -> Option<Postprocessor<'a>> {
        (page.scope() == Some(&self.scope)).then_some(Postprocessor {
            diagram: self,
            page,
            config,
        })
    }

    /// Builds the HTML lines embedding `source`, without line terminators.
    fn markup(&self, source: &str, config: &AppConfig) -> Vec<String> {
        let stem = &self.file_stem;
        let format = config.diagram().image_format();
        let image = format!("{stem}.{format}");
        let alt = escape_attribute(format!("UML diagram of {}", self.scope));

        let mut img = format!("<img src=\"{}\" alt=\"{alt}\"", escape_attribute(&image));
        // Image maps only apply to raster images.
        if format == ImageFormat::Png && self.has_links() {
            img.push_str(&format!(" usemap=\"#{}-map\"", escape_attribute(stem)));
        }
        img.push('>');

        let mut lines = vec![
            BEGIN_MARKER.to_string(),
            "<div class=\"uml-diagram\">".to_string(),
            img,
            "<details>".to_string(),
            "<summary>toggle source</summary>".to_string(),
            "<pre>".to_string(),
        ];
        lines.extend(source.lines().map(|line| escape_text(line).into_owned()));
        lines.extend(
            ["</pre>", "</details>", "</div>", END_MARKER]
                .into_iter()
                .map(str::to_string),
        );
        lines
    }
}

/// Injects one diagram into one page.
#[derive(Debug)]
pub struct Postprocessor<'a> {
    diagram: &'a Diagram,
    page: &'a HtmlFile,
    config: &'a AppConfig,
}

impl Postprocessor<'_> {
    /// Rewrites the page with the diagram injected and, if enabled, writes
    /// the diagram source next to it.
    ///
    /// Returns `true` once the page has been replaced.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Integrity`] if the page has no anchor line or a
    /// dangling begin marker, and I/O or charset errors with the offending
    /// path. The page is left unchanged on error.
    pub fn call(self) -> Result<bool, DocumlError> {
        let path = self.page.path();
        let source = self.diagram.render(self.config.diagram().indent_width());

        let content = self.page.read_content(self.config.html().charset())?;
        let plan = InjectionPlan::locate(&content, self.config.html().anchor())
            .map_err(|message| DocumlError::integrity(path, message))?;
        debug!(
            path = path.display().to_string(),
            line = plan.start,
            replaces = plan.replaces_region();
            "Injection planned"
        );

        let updated = plan.apply(&content, &self.diagram.markup(&source, self.config));
        self.page.replace_content(&updated, self.config.html().charset())?;

        if self.config.diagram().write_sources() {
            let source_path = path.with_file_name(format!("{}.puml", self.diagram.file_stem()));
            crate::html::replace_file(&source_path, source.as_bytes())?;
            debug!(path = source_path.display().to_string(); "Diagram source written");
        }

        info!(
            path = path.display().to_string(),
            scope = self.diagram.scope().to_string();
            "Diagram injected"
        );
        Ok(true)
    }
}

/// Where a diagram block goes in a page.
///
/// Lines `start..end` of the page are replaced by the block; `start == end`
/// means a plain insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPlan {
    start: usize,
    end: usize,
    terminator: &'static str,
}

impl InjectionPlan {
    /// Plans the injection into `content`.
    ///
    /// The block is inserted before the first line containing `anchor`, or
    /// replaces an existing region delimited by the begin and end markers.
    /// Injected lines take the anchor line's terminator.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if no line contains the anchor
    /// or if a begin marker is not followed by an end marker.
    pub fn locate(content: &str, anchor: &str) -> Result<Self, String> {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();

        let anchor_line = lines
            .iter()
            .position(|line| line.contains(anchor))
            .ok_or_else(|| format!("no line contains the anchor `{anchor}`"))?;
        let terminator = terminator_of(lines[anchor_line]);

        let Some(begin) = lines.iter().position(|line| line.trim() == BEGIN_MARKER) else {
            return Ok(Self {
                start: anchor_line,
                end: anchor_line,
                terminator,
            });
        };
        let end = lines[begin..]
            .iter()
            .position(|line| line.trim() == END_MARKER)
            .map(|offset| begin + offset + 1)
            .ok_or_else(|| format!("begin marker on line {} has no end marker", begin + 1))?;

        Ok(Self {
            start: begin,
            end,
            terminator,
        })
    }

    /// Returns `true` if the plan replaces a previously injected region.
    pub fn replaces_region(&self) -> bool {
        self.start != self.end
    }

    /// Returns `content` with `block` injected.
    ///
    /// Every other line is carried over unchanged, terminator included.
    pub fn apply(&self, content: &str, block: &[String]) -> String {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let mut output = String::with_capacity(content.len());

        for line in &lines[..self.start] {
            output.push_str(line);
        }
        for line in block {
            output.push_str(line);
            output.push_str(self.terminator);
        }
        for line in &lines[self.end..] {
            output.push_str(line);
        }
        output
    }
}

fn terminator_of(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}
