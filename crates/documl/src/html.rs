//! Postprocessing of generated documentation pages.
//!
//! [`HtmlPostProcessor`] walks a documentation tree, offers every candidate
//! page to the collected diagrams and rewrites the pages they claim. Pages
//! are processed one at a time in sorted path order; the first error aborts
//! the run and leaves later pages untouched.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::{
    DocumlError,
    charset::Charset,
    collect::DiagramCollector,
    config::AppConfig,
    diagram::{Diagram, Scope},
    model::Model,
};

/// A candidate documentation page.
#[derive(Debug, Clone)]
pub struct HtmlFile {
    path: PathBuf,
    scope: Option<Scope>,
}

impl HtmlFile {
    /// Creates a page below the documentation `root`.
    ///
    /// The page scope is derived from the path relative to `root`.
    pub fn new(root: &Path, path: impl Into<PathBuf>, extension: &str) -> Self {
        let path = path.into();
        let scope = path
            .strip_prefix(root)
            .ok()
            .and_then(|relative| Scope::from_page_path(relative, extension));
        Self { path, scope }
    }

    /// Returns `true` if `path` is a readable regular file with the given
    /// extension.
    pub fn is_html_file(path: &Path, extension: &str) -> bool {
        path.extension().is_some_and(|ext| ext == extension)
            && path.is_file()
            && File::open(path).is_ok()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The documentation scope of this page, if it has one.
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Injects the first diagram claiming this page.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`crate::diagram::Postprocessor::call`].
    pub fn process(&self, diagrams: &[Diagram], config: &AppConfig) -> Result<PageOutcome, DocumlError> {
        let Some(postprocessor) = diagrams
            .iter()
            .find_map(|diagram| diagram.create_postprocessor(self, config))
        else {
            debug!(path = self.path.display().to_string(); "Skipping page without diagram");
            return Ok(PageOutcome::Skipped);
        };

        debug!(path = self.path.display().to_string(); "Postprocessing page");
        postprocessor.call()?;
        Ok(PageOutcome::Done)
    }

    /// Reads and decodes the page.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Io`] or [`DocumlError::Charset`] with the page path.
    pub fn read_content(&self, charset: Charset) -> Result<String, DocumlError> {
        let bytes = fs::read(&self.path).map_err(DocumlError::io(&self.path))?;
        charset.decode(bytes).map_err(DocumlError::charset(&self.path))
    }

    /// Encodes `content` and atomically replaces the page with it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Charset`] if `content` is not representable, or
    /// [`DocumlError::Io`] if the page could not be replaced.
    pub fn replace_content(&self, content: &str, charset: Charset) -> Result<(), DocumlError> {
        let bytes = charset
            .encode(content)
            .map_err(DocumlError::charset(&self.path))?;
        replace_file(&self.path, &bytes)
    }
}

/// Replaces `path` with `contents` through a temporary file in the same
/// directory.
///
/// The temporary file is renamed over the target; if renaming fails it is
/// copied onto the target and removed. The target keeps its permissions.
pub(crate) fn replace_file(path: &Path, contents: &[u8]) -> Result<(), DocumlError> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(".documl-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(DocumlError::io(dir))?;
    let temp_path = temp.path().to_path_buf();
    trace!(path = temp_path.display().to_string(); "Writing temporary file");

    temp.write_all(contents)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(DocumlError::io(&temp_path))?;

    match fs::metadata(path) {
        Ok(metadata) => fs::set_permissions(&temp_path, metadata.permissions())
            .map_err(DocumlError::io(&temp_path))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(DocumlError::io(path)(err)),
    }

    if let Err(err) = temp.persist(path) {
        warn!(
            path = path.display().to_string(),
            err:% = err.error;
            "Rename failed, copying temporary file instead"
        );
        let temp = err.file;
        fs::copy(temp.path(), path).map_err(DocumlError::io(path))?;
        temp.close().map_err(DocumlError::io(&temp_path))?;
    }

    Ok(())
}

/// Terminal state of a candidate page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// A diagram was injected.
    Done,
    /// No diagram claims the page; it was left untouched.
    Skipped,
}

impl PageOutcome {
    /// Both outcomes count as success; failures abort the run instead.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Done | Self::Skipped)
    }
}

/// The result of a postprocessing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostprocessReport {
    pages: Vec<(PathBuf, PageOutcome)>,
}

impl PostprocessReport {
    fn record(&mut self, path: PathBuf, outcome: PageOutcome) {
        self.pages.push((path, outcome));
    }

    /// The logical AND of all page outcomes; `true` without candidates.
    ///
    /// Every recorded outcome is a success since failures abort the run, so a
    /// returned report always succeeds.
    pub fn success(&self) -> bool {
        self.pages.iter().all(|(_, outcome)| outcome.is_success())
    }

    /// All candidate pages in processing order.
    pub fn pages(&self) -> &[(PathBuf, PageOutcome)] {
        &self.pages
    }

    /// Pages that received a diagram.
    pub fn done(&self) -> impl Iterator<Item = &Path> {
        self.with_outcome(PageOutcome::Done)
    }

    /// Pages no diagram claimed.
    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.with_outcome(PageOutcome::Skipped)
    }

    fn with_outcome(&self, wanted: PageOutcome) -> impl Iterator<Item = &Path> {
        self.pages
            .iter()
            .filter(move |(_, outcome)| *outcome == wanted)
            .map(|(path, _)| path.as_path())
    }
}

/// Injects diagrams into a tree of generated pages.
#[derive(Debug, Clone, Default)]
pub struct HtmlPostProcessor {
    config: AppConfig,
}

impl HtmlPostProcessor {
    /// Creates a postprocessor.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Config`] for an empty page extension or anchor.
    pub fn new(config: AppConfig) -> Result<Self, DocumlError> {
        if config.html().extension().is_empty() {
            return Err(DocumlError::Config("page extension must not be empty".to_string()));
        }
        if config.html().anchor().is_empty() {
            return Err(DocumlError::Config("page anchor must not be empty".to_string()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Collects the diagrams of `model` and injects them into the pages
    /// below `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Destination`] before touching any page if
    /// `destination` is not a readable directory, and otherwise the first
    /// error raised while collecting or postprocessing.
    pub fn postprocess_html(&self, model: &Model, destination: &Path) -> Result<PostprocessReport, DocumlError> {
        validate_destination(destination)?;

        let diagrams = DiagramCollector::new(&self.config).collect(model, destination)?;
        info!(diagrams = diagrams.len(); "Diagrams collected");

        self.postprocess_pages(&diagrams, destination)
    }

    /// Injects `diagrams` into the candidate pages below `destination`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while walking or postprocessing; later
    /// pages are not processed.
    pub fn postprocess_pages(&self, diagrams: &[Diagram], destination: &Path) -> Result<PostprocessReport, DocumlError> {
        let extension = self.config.html().extension();
        let mut report = PostprocessReport::default();

        for entry in WalkDir::new(destination).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(destination).to_path_buf();
                DocumlError::Io {
                    path,
                    source: io::Error::from(err),
                }
            })?;
            if !HtmlFile::is_html_file(entry.path(), extension) {
                continue;
            }

            let page = HtmlFile::new(destination, entry.path(), extension);
            let outcome = page.process(diagrams, &self.config)?;
            report.record(entry.into_path(), outcome);
        }

        for diagram in diagrams {
            if !report.done().any(|page| page == diagram.page_path()) {
                debug!(
                    scope = diagram.scope().to_string(),
                    page = diagram.page_path().display().to_string();
                    "No page found for diagram"
                );
            }
        }

        info!(
            done = report.done().count(),
            skipped = report.skipped().count();
            "Postprocessing finished"
        );
        Ok(report)
    }
}

fn validate_destination(destination: &Path) -> Result<(), DocumlError> {
    if destination.is_dir() && fs::read_dir(destination).is_ok() {
        Ok(())
    } else {
        Err(DocumlError::Destination(destination.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    use documl_core::{
        identifier::Identifier,
        uml::{Classification, DiagramRoot, Namespace, Type, UmlTree},
    };

    use crate::config::HtmlConfig;

    #[test]
    fn test_is_html_file() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("Widget.html");
        let image = dir.path().join("Widget.svg");
        fs::write(&page, "<html>").unwrap();
        fs::write(&image, "<svg>").unwrap();

        assert!(HtmlFile::is_html_file(&page, "html"));
        assert!(!HtmlFile::is_html_file(&image, "html"));
        assert!(!HtmlFile::is_html_file(dir.path(), "html"));
        assert!(!HtmlFile::is_html_file(&dir.path().join("Missing.html"), "html"));
    }

    #[test]
    fn test_page_scope() {
        let root = Path::new("/docs");

        let page = HtmlFile::new(root, "/docs/com/acme/Widget.html", "html");
        assert_eq!(
            page.scope(),
            Some(&Scope::Type(Identifier::new("com.acme.Widget")))
        );

        let outside = HtmlFile::new(root, "/elsewhere/Widget.html", "html");
        assert_eq!(outside.scope(), None);
    }

    #[test]
    fn test_replace_file_keeps_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "old").unwrap();

        replace_file(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_replace_file_creates_missing_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Widget.puml");

        replace_file(&path, b"@startuml\n@enduml\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "@startuml\n@enduml\n");
    }

    #[test]
    fn test_replace_content_with_charset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Widget.html");
        fs::write(&path, [b'a', 0xE9]).unwrap();
        let page = HtmlFile::new(dir.path(), &path, "html");

        let content = page.read_content(Charset::Latin1).unwrap();
        assert_eq!(content, "aé");
        assert!(matches!(
            page.read_content(Charset::Utf8),
            Err(DocumlError::Charset { .. })
        ));

        page.replace_content("bé", Charset::Latin1).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![b'b', 0xE9]);

        assert!(page.replace_content("€", Charset::Latin1).is_err());
        assert_eq!(fs::read(&path).unwrap(), vec![b'b', 0xE9]);
    }

    #[test]
    fn test_report() {
        let mut report = PostprocessReport::default();
        assert!(report.success());

        report.record(PathBuf::from("a.html"), PageOutcome::Done);
        report.record(PathBuf::from("b.html"), PageOutcome::Skipped);

        assert!(report.success());
        assert_eq!(report.done().collect::<Vec<_>>(), vec![Path::new("a.html")]);
        assert_eq!(report.skipped().collect::<Vec<_>>(), vec![Path::new("b.html")]);
    }

    #[test]
    fn test_invalid_destination() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "").unwrap();
        let processor = HtmlPostProcessor::default();

        for destination in [dir.path().join("missing"), file] {
            let err = processor
                .postprocess_html(&Model::default(), &destination)
                .unwrap_err();
            assert!(matches!(err, DocumlError::Destination(_)));
        }
    }

    fn widget_diagram(classification: Classification) -> Diagram {
        let mut tree = UmlTree::new();
        let root = tree.add_part(DiagramRoot::new("../../"));
        let namespace = tree.append(root, Namespace::new("com.acme")).unwrap();
        tree.append(
            namespace,
            Type::new("com.acme", classification, Identifier::new("com.acme.Widget")),
        )
        .unwrap();
        Diagram::new(
            Scope::Type(Identifier::new("com.acme.Widget")),
            tree,
            root,
            PathBuf::from("com/acme/Widget.html"),
        )
    }

    #[test]
    fn test_first_matching_diagram_wins() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("com/acme/Widget.html");
        fs::create_dir_all(page.parent().unwrap()).unwrap();
        fs::write(&page, "<body>\n<div class=\"contentContainer\">\n</body>\n").unwrap();
        let diagrams = [
            widget_diagram(Classification::Class),
            widget_diagram(Classification::Interface),
        ];

        let report = HtmlPostProcessor::default()
            .postprocess_pages(&diagrams, dir.path())
            .unwrap();

        assert_eq!(report.pages(), &[(page.clone(), PageOutcome::Done)]);
        let content = fs::read_to_string(&page).unwrap();
        assert!(content.contains("class com.acme.Widget"));
        assert!(!content.contains("interface com.acme.Widget"));
        assert_eq!(content.matches(crate::diagram::BEGIN_MARKER).count(), 1);
    }

    #[test]
    fn test_empty_anchor_rejected() {
        let config = AppConfig::new(
            HtmlConfig::new(Charset::Utf8, "html", ""),
            Default::default(),
        );
        assert!(matches!(HtmlPostProcessor::new(config), Err(DocumlError::Config(_))));
    }
}
