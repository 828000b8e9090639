//! Collection of diagrams from the documentation model.
//!
//! One diagram is built per namespace, followed by one per type of that
//! namespace, in model order. This order decides which diagram claims a page
//! when several could.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use documl_core::{
    identifier::{Id, Identifier},
    uml::{DiagramRoot, Link, Namespace, PartId, Relation, UmlTree},
};

use crate::{
    DocumlError,
    config::AppConfig,
    diagram::{Diagram, NAMESPACE_PAGE_STEM, Scope},
    model::{Model, NamespaceModel, TypeModel},
};

/// A type of the model together with its declaring namespace.
type Entry<'m> = (&'m str, &'m TypeModel);

/// Builds the [`Diagram`]s of a [`Model`].
#[derive(Debug)]
pub struct DiagramCollector<'a> {
    config: &'a AppConfig,
}

impl<'a> DiagramCollector<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Builds all diagrams of `model`.
    ///
    /// `root` is the documentation root; it only determines the page path
    /// each diagram expects. No files are read or written.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Uml`] if a diagram tree cannot be assembled.
    pub fn collect(&self, model: &Model, root: &Path) -> Result<Vec<Diagram>, DocumlError> {
        let index = index_types(model);
        let mut diagrams = Vec::new();

        for namespace in model.namespaces() {
            debug!(namespace = namespace.name(), types = namespace.types().len(); "Collecting namespace");
            diagrams.push(self.namespace_diagram(namespace, &index, root)?);

            for ty in namespace.types() {
                diagrams.push(self.type_diagram(namespace.name(), ty, &index, root)?);
            }
        }

        Ok(diagrams)
    }

    /// `Root → Namespace → types (no members) + foreign supertypes`, then the
    /// relations between types on the diagram.
    fn namespace_diagram(
        &self,
        namespace: &NamespaceModel,
        index: &IndexMap<Identifier, Entry<'_>>,
        root: &Path,
    ) -> Result<Diagram, DocumlError> {
        let name = namespace.name();
        let (mut tree, diagram_root, parent) = start_tree(name)?;
        let mut shown = IndexSet::new();

        for ty in namespace.types() {
            tree.append(parent, ty.to_type(name))?;
            shown.insert(ty.identifier());
        }

        for ty in namespace.types() {
            for supertype in ty.supertypes() {
                let Some(&(declared_in, model)) = index.get(&Identifier::new(supertype.name())) else {
                    continue;
                };
                if declared_in != name && shown.insert(model.identifier()) {
                    tree.append(parent, model.to_type(declared_in).add_package_to_name())?;
                }
            }
        }

        let mut relations = IndexSet::new();
        for ty in namespace.types() {
            for supertype in ty.supertypes() {
                let target = Identifier::new(supertype.name());
                if shown.contains(&target) {
                    relations.insert((ty.identifier(), supertype.kind(), target));
                }
            }
        }
        for (subtype, kind, supertype) in relations {
            tree.append(diagram_root, Relation::new(subtype, kind, supertype))?;
        }

        let page = self.page_path(root, name, NAMESPACE_PAGE_STEM);
        trace!(page = page.display().to_string(), parts = tree.len(); "Namespace diagram built");
        Ok(Diagram::new(Scope::Namespace(Id::new(name)), tree, diagram_root, page))
    }

    /// `Root → Namespace → the type with its members + known supertypes`,
    /// then the type's relations.
    fn type_diagram(
        &self,
        namespace: &str,
        ty: &TypeModel,
        index: &IndexMap<Identifier, Entry<'_>>,
        root: &Path,
    ) -> Result<Diagram, DocumlError> {
        let (mut tree, diagram_root, parent) = start_tree(namespace)?;
        let subject = ty.to_type(namespace);
        let stem = subject.name_in_namespace();

        let part = tree.append(parent, subject)?;
        for member in ty.members() {
            tree.append(part, member.to_member())?;
        }

        let mut shown = IndexSet::from([ty.identifier()]);
        let mut relations = Vec::new();
        for supertype in ty.supertypes() {
            let Some(&(declared_in, model)) = index.get(&Identifier::new(supertype.name())) else {
                trace!(supertype = supertype.name(); "Supertype outside the model");
                continue;
            };
            if !shown.insert(model.identifier()) {
                continue;
            }

            let shown_type = model.to_type(declared_in);
            let shown_type = if declared_in == namespace {
                shown_type
            } else {
                shown_type.add_package_to_name()
            };
            tree.append(parent, shown_type)?;
            relations.push(Relation::new(ty.identifier(), supertype.kind(), model.identifier()));
        }

        for relation in relations {
            tree.append(diagram_root, relation)?;
        }

        let page = self.page_path(root, namespace, &stem);
        trace!(page = page.display().to_string(), parts = tree.len(); "Type diagram built");
        Ok(Diagram::new(Scope::Type(ty.identifier()), tree, diagram_root, page))
    }

    fn page_path(&self, root: &Path, namespace: &str, stem: &str) -> PathBuf {
        root.join(Link::namespace_path(namespace))
            .join(format!("{stem}.{}", self.config.html().extension()))
    }
}

/// Creates a diagram tree for a page of `namespace`.
///
/// Returns the tree, its root and the part types are attached to: a
/// namespace block, or the root itself for the unnamed namespace.
fn start_tree(namespace: &str) -> Result<(UmlTree, PartId, PartId), DocumlError> {
    let mut tree = UmlTree::new();
    let root = tree.add_part(DiagramRoot::new(Link::base_for_namespace(namespace)));

    let block = Namespace::new(namespace);
    let parent = if block.is_unnamed() {
        root
    } else {
        tree.append(root, block)?
    };

    Ok((tree, root, parent))
}

/// Indexes all types of the model by identifier. The first declaration of a
/// name wins.
fn index_types(model: &Model) -> IndexMap<Identifier, Entry<'_>> {
    let mut index = IndexMap::new();
    for namespace in model.namespaces() {
        for ty in namespace.types() {
            index
                .entry(ty.identifier())
                .or_insert((namespace.name(), ty));
        }
    }
    index
}
