//! The UML part tree.
//!
//! A diagram is a tree of parts stored in a [`UmlTree`] arena and addressed by
//! [`PartId`] handles. Every part has at most one parent and an ordered list
//! of children; insertion order is rendering order.
//!
//! # Ownership
//!
//! - A part is created detached ([`UmlTree::add_part`]).
//! - [`UmlTree::add_child`] attaches it exactly once. Attaching a part that
//!   already has a parent, or that would create a cycle, fails with
//!   [`UmlError`].
//! - Parts are never re-parented. Operations that change a part's
//!   identity-defining fields ([`UmlTree::deprecated`],
//!   [`UmlTree::add_package_to_name`]) build a new detached part with copies of
//!   the original's children.
//!
//! # Node kinds
//!
//! The set of part kinds is closed ([`PartKind`]); rendering dispatches over it
//! in a single `match` (see [`UmlTree::write_to`]).

mod link;
mod member;
mod namespace;
mod relation;
mod types;
mod write;

pub use link::Link;
pub use member::{Member, MemberKind, Parameter, Visibility};
pub use namespace::Namespace;
pub use relation::{Relation, RelationKind};
pub use types::{Classification, Type};

use std::fmt;

use thiserror::Error;

/// Handle of a part inside a [`UmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(usize);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by structural operations on a [`UmlTree`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UmlError {
    #[error("part {child} is already attached to part {parent}")]
    AlreadyAttached { child: PartId, parent: PartId },

    #[error("part {0} cannot be attached below itself")]
    Cycle(PartId),

    #[error("part {0} does not exist in this tree")]
    UnknownPart(PartId),

    #[error("part {0} is not a type")]
    NotAType(PartId),
}

/// The root of a diagram.
///
/// Carries the relative path from the diagram's page back to the
/// documentation root; type links are resolved against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramRoot {
    link_base: String,
}

impl DiagramRoot {
    /// Create a diagram root whose links are prefixed with `link_base`.
    pub fn new(link_base: impl Into<String>) -> Self {
        Self {
            link_base: link_base.into(),
        }
    }

    /// The prefix leading from the diagram's page to the documentation root.
    pub fn link_base(&self) -> &str {
        &self.link_base
    }
}

/// The closed set of part kinds.
#[derive(Debug, Clone)]
pub enum PartKind {
    Root(DiagramRoot),
    Namespace(Namespace),
    Type(Type),
    Member(Member),
    Relation(Relation),
}

impl From<DiagramRoot> for PartKind {
    fn from(root: DiagramRoot) -> Self {
        Self::Root(root)
    }
}

impl From<Namespace> for PartKind {
    fn from(namespace: Namespace) -> Self {
        Self::Namespace(namespace)
    }
}

impl From<Type> for PartKind {
    fn from(ty: Type) -> Self {
        Self::Type(ty)
    }
}

impl From<Member> for PartKind {
    fn from(member: Member) -> Self {
        Self::Member(member)
    }
}

impl From<Relation> for PartKind {
    fn from(relation: Relation) -> Self {
        Self::Relation(relation)
    }
}

#[derive(Debug, Clone)]
struct Part {
    kind: PartKind,
    parent: Option<PartId>,
    children: Vec<PartId>,
}

/// Arena holding the parts of one or more diagram trees.
#[derive(Debug, Clone, Default)]
pub struct UmlTree {
    parts: Vec<Part>,
}

impl UmlTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parts in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the arena holds no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Adds a detached part and returns its handle.
    pub fn add_part(&mut self, kind: impl Into<PartKind>) -> PartId {
        let id = PartId(self.parts.len());
        self.parts.push(Part {
            kind: kind.into(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Attaches `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`UmlError::UnknownPart`] for handles outside this tree,
    /// [`UmlError::AlreadyAttached`] if `child` already has a parent, and
    /// [`UmlError::Cycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: PartId, child: PartId) -> Result<(), UmlError> {
        self.check(parent)?;
        self.check(child)?;

        if let Some(current) = self.parts[child.0].parent {
            return Err(UmlError::AlreadyAttached {
                child,
                parent: current,
            });
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(UmlError::Cycle(child));
        }

        self.parts[child.0].parent = Some(parent);
        self.parts[parent.0].children.push(child);
        Ok(())
    }

    /// Adds a part and attaches it as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`UmlError::UnknownPart`] if `parent` is not in this tree.
    pub fn append(&mut self, parent: PartId, kind: impl Into<PartKind>) -> Result<PartId, UmlError> {
        self.check(parent)?;
        let child = self.add_part(kind);
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// The kind of a part.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn kind(&self, id: PartId) -> &PartKind {
        &self.parts[id.0].kind
    }

    /// The parent of a part, `None` for roots and detached parts.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn parent(&self, id: PartId) -> Option<PartId> {
        self.parts[id.0].parent
    }

    /// The ordered children of a part.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn children(&self, id: PartId) -> &[PartId] {
        &self.parts[id.0].children
    }

    /// The topmost ancestor of a part (the part itself if it has no parent).
    pub fn root_of(&self, id: PartId) -> PartId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Returns the type stored in a part, if it is one.
    pub fn as_type(&self, id: PartId) -> Option<&Type> {
        match self.kind(id) {
            PartKind::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// Returns `true` if the subtree below `id` renders any link token.
    pub fn contains_links(&self, id: PartId) -> bool {
        matches!(self.kind(id), PartKind::Type(_))
            || self
                .children(id)
                .iter()
                .any(|&child| self.contains_links(child))
    }

    /// Builds a new detached part of `kind` carrying copies of `id`'s children.
    ///
    /// The original part and its subtree are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`UmlError::UnknownPart`] if `id` is not in this tree.
    pub fn derive(&mut self, id: PartId, kind: impl Into<PartKind>) -> Result<PartId, UmlError> {
        self.check(id)?;
        let derived = self.add_part(kind);
        for child in self.children(id).to_vec() {
            let copy = self.copy_subtree(child);
            self.add_child(derived, copy)?;
        }
        Ok(derived)
    }

    /// Returns a new detached copy of the type part `id`, marked deprecated.
    ///
    /// # Errors
    ///
    /// Returns [`UmlError::NotAType`] if `id` is not a type part.
    pub fn deprecated(&mut self, id: PartId) -> Result<PartId, UmlError> {
        let ty = self.type_at(id)?.clone().deprecated();
        self.derive(id, ty)
    }

    /// Returns a new detached copy of the type part `id` that renders its
    /// namespace as part of its label.
    ///
    /// # Errors
    ///
    /// Returns [`UmlError::NotAType`] if `id` is not a type part.
    pub fn add_package_to_name(&mut self, id: PartId) -> Result<PartId, UmlError> {
        let ty = self.type_at(id)?.clone().add_package_to_name();
        self.derive(id, ty)
    }

    fn type_at(&self, id: PartId) -> Result<&Type, UmlError> {
        self.check(id)?;
        self.as_type(id).ok_or(UmlError::NotAType(id))
    }

    fn copy_subtree(&mut self, id: PartId) -> PartId {
        let kind = self.kind(id).clone();
        let copy = self.add_part(kind);
        for child in self.children(id).to_vec() {
            let child_copy = self.copy_subtree(child);
            self.parts[child_copy.0].parent = Some(copy);
            self.parts[copy.0].children.push(child_copy);
        }
        copy
    }

    fn ancestors(&self, id: PartId) -> impl Iterator<Item = PartId> + '_ {
        std::iter::successors(Some(id), |&current| self.parent(current))
    }

    fn check(&self, id: PartId) -> Result<(), UmlError> {
        if id.0 < self.parts.len() {
            Ok(())
        } else {
            Err(UmlError::UnknownPart(id))
        }
    }
}
