//! Type parts: the documented classes, interfaces, enums and annotations.

use std::{
    cell::OnceCell,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use super::Link;
use crate::{identifier::Identifier, render::IndentingWriter};

/// Classification of a UML type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Enum,
    Interface,
    Annotation,
    AbstractClass,
    #[default]
    Class,
}

impl Classification {
    /// The diagram keyword for this classification.
    pub fn to_uml(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Annotation => "annotation",
            Self::AbstractClass => "abstract class",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_uml())
    }
}

/// A documented type.
///
/// A type is identified by its [`Identifier`] alone: equality, hashing and
/// ordering ignore the deprecation flag, the display flags and any children
/// the type has in a tree.
///
/// `Type` values are immutable. [`Type::deprecated`] and
/// [`Type::add_package_to_name`] return modified copies.
///
/// # Examples
///
/// ```
/// use documl_core::{identifier::Identifier, uml::{Classification, Type}};
///
/// let widget = Type::new("com.acme", Classification::Class, Identifier::new("com.acme.Widget"));
/// let deprecated = widget.clone().deprecated();
///
/// assert_eq!(widget, deprecated);
/// assert!(deprecated.is_deprecated());
/// assert_eq!(widget.link().target(), "com/acme/Widget.html");
/// ```
#[derive(Debug, Clone)]
pub struct Type {
    namespace: String,
    classification: Classification,
    name: Identifier,
    deprecated: bool,
    add_package_to_name: bool,
    link: OnceCell<Link>,
}

impl Type {
    /// Create a type declared in `namespace`.
    pub fn new(namespace: impl Into<String>, classification: Classification, name: Identifier) -> Self {
        Self {
            namespace: namespace.into(),
            classification,
            name,
            deprecated: false,
            add_package_to_name: false,
            link: OnceCell::new(),
        }
    }

    /// Returns this type marked as deprecated.
    pub fn deprecated(self) -> Self {
        Self {
            deprecated: true,
            ..self
        }
    }

    /// Returns this type labelled with its namespace.
    ///
    /// Used when a type is shown on another namespace's diagram.
    pub fn add_package_to_name(self) -> Self {
        Self {
            add_package_to_name: true,
            ..self
        }
    }

    /// The name of the declaring namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn name(&self) -> Identifier {
        self.name
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn has_package_in_name(&self) -> bool {
        self.add_package_to_name
    }

    /// The cross-reference link of this type, computed on first access.
    pub fn link(&self) -> &Link {
        self.link.get_or_init(|| Link::to_type(self))
    }

    /// The name of this type relative to its own namespace, e.g. `Outer.Inner`.
    ///
    /// In the unnamed namespace this is the full qualified name.
    pub fn name_in_namespace(&self) -> String {
        if self.namespace.is_empty() {
            return self.name.qualified();
        }
        self.name
            .name_in(&self.namespace)
            .unwrap_or_else(|| self.name.simple())
    }

    /// Writes the (possibly aliased) name of this type.
    ///
    /// `context` is the namespace of the enclosing namespace block, if any.
    pub(super) fn write_name_to<'w>(
        &self,
        output: &'w mut IndentingWriter,
        context: Option<&str>,
    ) -> &'w mut IndentingWriter {
        if self.add_package_to_name {
            if let Some(name_in_package) = self.name.name_in(&self.namespace) {
                output.append(format!(
                    "\"<size:14>{name_in_package}\\n<size:10>{}\" as",
                    self.namespace
                ));
                output.whitespace();
            }
        }
        output.append(self.name.to_uml(context))
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Type {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Type {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
