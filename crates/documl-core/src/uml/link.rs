//! Cross-reference links between documentation pages.

use super::Type;
use crate::render::IndentingWriter;

/// A reference to the documentation page of a type.
///
/// The target is relative to the documentation root, so the same link is
/// valid from every page once prefixed with that page's way back to the root
/// (see [`Link::base_for_namespace`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    target: String,
    tooltip: String,
}

impl Link {
    /// Resolves the link to the page documenting `ty`.
    pub fn to_type(ty: &Type) -> Self {
        let mut target = Self::namespace_path(ty.namespace());
        target.push_str(&ty.name_in_namespace());
        target.push_str(".html");
        Self {
            target,
            tooltip: ty.name().qualified(),
        }
    }

    /// The relative prefix leading from a page of `namespace` back to the
    /// documentation root: one `../` per namespace segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use documl_core::uml::Link;
    ///
    /// assert_eq!(Link::base_for_namespace("com.acme"), "../../");
    /// assert_eq!(Link::base_for_namespace(""), "");
    /// ```
    pub fn base_for_namespace(namespace: &str) -> String {
        if namespace.is_empty() {
            return String::new();
        }
        "../".repeat(namespace.split('.').count())
    }

    /// The directory of a namespace relative to the documentation root, with a
    /// trailing `/` unless the namespace is unnamed.
    pub fn namespace_path(namespace: &str) -> String {
        if namespace.is_empty() {
            String::new()
        } else {
            format!("{}/", namespace.replace('.', "/"))
        }
    }

    /// The page path relative to the documentation root.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The tooltip shown for the link: the qualified type name.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub(super) fn write_to<'w>(
        &self,
        output: &'w mut IndentingWriter,
        base: &str,
    ) -> &'w mut IndentingWriter {
        output.append(format!("[[{base}{}{{{}}}]]", self.target, self.tooltip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        identifier::Identifier,
        uml::Classification,
    };

    #[test]
    fn test_link_to_type() {
        let widget = Type::new("com.acme", Classification::Class, Identifier::new("com.acme.Widget"));
        let link = Link::to_type(&widget);

        assert_eq!(link.target(), "com/acme/Widget.html");
        assert_eq!(link.tooltip(), "com.acme.Widget");
    }

    #[test]
    fn test_link_to_nested_type() {
        let inner = Type::new(
            "com.acme",
            Classification::Interface,
            Identifier::with_simple_name("com.acme.Outer.Inner", "Inner"),
        );
        assert_eq!(Link::to_type(&inner).target(), "com/acme/Outer.Inner.html");
    }

    #[test]
    fn test_link_in_unnamed_namespace() {
        let widget = Type::new("", Classification::Class, Identifier::new("Widget"));
        assert_eq!(Link::to_type(&widget).target(), "Widget.html");
    }

    #[test]
    fn test_link_to_nested_type_in_unnamed_namespace() {
        let inner = Type::new(
            "",
            Classification::Class,
            Identifier::with_simple_name("Outer.Inner", "Inner"),
        );
        assert_eq!(Link::to_type(&inner).target(), "Outer.Inner.html");
    }

    #[test]
    fn test_recomputation_is_identical() {
        let widget = Type::new("com.acme", Classification::Enum, Identifier::new("com.acme.Color"));
        assert_eq!(Link::to_type(&widget), Link::to_type(&widget));
    }

    #[test]
    fn test_write_to() {
        let widget = Type::new("com.acme", Classification::Class, Identifier::new("com.acme.Widget"));
        let mut output = IndentingWriter::default();
        Link::to_type(&widget).write_to(&mut output, "../../");

        assert_eq!(output.as_str(), "[[../../com/acme/Widget.html{com.acme.Widget}]]");
    }
}
