//! Rendering of part trees to diagram source.

use log::trace;

use super::{PartId, PartKind, UmlTree};
use crate::render::IndentingWriter;

impl UmlTree {
    /// Renders the tree below `id` to a diagram source string.
    ///
    /// # Examples
    ///
    /// ```
    /// use documl_core::{
    ///     identifier::Identifier,
    ///     uml::{Classification, DiagramRoot, Namespace, Type, UmlTree},
    /// };
    ///
    /// let mut tree = UmlTree::new();
    /// let root = tree.add_part(DiagramRoot::new("../../"));
    /// let package = tree.append(root, Namespace::new("com.acme")).unwrap();
    /// let widget = Type::new("com.acme", Classification::Class, Identifier::new("com.acme.Widget"));
    /// tree.append(package, widget).unwrap();
    ///
    /// assert_eq!(
    ///     tree.render(root, 4),
    ///     "@startuml\n\
    ///      namespace com.acme {\n    \
    ///          class com.acme.Widget [[../../com/acme/Widget.html{com.acme.Widget}]]\n\
    ///      }\n\
    ///      @enduml\n"
    /// );
    /// ```
    pub fn render(&self, id: PartId, indent_width: usize) -> String {
        let mut output = IndentingWriter::new(indent_width);
        self.write_to(id, &mut output);
        output.finish()
    }

    /// Writes the part `id` and, through [`UmlTree::write_children_to`], its
    /// children.
    pub fn write_to<'w>(&self, id: PartId, output: &'w mut IndentingWriter) -> &'w mut IndentingWriter {
        match self.kind(id) {
            PartKind::Root(_) => {
                output.append("@startuml").newline();
                for &child in self.children(id) {
                    self.write_to(child, output);
                }
                output.append("@enduml").newline()
            }
            PartKind::Namespace(namespace) => {
                output.append("namespace").whitespace().append(namespace.name()).whitespace();
                self.write_children_to(id, output).newline()
            }
            PartKind::Type(ty) => {
                // The enclosing namespace block, not the declared namespace,
                // decides how the name is qualified.
                let context = self.namespace_context(id);
                let link_base = self.link_base(id);
                trace!(name = ty.name().qualified(), context:?; "Writing type");

                output.append(ty.classification().to_uml()).whitespace();
                ty.write_name_to(output, context).whitespace();
                if ty.is_deprecated() {
                    output.append("<<deprecated>>").whitespace();
                }
                ty.link().write_to(output, link_base).whitespace();
                self.write_children_to(id, output).newline()
            }
            PartKind::Member(member) => member.write_to(output).newline(),
            PartKind::Relation(relation) => relation
                .write_to(output, self.namespace_context(id))
                .newline(),
        }
    }

    /// Writes the children of `id` as an indented `{` … `}` block.
    ///
    /// Nothing is written for a part without children.
    pub fn write_children_to<'w>(
        &self,
        id: PartId,
        output: &'w mut IndentingWriter,
    ) -> &'w mut IndentingWriter {
        let children = self.children(id);
        if children.is_empty() {
            return output;
        }

        output.append("{").newline();
        output.indented(|output| {
            for &child in children {
                self.write_to(child, output);
            }
        });
        output.append("}")
    }

    fn namespace_context(&self, id: PartId) -> Option<&str> {
        match self.kind(self.parent(id)?) {
            PartKind::Namespace(namespace) => Some(namespace.name()),
            _ => None,
        }
    }

    fn link_base(&self, id: PartId) -> &str {
        match self.kind(self.root_of(id)) {
            PartKind::Root(root) => root.link_base(),
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        identifier::Identifier,
        uml::{
            Classification, DiagramRoot, Member, Namespace, Parameter, Relation, RelationKind,
            Type,
        },
    };

    fn class(namespace: &str, qualified: &str) -> Type {
        Type::new(namespace, Classification::Class, Identifier::new(qualified))
    }

    #[test]
    fn test_type_without_children_has_no_block() {
        let mut tree = UmlTree::new();
        let ty = tree.add_part(class("com.acme", "com.acme.Widget"));

        let source = tree.render(ty, 4);
        assert_eq!(source, "class com.acme.Widget [[com/acme/Widget.html{com.acme.Widget}]]\n");
        assert!(!source.contains("{\n}"));
    }

    #[test]
    fn test_empty_namespace_has_no_block() {
        let mut tree = UmlTree::new();
        let namespace = tree.add_part(Namespace::new("com.acme"));

        assert_eq!(tree.render(namespace, 4), "namespace com.acme\n");
    }

    #[test]
    fn test_type_with_members() {
        let mut tree = UmlTree::new();
        let root = tree.add_part(DiagramRoot::new("../../"));
        let namespace = tree.append(root, Namespace::new("com.acme")).unwrap();
        let ty = tree
            .append(namespace, class("com.acme", "com.acme.Widget").deprecated())
            .unwrap();
        tree.append(ty, Member::field("size", "int")).unwrap();
        tree.append(
            ty,
            Member::method("resize", vec![Parameter::new("size", "int")], None),
        )
        .unwrap();

        assert_eq!(
            tree.render(root, 2),
            "@startuml\n\
             namespace com.acme {\n\
            \x20 class com.acme.Widget <<deprecated>> [[../../com/acme/Widget.html{com.acme.Widget}]] {\n\
            \x20   +size: int\n\
            \x20   +resize(size: int)\n\
            \x20 }\n\
             }\n\
             @enduml\n"
        );
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = UmlTree::new();
        let namespace = tree.add_part(Namespace::new("p"));
        for name in ["p.C", "p.A", "p.B"] {
            tree.append(namespace, class("p", name)).unwrap();
        }

        let source = tree.render(namespace, 4);
        let c = source.find("p.C").unwrap();
        let a = source.find("p.A").unwrap();
        let b = source.find("p.B").unwrap();
        assert!(c < a && a < b);
    }

    #[test]
    fn test_foreign_type_in_namespace_is_labelled() {
        let mut tree = UmlTree::new();
        let namespace = tree.add_part(Namespace::new("com.acme"));
        tree.append(
            namespace,
            class("com.other", "com.other.Base").add_package_to_name(),
        )
        .unwrap();

        assert_eq!(
            tree.render(namespace, 4),
            "namespace com.acme {\n    \
             class \"<size:14>Base\\n<size:10>com.other\" as .com.other.Base [[com/other/Base.html{com.other.Base}]]\n\
             }\n"
        );
    }

    #[test]
    fn test_relations_at_root_level() {
        let mut tree = UmlTree::new();
        let root = tree.add_part(DiagramRoot::default());
        tree.append(
            root,
            Relation::new(
                Identifier::new("com.acme.Widget"),
                RelationKind::Implements,
                Identifier::new("com.acme.Shape"),
            ),
        )
        .unwrap();

        assert_eq!(
            tree.render(root, 4),
            "@startuml\ncom.acme.Shape <|.. com.acme.Widget\n@enduml\n"
        );
    }

    #[test]
    fn test_empty_root() {
        let mut tree = UmlTree::new();
        let root = tree.add_part(DiagramRoot::default());

        assert_eq!(tree.render(root, 4), "@startuml\n@enduml\n");
    }
}
