//! The documentation model consumed by the diagram collector.
//!
//! The model is extracted from source code by an external tool and handed to
//! documl as JSON. It lists namespaces in documentation order; each namespace
//! lists its types, and each type its supertypes and members.
//!
//! ```json
//! {
//!   "namespaces": [
//!     {
//!       "name": "com.acme",
//!       "types": [
//!         {
//!           "name": "com.acme.Widget",
//!           "classification": "class",
//!           "supertypes": [{ "name": "com.acme.Shape", "kind": "implements" }],
//!           "members": [{ "name": "size", "kind": "field", "type": "int" }]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use documl_core::{
    identifier::Identifier,
    uml::{Classification, Member, MemberKind, Parameter, RelationKind, Type, Visibility},
};

use crate::DocumlError;

/// The complete documentation model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Model {
    #[serde(default)]
    namespaces: Vec<NamespaceModel>,
}

impl Model {
    /// Creates a model from namespaces in documentation order.
    pub fn new(namespaces: Vec<NamespaceModel>) -> Self {
        Self { namespaces }
    }

    /// Parses a model from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Model`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumlError> {
        let model: Self = serde_json::from_str(json)?;
        debug!(namespaces = model.namespaces.len(); "Model parsed");
        Ok(model)
    }

    /// Reads and parses a JSON model file.
    ///
    /// # Errors
    ///
    /// Returns [`DocumlError::Io`] if the file cannot be read and
    /// [`DocumlError::Model`] for malformed JSON.
    pub fn load(path: &Path) -> Result<Self, DocumlError> {
        info!(path = path.display().to_string(); "Loading model");
        let json = fs::read_to_string(path).map_err(DocumlError::io(path))?;
        Self::from_json(&json)
    }

    /// The namespaces, in documentation order.
    pub fn namespaces(&self) -> &[NamespaceModel] {
        &self.namespaces
    }
}

/// A documented namespace and the types it declares.
#[derive(Debug, Clone, Deserialize)]
pub struct NamespaceModel {
    name: String,
    #[serde(default)]
    types: Vec<TypeModel>,
}

impl NamespaceModel {
    pub fn new(name: impl Into<String>, types: Vec<TypeModel>) -> Self {
        Self {
            name: name.into(),
            types,
        }
    }

    /// The qualified namespace name; empty for the unnamed namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[TypeModel] {
        &self.types
    }
}

/// A documented type.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeModel {
    name: String,
    #[serde(default)]
    simple_name: Option<String>,
    #[serde(default)]
    classification: Classification,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    supertypes: Vec<SupertypeModel>,
    #[serde(default)]
    members: Vec<MemberModel>,
}

impl TypeModel {
    /// Creates a type model without supertypes or members.
    pub fn new(name: impl Into<String>, classification: Classification) -> Self {
        Self {
            name: name.into(),
            simple_name: None,
            classification,
            deprecated: false,
            supertypes: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_simple_name(self, simple_name: impl Into<String>) -> Self {
        Self {
            simple_name: Some(simple_name.into()),
            ..self
        }
    }

    pub fn with_deprecated(self, deprecated: bool) -> Self {
        Self { deprecated, ..self }
    }

    pub fn with_supertype(mut self, supertype: SupertypeModel) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_member(mut self, member: MemberModel) -> Self {
        self.members.push(member);
        self
    }

    /// The qualified type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supertypes(&self) -> &[SupertypeModel] {
        &self.supertypes
    }

    pub fn members(&self) -> &[MemberModel] {
        &self.members
    }

    /// The identifier of this type.
    pub fn identifier(&self) -> Identifier {
        match &self.simple_name {
            Some(simple) => Identifier::with_simple_name(&self.name, simple),
            None => Identifier::new(&self.name),
        }
    }

    /// Builds the diagram [`Type`] of this model entry, declared in `namespace`.
    pub fn to_type(&self, namespace: &str) -> Type {
        let ty = Type::new(namespace, self.classification, self.identifier());
        if self.deprecated { ty.deprecated() } else { ty }
    }
}

/// A generalization of a type.
#[derive(Debug, Clone, Deserialize)]
pub struct SupertypeModel {
    name: String,
    #[serde(default)]
    kind: RelationKind,
}

impl SupertypeModel {
    pub fn new(name: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The qualified name of the supertype.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }
}

/// Kinds of members in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberModelKind {
    Field,
    Method,
    Constructor,
    EnumConstant,
}

/// A member of a documented type.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberModel {
    name: String,
    kind: MemberModelKind,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default, rename = "abstract")]
    is_abstract: bool,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    #[serde(default)]
    parameters: Vec<ParameterModel>,
    #[serde(default)]
    return_type: Option<String>,
}

impl MemberModel {
    /// Creates a public member without modifiers or signature.
    pub fn new(name: impl Into<String>, kind: MemberModelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::default(),
            is_static: false,
            is_abstract: false,
            type_name: None,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberModelKind {
        self.kind
    }

    /// Builds the diagram [`Member`] of this model entry.
    ///
    /// Signature attributes that do not apply to the member kind are ignored.
    pub fn to_member(&self) -> Member {
        let parameters = || {
            self.parameters
                .iter()
                .map(|parameter| Parameter::new(&parameter.name, &parameter.type_name))
                .collect()
        };

        let kind = match self.kind {
            MemberModelKind::Field => MemberKind::Field {
                type_name: self.type_name.clone(),
            },
            MemberModelKind::Method => MemberKind::Method {
                parameters: parameters(),
                return_type: self.return_type.clone(),
            },
            MemberModelKind::Constructor => MemberKind::Constructor {
                parameters: parameters(),
            },
            MemberModelKind::EnumConstant => MemberKind::EnumConstant,
        };

        Member::new(&self.name, kind)
            .with_visibility(self.visibility)
            .with_static(self.is_static)
            .with_abstract(self.is_abstract)
    }
}

/// A method or constructor parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterModel {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: &str = r#"{
        "namespaces": [
            {
                "name": "com.acme",
                "types": [
                    {
                        "name": "com.acme.Widget",
                        "classification": "abstract_class",
                        "deprecated": true,
                        "supertypes": [
                            { "name": "com.acme.Shape", "kind": "implements" },
                            { "name": "com.base.Component" }
                        ],
                        "members": [
                            { "name": "size", "kind": "field", "type": "int", "visibility": "private" },
                            {
                                "name": "resize",
                                "kind": "method",
                                "abstract": true,
                                "parameters": [{ "name": "size", "type": "int" }],
                                "return_type": "Widget"
                            },
                            { "name": "COUNT", "kind": "field", "type": "int", "static": true }
                        ]
                    },
                    { "name": "com.acme.Widget.Part", "simple_name": "Part" }
                ]
            },
            { "name": "com.empty" }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let model = Model::from_json(WIDGET).unwrap();

        assert_eq!(model.namespaces().len(), 2);
        let acme = &model.namespaces()[0];
        assert_eq!(acme.name(), "com.acme");
        assert_eq!(acme.types().len(), 2);
        assert!(model.namespaces()[1].types().is_empty());

        let widget = &acme.types()[0];
        assert_eq!(widget.supertypes()[0].kind(), RelationKind::Implements);
        assert_eq!(widget.supertypes()[1].kind(), RelationKind::Extends);
        assert_eq!(widget.members().len(), 3);
    }

    #[test]
    fn test_to_type() {
        let model = Model::from_json(WIDGET).unwrap();
        let acme = &model.namespaces()[0];

        let widget = acme.types()[0].to_type(acme.name());
        assert_eq!(widget.classification(), Classification::AbstractClass);
        assert!(widget.is_deprecated());
        assert_eq!(widget.namespace(), "com.acme");

        let part = acme.types()[1].to_type(acme.name());
        assert_eq!(part.classification(), Classification::Class);
        assert_eq!(part.name().simple(), "Part");
        assert_eq!(part.name_in_namespace(), "Widget.Part");
    }

    #[test]
    fn test_to_member() {
        let model = Model::from_json(WIDGET).unwrap();
        let members = model.namespaces()[0].types()[0].members();

        let size = members[0].to_member();
        assert_eq!(size.visibility(), Visibility::Private);
        assert_eq!(
            size.kind(),
            &MemberKind::Field {
                type_name: Some("int".to_string())
            }
        );

        let resize = members[1].to_member();
        assert_eq!(
            resize.kind(),
            &MemberKind::Method {
                parameters: vec![Parameter::new("size", "int")],
                return_type: Some("Widget".to_string()),
            }
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = Model::from_json(r#"{ "namespaces": [ { "types": [] } ] }"#).unwrap_err();
        assert!(matches!(err, DocumlError::Model(_)));
    }

    #[test]
    fn test_unknown_member_kind() {
        let json = r#"{ "namespaces": [ { "name": "a", "types": [
            { "name": "a.B", "members": [ { "name": "x", "kind": "property" } ] }
        ] } ] }"#;
        assert!(Model::from_json(json).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Model::load(Path::new("/nonexistent/documl/model.json")).unwrap_err();
        assert!(matches!(err, DocumlError::Io { .. }));
    }
}
