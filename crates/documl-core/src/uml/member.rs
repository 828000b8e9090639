//! Member parts: fields, methods, constructors and enum constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::render::IndentingWriter;

/// Visibility of a member.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    /// The diagram visibility marker.
    pub fn to_uml(self) -> char {
        match self {
            Self::Public => '+',
            Self::Protected => '#',
            Self::Package => '~',
            Self::Private => '-',
        }
    }
}

/// A named, typed method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    name: String,
    type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)
    }
}

/// What kind of member this is, with its kind-specific signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field {
        type_name: Option<String>,
    },
    Method {
        parameters: Vec<Parameter>,
        return_type: Option<String>,
    },
    Constructor {
        parameters: Vec<Parameter>,
    },
    EnumConstant,
}

/// A member of a documented type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    name: String,
    kind: MemberKind,
    visibility: Visibility,
    is_static: bool,
    is_abstract: bool,
}

impl Member {
    /// Create a member with public visibility and no modifiers.
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
        }
    }

    pub fn field(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(
            name,
            MemberKind::Field {
                type_name: Some(type_name.into()),
            },
        )
    }

    pub fn method(
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        return_type: Option<String>,
    ) -> Self {
        Self::new(
            name,
            MemberKind::Method {
                parameters,
                return_type,
            },
        )
    }

    pub fn constructor(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self::new(name, MemberKind::Constructor { parameters })
    }

    pub fn enum_constant(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::EnumConstant)
    }

    pub fn with_visibility(self, visibility: Visibility) -> Self {
        Self { visibility, ..self }
    }

    pub fn with_static(self, is_static: bool) -> Self {
        Self { is_static, ..self }
    }

    pub fn with_abstract(self, is_abstract: bool) -> Self {
        Self { is_abstract, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub(super) fn write_to<'w>(&self, output: &'w mut IndentingWriter) -> &'w mut IndentingWriter {
        if self.is_static {
            output.append("{static}").whitespace();
        }
        if self.is_abstract {
            output.append("{abstract}").whitespace();
        }

        let signature = match &self.kind {
            MemberKind::EnumConstant => return output.append(&self.name),
            MemberKind::Field { type_name: None } => String::new(),
            MemberKind::Field {
                type_name: Some(type_name),
            } => format!(": {type_name}"),
            MemberKind::Method {
                parameters,
                return_type,
            } => {
                let mut signature = format!("({})", join(parameters));
                if let Some(return_type) = return_type {
                    signature.push_str(": ");
                    signature.push_str(return_type);
                }
                signature
            }
            MemberKind::Constructor { parameters } => format!("({})", join(parameters)),
        };

        output.append(format!("{}{}{signature}", self.visibility.to_uml(), self.name))
    }
}

fn join(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(Parameter::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
