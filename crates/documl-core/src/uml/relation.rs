//! Generalization relations between types.

use serde::{Deserialize, Serialize};

use crate::{identifier::Identifier, render::IndentingWriter};

/// The kind of generalization between two types.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Class inheritance (`extends`).
    #[default]
    Extends,
    /// Interface realization (`implements`).
    Implements,
}

impl RelationKind {
    /// The diagram arrow pointing from the supertype to the subtype.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Extends => "<|--",
            Self::Implements => "<|..",
        }
    }
}

/// A generalization from `subtype` to `supertype`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    subtype: Identifier,
    supertype: Identifier,
    kind: RelationKind,
}

impl Relation {
    /// Create a relation stating that `subtype` extends or implements `supertype`.
    pub fn new(subtype: Identifier, kind: RelationKind, supertype: Identifier) -> Self {
        Self {
            subtype,
            supertype,
            kind,
        }
    }

    pub fn subtype(&self) -> Identifier {
        self.subtype
    }

    pub fn supertype(&self) -> Identifier {
        self.supertype
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub(super) fn write_to<'w>(
        &self,
        output: &'w mut IndentingWriter,
        context: Option<&str>,
    ) -> &'w mut IndentingWriter {
        output
            .append(self.supertype.to_uml(context))
            .whitespace()
            .append(self.kind.arrow())
            .whitespace()
            .append(self.subtype.to_uml(context))
    }
}
