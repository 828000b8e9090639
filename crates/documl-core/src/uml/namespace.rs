//! Namespace parts.

/// A grouping scope (package) in a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    name: String,
}

impl Namespace {
    /// Create a namespace with its dot-separated name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The dot-separated namespace name; empty for the unnamed namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the unnamed (default) namespace.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}
