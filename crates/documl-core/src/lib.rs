//! documl Core Types and Definitions
//!
//! This crate provides the foundational types for documl diagrams. It includes:
//!
//! - **Identifiers**: String-interned names and qualified type names ([`identifier`] module)
//! - **UML**: The part tree of namespaces, types, members and relations ([`uml`] module)
//! - **Render**: The indentation-tracking output used to emit diagram sources ([`render`] module)

pub mod identifier;
pub mod render;
pub mod uml;
