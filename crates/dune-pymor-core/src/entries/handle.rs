//! Handles returned by registration.

use std::fmt;

use crate::{QualifiedName, TypeHash};

/// Reference to a registered class or interface.
///
/// Descriptors take handles (not entries) for base types, so a class can be
/// derived from anything registered earlier in the same module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassHandle {
    /// Identity of the class.
    pub type_hash: TypeHash,
    /// Qualified name of the class.
    pub name: QualifiedName,
}

impl ClassHandle {
    /// Create a handle for a qualified class name.
    pub fn new(name: QualifiedName) -> Self {
        Self {
            type_hash: name.to_type_hash(),
            name,
        }
    }

    /// Fully qualified display name.
    pub fn qualified_name(&self) -> String {
        self.name.to_string()
    }
}

impl fmt::Display for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Reference to a registered exception type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExceptionHandle {
    /// Identity of the exception.
    pub type_hash: TypeHash,
    /// Qualified name of the exception.
    pub name: QualifiedName,
}

impl ExceptionHandle {
    /// Create a handle for a qualified exception name.
    pub fn new(name: QualifiedName) -> Self {
        Self {
            type_hash: TypeHash::from_exception(&name.to_string()),
            name,
        }
    }

    /// Fully qualified display name.
    pub fn qualified_name(&self) -> String {
        self.name.to_string()
    }
}

impl fmt::Display for ExceptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
