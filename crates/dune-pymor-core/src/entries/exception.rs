//! Exception type entry.

use crate::{QualifiedName, TypeHash};

use super::ExceptionHandle;

/// Registry entry for a native exception type exposed to the scripting side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionEntry {
    /// Qualified name.
    pub qualified_name: QualifiedName,
    /// Identity.
    pub type_hash: TypeHash,
    /// Parent exception, if any.
    pub parent: Option<ExceptionHandle>,
    /// Expression producing the message from a caught instance.
    /// `%(EXC)s` is substituted with the instance by the generator.
    pub message_rvalue: Option<String>,
}

impl ExceptionEntry {
    /// Create a new exception entry.
    pub fn new(qualified_name: QualifiedName) -> Self {
        Self {
            type_hash: TypeHash::from_exception(&qualified_name.to_string()),
            qualified_name,
            parent: None,
            message_rvalue: None,
        }
    }

    /// Set the parent exception.
    pub fn with_parent(mut self, parent: ExceptionHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the message expression.
    pub fn with_message_rvalue(mut self, rvalue: impl Into<String>) -> Self {
        self.message_rvalue = Some(rvalue.into());
        self
    }

    /// Handle referring to this entry.
    pub fn handle(&self) -> ExceptionHandle {
        ExceptionHandle::new(self.qualified_name.clone())
    }
}
