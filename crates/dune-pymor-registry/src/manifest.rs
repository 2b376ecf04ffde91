//! Serializable export of a [`Module`] for the external generator.
//!
//! The manifest is a flat, ordered view: namespaces in creation order,
//! exceptions and classes in registration order, methods in declaration
//! order. Hashes are rendered as hex strings.

use dune_pymor_core::{ClassEntry, ExceptionEntry, MethodEntry};
use serde::{Deserialize, Serialize};

use crate::Module;

/// Top-level manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub module: String,
    pub namespaces: Vec<String>,
    pub exceptions: Vec<ExceptionManifest>,
    pub classes: Vec<ClassManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionManifest {
    pub name: String,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_rvalue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassManifest {
    pub name: String,
    pub template_name: String,
    pub template_args: Vec<String>,
    pub hash: String,
    pub bases: Vec<String>,
    pub is_abstract: bool,
    pub methods: Vec<MethodManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodManifest {
    pub name: String,
    pub exposed_name: String,
    pub return_type: String,
    pub caller_owns_return: bool,
    pub params: Vec<ParamManifest>,
    pub is_const: bool,
    pub is_static: bool,
    pub throws: Vec<String>,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamManifest {
    pub type_name: String,
    pub name: String,
}

impl From<&ExceptionEntry> for ExceptionManifest {
    fn from(entry: &ExceptionEntry) -> Self {
        Self {
            name: entry.qualified_name.to_string(),
            hash: entry.type_hash.to_string(),
            parent: entry.parent.as_ref().map(|p| p.qualified_name()),
            message_rvalue: entry.message_rvalue.clone(),
        }
    }
}

impl From<&MethodEntry> for MethodManifest {
    fn from(method: &MethodEntry) -> Self {
        Self {
            name: method.name.clone(),
            exposed_name: method.exposed_name().to_string(),
            return_type: method.return_value.type_name.clone(),
            caller_owns_return: method.caller_owns_return(),
            params: method
                .params
                .iter()
                .map(|p| ParamManifest {
                    type_name: p.type_name.clone(),
                    name: p.name.clone(),
                })
                .collect(),
            is_const: method.is_const(),
            is_static: method.is_static(),
            throws: method.throws.iter().map(|t| t.qualified_name()).collect(),
            hash: method.method_hash().to_string(),
        }
    }
}

impl From<&ClassEntry> for ClassManifest {
    fn from(class: &ClassEntry) -> Self {
        Self {
            name: class.qualified_name.to_string(),
            template_name: class.template_name.clone(),
            template_args: class.template_args.clone(),
            hash: class.type_hash.to_string(),
            bases: class.bases.iter().map(|b| b.qualified_name()).collect(),
            is_abstract: class.is_abstract,
            methods: class.methods.iter().map(MethodManifest::from).collect(),
        }
    }
}

impl ClassManifest {
    /// First method exposed under `name`.
    pub fn find_method(&self, name: &str) -> Option<&MethodManifest> {
        self.methods.iter().find(|m| m.exposed_name == name)
    }
}

impl ModuleManifest {
    /// Class by qualified name.
    pub fn find_class(&self, name: &str) -> Option<&ClassManifest> {
        self.classes.iter().find(|c| c.name == name)
    }
}

impl Module {
    /// Export the module as an ordered manifest.
    pub fn to_manifest(&self) -> ModuleManifest {
        ModuleManifest {
            module: self.name().to_string(),
            namespaces: self.tree().namespace_paths(),
            exceptions: self.exceptions().map(ExceptionManifest::from).collect(),
            classes: self.classes().map(ClassManifest::from).collect(),
        }
    }

    /// Export the module as pretty-printed JSON.
    pub fn to_manifest_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_manifest())
    }
}
