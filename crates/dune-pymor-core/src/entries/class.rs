//! Class type entry.
//!
//! `ClassEntry` covers plain exposed classes, abstract interfaces and
//! template instantiations such as `VectorBased<IstlDenseVector<double>>`.

use crate::{QualifiedName, TypeHash};

use super::{ClassHandle, MethodEntry};

/// Registry entry for an exposed native class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    /// Template name without arguments (e.g. `VectorBased`).
    pub template_name: String,
    /// Fully qualified, instantiated name.
    pub qualified_name: QualifiedName,
    /// Identity.
    pub type_hash: TypeHash,

    // === Inheritance ===
    /// Base classes and interfaces, in declaration order.
    pub bases: Vec<ClassHandle>,

    // === Members ===
    /// Methods in registration order; overloads share a name.
    pub methods: Vec<MethodEntry>,

    // === Template Info ===
    /// Template arguments (empty for non-template classes).
    pub template_args: Vec<String>,

    // === Modifiers ===
    /// Abstract interface, never instantiated from the scripting side.
    pub is_abstract: bool,
}

impl ClassEntry {
    /// Create a class entry inside `namespace`.
    ///
    /// With template arguments the simple name becomes `Name<A, B>`.
    pub fn new(
        namespace: Vec<String>,
        template_name: impl Into<String>,
        template_args: Vec<String>,
    ) -> Self {
        let template_name = template_name.into();
        let simple = instantiated_name(&template_name, &template_args);
        let qualified_name = QualifiedName::new(simple, namespace);
        Self {
            template_name,
            type_hash: qualified_name.to_type_hash(),
            qualified_name,
            bases: Vec::new(),
            methods: Vec::new(),
            template_args,
            is_abstract: false,
        }
    }

    /// Attach a method to this class.
    pub fn add_method(&mut self, mut method: MethodEntry) {
        method.owner = self.type_hash;
        self.methods.push(method);
    }

    // === Query Methods ===

    /// Simple (instantiated) name.
    pub fn name(&self) -> &str {
        self.qualified_name.simple_name()
    }

    /// Handle referring to this class.
    pub fn handle(&self) -> ClassHandle {
        ClassHandle {
            type_hash: self.type_hash,
            name: self.qualified_name.clone(),
        }
    }

    /// Check if the class derives from `base`.
    pub fn derives_from(&self, base: &ClassHandle) -> bool {
        self.bases.iter().any(|b| b.type_hash == base.type_hash)
    }

    /// First method exposed under `name`.
    pub fn find_method(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.iter().find(|m| m.exposed_name() == name)
    }

    /// Number of methods (counting overloads separately).
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

fn instantiated_name(template_name: &str, args: &[String]) -> String {
    if args.is_empty() {
        return template_name.to_string();
    }
    let joined = args.join(", ");
    // keep `>>` from closing early on older native compilers
    if joined.ends_with('>') {
        format!("{template_name}< {joined} >")
    } else {
        format!("{template_name}<{joined}>")
    }
}
