//! Module description handed to the binding generator.
//!
//! A [`Module`] owns a [`NamespaceTree`] plus the registration order of its
//! classes and exceptions. Registration goes through [`Namespace`] handles
//! obtained from [`Module::add_cpp_namespace`]:
//!
//! ```
//! use dune_pymor_core::{MethodEntry, ReturnValue};
//! use dune_pymor_registry::Module;
//!
//! let mut module = Module::new("dunepymor");
//! let exception = module
//!     .add_cpp_namespace("Dune")
//!     .add_exception("Exception")
//!     .message_rvalue("%(EXC)s.what().c_str()")
//!     .build()?;
//!
//! let parametric = module
//!     .add_cpp_namespace("Dune")
//!     .add_cpp_namespace("Pymor")
//!     .add_class("Parametric")
//!     .method(
//!         MethodEntry::new("parametric", ReturnValue::new("bool"), vec![])
//!             .as_const()
//!             .with_throws([exception]),
//!     )
//!     .build()?;
//!
//! assert_eq!(parametric.qualified_name(), "Dune::Pymor::Parametric");
//! assert_eq!(module.class_count(), 1);
//! # Ok::<(), dune_pymor_core::RegistrationError>(())
//! ```
//!
//! The registry is not thread-safe. It is populated once, single-threaded,
//! and then exported with [`Module::to_manifest`].

use dune_pymor_core::{ClassEntry, ClassHandle, ExceptionEntry, QualifiedName, TypeHash};
use petgraph::graph::NodeIndex;

use crate::class_builder::{ClassBuilder, ExceptionBuilder};
use crate::namespace_tree::NamespaceTree;

/// Description of one generated extension module.
pub struct Module {
    name: String,
    tree: NamespaceTree,
    /// Classes in registration order.
    class_order: Vec<TypeHash>,
    /// Exceptions in registration order.
    exception_order: Vec<TypeHash>,
}

impl Module {
    /// Create an empty module description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tree: NamespaceTree::new(),
            class_order: Vec::new(),
            exception_order: Vec::new(),
        }
    }

    /// Name of the generated module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The global namespace.
    pub fn global_namespace(&mut self) -> Namespace<'_> {
        let node = self.tree.root();
        Namespace { module: self, node }
    }

    /// Get or create a top-level native namespace.
    pub fn add_cpp_namespace(&mut self, name: &str) -> Namespace<'_> {
        self.global_namespace().add_cpp_namespace(name)
    }

    /// Get or create a nested native namespace path.
    pub fn namespace_path<S: AsRef<str>>(&mut self, path: &[S]) -> Namespace<'_> {
        let node = self.tree.get_or_create_path(path);
        Namespace { module: self, node }
    }

    /// Underlying namespace tree.
    pub fn tree(&self) -> &NamespaceTree {
        &self.tree
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a class by qualified name.
    pub fn get_class(&self, name: &QualifiedName) -> Option<&ClassEntry> {
        self.tree.get_class_by_hash(name.to_type_hash())
    }

    /// Get a class by its handle.
    pub fn get_class_by_handle(&self, handle: &ClassHandle) -> Option<&ClassEntry> {
        self.tree.get_class_by_hash(handle.type_hash)
    }

    /// Get a class by its qualified name string.
    pub fn get_class_by_name(&self, name: &str) -> Option<&ClassEntry> {
        self.tree.resolve_qualified_class(name)
    }

    /// Check if a class exists by qualified name string.
    pub fn contains_class(&self, name: &str) -> bool {
        self.get_class_by_name(name).is_some()
    }

    /// Get an exception by qualified name string.
    pub fn get_exception_by_name(&self, name: &str) -> Option<&ExceptionEntry> {
        self.tree.get_exception_by_hash(TypeHash::from_exception(
            &QualifiedName::from_qualified_string(name).to_string(),
        ))
    }

    /// Classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.class_order
            .iter()
            .filter_map(|hash| self.tree.get_class_by_hash(*hash))
    }

    /// Exceptions in registration order.
    pub fn exceptions(&self) -> impl Iterator<Item = &ExceptionEntry> {
        self.exception_order
            .iter()
            .filter_map(|hash| self.tree.get_exception_by_hash(*hash))
    }

    /// Number of registered classes.
    pub fn class_count(&self) -> usize {
        self.class_order.len()
    }

    /// Number of registered exceptions.
    pub fn exception_count(&self) -> usize {
        self.exception_order.len()
    }

    // ==========================================================================
    // Registration (called by the builders)
    // ==========================================================================

    pub(crate) fn insert_class(
        &mut self,
        node: NodeIndex,
        entry: ClassEntry,
    ) -> Result<ClassHandle, dune_pymor_core::RegistrationError> {
        if let Some(base) = entry
            .bases
            .iter()
            .find(|base| self.tree.get_class_by_hash(base.type_hash).is_none())
        {
            return Err(dune_pymor_core::RegistrationError::TypeNotFound(
                base.qualified_name(),
            ));
        }
        let handle = entry.handle();
        let methods = entry.method_count();
        self.tree.register_class(node, entry)?;
        self.class_order.push(handle.type_hash);
        tracing::debug!(
            module = %self.name,
            class = %handle.name,
            methods,
            "registered class"
        );
        Ok(handle)
    }

    pub(crate) fn insert_exception(
        &mut self,
        node: NodeIndex,
        entry: ExceptionEntry,
    ) -> Result<dune_pymor_core::ExceptionHandle, dune_pymor_core::RegistrationError> {
        if let Some(parent) = entry
            .parent
            .as_ref()
            .filter(|parent| self.tree.get_exception_by_hash(parent.type_hash).is_none())
        {
            return Err(dune_pymor_core::RegistrationError::TypeNotFound(
                parent.qualified_name(),
            ));
        }
        let handle = entry.handle();
        self.tree.register_exception(node, entry)?;
        self.exception_order.push(handle.type_hash);
        tracing::debug!(module = %self.name, exception = %handle.name, "registered exception");
        Ok(handle)
    }
}

/// A native namespace inside a [`Module`], used to register members.
pub struct Namespace<'m> {
    module: &'m mut Module,
    node: NodeIndex,
}

impl<'m> Namespace<'m> {
    /// Get or create a child namespace.
    pub fn add_cpp_namespace(self, name: &str) -> Namespace<'m> {
        let node = self.module.tree.get_or_create_child(self.node, name);
        Namespace {
            module: self.module,
            node,
        }
    }

    /// Namespace path from the root.
    pub fn path(&self) -> Vec<String> {
        self.module.tree.get_namespace_path(self.node)
    }

    /// Start registering a non-template class.
    pub fn add_class(self, name: &str) -> ClassBuilder<'m> {
        self.add_template_class(name, Vec::new())
    }

    /// Start registering a class template instantiated with `template_args`.
    pub fn add_template_class(self, name: &str, template_args: Vec<String>) -> ClassBuilder<'m> {
        let entry = ClassEntry::new(self.path(), name, template_args);
        ClassBuilder::new(self.module, self.node, entry)
    }

    /// Start registering an exception type.
    pub fn add_exception(self, name: &str) -> ExceptionBuilder<'m> {
        let qualified = QualifiedName::new(name, self.path());
        ExceptionBuilder::new(self.module, self.node, ExceptionEntry::new(qualified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dune_pymor_core::{MethodEntry, RegistrationError, ReturnValue};

    #[test]
    fn new_module_is_empty() {
        let module = Module::new("dunepymor");
        assert_eq!(module.name(), "dunepymor");
        assert_eq!(module.class_count(), 0);
        assert_eq!(module.exception_count(), 0);
    }

    #[test]
    fn nested_namespaces_are_shared() {
        let mut module = Module::new("m");
        let first = module
            .add_cpp_namespace("Dune")
            .add_cpp_namespace("Pymor")
            .path();
        let second = module.namespace_path(&["Dune", "Pymor"]).path();
        assert_eq!(first, second);
        assert_eq!(module.tree().namespace_count(), 3);
    }

    #[test]
    fn classes_keep_registration_order() {
        let mut module = Module::new("m");
        for name in ["B", "A", "C"] {
            module.add_cpp_namespace("Dune").add_class(name).build().unwrap();
        }
        let names: Vec<_> = module.classes().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn duplicate_class_is_rejected_and_not_recorded() {
        let mut module = Module::new("m");
        module.add_cpp_namespace("Dune").add_class("A").build().unwrap();
        let err = module
            .add_cpp_namespace("Dune")
            .add_class("A")
            .build()
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateType("Dune::A".into()));
        assert_eq!(module.class_count(), 1);
    }

    #[test]
    fn lookup_by_name_and_handle() {
        let mut module = Module::new("m");
        let handle = module
            .add_cpp_namespace("Dune")
            .add_cpp_namespace("Pymor")
            .add_class("Parameter")
            .method(MethodEntry::new("size", ReturnValue::new("unsigned int"), vec![]).as_const())
            .build()
            .unwrap();

        let by_handle = module.get_class_by_handle(&handle).unwrap();
        let by_name = module.get_class_by_name("Dune::Pymor::Parameter").unwrap();
        assert_eq!(by_handle, by_name);
        assert_eq!(module.get_class(&handle.name), Some(by_name));
        assert!(module.contains_class("Dune::Pymor::Parameter"));
        assert!(!module.contains_class("Dune::Parameter"));
    }

    #[test]
    fn exceptions_are_registered_in_namespace() {
        let mut module = Module::new("m");
        let handle = module
            .add_cpp_namespace("Dune")
            .add_exception("Exception")
            .build()
            .unwrap();
        assert_eq!(handle.qualified_name(), "Dune::Exception");
        assert!(module.get_exception_by_name("Dune::Exception").is_some());
        assert_eq!(module.exceptions().count(), 1);
    }

    #[test]
    fn unregistered_base_is_rejected() {
        use dune_pymor_core::{ClassHandle, QualifiedName};

        let mut module = Module::new("m");
        let foreign = ClassHandle::new(QualifiedName::from("Dune::Pymor::Parametric"));
        let err = module
            .add_cpp_namespace("Dune")
            .add_class("Derived")
            .base(foreign)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::TypeNotFound("Dune::Pymor::Parametric".into())
        );
        assert_eq!(module.class_count(), 0);
    }

    #[test]
    fn unregistered_parent_exception_is_rejected() {
        use dune_pymor_core::{ExceptionHandle, QualifiedName};

        let mut module = Module::new("m");
        let err = module
            .add_cpp_namespace("Dune")
            .add_exception("PymorException")
            .parent(ExceptionHandle::new(QualifiedName::from("Dune::Exception")))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistrationError::TypeNotFound("Dune::Exception".into()));
        assert_eq!(module.exception_count(), 0);
    }
}
