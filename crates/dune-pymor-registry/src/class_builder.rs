//! Fluent builders for classes and exceptions.
//!
//! Nothing is written into the [`Module`] until `build()` is called, so a
//! builder dropped halfway leaves the module unchanged.

use dune_pymor_core::{
    ClassEntry, ClassHandle, ExceptionEntry, ExceptionHandle, MethodEntry, RegistrationError,
};
use petgraph::graph::NodeIndex;

use crate::Module;

/// Builder for registering a native class.
///
/// Created by [`Namespace::add_class`](crate::Namespace::add_class) or
/// [`Namespace::add_template_class`](crate::Namespace::add_template_class).
pub struct ClassBuilder<'m> {
    module: &'m mut Module,
    node: NodeIndex,
    entry: ClassEntry,
}

impl<'m> ClassBuilder<'m> {
    pub(crate) fn new(module: &'m mut Module, node: NodeIndex, entry: ClassEntry) -> Self {
        Self {
            module,
            node,
            entry,
        }
    }

    /// Add a base class or interface.
    pub fn base(mut self, base: ClassHandle) -> Self {
        self.entry.bases.push(base);
        self
    }

    /// Add several bases, keeping their order.
    pub fn bases(mut self, bases: impl IntoIterator<Item = ClassHandle>) -> Self {
        self.entry.bases.extend(bases);
        self
    }

    /// Mark the class as an abstract interface.
    pub fn abstract_class(mut self) -> Self {
        self.entry.is_abstract = true;
        self
    }

    /// Add a method.
    pub fn method(mut self, method: MethodEntry) -> Self {
        self.entry.add_method(method);
        self
    }

    /// Add several methods, keeping their order.
    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodEntry>) -> Self {
        for method in methods {
            self.entry.add_method(method);
        }
        self
    }

    /// The entry as built so far.
    pub fn entry(&self) -> &ClassEntry {
        &self.entry
    }

    /// Insert the class into the module.
    pub fn build(self) -> Result<ClassHandle, RegistrationError> {
        self.module.insert_class(self.node, self.entry)
    }
}

/// Builder for registering a native exception type.
pub struct ExceptionBuilder<'m> {
    module: &'m mut Module,
    node: NodeIndex,
    entry: ExceptionEntry,
}

impl<'m> ExceptionBuilder<'m> {
    pub(crate) fn new(module: &'m mut Module, node: NodeIndex, entry: ExceptionEntry) -> Self {
        Self {
            module,
            node,
            entry,
        }
    }

    /// Set the parent exception.
    pub fn parent(mut self, parent: ExceptionHandle) -> Self {
        self.entry.parent = Some(parent);
        self
    }

    /// Set the expression producing the message from a caught instance.
    pub fn message_rvalue(mut self, rvalue: impl Into<String>) -> Self {
        self.entry.message_rvalue = Some(rvalue.into());
        self
    }

    /// Insert the exception into the module.
    pub fn build(self) -> Result<ExceptionHandle, RegistrationError> {
        self.module.insert_exception(self.node, self.entry)
    }
}

#[cfg(test)]
mod tests {
    use dune_pymor_core::{MethodEntry, Param, ReturnValue};

    use crate::Module;

    #[test]
    fn builder_collects_bases_and_methods() {
        let mut module = Module::new("m");
        let base = module
            .add_cpp_namespace("Dune")
            .add_class("Parametric")
            .abstract_class()
            .build()
            .unwrap();

        let handle = module
            .add_cpp_namespace("Dune")
            .add_template_class("VectorBased", vec!["double".into()])
            .base(base.clone())
            .methods([
                MethodEntry::new("linear", ReturnValue::new("bool"), vec![]).as_const(),
                MethodEntry::new(
                    "apply",
                    ReturnValue::new("double"),
                    vec![Param::new("const V &", "source")],
                )
                .as_const(),
            ])
            .build()
            .unwrap();

        let class = module.get_class_by_handle(&handle).unwrap();
        assert_eq!(class.name(), "VectorBased<double>");
        assert!(class.derives_from(&base));
        assert_eq!(class.method_count(), 2);
        assert!(module.get_class_by_handle(&base).unwrap().is_abstract);
    }

    #[test]
    fn dropped_builder_leaves_module_unchanged() {
        let mut module = Module::new("m");
        {
            let builder = module.add_cpp_namespace("Dune").add_class("Unfinished");
            assert_eq!(builder.entry().name(), "Unfinished");
        }
        assert_eq!(module.class_count(), 0);
    }

    #[test]
    fn exception_builder_sets_parent() {
        let mut module = Module::new("m");
        let base = module
            .add_cpp_namespace("Dune")
            .add_exception("Exception")
            .build()
            .unwrap();
        module
            .add_cpp_namespace("Dune")
            .add_cpp_namespace("Pymor")
            .add_exception("PymorException")
            .parent(base.clone())
            .message_rvalue("%(EXC)s.pymorWhat()")
            .build()
            .unwrap();

        let entry = module
            .get_exception_by_name("Dune::Pymor::PymorException")
            .unwrap();
        assert_eq!(entry.parent.as_ref(), Some(&base));
    }
}
