//! Shared state for a run of descriptors over one module.

use dune_pymor_core::{BindingsError, ClassHandle};
use dune_pymor_registry::Module;

use crate::{
    BindingTraits, ConfigH, ExceptionTable, InterfaceTable, TemplateParameters,
    inject_exceptions, inject_functional_interfaces, inject_linear_affinely_decomposed_vector_based,
    inject_parameters, inject_vector_based,
};

/// Exception and interface tables plus configuration, as produced by the
/// injectors and consumed by the functional descriptors.
///
/// ```
/// use dune_pymor::{BindingContext, BindingTraits, ConfigH, Module};
///
/// let mut module = Module::new("dunepymor");
/// let context = BindingContext::inject(&mut module, ConfigH::new())?;
///
/// let traits = BindingTraits::new()
///     .with("SourceType", "Vector")
///     .with("ScalarType", "double");
/// let class = context.vector_based(&mut module, &traits, "Vector")?;
/// assert!(module.get_class_by_handle(&class).is_some());
/// # Ok::<(), dune_pymor::BindingsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BindingContext {
    config: ConfigH,
    exceptions: ExceptionTable,
    interfaces: InterfaceTable,
}

impl BindingContext {
    /// Run the exception, parameter and functional interface injectors.
    pub fn inject(module: &mut Module, config: ConfigH) -> Result<Self, BindingsError> {
        let exceptions = inject_exceptions(module, &config)?;
        let mut interfaces = inject_parameters(module, &exceptions, &config)?;
        inject_functional_interfaces(module, &exceptions, &mut interfaces, &config)?;
        Ok(Self {
            config,
            exceptions,
            interfaces,
        })
    }

    /// Assemble a context from existing tables.
    pub fn from_parts(
        config: ConfigH,
        exceptions: ExceptionTable,
        interfaces: InterfaceTable,
    ) -> Self {
        Self {
            config,
            exceptions,
            interfaces,
        }
    }

    pub fn config(&self) -> &ConfigH {
        &self.config
    }

    pub fn exceptions(&self) -> &ExceptionTable {
        &self.exceptions
    }

    pub fn interfaces(&self) -> &InterfaceTable {
        &self.interfaces
    }

    /// See [`inject_vector_based`].
    pub fn vector_based(
        &self,
        module: &mut Module,
        traits: &BindingTraits,
        template_parameters: impl Into<TemplateParameters>,
    ) -> Result<ClassHandle, BindingsError> {
        inject_vector_based(
            module,
            &self.exceptions,
            &self.interfaces,
            &self.config,
            traits,
            template_parameters,
        )
    }

    /// See [`inject_linear_affinely_decomposed_vector_based`].
    pub fn linear_affinely_decomposed_vector_based(
        &self,
        module: &mut Module,
        traits: &BindingTraits,
        template_parameters: impl Into<TemplateParameters>,
    ) -> Result<ClassHandle, BindingsError> {
        inject_linear_affinely_decomposed_vector_based(
            module,
            &self.exceptions,
            &self.interfaces,
            &self.config,
            traits,
            template_parameters,
        )
    }
}
