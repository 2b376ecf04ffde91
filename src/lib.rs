//! Binding descriptors and host-side adapters for dune-pymor functionals.
//!
//! The descriptor half registers native classes into a [`Module`] description
//! for the external binding generator:
//!
//! 1. [`inject_exceptions`] registers `Dune::Exception`,
//! 2. [`inject_parameters`] registers the parameter vocabulary,
//! 3. [`inject_functional_interfaces`] registers the abstract interfaces,
//! 4. [`inject_vector_based`] and
//!    [`inject_linear_affinely_decomposed_vector_based`] register concrete
//!    functional instantiations.
//!
//! [`BindingContext`] runs steps 1 to 3 and keeps the resulting tables. The
//! adapter half lives in [`adapters`].

mod config;
mod context;
mod exceptions;
mod functionals;
mod parameters;
mod tables;
mod traits;

pub use config::ConfigH;
pub use context::BindingContext;
pub use exceptions::{
    DUNE_EXCEPTION, EXCEPTION, PYMOR_EXCEPTION, WHAT_MESSAGE, inject_exceptions,
};
pub use functionals::{
    AFFINELY_DECOMPOSED_FUNCTIONAL_INTERFACE, FUNCTIONAL_INTERFACE, FUNCTIONALS_NAMESPACE,
    inject_functional_interfaces, inject_linear_affinely_decomposed_vector_based,
    inject_vector_based,
};
pub use parameters::{PARAMETER_FUNCTIONAL, PARAMETRIC, inject_parameters};
pub use tables::{ExceptionTable, InterfaceTable};
pub use traits::{
    BindingTraits, COMPONENT_TYPE, FROZEN_TYPE, SCALAR_TYPE, SOURCE_TYPE, TemplateParameters,
};

pub use dune_pymor_adapters as adapters;
pub use dune_pymor_core::{BindingsError, ClassHandle, ConfigurationError, RegistrationError};
pub use dune_pymor_registry::{Module, ModuleManifest};

pub mod prelude {
    pub use crate::adapters::{
        AdapterError, AffinelyDecomposedFunctional, FunctionalInterface, LincombFunctional,
        ListVectorArray, NativeAffinelyDecomposedFunctional, NativeFunctional, Parameter,
        ParameterInput, WrappedFunctional,
    };
    pub use crate::{
        BindingContext, BindingTraits, BindingsError, ConfigH, Module, TemplateParameters,
    };
}
