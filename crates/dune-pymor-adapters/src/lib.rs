//! Host-side adapters for bound dune-pymor functionals.
//!
//! A bound native functional implements [`NativeFunctional`] (and, when it
//! is given as an affine decomposition, [`NativeAffinelyDecomposedFunctional`]).
//! The adapters here expose it through [`FunctionalInterface`]:
//!
//! - [`WrappedFunctional`] for a plain functional,
//! - [`AffinelyDecomposedFunctional`] for a decomposition, which also
//!   implements [`LincombFunctional`].
//!
//! Adapters are immutable once built and share the native object through an
//! `Arc`, so wrapping the same object twice yields two independent adapters.

mod affine;
mod error;
mod functional;
mod interface;
mod native;
mod parameters;
mod vector_array;

pub use affine::{AffinelyDecomposedFunctional, Coefficient, LincombFunctional};
pub use error::{AdapterError, NativeError, ParameterError};
pub use functional::WrappedFunctional;
pub use interface::FunctionalInterface;
pub use native::{
    NativeAffinelyDecomposedFunctional, NativeFunctional, NativeParameter,
    NativeParameterFunctional, NativeParameterType, NativeVector,
};
pub use parameters::{Parameter, ParameterInput, ParameterType, check_unparametric};
pub use vector_array::{ListVectorArray, NumericVectorArray};
