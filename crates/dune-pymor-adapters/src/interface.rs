//! The host-side functional interface implemented by every adapter.

use nalgebra::RealField;

use crate::{
    AdapterError, ListVectorArray, NativeVector, NumericVectorArray, Parameter, ParameterError,
    ParameterInput, ParameterType, check_unparametric,
};

/// A functional mapping vectors of [`Source`](Self::Source) to scalars.
pub trait FunctionalInterface {
    /// Source vector type.
    type Source: NativeVector;
    /// Scalar type of the result.
    type Scalar: RealField + Copy;

    /// Dimension of the source space.
    fn dim_source(&self) -> usize;

    /// Dimension of the range; a functional always maps to scalars.
    fn dim_range(&self) -> usize {
        1
    }

    fn linear(&self) -> bool;

    /// The parameter type, `None` if not parametric.
    fn parameter_type(&self) -> Option<&ParameterType>;

    fn parametric(&self) -> bool {
        self.parameter_type().is_some()
    }

    /// Validate `mu` and restrict it to this functional's parameter type.
    ///
    /// For non-parametric functionals `mu` has to be absent or empty and the
    /// result is the empty parameter.
    fn parse_parameter(&self, mu: Option<ParameterInput>) -> Result<Parameter, ParameterError> {
        match self.parameter_type() {
            Some(parameter_type) => parameter_type.parse(mu),
            None => {
                check_unparametric(mu.as_ref())?;
                Ok(Parameter::new())
            }
        }
    }

    /// Validate `mu` without keeping the parsed result.
    fn check_parameter(&self, mu: Option<&ParameterInput>) -> Result<(), ParameterError> {
        match self.parameter_type() {
            Some(parameter_type) => parameter_type.parse(mu.cloned()).map(|_| ()),
            None => check_unparametric(mu),
        }
    }

    /// Evaluate on the whole of `u` (`indices = None`) or on the vectors at
    /// `indices`. The result holds one scalar per selected vector.
    fn apply(
        &self,
        u: &ListVectorArray<Self::Source>,
        indices: Option<&[usize]>,
        mu: Option<ParameterInput>,
    ) -> Result<NumericVectorArray<Self::Scalar>, AdapterError>;
}
