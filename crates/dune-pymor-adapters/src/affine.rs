//! Adapter for functionals given as an affine decomposition
//! `sum_q theta_q(mu) * f_q + f_affine`.

use std::fmt;
use std::sync::Arc;

use nalgebra::DMatrix;
use tracing::debug;

use crate::functional::FunctionalCore;
use crate::{
    AdapterError, FunctionalInterface, ListVectorArray, NativeAffinelyDecomposedFunctional,
    NativeError, NativeParameter, NativeParameterFunctional, NumericVectorArray, ParameterInput,
    ParameterType, WrappedFunctional,
};

/// Coefficient of one component of a decomposition.
pub enum Coefficient {
    /// A native coefficient functional, evaluated at the parameter.
    Functional(Box<dyn NativeParameterFunctional>),
    /// A fixed value, returned as-is.
    Constant(f64),
}

impl Coefficient {
    pub fn evaluate(&self, mu: &NativeParameter) -> Result<f64, NativeError> {
        match self {
            Coefficient::Functional(functional) => functional.evaluate(mu),
            Coefficient::Constant(value) => Ok(*value),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Coefficient::Constant(_))
    }
}

impl fmt::Debug for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coefficient::Functional(_) => f.write_str("Functional(..)"),
            Coefficient::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
        }
    }
}

/// A functional that is a linear combination of functionals with
/// parameter-dependent coefficients.
pub trait LincombFunctional: FunctionalInterface {
    /// Type of the combined functionals.
    type Operator: FunctionalInterface<Source = Self::Source, Scalar = Self::Scalar>;

    fn operators(&self) -> &[Self::Operator];

    fn coefficients(&self) -> &[Coefficient];

    /// Coefficient values at `mu`, one per operator.
    fn evaluate_coefficients(&self, mu: Option<ParameterInput>) -> Result<Vec<f64>, AdapterError>;

    /// Evaluate `sum_q theta_q(mu) * operator_q(u, mu)`.
    ///
    /// `mu` is parsed once against this functional's parameter type and
    /// handed on to the parametric operators only.
    fn apply_lincomb(
        &self,
        u: &ListVectorArray<Self::Source>,
        indices: Option<&[usize]>,
        mu: Option<ParameterInput>,
    ) -> Result<NumericVectorArray<Self::Scalar>, AdapterError> {
        if u.dim() != self.dim_source() {
            return Err(AdapterError::DimensionMismatch {
                expected: self.dim_source(),
                found: u.dim(),
            });
        }
        let len = u.select(indices)?.len();
        let mu = self.parse_parameter(mu)?;
        let coefficients = self.evaluate_coefficients(Some(mu.clone().into()))?;

        let mut sum: DMatrix<Self::Scalar> = DMatrix::zeros(len, 1);
        for (operator, coefficient) in self.operators().iter().zip(coefficients) {
            let operator_mu = operator
                .parametric()
                .then(|| ParameterInput::from(mu.clone()));
            let weight: Self::Scalar = nalgebra::convert(coefficient);
            sum += operator.apply(u, indices, operator_mu)?.into_matrix() * weight;
        }
        Ok(NumericVectorArray::from_matrix(sum))
    }
}

/// A native affinely decomposed functional, with its components and
/// coefficients wrapped once at construction.
///
/// When the native object has an affine part it is appended as the last
/// component, with the constant coefficient `1.0`.
pub struct AffinelyDecomposedFunctional<N: NativeAffinelyDecomposedFunctional> {
    core: FunctionalCore<N>,
    operators: Vec<WrappedFunctional<N::Component>>,
    coefficients: Vec<Coefficient>,
    has_affine_part: bool,
}

impl<N: NativeAffinelyDecomposedFunctional> AffinelyDecomposedFunctional<N> {
    /// Wrap an owned native object and all of its components.
    ///
    /// Fails if the native object cannot hand out a component, a coefficient
    /// or its affine part.
    pub fn new(native: N) -> Result<Self, AdapterError> {
        Self::from_arc(Arc::new(native))
    }

    /// Like [`new`](Self::new), for a native object shared with other owners.
    pub fn from_arc(native: Arc<N>) -> Result<Self, AdapterError> {
        let num_components = native.num_components();

        let mut operators = Vec::with_capacity(num_components + 1);
        let mut coefficients = Vec::with_capacity(num_components + 1);
        for qq in 0..num_components {
            operators.push(WrappedFunctional::from_arc(native.component(qq)?.into()));
            coefficients.push(Coefficient::Functional(native.coefficient(qq)?));
        }

        let has_affine_part = native.has_affine_part();
        if has_affine_part {
            operators.push(WrappedFunctional::from_arc(native.affine_part()?.into()));
            coefficients.push(Coefficient::Constant(1.0));
        }

        debug!(
            native_type = %N::type_this(),
            num_components,
            has_affine_part,
            "wrapped affinely decomposed functional"
        );

        Ok(Self {
            core: FunctionalCore::from_native(native),
            operators,
            coefficients,
            has_affine_part,
        })
    }

    pub fn has_affine_part(&self) -> bool {
        self.has_affine_part
    }

    /// Number of scaled components, not counting the affine part.
    pub fn num_components(&self) -> usize {
        self.operators.len() - usize::from(self.has_affine_part)
    }

    /// The wrapped native object.
    pub fn native(&self) -> &N {
        self.core.native()
    }

    /// Specialize the native object at `mu`. The caller owns the result.
    pub fn freeze_parameter(
        &self,
        mu: Option<ParameterInput>,
    ) -> Result<Box<N::Frozen>, AdapterError> {
        self.core.freeze_parameter(mu)
    }
}

impl<N: NativeAffinelyDecomposedFunctional> LincombFunctional for AffinelyDecomposedFunctional<N> {
    type Operator = WrappedFunctional<N::Component>;

    fn operators(&self) -> &[Self::Operator] {
        &self.operators
    }

    fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    fn evaluate_coefficients(&self, mu: Option<ParameterInput>) -> Result<Vec<f64>, AdapterError> {
        let mu = self.core.native_parameter(mu)?;
        self.coefficients
            .iter()
            .map(|coefficient| coefficient.evaluate(&mu).map_err(AdapterError::from))
            .collect()
    }
}

impl<N: NativeAffinelyDecomposedFunctional> FunctionalInterface
    for AffinelyDecomposedFunctional<N>
{
    type Source = N::Source;
    type Scalar = N::Scalar;

    fn dim_source(&self) -> usize {
        self.core.dim_source()
    }

    fn linear(&self) -> bool {
        self.core.linear()
    }

    fn parameter_type(&self) -> Option<&ParameterType> {
        self.core.parameter_type()
    }

    fn apply(
        &self,
        u: &ListVectorArray<Self::Source>,
        indices: Option<&[usize]>,
        mu: Option<ParameterInput>,
    ) -> Result<NumericVectorArray<Self::Scalar>, AdapterError> {
        self.core.apply(u, indices, mu)
    }
}

impl<N: NativeAffinelyDecomposedFunctional> fmt::Debug for AffinelyDecomposedFunctional<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AffinelyDecomposedFunctional")
            .field("type", &N::type_this())
            .field("operators", &self.operators)
            .field("coefficients", &self.coefficients)
            .field("has_affine_part", &self.has_affine_part)
            .finish()
    }
}
