//! Contract of the native objects being wrapped.
//!
//! These traits describe what a bound native functional offers. Nothing here
//! is implemented by this crate: bindings implement the traits for their
//! generated handles, and the adapters only consume them.
//!
//! Accessors that allocate a new native object per call (`component`,
//! `coefficient`, `affine_part`, `freeze_parameter`) return a `Box`, so the
//! caller owns the result exclusively.

use nalgebra::RealField;

use crate::NativeError;

/// A native source vector.
pub trait NativeVector {
    /// Number of entries.
    fn dim(&self) -> usize;
}

/// Native description of the parameter components an object depends on.
///
/// Components are kept in the order the native side reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeParameterType {
    components: Vec<(String, Vec<usize>)>,
}

impl NativeParameterType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component with the given shape.
    pub fn with(mut self, key: impl Into<String>, shape: Vec<usize>) -> Self {
        self.components.push((key.into(), shape));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Shape of a component.
    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.components
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, shape)| shape.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.components
            .iter()
            .map(|(k, shape)| (k.as_str(), shape.as_slice()))
    }
}

/// Native parameter value: flat values per component key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeParameter {
    components: Vec<(String, Vec<f64>)>,
}

impl NativeParameter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component.
    pub fn with(mut self, key: impl Into<String>, values: Vec<f64>) -> Self {
        self.components.push((key.into(), values));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Values of a component.
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.components
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.components
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }
}

/// A native scalar function of the parameter (an affine coefficient).
pub trait NativeParameterFunctional {
    /// Evaluate at `mu`.
    fn evaluate(&self, mu: &NativeParameter) -> Result<f64, NativeError>;
}

/// A native functional mapping source vectors to scalars.
pub trait NativeFunctional {
    /// Source vector type.
    type Source: NativeVector;
    /// Scalar type of the result.
    type Scalar: RealField + Copy;
    /// Type produced by [`freeze_parameter`](Self::freeze_parameter).
    type Frozen;

    /// Native name of this type.
    fn type_this() -> String;
    /// Native name of the source vector type.
    fn type_source() -> String;
    /// Native name of the scalar type.
    fn type_scalar() -> String;
    /// Native name of the frozen type.
    fn type_frozen() -> String;

    fn dim_source(&self) -> usize;
    fn linear(&self) -> bool;

    /// The parameter type, or `None` if the object is not parametric.
    fn parameter_type(&self) -> Option<NativeParameterType>;

    /// Evaluate a non-parametric functional.
    fn apply(&self, source: &Self::Source) -> Result<Self::Scalar, NativeError>;

    /// Evaluate at an explicit parameter.
    fn apply_with(
        &self,
        source: &Self::Source,
        mu: &NativeParameter,
    ) -> Result<Self::Scalar, NativeError>;

    /// Specialize at `mu`, returning a new caller-owned object.
    fn freeze_parameter(&self, mu: &NativeParameter) -> Result<Box<Self::Frozen>, NativeError>;
}

/// A native functional given as an affine decomposition
/// `sum_q coefficient_q(mu) * component_q + affine_part`.
pub trait NativeAffinelyDecomposedFunctional: NativeFunctional {
    /// Type of the components and of the affine part.
    type Component: NativeFunctional<Source = Self::Source, Scalar = Self::Scalar>;

    /// Number of scaled components (the affine part is not counted).
    fn num_components(&self) -> usize;

    /// Component `qq`, `0 <= qq < num_components()`.
    fn component(&self, qq: usize) -> Result<Box<Self::Component>, NativeError>;

    /// Coefficient of component `qq`.
    fn coefficient(&self, qq: usize) -> Result<Box<dyn NativeParameterFunctional>, NativeError>;

    fn has_affine_part(&self) -> bool;

    /// The unscaled affine part; fails when `has_affine_part()` is false.
    fn affine_part(&self) -> Result<Box<Self::Component>, NativeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_type_keeps_native_order() {
        let pt = NativeParameterType::new()
            .with("force", vec![])
            .with("diffusion", vec![2]);
        let keys: Vec<_> = pt.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["force", "diffusion"]);
        assert_eq!(pt.get("diffusion"), Some(&[2usize][..]));
        assert_eq!(pt.get("missing"), None);
        assert_eq!(pt.len(), 2);
    }

    #[test]
    fn parameter_lookup() {
        let mu = NativeParameter::new().with("diffusion", vec![0.5, 1.5]);
        assert_eq!(mu.get("diffusion"), Some(&[0.5, 1.5][..]));
        assert!(!mu.is_empty());
        assert!(NativeParameter::new().is_empty());
    }
}
