//! Adapter exposing a native functional through [`FunctionalInterface`].

use std::sync::Arc;

use tracing::debug;

use crate::{
    AdapterError, FunctionalInterface, ListVectorArray, NativeFunctional, NativeParameter,
    NumericVectorArray, ParameterInput, ParameterType, check_unparametric,
};

/// State shared by every adapter over a native functional.
///
/// Computed once from the native object; nothing in it changes afterwards.
pub(crate) struct FunctionalCore<N> {
    native: Arc<N>,
    dim_source: usize,
    linear: bool,
    parameter_type: Option<ParameterType>,
}

impl<N: NativeFunctional> FunctionalCore<N> {
    pub(crate) fn from_native(native: Arc<N>) -> Self {
        let parameter_type = native
            .parameter_type()
            .filter(|pt| !pt.is_empty())
            .map(|pt| ParameterType::from(&pt));
        Self {
            dim_source: native.dim_source(),
            linear: native.linear(),
            parameter_type,
            native,
        }
    }

    pub(crate) fn native(&self) -> &Arc<N> {
        &self.native
    }

    pub(crate) fn dim_source(&self) -> usize {
        self.dim_source
    }

    pub(crate) fn linear(&self) -> bool {
        self.linear
    }

    pub(crate) fn parameter_type(&self) -> Option<&ParameterType> {
        self.parameter_type.as_ref()
    }

    /// Parse `mu` into the native representation.
    pub(crate) fn native_parameter(
        &self,
        mu: Option<ParameterInput>,
    ) -> Result<NativeParameter, AdapterError> {
        match &self.parameter_type {
            Some(parameter_type) => Ok(NativeParameter::from(&parameter_type.parse(mu)?)),
            None => {
                check_unparametric(mu.as_ref())?;
                Ok(NativeParameter::new())
            }
        }
    }

    pub(crate) fn apply(
        &self,
        u: &ListVectorArray<N::Source>,
        indices: Option<&[usize]>,
        mu: Option<ParameterInput>,
    ) -> Result<NumericVectorArray<N::Scalar>, AdapterError> {
        if u.dim() != self.dim_source {
            return Err(AdapterError::DimensionMismatch {
                expected: self.dim_source,
                found: u.dim(),
            });
        }
        let vectors = u.select(indices)?;

        let values = match &self.parameter_type {
            Some(parameter_type) => {
                let mu = NativeParameter::from(&parameter_type.parse(mu)?);
                vectors
                    .into_iter()
                    .map(|v| self.native.apply_with(v, &mu))
                    .collect::<Result<Vec<_>, _>>()?
            }
            None => {
                check_unparametric(mu.as_ref())?;
                vectors
                    .into_iter()
                    .map(|v| self.native.apply(v))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(NumericVectorArray::from_column(values))
    }

    pub(crate) fn freeze_parameter(
        &self,
        mu: Option<ParameterInput>,
    ) -> Result<Box<N::Frozen>, AdapterError> {
        let mu = self.native_parameter(mu)?;
        Ok(self.native.freeze_parameter(&mu)?)
    }
}

/// A native functional seen through [`FunctionalInterface`].
///
/// The adapter keeps a shared handle to the native object; several adapters
/// may wrap the same object and stay independent of each other. Once built the
/// adapter cannot be altered:
///
/// ```compile_fail
/// use dune_pymor_adapters::{NativeFunctional, WrappedFunctional};
///
/// fn rewire<N: NativeFunctional>(functional: &mut WrappedFunctional<N>) {
///     functional.core.linear = false;
/// }
/// ```
pub struct WrappedFunctional<N> {
    core: FunctionalCore<N>,
}

impl<N: NativeFunctional> WrappedFunctional<N> {
    /// Wrap an owned native object.
    pub fn new(native: N) -> Self {
        Self::from_arc(Arc::new(native))
    }

    /// Wrap a native object that is shared with other owners.
    pub fn from_arc(native: Arc<N>) -> Self {
        let core = FunctionalCore::from_native(native);
        debug!(
            native_type = %N::type_this(),
            dim_source = core.dim_source(),
            parametric = core.parameter_type().is_some(),
            "wrapped native functional"
        );
        Self { core }
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

impl<N: NativeFunctional> FunctionalInterface for WrappedFunctional<N> {
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

impl<N: NativeFunctional> std::fmt::Debug for WrappedFunctional<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedFunctional")
            .field("type", &N::type_this())
            .field("dim_source", &self.core.dim_source())
            .field("linear", &self.core.linear())
            .field("parameter_type", &self.core.parameter_type())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NativeError, NativeParameterType, NativeVector, Parameter, ParameterError};

    #[derive(Debug, Clone)]
    struct Vector(Vec<f64>);

    impl NativeVector for Vector {
        fn dim(&self) -> usize {
            self.0.len()
        }
    }

    /// `u -> scale * sum(u)`, with `scale = mu["s"]` when parametric.
    struct Sum {
        dim: usize,
        parametric: bool,
    }

    impl NativeFunctional for Sum {
        type Source = Vector;
        type Scalar = f64;
        type Frozen = Sum;

        fn type_this() -> String {
            "Sum".into()
        }
        fn type_source() -> String {
            "Vector".into()
        }
        fn type_scalar() -> String {
            "double".into()
        }
        fn type_frozen() -> String {
            "Sum".into()
        }

        fn dim_source(&self) -> usize {
            self.dim
        }

        fn linear(&self) -> bool {
            true
        }

        fn parameter_type(&self) -> Option<NativeParameterType> {
            self.parametric
                .then(|| NativeParameterType::new().with("s", vec![]))
        }

        fn apply(&self, source: &Vector) -> Result<f64, NativeError> {
            if self.parametric {
                return Err(NativeError::new("parameter required"));
            }
            Ok(source.0.iter().sum())
        }

        fn apply_with(&self, source: &Vector, mu: &NativeParameter) -> Result<f64, NativeError> {
            let scale = mu.get("s").ok_or("missing s")?[0];
            Ok(scale * source.0.iter().sum::<f64>())
        }

        fn freeze_parameter(&self, _mu: &NativeParameter) -> Result<Box<Sum>, NativeError> {
            Ok(Box::new(Sum {
                dim: self.dim,
                parametric: false,
            }))
        }
    }

    fn array() -> ListVectorArray<Vector> {
        ListVectorArray::new(
            2,
            vec![
                Vector(vec![1.0, 0.0]),
                Vector(vec![1.0, 1.0]),
                Vector(vec![2.0, 1.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn non_parametric_apply() {
        let f = WrappedFunctional::new(Sum {
            dim: 2,
            parametric: false,
        });
        assert!(!f.parametric());
        assert_eq!(f.dim_range(), 1);
        let result = f.apply(&array(), None, None).unwrap();
        assert_eq!(result.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn non_parametric_rejects_parameter() {
        let f = WrappedFunctional::new(Sum {
            dim: 2,
            parametric: false,
        });
        let mu = Parameter::new().with("s", vec![2.0]);
        let err = f.apply(&array(), None, Some(mu.into())).unwrap_err();
        assert_eq!(err, AdapterError::from(ParameterError::UnexpectedParameter));
    }

    #[test]
    fn parametric_requires_parameter() {
        let f = WrappedFunctional::new(Sum {
            dim: 2,
            parametric: true,
        });
        assert!(f.apply(&array(), None, None).unwrap_err().is_parameter());

        let result = f.apply(&array(), Some(&[2, 0]), Some(2.0.into())).unwrap();
        assert_eq!(result.values(), &[6.0, 2.0]);
    }

    #[test]
    fn dimension_mismatch() {
        let f = WrappedFunctional::new(Sum {
            dim: 3,
            parametric: false,
        });
        assert_eq!(
            f.apply(&array(), None, None).unwrap_err(),
            AdapterError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn freeze_parameter_returns_owned_object() {
        let f = WrappedFunctional::new(Sum {
            dim: 2,
            parametric: true,
        });
        let frozen = f.freeze_parameter(Some(1.0.into())).unwrap();
        assert!(!frozen.parametric);
        assert!(f.freeze_parameter(None).is_err());
    }

    #[test]
    fn shared_native_object() {
        let native = Arc::new(Sum {
            dim: 2,
            parametric: false,
        });
        let first = WrappedFunctional::from_arc(Arc::clone(&native));
        let second = WrappedFunctional::from_arc(Arc::clone(&native));
        assert_eq!(Arc::strong_count(&native), 3);
        assert!(std::ptr::eq(first.native(), second.native()));

        drop(first);
        assert_eq!(Arc::strong_count(&native), 2);
        assert_eq!(second.apply(&array(), None, None).unwrap().len(), 3);
    }

    #[test]
    fn empty_native_parameter_type_is_not_parametric() {
        struct Empty;
        impl NativeFunctional for Empty {
            type Source = Vector;
            type Scalar = f64;
            type Frozen = Empty;
            fn type_this() -> String {
                "Empty".into()
            }
            fn type_source() -> String {
                "Vector".into()
            }
            fn type_scalar() -> String {
                "double".into()
            }
            fn type_frozen() -> String {
                "Empty".into()
            }
            fn dim_source(&self) -> usize {
                2
            }
            fn linear(&self) -> bool {
                false
            }
            fn parameter_type(&self) -> Option<NativeParameterType> {
                Some(NativeParameterType::new())
            }
            fn apply(&self, _: &Vector) -> Result<f64, NativeError> {
                Ok(0.0)
            }
            fn apply_with(&self, _: &Vector, _: &NativeParameter) -> Result<f64, NativeError> {
                Err(NativeError::new("unexpected"))
            }
            fn freeze_parameter(&self, _: &NativeParameter) -> Result<Box<Empty>, NativeError> {
                Ok(Box::new(Empty))
            }
        }

        let f = WrappedFunctional::new(Empty);
        assert!(!f.parametric());
        assert!(!f.linear());
        assert_eq!(f.apply(&array(), None, None).unwrap().len(), 3);
    }
}
