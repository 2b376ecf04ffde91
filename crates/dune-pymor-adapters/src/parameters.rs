//! Host-side parameter types and parameter parsing.
//!
//! A [`ParameterType`] maps component keys to shapes. [`ParameterType::parse`]
//! turns user input ([`ParameterInput`]) into a validated [`Parameter`],
//! which converts into the [`NativeParameter`] the native object expects.
//!
//! ```
//! use dune_pymor_adapters::{Parameter, ParameterType};
//!
//! let pt = ParameterType::new().with_component("diffusion", vec![2]);
//!
//! // single-component types accept bare values
//! let mu = pt.parse(Some(vec![1.0, 2.0].into()))?;
//! assert_eq!(mu.get("diffusion"), Some(&[1.0, 2.0][..]));
//!
//! assert!(pt.parse(None).is_err());
//! assert!(pt.parse(Some(Parameter::new().with("diffusion", vec![1.0]).into())).is_err());
//! # Ok::<(), dune_pymor_adapters::ParameterError>(())
//! ```

use std::collections::BTreeMap;

use crate::{NativeParameter, NativeParameterType, ParameterError};

/// Components (key → shape) a functional depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterType {
    components: BTreeMap<String, Vec<usize>>,
}

impl ParameterType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component.
    pub fn with_component(mut self, key: impl Into<String>, shape: Vec<usize>) -> Self {
        self.components.insert(key.into(), shape);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Shape of a component.
    pub fn shape(&self, key: &str) -> Option<&[usize]> {
        self.components.get(key).map(Vec::as_slice)
    }

    /// Number of scalar values a component holds (1 for shape `[]`).
    pub fn size(&self, key: &str) -> Option<usize> {
        self.shape(key).map(|shape| shape.iter().product())
    }

    /// Component keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Validate `mu` against this type.
    ///
    /// - `None` is accepted only by the empty type.
    /// - A bare value (or value list) is accepted only when there is exactly
    ///   one component, and is assigned to it.
    /// - A [`Parameter`] must provide every component with the right number of
    ///   values; components not in this type are dropped.
    pub fn parse(&self, mu: Option<ParameterInput>) -> Result<Parameter, ParameterError> {
        let parameter = match mu {
            None if self.is_empty() => return Ok(Parameter::new()),
            None => {
                return Err(ParameterError::MissingParameter {
                    expected: self.keys().map(str::to_string).collect(),
                });
            }
            Some(ParameterInput::Parameter(p)) => p,
            Some(ParameterInput::Scalar(value)) => self.single_component(vec![value])?,
            Some(ParameterInput::Values(values)) => self.single_component(values)?,
        };

        let mut parsed = Parameter::new();
        for (key, shape) in &self.components {
            let values = parameter
                .get(key)
                .ok_or_else(|| ParameterError::MissingKey { key: key.clone() })?;
            let expected: usize = shape.iter().product();
            if values.len() != expected {
                return Err(ParameterError::ShapeMismatch {
                    key: key.clone(),
                    shape: shape.clone(),
                    expected,
                    found: values.len(),
                });
            }
            parsed.insert(key.clone(), values.to_vec());
        }
        Ok(parsed)
    }

    fn single_component(&self, values: Vec<f64>) -> Result<Parameter, ParameterError> {
        match self.keys().next() {
            Some(key) if self.len() == 1 => Ok(Parameter::new().with(key, values)),
            _ => Err(ParameterError::ScalarNotAllowed { count: self.len() }),
        }
    }
}

impl From<&NativeParameterType> for ParameterType {
    fn from(native: &NativeParameterType) -> Self {
        native
            .iter()
            .fold(ParameterType::new(), |pt, (key, shape)| {
                pt.with_component(key, shape.to_vec())
            })
    }
}

impl From<&ParameterType> for NativeParameterType {
    fn from(pt: &ParameterType) -> Self {
        pt.components
            .iter()
            .fold(NativeParameterType::new(), |native, (key, shape)| {
                native.with(key.clone(), shape.clone())
            })
    }
}

/// Concrete parameter values (key → flat values).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    components: BTreeMap<String, Vec<f64>>,
}

impl Parameter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component.
    pub fn with(mut self, key: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(key, values);
        self
    }

    /// Set a component.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<f64>) {
        self.components.insert(key.into(), values);
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Values of a component.
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.components.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.components
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<&Parameter> for NativeParameter {
    fn from(mu: &Parameter) -> Self {
        mu.iter().fold(NativeParameter::new(), |native, (key, values)| {
            native.with(key, values.to_vec())
        })
    }
}

/// What callers may pass where a parameter is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterInput {
    /// A full parameter.
    Parameter(Parameter),
    /// A single value for a single-component, single-value type.
    Scalar(f64),
    /// Flat values for a single-component type.
    Values(Vec<f64>),
}

impl From<Parameter> for ParameterInput {
    fn from(mu: Parameter) -> Self {
        ParameterInput::Parameter(mu)
    }
}

impl From<f64> for ParameterInput {
    fn from(value: f64) -> Self {
        ParameterInput::Scalar(value)
    }
}

impl From<Vec<f64>> for ParameterInput {
    fn from(values: Vec<f64>) -> Self {
        ParameterInput::Values(values)
    }
}

/// Accept `mu` for a non-parametric functional: absent or empty only.
pub fn check_unparametric(mu: Option<&ParameterInput>) -> Result<(), ParameterError> {
    match mu {
        None => Ok(()),
        Some(ParameterInput::Parameter(p)) if p.is_empty() => Ok(()),
        Some(_) => Err(ParameterError::UnexpectedParameter),
    }
}
