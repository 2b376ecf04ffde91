//! Type substitutions and template arguments for templated descriptors.

use dune_pymor_core::ConfigurationError;
use rustc_hash::FxHashMap;

/// Trait key naming the source vector type.
pub const SOURCE_TYPE: &str = "SourceType";
/// Trait key naming the scalar type.
pub const SCALAR_TYPE: &str = "ScalarType";
/// Trait key naming the component type of a decomposition.
pub const COMPONENT_TYPE: &str = "ComponentType";
/// Trait key naming the type produced by `freeze_parameter`.
pub const FROZEN_TYPE: &str = "FrozenType";

/// Native type names a templated class is registered with, by role.
///
/// ```
/// use dune_pymor::{BindingTraits, SOURCE_TYPE};
///
/// let traits = BindingTraits::new()
///     .with(SOURCE_TYPE, "Dune::Stuff::LA::IstlDenseVector< double >")
///     .with("ScalarType", "double");
/// assert_eq!(traits.require("ScalarType")?, "double");
/// assert!(traits.require("FrozenType").is_err());
/// # Ok::<(), dune_pymor::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTraits {
    types: FxHashMap<String, String>,
}

impl BindingTraits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a trait.
    pub fn with(mut self, key: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.insert(key, type_name);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, type_name: impl Into<String>) {
        self.types.insert(key.into(), type_name.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.types.get(key).map(String::as_str)
    }

    /// Type name for `key`, or [`ConfigurationError::MissingTrait`].
    pub fn require(&self, key: &str) -> Result<&str, ConfigurationError> {
        self.get(key).ok_or_else(|| ConfigurationError::MissingTrait {
            key: key.to_string(),
        })
    }

    /// Check that no trait maps to a blank type name.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        // sorted so the reported key does not depend on hash order
        let mut blank: Vec<&str> = self
            .types
            .iter()
            .filter(|(_, type_name)| type_name.trim().is_empty())
            .map(|(key, _)| key.as_str())
            .collect();
        blank.sort_unstable();
        match blank.first() {
            Some(key) => Err(ConfigurationError::EmptyTrait {
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BindingTraits {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut traits = Self::new();
        for (key, type_name) in iter {
            traits.insert(key, type_name);
        }
        traits
    }
}

/// Template arguments of the class being registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateParameters {
    /// Not a template instantiation.
    #[default]
    None,
    /// One template argument.
    Single(String),
    /// Several template arguments, in order.
    List(Vec<String>),
}

impl TemplateParameters {
    /// The arguments as a list, checked to be non-blank.
    pub fn into_args(self) -> Result<Vec<String>, ConfigurationError> {
        let args = match self {
            TemplateParameters::None => Vec::new(),
            TemplateParameters::Single(arg) => vec![arg],
            TemplateParameters::List(args) => args,
        };
        if let Some(index) = args.iter().position(|arg| arg.trim().is_empty()) {
            return Err(ConfigurationError::EmptyTemplateParameter { index });
        }
        Ok(args)
    }
}

impl From<&str> for TemplateParameters {
    fn from(arg: &str) -> Self {
        TemplateParameters::Single(arg.to_string())
    }
}

impl From<String> for TemplateParameters {
    fn from(arg: String) -> Self {
        TemplateParameters::Single(arg)
    }
}

impl From<Vec<String>> for TemplateParameters {
    fn from(args: Vec<String>) -> Self {
        TemplateParameters::List(args)
    }
}

impl From<Vec<&str>> for TemplateParameters {
    fn from(args: Vec<&str>) -> Self {
        TemplateParameters::List(args.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<TemplateParameters>> From<Option<T>> for TemplateParameters {
    fn from(args: Option<T>) -> Self {
        args.map_or(TemplateParameters::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_missing_key() {
        let traits = BindingTraits::new().with(SOURCE_TYPE, "Vector");
        assert_eq!(traits.require(SOURCE_TYPE), Ok("Vector"));
        assert_eq!(
            traits.require(SCALAR_TYPE),
            Err(ConfigurationError::MissingTrait {
                key: SCALAR_TYPE.into()
            })
        );
    }

    #[test]
    fn validate_rejects_blank_type_names() {
        let traits: BindingTraits = [("SourceType", "Vector"), ("ScalarType", "  "), ("A", "")]
            .into_iter()
            .collect();
        assert_eq!(
            traits.validate(),
            Err(ConfigurationError::EmptyTrait { key: "A".into() })
        );
        assert!(BindingTraits::new().validate().is_ok());
    }

    #[test]
    fn template_parameters_to_args() {
        assert_eq!(TemplateParameters::None.into_args(), Ok(vec![]));
        assert_eq!(
            TemplateParameters::from("double").into_args(),
            Ok(vec!["double".to_string()])
        );
        assert_eq!(
            TemplateParameters::from(vec!["A", "B"]).into_args(),
            Ok(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(
            TemplateParameters::from(None::<&str>),
            TemplateParameters::None
        );
    }

    #[test]
    fn blank_template_parameter_is_rejected() {
        assert_eq!(
            TemplateParameters::from(" ").into_args(),
            Err(ConfigurationError::EmptyTemplateParameter { index: 0 })
        );
        assert_eq!(
            TemplateParameters::from(vec!["A", "", "C"]).into_args(),
            Err(ConfigurationError::EmptyTemplateParameter { index: 1 })
        );
    }
}
