//! Error types for binding registration.
//!
//! ```text
//! BindingsError (umbrella)
//! ├── ConfigurationError - malformed descriptor arguments, checked before registration
//! └── RegistrationError  - conflicts inside the module description
//! ```
//!
//! Each phase-specific error can be matched directly, or converted into
//! [`BindingsError`] with `?`.

use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Precondition violations in the arguments handed to a descriptor.
///
/// These are raised before the module is touched, so a failed descriptor
/// call leaves the module unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// An interface table contains an empty key.
    #[error("interface table contains an empty name")]
    EmptyInterfaceName,

    /// A traits entry maps to an empty (or whitespace-only) type name.
    #[error("trait '{key}' maps to an empty type name")]
    EmptyTrait {
        /// The offending trait key.
        key: String,
    },

    /// A trait required by the descriptor is absent.
    #[error("required trait '{key}' is missing")]
    MissingTrait {
        /// The required trait key.
        key: String,
    },

    /// A template parameter is empty (or whitespace-only).
    #[error("template parameter {index} is empty")]
    EmptyTemplateParameter {
        /// Position of the parameter in the template list.
        index: usize,
    },

    /// An interface the descriptor derives from is not in the interface table.
    #[error("interface '{0}' is not in the interface table")]
    MissingInterface(String),

    /// An exception the descriptor declares is not in the exception table.
    #[error("exception '{0}' is not in the exception table")]
    MissingException(String),

    /// A `config.h` line could not be interpreted.
    #[error("invalid config line {line}: {detail}")]
    InvalidConfigLine {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        detail: String,
    },
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Conflicts detected while inserting into a module description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A base class or parent exception is not registered in the module.
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// A class with this qualified name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// An exception with this qualified name already exists.
    #[error("duplicate exception: {0}")]
    DuplicateException(String),

    /// A namespace node could not be resolved.
    #[error("invalid namespace")]
    InvalidNamespace,
}

// ============================================================================
// Unified Error
// ============================================================================

/// Unified error for descriptor calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingsError {
    /// A configuration error.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A registration error.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl BindingsError {
    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BindingsError::Configuration(_))
    }

    /// Check if this is a registration error.
    pub fn is_registration(&self) -> bool {
        matches!(self, BindingsError::Registration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_display() {
        let err = ConfigurationError::MissingTrait {
            key: "SourceType".into(),
        };
        assert_eq!(format!("{err}"), "required trait 'SourceType' is missing");

        let err = ConfigurationError::EmptyTemplateParameter { index: 1 };
        assert_eq!(format!("{err}"), "template parameter 1 is empty");
    }

    #[test]
    fn registration_error_display() {
        let err = RegistrationError::DuplicateType("Dune::Pymor::Parametric".into());
        assert_eq!(format!("{err}"), "duplicate type: Dune::Pymor::Parametric");
    }

    #[test]
    fn umbrella_is_transparent() {
        let inner = ConfigurationError::MissingInterface("Dune::Pymor::Parametric".into());
        let err: BindingsError = inner.clone().into();
        assert!(err.is_configuration());
        assert!(!err.is_registration());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
