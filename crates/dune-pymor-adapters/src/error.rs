//! Error types for the adapter layer.
//!
//! ```text
//! AdapterError
//! ├── ParameterError     - missing, unexpected or malformed parameters
//! ├── NativeError        - opaque failure reported by the native object
//! ├── DimensionMismatch  - vector array does not fit the functional
//! └── IndexOutOfRange    - selection index past the end of the array
//! ```

use thiserror::Error;

/// Failure reported by a native object.
///
/// The message is carried through unchanged; this layer never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("native error: {message}")]
pub struct NativeError {
    /// Message produced by the native exception.
    pub message: String,
}

impl NativeError {
    /// Create a native error from its message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for NativeError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for NativeError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Parameter validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A parametric functional was called without a parameter.
    #[error("parameter required, expected components: {}", expected.join(", "))]
    MissingParameter {
        /// Keys the parameter type declares.
        expected: Vec<String>,
    },

    /// A non-parametric functional was called with a non-empty parameter.
    #[error("functional is not parametric but a parameter was given")]
    UnexpectedParameter,

    /// A component declared by the parameter type is absent.
    #[error("parameter is missing component '{key}'")]
    MissingKey {
        /// The absent key.
        key: String,
    },

    /// A component has the wrong number of values for its shape.
    #[error("parameter component '{key}' has {found} values, shape {shape:?} needs {expected}")]
    ShapeMismatch {
        /// Component key.
        key: String,
        /// Declared shape.
        shape: Vec<usize>,
        /// Number of values the shape requires.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    /// A bare value was given but the parameter type has several components.
    #[error("a bare value is only accepted for single-component parameter types ({count} components)")]
    ScalarNotAllowed {
        /// Number of components in the parameter type.
        count: usize,
    },
}

/// Errors raised by adapter operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    /// Parameter validation failed.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The native object failed.
    #[error(transparent)]
    Native(#[from] NativeError),

    /// The vector dimension does not match the functional's source dimension.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Source dimension of the functional.
        expected: usize,
        /// Dimension of the offending vector or array.
        found: usize,
    },

    /// A selection index is out of range.
    #[error("index {index} out of range for vector array of length {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Length of the array.
        len: usize,
    },
}

impl AdapterError {
    /// Check if this is a parameter error.
    pub fn is_parameter(&self) -> bool {
        matches!(self, AdapterError::Parameter(_))
    }

    /// Check if this is a native error.
    pub fn is_native(&self) -> bool {
        matches!(self, AdapterError::Native(_))
    }
}
