//! Lookup tables passed between descriptors.
//!
//! Injectors return the handles they registered in these tables; later
//! descriptors resolve their bases and declared exceptions through them.

use dune_pymor_core::{ClassHandle, ConfigurationError, ExceptionHandle};
use rustc_hash::FxHashMap;

/// Exception handles by key (`Exception`, `DuneException`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionTable {
    handles: FxHashMap<String, ExceptionHandle>,
}

impl ExceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, handle: ExceptionHandle) {
        self.handles.insert(key.into(), handle);
    }

    pub fn get(&self, key: &str) -> Option<&ExceptionHandle> {
        self.handles.get(key)
    }

    /// Handle for `key`, or [`ConfigurationError::MissingException`].
    pub fn require(&self, key: &str) -> Result<ExceptionHandle, ConfigurationError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| ConfigurationError::MissingException(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Interface handles by qualified name (`Dune::Pymor::Parametric`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceTable {
    handles: FxHashMap<String, ClassHandle>,
}

impl InterfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `handle` under its qualified name.
    pub fn register(&mut self, handle: ClassHandle) {
        self.handles.insert(handle.qualified_name(), handle);
    }

    /// Add `handle` under an explicit key.
    pub fn insert(&mut self, key: impl Into<String>, handle: ClassHandle) {
        self.handles.insert(key.into(), handle);
    }

    pub fn get(&self, key: &str) -> Option<&ClassHandle> {
        self.handles.get(key)
    }

    /// Handle for `key`, or [`ConfigurationError::MissingInterface`].
    pub fn require(&self, key: &str) -> Result<ClassHandle, ConfigurationError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| ConfigurationError::MissingInterface(key.to_string()))
    }

    /// Check that no key is empty.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.handles.keys().any(String::is_empty) {
            return Err(ConfigurationError::EmptyInterfaceName);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl FromIterator<ClassHandle> for InterfaceTable {
    fn from_iter<I: IntoIterator<Item = ClassHandle>>(iter: I) -> Self {
        let mut table = Self::new();
        for handle in iter {
            table.register(handle);
        }
        table
    }
}
