//! Method entries.
//!
//! A [`MethodEntry`] records everything the generator needs to emit one
//! wrapper function: native name, exposed name, return value (with its
//! ownership marker), parameters, qualifiers and declared exceptions.

use bitflags::bitflags;

use crate::TypeHash;

use super::ExceptionHandle;

bitflags! {
    /// Qualifiers of an exposed method.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodFlags: u8 {
        /// The method is `const` on the native side.
        const CONST = 0b01;
        /// The method is `static` on the native side.
        const STATIC = 0b10;
    }
}

/// Return value of an exposed method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnValue {
    /// Native type name, e.g. `std::string` or `Dune::Pymor::ParameterFunctional *`.
    pub type_name: String,
    /// The caller receives exclusive ownership of the returned object.
    pub caller_owns_return: bool,
}

impl ReturnValue {
    /// A return value passed back by value.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            caller_owns_return: false,
        }
    }

    /// A freshly allocated return value whose ownership moves to the caller.
    pub fn caller_owned(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            caller_owns_return: true,
        }
    }
}

/// A named method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Native type name, e.g. `const Dune::Pymor::Parameter`.
    pub type_name: String,
    /// Parameter name.
    pub name: String,
}

impl Param {
    /// Create a new parameter.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Hash of the parameter type name.
    pub fn type_hash(&self) -> TypeHash {
        TypeHash::from_name(&self.type_name)
    }
}

/// Registry entry for one exposed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    /// Native method name (e.g. `component_and_return_ptr`).
    pub name: String,
    /// Name exposed to the scripting side, if it differs from `name`.
    pub custom_name: Option<String>,
    /// Return value.
    pub return_value: ReturnValue,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// Qualifiers.
    pub flags: MethodFlags,
    /// Exceptions the native implementation may throw, without duplicates.
    pub throws: Vec<ExceptionHandle>,
    /// Owning class, set when the method is attached to a [`ClassEntry`](super::ClassEntry).
    pub owner: TypeHash,
}

impl MethodEntry {
    /// Create a non-const, non-static method without exceptions.
    pub fn new(name: impl Into<String>, return_value: ReturnValue, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            custom_name: None,
            return_value,
            params,
            flags: MethodFlags::empty(),
            throws: Vec::new(),
            owner: TypeHash::EMPTY,
        }
    }

    // === Builder Methods ===

    /// Mark as const.
    pub fn as_const(mut self) -> Self {
        self.flags |= MethodFlags::CONST;
        self
    }

    /// Mark as static.
    pub fn as_static(mut self) -> Self {
        self.flags |= MethodFlags::STATIC;
        self
    }

    /// Expose the method under a different name.
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    /// Declare exceptions the method may throw.
    ///
    /// Handles already declared are skipped, so aliases resolving to the same
    /// exception collapse into one entry.
    pub fn with_throws(mut self, throws: impl IntoIterator<Item = ExceptionHandle>) -> Self {
        for handle in throws {
            if !self.throws.contains(&handle) {
                self.throws.push(handle);
            }
        }
        self
    }

    // === Query Methods ===

    /// Name visible on the scripting side.
    pub fn exposed_name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.name)
    }

    /// Check if the method is const.
    pub fn is_const(&self) -> bool {
        self.flags.contains(MethodFlags::CONST)
    }

    /// Check if the method is static.
    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    /// Check if the caller owns the returned object.
    pub fn caller_owns_return(&self) -> bool {
        self.return_value.caller_owns_return
    }

    /// Signature hash (owner, native name, parameter types, qualifiers).
    pub fn method_hash(&self) -> TypeHash {
        let params: Vec<TypeHash> = self.params.iter().map(Param::type_hash).collect();
        TypeHash::from_method(
            self.owner,
            &self.name,
            &params,
            self.is_const(),
            self.is_static(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QualifiedName;

    fn exception() -> ExceptionHandle {
        ExceptionHandle::new(QualifiedName::from("Dune::Exception"))
    }

    #[test]
    fn default_method_has_no_qualifiers() {
        let method = MethodEntry::new("linear", ReturnValue::new("bool"), vec![]);
        assert!(!method.is_const());
        assert!(!method.is_static());
        assert!(!method.caller_owns_return());
        assert_eq!(method.exposed_name(), "linear");
    }

    #[test]
    fn builder_sets_flags_and_custom_name() {
        let method = MethodEntry::new(
            "component_and_return_ptr",
            ReturnValue::caller_owned("Component *"),
            vec![Param::new("const int", "qq")],
        )
        .as_const()
        .with_custom_name("component");

        assert!(method.is_const());
        assert!(method.caller_owns_return());
        assert_eq!(method.name, "component_and_return_ptr");
        assert_eq!(method.exposed_name(), "component");
    }

    #[test]
    fn duplicate_throws_collapse() {
        let method = MethodEntry::new("type_this", ReturnValue::new("std::string"), vec![])
            .with_throws([exception(), exception()]);
        assert_eq!(method.throws.len(), 1);
        assert_eq!(method.throws[0], exception());
    }

    #[test]
    fn overloads_hash_differently() {
        let one = MethodEntry::new(
            "apply",
            ReturnValue::new("double"),
            vec![Param::new("const V &", "source")],
        )
        .as_const();
        let two = MethodEntry::new(
            "apply",
            ReturnValue::new("double"),
            vec![
                Param::new("const V &", "source"),
                Param::new("const Dune::Pymor::Parameter", "mu"),
            ],
        )
        .as_const();
        assert_ne!(one.method_hash(), two.method_hash());
    }
}
