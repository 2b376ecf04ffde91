//! Shared vocabulary for the dune-pymor binding descriptors.
//!
//! This crate defines what a module description is made of: identities
//! ([`TypeHash`], [`QualifiedName`]), registry entries ([`ClassEntry`],
//! [`MethodEntry`], [`ExceptionEntry`]) and the errors raised while building
//! them. Storage lives in `dune-pymor-registry`.

mod entries;
mod error;
mod qualified_name;
mod type_hash;

pub use entries::{
    ClassEntry, ClassHandle, ExceptionEntry, ExceptionHandle, MethodEntry, MethodFlags, Param,
    ReturnValue,
};
pub use error::{BindingsError, ConfigurationError, RegistrationError};
pub use qualified_name::QualifiedName;
pub use type_hash::{TypeHash, hash_constants};
