//! Registry entry types.
//!
//! - [`ClassEntry`] - an exposed native class (plain or template instance)
//! - [`MethodEntry`] - one exposed operation of a class
//! - [`ExceptionEntry`] - an exposed native exception type
//!
//! Supporting types:
//! - [`ClassHandle`], [`ExceptionHandle`] - lightweight references handed back
//!   by registration and stored in descriptor tables
//! - [`ReturnValue`], [`Param`], [`MethodFlags`] - method signature parts

mod class;
mod exception;
mod handle;
mod method;

pub use class::ClassEntry;
pub use exception::ExceptionEntry;
pub use handle::{ClassHandle, ExceptionHandle};
pub use method::{MethodEntry, MethodFlags, Param, ReturnValue};
