//! Native exception registration.

use dune_pymor_core::BindingsError;
use dune_pymor_registry::Module;
use tracing::debug;

use crate::{ConfigH, ExceptionTable};

/// Key of the base native exception.
pub const EXCEPTION: &str = "Exception";
/// Key declared by methods that may raise a generic Dune error.
pub const DUNE_EXCEPTION: &str = "DuneException";
/// Key declared by methods that may raise a dune-pymor error.
pub const PYMOR_EXCEPTION: &str = "PymorException";

/// Expression turning a caught native exception into its message.
pub const WHAT_MESSAGE: &str = "%(EXC)s.what().c_str()";

/// Register `Dune::Exception` and return the exception table.
///
/// Only `Dune::Exception` is registered; [`DUNE_EXCEPTION`] and
/// [`PYMOR_EXCEPTION`] resolve to the same handle, so methods declaring
/// either catch it.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn inject_exceptions(
    module: &mut Module,
    config: &ConfigH,
) -> Result<ExceptionTable, BindingsError> {
    let exception = module
        .add_cpp_namespace("Dune")
        .add_exception("Exception")
        .message_rvalue(WHAT_MESSAGE)
        .build()?;

    let mut exceptions = ExceptionTable::new();
    for key in [EXCEPTION, DUNE_EXCEPTION, PYMOR_EXCEPTION] {
        exceptions.insert(key, exception.clone());
    }

    debug!(
        module = module.name(),
        exception = %exception,
        config_entries = config.len(),
        "injected exceptions"
    );
    Ok(exceptions)
}
