//! Registration of the parameter vocabulary (`Dune::Pymor::Parameter*`).

use dune_pymor_core::{
    BindingsError, ExceptionHandle, MethodEntry, Param, RegistrationError, ReturnValue,
};
use dune_pymor_registry::Module;
use tracing::debug;

use crate::exceptions::PYMOR_EXCEPTION;
use crate::{ConfigH, ExceptionTable, InterfaceTable};

/// Qualified name of the parametric base interface.
pub const PARAMETRIC: &str = "Dune::Pymor::Parametric";
/// Qualified name of the parameter functional class.
pub const PARAMETER_FUNCTIONAL: &str = "Dune::Pymor::ParameterFunctional";

const PARAMETER_TYPE: &str = "Dune::Pymor::ParameterType";
const PARAMETER_CLASS: &str = "Dune::Pymor::Parameter";
const PARAMETER: &str = "const Dune::Pymor::Parameter";

/// Fail on the first of `names` that is already registered, so an injector
/// registering several classes either adds all of them or none.
pub(crate) fn ensure_unregistered(
    module: &Module,
    names: &[&str],
) -> Result<(), RegistrationError> {
    match names.iter().find(|name| module.contains_class(name)) {
        Some(name) => Err(RegistrationError::DuplicateType(name.to_string())),
        None => Ok(()),
    }
}

fn key_param() -> Vec<Param> {
    vec![Param::new("const std::string", "key")]
}

/// Accessors shared by `ParameterType` and `Parameter`.
fn dictionary_methods(
    value_type: &str,
    values_type: &str,
    throws: &ExceptionHandle,
) -> Vec<MethodEntry> {
    vec![
        MethodEntry::new("size", ReturnValue::new("unsigned int"), vec![]).as_const(),
        MethodEntry::new("keys", ReturnValue::new("std::vector< std::string >"), vec![]).as_const(),
        MethodEntry::new("values", ReturnValue::new(values_type), vec![]).as_const(),
        MethodEntry::new("hasKey", ReturnValue::new("bool"), key_param()).as_const(),
        MethodEntry::new("get", ReturnValue::new(value_type), key_param())
            .as_const()
            .with_throws([throws.clone()]),
        MethodEntry::new("report", ReturnValue::new("std::string"), vec![]).as_const(),
    ]
}

/// Register `ParameterType`, `Parameter`, `Parametric` and
/// `ParameterFunctional` in `Dune::Pymor`.
///
/// Returns an interface table holding [`PARAMETRIC`] and
/// [`PARAMETER_FUNCTIONAL`].
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn inject_parameters(
    module: &mut Module,
    exceptions: &ExceptionTable,
    config: &ConfigH,
) -> Result<InterfaceTable, BindingsError> {
    let throws = exceptions.require(PYMOR_EXCEPTION)?;
    ensure_unregistered(
        module,
        &[PARAMETER_TYPE, PARAMETER_CLASS, PARAMETRIC, PARAMETER_FUNCTIONAL],
    )?;

    module
        .namespace_path(&["Dune", "Pymor"])
        .add_class("ParameterType")
        .methods(dictionary_methods("int", "std::vector< int >", &throws))
        .build()?;

    module
        .namespace_path(&["Dune", "Pymor"])
        .add_class("Parameter")
        .method(MethodEntry::new("type", ReturnValue::new(PARAMETER_TYPE), vec![]).as_const())
        .methods(dictionary_methods(
            "std::vector< double >",
            "std::vector< std::vector< double > >",
            &throws,
        ))
        .build()?;

    let parametric = module
        .namespace_path(&["Dune", "Pymor"])
        .add_class("Parametric")
        .abstract_class()
        .methods([
            MethodEntry::new("parametric", ReturnValue::new("bool"), vec![]).as_const(),
            MethodEntry::new("parameter_type", ReturnValue::new(PARAMETER_TYPE), vec![]).as_const(),
            MethodEntry::new("num_parameters", ReturnValue::new("unsigned int"), vec![]).as_const(),
        ])
        .build()?;

    let parameter_functional = module
        .namespace_path(&["Dune", "Pymor"])
        .add_class("ParameterFunctional")
        .base(parametric.clone())
        .methods([
            MethodEntry::new("expression", ReturnValue::new("std::string"), vec![]).as_const(),
            MethodEntry::new(
                "evaluate",
                ReturnValue::new("double"),
                vec![Param::new(PARAMETER, "mu")],
            )
            .as_const()
            .with_throws([throws]),
            MethodEntry::new("report", ReturnValue::new("std::string"), vec![]).as_const(),
        ])
        .build()?;

    let interfaces: InterfaceTable = [parametric, parameter_functional].into_iter().collect();
    debug!(
        module = module.name(),
        interfaces = interfaces.len(),
        config_entries = config.len(),
        "injected parameters"
    );
    Ok(interfaces)
}
