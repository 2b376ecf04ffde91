//! Descriptors for functional implementations in `Dune::Pymor::Functionals`.
//!
//! ```
//! use dune_pymor::{
//!     BindingTraits, ConfigH, TemplateParameters, inject_exceptions,
//!     Module, inject_functional_interfaces, inject_parameters, inject_vector_based,
//! };
//!
//! let config = ConfigH::new();
//! let mut module = Module::new("dunepymor");
//! let exceptions = inject_exceptions(&mut module, &config)?;
//! let mut interfaces = inject_parameters(&mut module, &exceptions, &config)?;
//! inject_functional_interfaces(&mut module, &exceptions, &mut interfaces, &config)?;
//!
//! let traits = BindingTraits::new()
//!     .with("SourceType", "Dune::Stuff::LA::IstlDenseVector< double >")
//!     .with("ScalarType", "double");
//! let class = inject_vector_based(
//!     &mut module,
//!     &exceptions,
//!     &interfaces,
//!     &config,
//!     &traits,
//!     TemplateParameters::from("Dune::Stuff::LA::IstlDenseVector< double >"),
//! )?;
//! assert_eq!(
//!     class.qualified_name(),
//!     "Dune::Pymor::Functionals::VectorBased< Dune::Stuff::LA::IstlDenseVector< double > >"
//! );
//! # Ok::<(), dune_pymor::BindingsError>(())
//! ```

use dune_pymor_core::{
    BindingsError, ClassHandle, ExceptionHandle, MethodEntry, Param, ReturnValue,
};
use dune_pymor_registry::Module;
use tracing::debug;

use crate::exceptions::{DUNE_EXCEPTION, PYMOR_EXCEPTION};
use crate::parameters::{PARAMETRIC, ensure_unregistered};
use crate::traits::{COMPONENT_TYPE, FROZEN_TYPE, SCALAR_TYPE, SOURCE_TYPE};
use crate::{BindingTraits, ConfigH, ExceptionTable, InterfaceTable, TemplateParameters};

/// Qualified name of the dynamic functional interface.
pub const FUNCTIONAL_INTERFACE: &str = "Dune::Pymor::FunctionalInterfaceDynamic";
/// Qualified name of the dynamic affinely decomposed functional interface.
pub const AFFINELY_DECOMPOSED_FUNCTIONAL_INTERFACE: &str =
    "Dune::Pymor::AffinelyDecomposedFunctionalInterfaceDynamic";

/// Namespace functional implementations are registered in.
pub const FUNCTIONALS_NAMESPACE: [&str; 3] = ["Dune", "Pymor", "Functionals"];

const PARAMETER: &str = "const Dune::Pymor::Parameter";

/// Register the abstract functional interfaces in `Dune::Pymor` and add them
/// to `interfaces`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn inject_functional_interfaces(
    module: &mut Module,
    exceptions: &ExceptionTable,
    interfaces: &mut InterfaceTable,
    config: &ConfigH,
) -> Result<(), BindingsError> {
    interfaces.validate()?;
    let parametric = interfaces.require(PARAMETRIC)?;
    ensure_unregistered(
        module,
        &[FUNCTIONAL_INTERFACE, AFFINELY_DECOMPOSED_FUNCTIONAL_INTERFACE],
    )?;

    let functional = module
        .namespace_path(&["Dune", "Pymor"])
        .add_class("FunctionalInterfaceDynamic")
        .abstract_class()
        .base(parametric)
        .build()?;
    let affinely_decomposed = module
        .namespace_path(&["Dune", "Pymor"])
        .add_class("AffinelyDecomposedFunctionalInterfaceDynamic")
        .abstract_class()
        .base(functional.clone())
        .build()?;

    interfaces.register(functional);
    interfaces.register(affinely_decomposed);
    debug!(
        module = module.name(),
        interfaces = interfaces.len(),
        exceptions = exceptions.len(),
        config_entries = config.len(),
        "injected functional interfaces"
    );
    Ok(())
}

/// Arguments of a functional descriptor, validated before the module is
/// touched.
struct Checked<'a> {
    source: &'a str,
    scalar: &'a str,
    template_args: Vec<String>,
    pymor: ExceptionHandle,
    dune: ExceptionHandle,
    bases: [ClassHandle; 2],
}

impl<'a> Checked<'a> {
    fn new(
        exceptions: &ExceptionTable,
        interfaces: &InterfaceTable,
        traits: &'a BindingTraits,
        template_parameters: TemplateParameters,
        interface: &str,
    ) -> Result<Self, BindingsError> {
        interfaces.validate()?;
        traits.validate()?;
        let source = traits.require(SOURCE_TYPE)?;
        let scalar = traits.require(SCALAR_TYPE)?;
        let template_args = template_parameters.into_args()?;
        Ok(Self {
            source,
            scalar,
            template_args,
            pymor: exceptions.require(PYMOR_EXCEPTION)?,
            dune: exceptions.require(DUNE_EXCEPTION)?,
            bases: [interfaces.require(interface)?, interfaces.require(PARAMETRIC)?],
        })
    }

    /// `type_this`, `type_source`, `type_scalar`, `type_frozen`.
    fn type_queries(&self) -> Vec<MethodEntry> {
        ["type_this", "type_source", "type_scalar", "type_frozen"]
            .into_iter()
            .map(|name| {
                MethodEntry::new(name, ReturnValue::new("std::string"), vec![])
                    .as_const()
                    .as_static()
                    .with_throws([self.pymor.clone(), self.dune.clone()])
            })
            .collect()
    }

    /// `apply(source)` and `apply(source, mu)`.
    fn apply_overloads(&self) -> [MethodEntry; 2] {
        let source = || Param::new(format!("const {} &", self.source), "source");
        [
            MethodEntry::new("apply", ReturnValue::new(self.scalar), vec![source()])
                .as_const()
                .with_throws([self.pymor.clone()]),
            MethodEntry::new(
                "apply",
                ReturnValue::new(self.scalar),
                vec![source(), Param::new(PARAMETER, "mu")],
            )
            .as_const()
            .with_throws([self.pymor.clone()]),
        ]
    }
}

/// Register `Dune::Pymor::Functionals::VectorBased` for the given traits.
///
/// Requires the traits `SourceType` and `ScalarType`, the interfaces
/// [`FUNCTIONAL_INTERFACE`] and [`PARAMETRIC`], and the exceptions
/// `PymorException` and `DuneException`. Every check runs before the module
/// is modified.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn inject_vector_based(
    module: &mut Module,
    exceptions: &ExceptionTable,
    interfaces: &InterfaceTable,
    config: &ConfigH,
    traits: &BindingTraits,
    template_parameters: impl Into<TemplateParameters>,
) -> Result<ClassHandle, BindingsError> {
    let checked = Checked::new(
        exceptions,
        interfaces,
        traits,
        template_parameters.into(),
        FUNCTIONAL_INTERFACE,
    )?;

    let mut methods = checked.type_queries();
    methods.push(MethodEntry::new("linear", ReturnValue::new("bool"), vec![]).as_const());
    methods.push(
        MethodEntry::new("dim_source", ReturnValue::new("unsigned int"), vec![]).as_const(),
    );
    methods.extend(checked.apply_overloads());

    let class = module
        .namespace_path(&FUNCTIONALS_NAMESPACE)
        .add_template_class("VectorBased", checked.template_args)
        .bases(checked.bases)
        .methods(methods)
        .build()?;

    debug!(
        class = %class,
        config_entries = config.len(),
        "injected vector based functional"
    );
    Ok(class)
}

/// Register `Dune::Pymor::Functionals::LinearAffinelyDecomposedVectorBased`.
///
/// Requires the traits `SourceType`, `ScalarType`, `ComponentType` and
/// `FrozenType`, the interfaces [`AFFINELY_DECOMPOSED_FUNCTIONAL_INTERFACE`]
/// and [`PARAMETRIC`], and the exceptions `PymorException` and
/// `DuneException`. `component`, `coefficient`, `affine_part` and
/// `freeze_parameter` hand a new object to the caller.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn inject_linear_affinely_decomposed_vector_based(
    module: &mut Module,
    exceptions: &ExceptionTable,
    interfaces: &InterfaceTable,
    config: &ConfigH,
    traits: &BindingTraits,
    template_parameters: impl Into<TemplateParameters>,
) -> Result<ClassHandle, BindingsError> {
    let checked = Checked::new(
        exceptions,
        interfaces,
        traits,
        template_parameters.into(),
        AFFINELY_DECOMPOSED_FUNCTIONAL_INTERFACE,
    )?;
    let component = traits.require(COMPONENT_TYPE)?;
    let frozen = traits.require(FROZEN_TYPE)?;

    let pymor = || [checked.pymor.clone()];
    let qq = || vec![Param::new("const int", "qq")];

    let mut methods = checked.type_queries();
    methods.extend([
        MethodEntry::new("num_components", ReturnValue::new("unsigned int"), vec![])
            .as_const()
            .with_throws(pymor()),
        MethodEntry::new(
            "component_and_return_ptr",
            ReturnValue::caller_owned(format!("{component} *")),
            qq(),
        )
        .with_custom_name("component")
        .as_const()
        .with_throws(pymor()),
        MethodEntry::new(
            "coefficient_and_return_ptr",
            ReturnValue::caller_owned("Dune::Pymor::ParameterFunctional *"),
            qq(),
        )
        .with_custom_name("coefficient")
        .as_const()
        .with_throws(pymor()),
        MethodEntry::new("has_affine_part", ReturnValue::new("bool"), vec![])
            .as_const()
            .with_throws(pymor()),
        MethodEntry::new(
            "affine_part_and_return_ptr",
            ReturnValue::caller_owned(format!("{component} *")),
            vec![],
        )
        .with_custom_name("affine_part")
        .as_const()
        .with_throws(pymor()),
        MethodEntry::new("linear", ReturnValue::new("bool"), vec![])
            .as_const()
            .with_throws(pymor()),
        MethodEntry::new("dim_source", ReturnValue::new("unsigned int"), vec![])
            .as_const()
            .with_throws(pymor()),
    ]);
    methods.extend(checked.apply_overloads());
    methods.push(
        MethodEntry::new(
            "freeze_parameter_and_return_ptr",
            ReturnValue::caller_owned(format!("{frozen} *")),
            vec![Param::new(PARAMETER, "mu")],
        )
        .with_custom_name("freeze_parameter")
        .as_const()
        .with_throws(pymor()),
    );

    let class = module
        .namespace_path(&FUNCTIONALS_NAMESPACE)
        .add_template_class("LinearAffinelyDecomposedVectorBased", checked.template_args)
        .bases(checked.bases)
        .methods(methods)
        .build()?;

    debug!(
        class = %class,
        config_entries = config.len(),
        "injected affinely decomposed functional"
    );
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{inject_exceptions, inject_parameters};
    use dune_pymor_core::ConfigurationError;

    fn setup() -> (Module, ExceptionTable, InterfaceTable) {
        let config = ConfigH::new();
        let mut module = Module::new("m");
        let exceptions = inject_exceptions(&mut module, &config).unwrap();
        let mut interfaces = inject_parameters(&mut module, &exceptions, &config).unwrap();
        inject_functional_interfaces(&mut module, &exceptions, &mut interfaces, &config).unwrap();
        (module, exceptions, interfaces)
    }

    fn traits() -> BindingTraits {
        BindingTraits::new()
            .with(SOURCE_TYPE, "Vector")
            .with(SCALAR_TYPE, "double")
            .with(COMPONENT_TYPE, "Component")
            .with(FROZEN_TYPE, "Frozen")
    }

    #[test]
    fn interfaces_are_abstract_and_chained() {
        let (module, _, interfaces) = setup();
        let functional = interfaces.require(FUNCTIONAL_INTERFACE).unwrap();
        let decomposed = module
            .get_class_by_name(AFFINELY_DECOMPOSED_FUNCTIONAL_INTERFACE)
            .unwrap();
        assert!(decomposed.is_abstract);
        assert!(decomposed.derives_from(&functional));
        assert_eq!(interfaces.len(), 4);
    }

    #[test]
    fn interfaces_need_parametric() {
        let mut module = Module::new("m");
        let exceptions = inject_exceptions(&mut module, &ConfigH::new()).unwrap();
        let err = inject_functional_interfaces(
            &mut module,
            &exceptions,
            &mut InterfaceTable::new(),
            &ConfigH::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindingsError::from(ConfigurationError::MissingInterface(PARAMETRIC.into()))
        );
    }

    #[test]
    fn interfaces_register_all_or_nothing() {
        let config = ConfigH::new();
        let mut module = Module::new("m");
        let exceptions = inject_exceptions(&mut module, &config).unwrap();
        let mut interfaces = inject_parameters(&mut module, &exceptions, &config).unwrap();
        module
            .namespace_path(&["Dune", "Pymor"])
            .add_class("AffinelyDecomposedFunctionalInterfaceDynamic")
            .build()
            .unwrap();
        let before = module.class_count();

        let err =
            inject_functional_interfaces(&mut module, &exceptions, &mut interfaces, &config)
                .unwrap_err();
        assert!(err.is_registration());
        assert_eq!(module.class_count(), before);
        assert!(!module.contains_class(FUNCTIONAL_INTERFACE));
        assert!(interfaces.get(FUNCTIONAL_INTERFACE).is_none());
    }

    #[test]
    fn vector_based_operations() {
        let (mut module, exceptions, interfaces) = setup();
        let handle = inject_vector_based(
            &mut module,
            &exceptions,
            &interfaces,
            &ConfigH::new(),
            &traits(),
            TemplateParameters::None,
        )
        .unwrap();
        assert_eq!(handle.qualified_name(), "Dune::Pymor::Functionals::VectorBased");

        let class = module.get_class_by_handle(&handle).unwrap();
        assert_eq!(class.method_count(), 8);
        assert_eq!(class.bases[0].qualified_name(), FUNCTIONAL_INTERFACE);
        assert_eq!(class.bases[1].qualified_name(), PARAMETRIC);

        let type_this = class.find_method("type_this").unwrap();
        assert!(type_this.is_static() && type_this.is_const());
        // both aliases resolve to Dune::Exception
        assert_eq!(type_this.throws.len(), 1);

        let applies: Vec<_> = class
            .methods
            .iter()
            .filter(|m| m.exposed_name() == "apply")
            .collect();
        assert_eq!(applies.len(), 2);
        assert_eq!(applies[0].params[0].type_name, "const Vector &");
        assert_eq!(applies[1].params[1].name, "mu");
        assert_eq!(applies[1].return_value.type_name, "double");
        assert!(class.methods.iter().all(|m| !m.caller_owns_return()));
    }

    #[test]
    fn decomposed_operations() {
        let (mut module, exceptions, interfaces) = setup();
        let handle = inject_linear_affinely_decomposed_vector_based(
            &mut module,
            &exceptions,
            &interfaces,
            &ConfigH::new(),
            &traits(),
            "Vector",
        )
        .unwrap();
        let class = module.get_class_by_handle(&handle).unwrap();
        assert_eq!(class.name(), "LinearAffinelyDecomposedVectorBased<Vector>");
        assert_eq!(class.method_count(), 14);

        let owned: Vec<_> = class
            .methods
            .iter()
            .filter(|m| m.caller_owns_return())
            .map(|m| m.exposed_name())
            .collect();
        assert_eq!(
            owned,
            vec!["component", "coefficient", "affine_part", "freeze_parameter"]
        );

        let freeze = class.find_method("freeze_parameter").unwrap();
        assert_eq!(freeze.name, "freeze_parameter_and_return_ptr");
        assert_eq!(freeze.return_value.type_name, "Frozen *");
        let component = class.find_method("component").unwrap();
        assert_eq!(component.return_value.type_name, "Component *");
        assert_eq!(component.params[0].type_name, "const int");
    }

    #[test]
    fn decomposed_requires_frozen_type() {
        let (mut module, exceptions, interfaces) = setup();
        let before = module.class_count();
        let traits = BindingTraits::new()
            .with(SOURCE_TYPE, "Vector")
            .with(SCALAR_TYPE, "double")
            .with(COMPONENT_TYPE, "Component");
        let err = inject_linear_affinely_decomposed_vector_based(
            &mut module,
            &exceptions,
            &interfaces,
            &ConfigH::new(),
            &traits,
            TemplateParameters::None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindingsError::from(ConfigurationError::MissingTrait {
                key: FROZEN_TYPE.into()
            })
        );
        assert_eq!(module.class_count(), before);
    }

    #[test]
    fn blank_template_parameter_leaves_module_unchanged() {
        let (mut module, exceptions, interfaces) = setup();
        let before = module.class_count();
        let err = inject_vector_based(
            &mut module,
            &exceptions,
            &interfaces,
            &ConfigH::new(),
            &traits(),
            vec!["Vector", " "],
        )
        .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(module.class_count(), before);
    }
}
