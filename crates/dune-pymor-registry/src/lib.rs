//! Module descriptions for the dune-pymor binding generator.
//!
//! A [`Module`] stores exposed classes and exceptions in a [`NamespaceTree`]
//! and exports them as a [`ModuleManifest`]. Descriptor functions in the
//! `dune-pymor` crate populate it through [`Namespace`] and [`ClassBuilder`].

mod class_builder;
mod manifest;
mod module;
mod namespace_tree;

pub use class_builder::{ClassBuilder, ExceptionBuilder};
pub use manifest::{
    ClassManifest, ExceptionManifest, MethodManifest, ModuleManifest, ParamManifest,
};
pub use module::{Module, Namespace};
pub use namespace_tree::{NamespaceData, NamespaceEdge, NamespaceTree};
