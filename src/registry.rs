//! Type registry
//!
//! Maps type names given on the command line to the state machine factory of that
//! type. Every visualizable component is registered once at startup; lookups of
//! anything else fail with [`Error::UnregisteredType`].

use crate::state_machine::StateGraphSource;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Returns the factory shared by every instance of a component.
pub type FactoryAccessor = fn() -> &'static dyn StateGraphSource;

/// A component whose behaviour is described by a state machine factory.
///
/// Implementors usually keep the factory in a `static LazyLock` so it is built once.
pub trait StateMachineComponent {
    fn state_machine_factory() -> &'static dyn StateGraphSource;
}

/// Lookup table from type name to factory accessor
#[derive(Debug, Default, Clone)]
pub struct Registry {
    types: BTreeMap<String, FactoryAccessor>,
    aliases: BTreeMap<String, String>,
}

/// A successfully resolved type name
#[derive(Clone, Copy)]
pub struct ResolvedClass<'a> {
    pub name: &'a str,
    accessor: FactoryAccessor,
}

impl<'a> ResolvedClass<'a> {
    /// Last path segment of the type name
    pub fn simple_name(&self) -> &'a str {
        simple_name(self.name)
    }

    pub fn factory(&self) -> &'static dyn StateGraphSource {
        (self.accessor)()
    }
}

impl std::fmt::Debug for ResolvedClass<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedClass")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its fully-qualified type name
    pub fn register<T: StateMachineComponent>(&mut self) -> &mut Self {
        self.register_named(std::any::type_name::<T>(), T::state_machine_factory)
    }

    /// Register an accessor under an explicit name, replacing any previous entry
    pub fn register_named(
        &mut self,
        name: impl Into<String>,
        accessor: FactoryAccessor,
    ) -> &mut Self {
        let name = name.into();
        if self.types.insert(name.clone(), accessor).is_some() {
            tracing::debug!("Replaced state machine registration for {}", name);
        }
        self
    }

    /// Make `alias` resolve to the registered type `target`
    pub fn alias(
        &mut self,
        alias: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<&mut Self> {
        let target = target.into();
        if !self.types.contains_key(&target) {
            return Err(Error::UnregisteredType(target));
        }
        self.aliases.insert(alias.into(), target);
        Ok(self)
    }

    pub fn resolve(&self, class_name: &str) -> Result<ResolvedClass<'_>> {
        let target = self
            .aliases
            .get(class_name)
            .map(String::as_str)
            .unwrap_or(class_name);

        self.types
            .get_key_value(target)
            .map(|(name, accessor)| ResolvedClass {
                name,
                accessor: *accessor,
            })
            .ok_or_else(|| Error::UnregisteredType(class_name.to_string()))
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.resolve(class_name).is_ok()
    }

    /// Registered type names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Last segment of a type path, ignoring generic arguments.
///
/// Both `::` and `.` separate segments, so `a::b::Foo`, `a.b.Foo` and `Foo<u8>` all
/// give `Foo`.
pub fn simple_name(class_name: &str) -> &str {
    let base = class_name
        .split_once('<')
        .map(|(base, _)| base)
        .unwrap_or(class_name);
    let base = base.rsplit("::").next().unwrap_or(base);
    base.rsplit('.').next().unwrap_or(base)
}
