//! Built-in state machines
//!
//! Lifecycles of the components a node agent manages. They are registered under
//! their fully-qualified type names, e.g.
//! `state_machine_viz::machines::container::ContainerImpl`.

use crate::registry::Registry;

pub mod application;
pub mod container;
pub mod localized_resource;

pub use application::ApplicationImpl;
pub use container::ContainerImpl;
pub use localized_resource::LocalizedResource;

/// Add every built-in component to `registry`
pub fn register_builtins(registry: &mut Registry) {
    registry
        .register::<ApplicationImpl>()
        .register::<ContainerImpl>()
        .register::<LocalizedResource>();
}

/// Registry holding only the built-in components
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    register_builtins(&mut registry);
    registry
}
