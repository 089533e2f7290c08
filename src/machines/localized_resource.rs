//! Download lifecycle of a resource shared by containers

use crate::registry::StateMachineComponent;
use crate::state_machine::{StateGraphSource, StateMachineFactory};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Init,
    Downloading,
    Localized,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceEvent {
    Request,
    Recovered,
    Localized,
    LocalizationFailed,
    Release,
}

static FACTORY: LazyLock<StateMachineFactory<ResourceState, ResourceEvent>> =
    LazyLock::new(|| {
        StateMachineFactory::new(ResourceState::Init)
            .add_transition(
                ResourceState::Init,
                ResourceState::Downloading,
                ResourceEvent::Request,
            )
            .add_transition(
                ResourceState::Init,
                ResourceState::Localized,
                ResourceEvent::Recovered,
            )
            .add_transitions(
                ResourceState::Downloading,
                ResourceState::Downloading,
                [ResourceEvent::Request, ResourceEvent::Release],
            )
            .add_transition(
                ResourceState::Downloading,
                ResourceState::Localized,
                ResourceEvent::Localized,
            )
            .add_transition(
                ResourceState::Downloading,
                ResourceState::Failed,
                ResourceEvent::LocalizationFailed,
            )
            .add_transitions(
                ResourceState::Localized,
                ResourceState::Localized,
                [ResourceEvent::Request, ResourceEvent::Release],
            )
            .add_transition(
                ResourceState::Failed,
                ResourceState::Failed,
                ResourceEvent::Release,
            )
    });

/// A file or archive fetched onto the node before containers can use it
#[derive(Debug, Default)]
pub struct LocalizedResource;

impl StateMachineComponent for LocalizedResource {
    fn state_machine_factory() -> &'static dyn StateGraphSource {
        &*FACTORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_resource_graph() {
        let graph = FACTORY.generate_state_graph("Resource", &BTreeSet::new(), &BTreeSet::new());
        assert_eq!(
            graph.node_ids(),
            vec!["Init", "Downloading", "Localized", "Failed"]
        );
        assert_eq!(graph.graph.edge_count(), 9);
    }
}
