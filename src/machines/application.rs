//! Application lifecycle on a node

use crate::registry::StateMachineComponent;
use crate::state_machine::{StateGraphSource, StateMachineFactory};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationState {
    New,
    Initing,
    Running,
    FinishingContainersWait,
    ApplicationResourcesCleaningUp,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationEvent {
    InitApplication,
    InitContainer,
    ApplicationInited,
    FinishApplication,
    ApplicationContainerFinished,
    ApplicationResourcesCleanedUp,
    ApplicationLogHandlingFinished,
    ApplicationLogHandlingFailed,
}

static FACTORY: LazyLock<StateMachineFactory<ApplicationState, ApplicationEvent>> =
    LazyLock::new(|| {
        use ApplicationEvent::*;
        use ApplicationState::*;

        StateMachineFactory::new(New)
            .add_transition(New, Initing, InitApplication)
            .add_transition(New, New, InitContainer)
            .add_transition(Initing, Initing, InitContainer)
            .add_transition(Initing, Running, ApplicationInited)
            .add_multiple_arc(
                Initing,
                [FinishingContainersWait, ApplicationResourcesCleaningUp],
                FinishApplication,
            )
            .add_transitions(
                Running,
                Running,
                [InitContainer, ApplicationContainerFinished],
            )
            .add_multiple_arc(
                Running,
                [FinishingContainersWait, ApplicationResourcesCleaningUp],
                FinishApplication,
            )
            .add_multiple_arc(
                FinishingContainersWait,
                [FinishingContainersWait, ApplicationResourcesCleaningUp],
                ApplicationContainerFinished,
            )
            .add_transition(
                ApplicationResourcesCleaningUp,
                Finished,
                ApplicationResourcesCleanedUp,
            )
            .add_transitions(
                Finished,
                Finished,
                [ApplicationLogHandlingFinished, ApplicationLogHandlingFailed],
            )
    });

/// An application with containers running on this node
#[derive(Debug, Default)]
pub struct ApplicationImpl;

impl StateMachineComponent for ApplicationImpl {
    fn state_machine_factory() -> &'static dyn StateGraphSource {
        &*FACTORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_every_state_is_reachable_in_graph() {
        let graph = FACTORY.generate_state_graph("Application", &BTreeSet::new(), &BTreeSet::new());
        assert_eq!(graph.graph.node_count(), FACTORY.states().len());
        assert_eq!(graph.node_ids()[0], "New");
    }

    #[test]
    fn test_finish_from_running_has_two_outcomes() {
        let start = BTreeSet::from(["Running".to_string()]);
        let graph = FACTORY.generate_state_graph("Application", &start, &BTreeSet::new());
        let dot = graph.to_dot();
        assert!(dot.contains(
            "\"Application.Running\" -> \"Application.FinishingContainersWait\" [ label = \"FinishApplication\" ];"
        ));
        assert!(dot.contains(
            "\"Application.Running\" -> \"Application.ApplicationResourcesCleaningUp\" [ label = \"FinishApplication\" ];"
        ));
    }
}
