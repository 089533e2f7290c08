//! Container lifecycle: localization, launch, kill and cleanup

use crate::registry::StateMachineComponent;
use crate::state_machine::{StateGraphSource, StateMachineFactory};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    New,
    Localizing,
    LocalizationFailed,
    Localized,
    Running,
    ExitedWithSuccess,
    ExitedWithFailure,
    Killing,
    ContainerCleanedUpAfterKill,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    InitContainer,
    ResourceLocalized,
    ResourceFailed,
    ContainerLaunched,
    ContainerExitedWithSuccess,
    ContainerExitedWithFailure,
    KillContainer,
    ContainerKilledOnRequest,
    ContainerResourcesCleanedUp,
    UpdateDiagnosticsMsg,
}

static FACTORY: LazyLock<StateMachineFactory<ContainerState, ContainerEvent>> =
    LazyLock::new(|| {
        use ContainerEvent::*;
        use ContainerState::*;

        StateMachineFactory::new(New)
            .add_multiple_arc(
                New,
                [Localizing, Localized, LocalizationFailed, Done],
                InitContainer,
            )
            .add_transition(New, Done, KillContainer)
            .add_multiple_arc(Localizing, [Localizing, Localized], ResourceLocalized)
            .add_transition(Localizing, LocalizationFailed, ResourceFailed)
            .add_transition(Localizing, Killing, KillContainer)
            .add_transition(LocalizationFailed, Done, ContainerResourcesCleanedUp)
            .add_transition(Localized, Running, ContainerLaunched)
            .add_transition(Localized, ExitedWithFailure, ContainerExitedWithFailure)
            .add_transition(Localized, Killing, KillContainer)
            .add_transition(Running, ExitedWithSuccess, ContainerExitedWithSuccess)
            .add_transition(Running, ExitedWithFailure, ContainerExitedWithFailure)
            .add_transition(Running, Killing, KillContainer)
            .add_transition(ExitedWithSuccess, Done, ContainerResourcesCleanedUp)
            .add_transition(ExitedWithFailure, Done, ContainerResourcesCleanedUp)
            .add_transition(Killing, ContainerCleanedUpAfterKill, ContainerKilledOnRequest)
            .add_transition(Killing, ExitedWithSuccess, ContainerExitedWithSuccess)
            .add_transition(Killing, Killing, ResourceLocalized)
            .add_transition(ContainerCleanedUpAfterKill, Done, ContainerResourcesCleanedUp)
            .add_transitions(Done, Done, [KillContainer, UpdateDiagnosticsMsg])
    });

/// A container allocated to an application on this node
#[derive(Debug, Default)]
pub struct ContainerImpl;

impl StateMachineComponent for ContainerImpl {
    fn state_machine_factory() -> &'static dyn StateGraphSource {
        &*FACTORY
    }
}
