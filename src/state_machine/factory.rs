//! Declarative transition tables
//!
//! A [`StateMachineFactory`] records which event moves a component from one state to
//! another. Components keep one in a `static` and expose it through
//! [`crate::registry::StateMachineComponent`], which is all the visualizer needs to
//! draw the machine.

use crate::state_machine::Graph;
use crate::state_machine::transition::{Transition, label};
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Transition table of a state machine over state type `S` and event type `E`.
///
/// ```
/// use state_machine_viz::state_machine::StateMachineFactory;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Door { Open, Closed }
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Action { Push, Pull }
///
/// let factory = StateMachineFactory::new(Door::Closed)
///     .add_transition(Door::Closed, Door::Open, Action::Push)
///     .add_transition(Door::Open, Door::Closed, Action::Pull);
/// assert_eq!(factory.transition_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StateMachineFactory<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
}

impl<S, E> StateMachineFactory<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// `event` in `pre_state` always leads to `post_state`.
    pub fn add_transition(self, pre_state: S, post_state: S, event: E) -> Self {
        self.insert(Transition::single(pre_state, post_state, event))
    }

    /// Each of `events` in `pre_state` leads to `post_state`.
    pub fn add_transitions(
        mut self,
        pre_state: S,
        post_state: S,
        events: impl IntoIterator<Item = E>,
    ) -> Self {
        for event in events {
            self = self.add_transition(pre_state, post_state, event);
        }
        self
    }

    /// `event` in `pre_state` leads to one of `post_states`, decided when it is handled.
    pub fn add_multiple_arc(
        self,
        pre_state: S,
        post_states: impl IntoIterator<Item = S>,
        event: E,
    ) -> Self {
        let post_states: Vec<S> = post_states.into_iter().collect();
        self.insert(Transition::multiple(pre_state, post_states, event))
    }

    fn insert(mut self, transition: Transition<S, E>) -> Self {
        // A state handles each event at most once; redeclaring replaces the old arc.
        match self
            .transitions
            .iter_mut()
            .find(|t| t.pre_state == transition.pre_state && t.event == transition.event)
        {
            Some(existing) => *existing = transition,
            None => self.transitions.push(transition),
        }
        self
    }

    pub fn initial_state(&self) -> S {
        self.initial_state
    }

    pub fn transitions(&self) -> &[Transition<S, E>] {
        &self.transitions
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Distinct states in declaration order, starting with the initial state
    pub fn states(&self) -> Vec<S> {
        let mut states = vec![self.initial_state];
        for transition in &self.transitions {
            for state in std::iter::once(&transition.pre_state).chain(transition.post_states()) {
                if !states.contains(state) {
                    states.push(*state);
                }
            }
        }
        states
    }

    /// Build a graph of this table named `name`.
    ///
    /// A non-empty `start_states` keeps only transitions leaving one of those states; a
    /// non-empty `post_states` keeps only arcs ending in one of those states.
    pub fn generate_state_graph(
        &self,
        name: &str,
        start_states: &BTreeSet<String>,
        post_states: &BTreeSet<String>,
    ) -> Graph {
        let mut graph = Graph::new(name);

        let initial = label(&self.initial_state);
        if start_states.is_empty() || start_states.contains(&initial) {
            graph.node(&initial);
        }

        for transition in &self.transitions {
            let pre = label(&transition.pre_state);
            if !start_states.is_empty() && !start_states.contains(&pre) {
                continue;
            }
            let event = transition.display_label();
            for post in transition.post_states() {
                let post = label(post);
                if !post_states.is_empty() && !post_states.contains(&post) {
                    continue;
                }
                graph.add_edge(&pre, &post, event.as_str());
            }
        }

        graph
    }
}

/// Anything that can draw its state machine as a [`Graph`].
///
/// Lets the registry hold factories of different state and event types behind one
/// trait object.
pub trait StateGraphSource {
    fn generate_state_graph(
        &self,
        name: &str,
        start_states: &BTreeSet<String>,
        post_states: &BTreeSet<String>,
    ) -> Graph;
}

impl<S, E> StateGraphSource for StateMachineFactory<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    fn generate_state_graph(
        &self,
        name: &str,
        start_states: &BTreeSet<String>,
        post_states: &BTreeSet<String>,
    ) -> Graph {
        StateMachineFactory::generate_state_graph(self, name, start_states, post_states)
    }
}
