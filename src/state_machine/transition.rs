//! Transition representation

use std::fmt::Debug;

/// Where a transition may lead once its event fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionArc<S> {
    /// Exactly one post state
    Single(S),
    /// The handler picks one of several valid post states at run time
    Multiple(Vec<S>),
}

/// A declared transition between states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub pre_state: S,
    pub event: E,
    pub arc: TransitionArc<S>,
}

impl<S, E> Transition<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn single(pre_state: S, post_state: S, event: E) -> Self {
        Self {
            pre_state,
            event,
            arc: TransitionArc::Single(post_state),
        }
    }

    pub fn multiple(pre_state: S, post_states: Vec<S>, event: E) -> Self {
        Self {
            pre_state,
            event,
            arc: TransitionArc::Multiple(post_states),
        }
    }

    /// All states this transition can end in
    pub fn post_states(&self) -> &[S] {
        match &self.arc {
            TransitionArc::Single(state) => std::slice::from_ref(state),
            TransitionArc::Multiple(states) => states,
        }
    }

    /// Label used for the edge in a rendered graph
    pub fn display_label(&self) -> String {
        label(&self.event)
    }
}

/// Render a state or event the way it appears in graphs and state filters
pub fn label<T: Debug>(value: &T) -> String {
    format!("{:?}", value)
}
