//! State machine module - Declare transition tables and render them as graphs

pub mod factory;
pub mod graph;
pub mod transition;

// Re-export key types
pub use factory::{StateGraphSource, StateMachineFactory};
pub use graph::{CombinedEdge, Graph, GraphStats};
pub use transition::{Transition, TransitionArc};
