//! Build one graph out of the state machines of several components

use crate::registry::{Registry, ResolvedClass};
use crate::state_machine::Graph;
use crate::{Error, Result};
use std::collections::BTreeSet;

/// Default suffix stripped from implementation type names when naming subgraphs
pub const DEFAULT_IMPL_SUFFIX: &str = "Impl";

/// Resolve each class in `classes` and draw its state machine.
///
/// A single class yields its own graph named `graph_name`. Several classes yield a
/// graph named `graph_name` holding one subgraph per class, in the given order. All
/// names are resolved before any graph is built.
pub fn graph_from_classes(
    registry: &Registry,
    graph_name: &str,
    classes: &[String],
    start_states: &BTreeSet<String>,
    post_states: &BTreeSet<String>,
    impl_suffix: &str,
) -> Result<Graph> {
    let resolved = classes
        .iter()
        .map(|class| registry.resolve(class))
        .collect::<Result<Vec<ResolvedClass<'_>>>>()?;

    match resolved.as_slice() {
        [] => Err(Error::usage("at least one class is required")),
        [single] => {
            tracing::debug!("Generating graph for {}", single.name);
            Ok(single
                .factory()
                .generate_state_graph(graph_name, start_states, post_states))
        }
        many => {
            let mut graph = Graph::new(graph_name);
            for class in many {
                let name = subgraph_name(class.simple_name(), impl_suffix);
                tracing::debug!("Generating subgraph {:?} for {}", name, class.name);
                graph.add_subgraph(class.factory().generate_state_graph(
                    &name,
                    start_states,
                    post_states,
                ));
            }
            Ok(graph)
        }
    }
}

/// Subgraph title for a type: its simple name without a trailing `impl_suffix`.
pub fn subgraph_name(simple_name: &str, impl_suffix: &str) -> String {
    if impl_suffix.is_empty() {
        return simple_name.to_string();
    }
    simple_name
        .strip_suffix(impl_suffix)
        .unwrap_or(simple_name)
        .to_string()
}
