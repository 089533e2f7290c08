//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::registry::Registry;
use crate::{Config, Result};
use std::collections::BTreeSet;

/// Class names from `-class`: split on commas, trimmed, blanks dropped, order kept
pub fn parse_class_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|class| !class.is_empty())
        .map(str::to_string)
        .collect()
}

/// State labels from `-preState` / `-postState`, deduplicated
pub fn parse_state_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|state| !state.is_empty())
        .map(str::to_string)
        .collect()
}

/// Registry of the built-in components plus the aliases from configuration
pub fn build_registry(config: &Config) -> Result<Registry> {
    let mut registry = crate::machines::builtin_registry();
    for (alias, target) in &config.aliases {
        registry.alias(alias, target)?;
    }
    tracing::debug!(
        "Registered {} state machines: {:?}",
        registry.len(),
        registry.names().collect::<Vec<_>>()
    );
    Ok(registry)
}

/// Visualize command implementation
pub mod visualize {
    use super::*;
    use crate::{Error, cli::Cli};

    /// Execute the visualize command
    pub fn execute(args: Cli, config: &Config) -> Result<()> {
        let graph_name = args.graph_name.unwrap_or_default();
        let classes = parse_class_list(&args.classes);
        if classes.is_empty() {
            return Err(Error::usage("-class needs at least one non-blank class name"));
        }
        let start_states = parse_state_set(&args.pre_states);
        let post_states = parse_state_set(&args.post_states);
        let format = args.format.unwrap_or(config.visualize.format);

        let registry = build_registry(config)?;

        tracing::info!("Visualizing {} state machine(s): {:?}", classes.len(), classes);
        tracing::debug!(
            "Graph name {:?}, start states {:?}, post states {:?}",
            graph_name,
            start_states,
            post_states
        );

        let graph = crate::visualize::graph_from_classes(
            &registry,
            &graph_name,
            &classes,
            &start_states,
            &post_states,
            &config.visualize.impl_suffix,
        )?;

        let stats = graph.stats();
        tracing::debug!(
            "Built graph with {} states, {} transitions and {} subgraphs",
            stats.total_states,
            stats.total_transitions,
            stats.total_subgraphs
        );

        crate::cli::output::write_graph(&graph, &args.output_file, format)?;
        tracing::info!("Graph written to {:?}", args.output_file);

        Ok(())
    }
}
