//! State Machine Visualizer
//!
//! Renders the transition tables of state-machine driven components as Graphviz
//! diagrams.
//!
//! This library provides functionality for:
//! - Declaring transition tables with [`state_machine::StateMachineFactory`]
//! - Registering components by type name in a [`registry::Registry`]
//! - Merging several machines into one graph with a subgraph per component
//! - Writing graphs as DOT or JSON

pub mod cli;
pub mod config;
pub mod error;
pub mod machines;
pub mod registry;
pub mod state_machine;
pub mod visualize;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so graphs written to
/// stdout stay clean.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
