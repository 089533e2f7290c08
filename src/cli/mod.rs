//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.
//!
//! Flags are written with a single dash (`-class`, `-outputFile`); the GNU double
//! dash form is accepted as well.

use crate::{Config, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Render the state machines of one or more components as a Graphviz diagram
#[derive(Parser, Debug)]
#[command(name = "visualize-state-machine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated type names whose state machines are drawn
    #[arg(
        long = "class",
        value_name = "class[,class[,...]]",
        value_delimiter = ',',
        num_args = 1..,
        required = true
    )]
    pub classes: Vec<String>,

    /// File the graph is written to ("-" for stdout)
    #[arg(long = "outputFile", value_name = "OutputFile")]
    pub output_file: PathBuf,

    /// Title of the graph
    #[arg(long = "graphName", value_name = "GraphName")]
    pub graph_name: Option<String>,

    /// Only draw transitions leaving these states
    #[arg(
        long = "preState",
        value_name = "preState[,preState[,...]]",
        value_delimiter = ',',
        num_args = 1..
    )]
    pub pre_states: Vec<String>,

    /// Only draw transitions entering these states
    #[arg(
        long = "postState",
        value_name = "postState[,postState[,...]]",
        value_delimiter = ',',
        num_args = 1..
    )]
    pub post_states: Vec<String>,

    /// Output format (overrides config)
    #[arg(long, value_enum, value_name = "Format")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(long, value_name = "ConfigFile")]
    pub config: Option<PathBuf>,
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// DOT format (Graphviz)
    #[default]
    Dot,
    /// JSON output
    Json,
}

/// Rewrite single-dash long flags (`-outputFile`) to the form clap parses (`--outputFile`).
///
/// The program name and everything after a bare `--` are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    let longs: Vec<&str> = command
        .get_arguments()
        .filter(|arg| !is_builtin(arg))
        .filter_map(|arg| arg.get_long())
        .collect();

    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(position, arg)| {
            if position == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            if let Some(rest) = text.strip_prefix('-')
                && !rest.starts_with('-')
            {
                let name = rest.split_once('=').map(|(name, _)| name).unwrap_or(rest);
                if longs.contains(&name) {
                    return OsString::from(format!("-{}", text));
                }
            }
            arg
        })
        .collect()
}

/// Parse the process arguments, accepting single-dash long flags
pub fn parse_args<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Cli::try_parse_from(normalize_args(args))
}

/// One-line synopsis of every option, e.g. `<-class <...>>` for required ones and
/// `[-graphName <GraphName>]` for optional ones.
pub fn usage() -> String {
    let command = Cli::command();
    let options: Vec<String> = command
        .get_arguments()
        .filter(|arg| !is_builtin(arg))
        .filter_map(|arg| arg.get_long().map(|long| (arg, long)))
        .map(|(arg, long)| {
            let value = arg
                .get_value_names()
                .and_then(|names| names.first())
                .map(|name| name.to_string())
                .unwrap_or_else(|| arg.get_id().to_string());
            if arg.is_required_set() {
                format!("<-{} <{}>>", long, value)
            } else {
                format!("[-{} <{}>]", long, value)
            }
        })
        .collect();

    format!("Usage: {} {}", command.get_name(), options.join(" "))
}

/// clap's own `--help` and `--version`
fn is_builtin(arg: &clap::Arg) -> bool {
    matches!(arg.get_id().as_str(), "help" | "version")
}

/// Execute the CLI command
pub fn execute(args: Cli, config: &Config) -> Result<()> {
    commands::visualize::execute(args, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = parse_args([
            "visualize-state-machine",
            "-class",
            "a::FooImpl,b::Bar",
            "-outputFile",
            "out.gv",
            "-graphName",
            "Overview",
        ])
        .unwrap();

        assert_eq!(cli.classes, vec!["a::FooImpl", "b::Bar"]);
        assert_eq!(cli.output_file, PathBuf::from("out.gv"));
        assert_eq!(cli.graph_name.as_deref(), Some("Overview"));
        assert!(cli.pre_states.is_empty());
        assert!(cli.post_states.is_empty());
        assert_eq!(cli.format, None);
    }

    #[test]
    fn test_double_dash_and_repeated_values() {
        let cli = parse_args([
            "visualize-state-machine",
            "--class",
            "A",
            "B",
            "--outputFile=out.json",
            "--preState",
            "X,X,Y",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.classes, vec!["A", "B"]);
        assert_eq!(cli.output_file, PathBuf::from("out.json"));
        assert_eq!(cli.pre_states, vec!["X", "X", "Y"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_missing_required_arguments() {
        let err = parse_args(["visualize-state-machine", "-class", "A"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = parse_args(["visualize-state-machine", "-outputFile", "out.gv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_normalize_args() {
        let args = normalize_args([
            "-class",
            "-class",
            "A",
            "-outputFile=x.gv",
            "-h",
            "--",
            "-graphName",
        ]);
        let args: Vec<_> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            vec![
                "-class",
                "--class",
                "A",
                "--outputFile=x.gv",
                "-h",
                "--",
                "-graphName"
            ]
        );
    }

    #[test]
    fn test_usage_marks_required_options() {
        let usage = usage();
        assert!(usage.starts_with("Usage: visualize-state-machine "));
        assert!(usage.contains("<-class <class[,class[,...]]>>"));
        assert!(usage.contains("<-outputFile <OutputFile>>"));
        assert!(usage.contains("[-graphName <GraphName>]"));
        assert!(usage.contains("[-preState <preState[,preState[,...]]>]"));
        assert!(usage.contains("[-postState <postState[,postState[,...]]>]"));
        assert!(!usage.contains("-help"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
