//! End-to-end tests for the visualize-state-machine binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONTAINER: &str = "state_machine_viz::machines::container::ContainerImpl";
const APPLICATION: &str = "state_machine_viz::machines::application::ApplicationImpl";
const RESOURCE: &str = "state_machine_viz::machines::localized_resource::LocalizedResource";

/// Binary under test, run from an empty directory so no stray config file is picked up
fn visualizer(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("visualize-state-machine").expect("binary should be built");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Argument errors
// ============================================================================

#[test]
fn test_missing_output_file_prints_usage() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args(["-class", CONTAINER])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: visualize-state-machine"))
        .stderr(predicate::str::contains("<-outputFile <OutputFile>>"))
        .stderr(predicate::str::contains("[-graphName <GraphName>]"));
}

#[test]
fn test_missing_class_prints_usage() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args(["-outputFile", "out.gv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<-class <class[,class[,...]]>>"));

    assert!(!dir.path().join("out.gv").exists());
}

#[test]
fn test_no_arguments_fails() {
    let dir = TempDir::new().unwrap();
    visualizer(&dir).assert().code(1);
}

#[test]
fn test_blank_class_list_prints_usage() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args(["-class", " , ", "-outputFile", "out.gv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));

    assert!(!dir.path().join("out.gv").exists());
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("outputFile"));
}

// ============================================================================
// Graph generation
// ============================================================================

#[test]
fn test_two_classes_render_as_subgraphs() {
    let dir = TempDir::new().unwrap();
    let classes = format!("{}, ,{}", CONTAINER, RESOURCE);

    visualizer(&dir)
        .args([
            "-class",
            &classes,
            "-graphName",
            "Overview",
            "-outputFile",
            "out.gv",
        ])
        .assert()
        .success();

    let dot = fs::read_to_string(dir.path().join("out.gv")).unwrap();
    assert!(dot.starts_with("digraph \"Overview\" {"));
    let container = dot.find("subgraph \"cluster_Container\" {").unwrap();
    let resource = dot.find("subgraph \"cluster_LocalizedResource\" {").unwrap();
    assert!(container < resource);
    assert!(dot.contains("\"Container.Running\" -> \"Container.Killing\""));
}

#[test]
fn test_single_class_without_graph_name() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args(["-class", APPLICATION, "-outputFile", "app.gv"])
        .assert()
        .success();

    let dot = fs::read_to_string(dir.path().join("app.gv")).unwrap();
    assert!(dot.starts_with("digraph \"\" {"));
    assert!(!dot.contains("subgraph"));
    assert!(dot.contains("\".New\" -> \".Initing\" [ label = \"InitApplication\" ];"));
}

#[test]
fn test_state_filters() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args([
            "-class",
            CONTAINER,
            "-preState",
            "Running,Running",
            "-postState",
            "Killing",
            "-outputFile",
            "filtered.gv",
        ])
        .assert()
        .success();

    let dot = fs::read_to_string(dir.path().join("filtered.gv")).unwrap();
    assert_eq!(dot.matches(" -> ").count(), 1);
    assert!(dot.contains("\".Running\" -> \".Killing\" [ label = \"KillContainer\" ];"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args([
            "-class",
            RESOURCE,
            "-graphName",
            "Resource",
            "-format",
            "json",
            "-outputFile",
            "resource.json",
        ])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("resource.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["name"], "Resource");
    assert_eq!(json["states"][0], "Init");
}

#[test]
fn test_stdout_output() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args(["-class", RESOURCE, "-outputFile", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"));
}

#[test]
fn test_config_aliases_and_suffix() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("viz.toml");
    fs::write(
        &config,
        format!(
            "[visualize]\nimpl_suffix = \"\"\n\n[aliases]\nContainer = \"{}\"\nApp = \"{}\"\n",
            CONTAINER, APPLICATION
        ),
    )
    .unwrap();

    visualizer(&dir)
        .args([
            "-config",
            config.to_str().unwrap(),
            "-class",
            "Container,App",
            "-outputFile",
            "aliased.gv",
        ])
        .assert()
        .success();

    let dot = fs::read_to_string(dir.path().join("aliased.gv")).unwrap();
    assert!(dot.contains("subgraph \"cluster_ContainerImpl\" {"));
    assert!(dot.contains("subgraph \"cluster_ApplicationImpl\" {"));
}

#[test]
fn test_foreign_config_toml_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[logging]\nlevel = 3\n").unwrap();

    visualizer(&dir)
        .args(["-class", CONTAINER, "-outputFile", "container.gv"])
        .assert()
        .success();

    assert!(dir.path().join("container.gv").exists());
}

#[test]
fn test_local_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("state-machine-viz.toml"),
        format!("[aliases]\nContainer = \"{}\"\n", CONTAINER),
    )
    .unwrap();

    visualizer(&dir)
        .args(["-class", "Container", "-outputFile", "container.gv"])
        .assert()
        .success();

    let dot = fs::read_to_string(dir.path().join("container.gv")).unwrap();
    assert!(dot.contains("InitContainer"));
}

// ============================================================================
// Runtime failures
// ============================================================================

#[test]
fn test_unknown_class_fails_without_output() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args([
            "-class",
            &format!("{},org.example.MissingImpl", CONTAINER),
            "-outputFile",
            "out.gv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No state machine registered for type 'org.example.MissingImpl'",
        ));

    assert!(!dir.path().join("out.gv").exists());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();

    visualizer(&dir)
        .args(["-class", CONTAINER, "-outputFile", "missing/dir/out.gv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
