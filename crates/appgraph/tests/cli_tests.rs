//! Integration tests for the appgraph CLI binary.

use appgraph::config::REGISTRY_DIR_NAME;
use appgraph::store::jsonl::{APPLICATIONS_FILE, DEPENDENCIES_FILE};
use rstest::{fixture, rstest};
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_appgraph(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_appgraph"))
        .arg("--dir")
        .arg(dir)
        .args(args)
        .env("NO_COLOR", "1")
        .env("APPGRAPH_ASCII", "1")
        .output()
        .expect("Failed to execute appgraph binary")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Registry with `checkout -> payments -> ledger -> payments` and a
/// critical external dependency on `payments`.
#[fixture]
fn registry() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let output = run_appgraph(temp.path(), &["init", "--quiet"]);
    assert!(
        output.status.success(),
        "Failed to initialize registry: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let dir = temp.path().join(REGISTRY_DIR_NAME);
    std::fs::write(
        dir.join(APPLICATIONS_FILE),
        concat!(
            r#"{"id":1,"code":"checkout","name":"checkout","display_name":"Checkout","type":"feature","status":"active"}"#,
            "\n",
            r#"{"id":2,"code":"payments","name":"payments","display_name":"Payments","type":"core","status":"active","category":"finance"}"#,
            "\n",
            r#"{"id":3,"code":"ledger","name":"ledger","display_name":"Ledger","type":"core","status":"development","category":"finance"}"#,
            "\n",
        ),
    )
    .unwrap();
    std::fs::write(
        dir.join(DEPENDENCIES_FILE),
        concat!(
            r#"{"id":1,"consumer_id":1,"provider_id":2,"name":"charge","type":"api","criticality":"critical"}"#,
            "\n",
            r#"{"id":2,"consumer_id":2,"provider_id":3,"name":"record","type":"database","criticality":"high"}"#,
            "\n",
            r#"{"id":3,"consumer_id":3,"provider_id":2,"name":"reconcile","type":"service"}"#,
            "\n",
            r#"{"id":4,"consumer_id":2,"provider_id":null,"name":"stripe","type":"api","criticality":"critical"}"#,
            "\n",
        ),
    )
    .unwrap();
    temp
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_appgraph"))
        .arg("--help")
        .output()
        .expect("Failed to execute appgraph binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["init", "graph", "stats", "tree", "path", "cycles", "critical", "impact"] {
        assert!(stdout.contains(command), "help should list '{command}'");
    }
}

#[rstest]
fn test_init_creates_registry(temp_dir: TempDir) {
    let output = run_appgraph(temp_dir.path(), &["init"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Initialized registry"));
    assert!(temp_dir.path().join(REGISTRY_DIR_NAME).is_dir());
}

#[rstest]
fn test_init_twice_fails(temp_dir: TempDir) {
    assert!(run_appgraph(temp_dir.path(), &["init", "-q"]).status.success());

    let output = run_appgraph(temp_dir.path(), &["init", "-q"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already initialized"));
}

#[rstest]
fn test_query_without_registry_fails(temp_dir: TempDir) {
    let output = run_appgraph(temp_dir.path(), &["stats"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("appgraph init"));
}

#[rstest]
fn test_graph_json(registry: TempDir) {
    let graph = stdout_json(&run_appgraph(registry.path(), &["--json", "graph"]));

    assert_eq!(graph["total_apps"], 3);
    assert_eq!(graph["total_dependencies"], 4);
    assert_eq!(graph["edges"].as_array().unwrap().len(), 3);
    assert_eq!(graph["nodes"][1]["dependencies_count"], 2);
}

#[rstest]
fn test_stats_text(registry: TempDir) {
    let output = run_appgraph(registry.path(), &["stats"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Applications: 3"));
    assert!(stdout.contains("finance: 2"));
}

#[rstest]
fn test_tree_by_code(registry: TempDir) {
    let output = run_appgraph(registry.path(), &["tree", "checkout"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "* checkout (Checkout)\n`-- payments [api, critical]\n    `-- ledger [database, high]\n"
    );
}

#[rstest]
fn test_tree_depth_out_of_range(registry: TempDir) {
    let output = run_appgraph(registry.path(), &["tree", "checkout", "--depth", "11"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("depth must be between 1 and 10"));
}

#[rstest]
fn test_path_json(registry: TempDir) {
    let path = stdout_json(&run_appgraph(registry.path(), &["--json", "path", "checkout", "3"]));

    assert_eq!(path["path"], serde_json::json!(["checkout", "payments", "ledger"]));
    assert_eq!(path["length"], 2);
}

#[rstest]
fn test_unreachable_path_is_null(registry: TempDir) {
    let output = run_appgraph(registry.path(), &["--json", "path", "ledger", "checkout"]);
    let path = stdout_json(&output);
    assert!(path.is_null());
}

#[rstest]
fn test_cycles_json(registry: TempDir) {
    let cycles = stdout_json(&run_appgraph(registry.path(), &["--json", "cycles"]));
    assert_eq!(cycles, serde_json::json!([[2, 3, 2]]));
}

#[rstest]
fn test_critical_json_includes_external(registry: TempDir) {
    let critical = stdout_json(&run_appgraph(registry.path(), &["--json", "critical"]));

    let names: Vec<&str> = critical
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["charge", "stripe"]);
}

#[rstest]
fn test_impact_text(registry: TempDir) {
    let output = run_appgraph(registry.path(), &["impact", "ledger"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ledger affects 2 application(s)"));
}

#[rstest]
fn test_unknown_code_fails(registry: TempDir) {
    let output = run_appgraph(registry.path(), &["impact", "inventory"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("'inventory'"));
}
