//! End-to-end tests driving the binary on serialized trees.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

/// The tree for `x = 1`, as the upstream parser would hand it over.
const ASSIGN_TREE: &str = r#"
{"kind":{"Module":{"body":[
    {"kind":{"Assign":{
        "targets":[{"kind":{"Name":{"id":"x","ctx":"Store"}}}],
        "value":{"kind":{"Num":{"n":1}}}}}}
]}}}
"#;

/// The tree for `if x:\n\tpass`.
const IF_TREE: &str = r#"
{"kind":{"Module":{"body":[
    {"kind":{"If":{
        "test":{"kind":{"Name":{"id":"x"}}},
        "body":[{"kind":"Pass"}],
        "orelse":[]}}}
]}}}
"#;

#[test]
fn test_regenerates_source_from_tree_file() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.json");
    fs::write(&tree, ASSIGN_TREE).unwrap();

    Command::cargo_bin("pycodegen")
        .unwrap()
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::diff("x = 1\n"));
}

#[test]
fn test_indent_flag_controls_block_indentation() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.json");
    fs::write(&tree, IF_TREE).unwrap();

    Command::cargo_bin("pycodegen")
        .unwrap()
        .arg(&tree)
        .arg("--indent")
        .arg("  ")
        .assert()
        .success()
        .stdout(predicate::str::diff("if x:\n  pass\n"));
}

#[test]
fn test_visualize_writes_dot_file() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.json");
    fs::write(&tree, ASSIGN_TREE).unwrap();
    let out = dir.path().join("graph");

    Command::cargo_bin("pycodegen")
        .unwrap()
        .arg(&tree)
        .arg("--visualize")
        .arg(&out)
        .assert()
        .success();

    let dot = fs::read_to_string(format!("{}.dot", out.display())).unwrap();
    assert!(dot.starts_with("digraph ast {"));
    assert!(dot.contains("label=\"body[0]\""));
    assert!(dot.contains("label=\"Num(n=1)\""));
}

#[test]
fn test_unrenderable_tree_fails_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree.json");
    fs::write(
        &tree,
        r#"{"kind":{"Comprehension":{
            "target":{"kind":{"Name":{"id":"x","ctx":"Store"}}},
            "iter":{"kind":{"Name":{"id":"y"}}},
            "ifs":[]}}}"#,
    )
    .unwrap();

    Command::cargo_bin("pycodegen")
        .unwrap()
        .arg(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported construct"));
}
