//! Integration tests for the ssqlt binary

use ssqlt_codegen::{compile, CompilationContext};
use ssqlt_core::Project;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const SAMPLE: &str = "tests/fixtures/sample_project";

fn ssqlt_bin() -> String {
    env!("CARGO_BIN_EXE_ssqlt").to_string()
}

/// Run ssqlt and return (stdout, stderr, success)
fn run_ssqlt(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(ssqlt_bin())
        .args(args)
        .output()
        .expect("Failed to run ssqlt");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Copy the sample project into a scratch directory
fn copy_sample() -> TempDir {
    let dir = TempDir::new().unwrap();
    copy_dir(Path::new(SAMPLE), dir.path());
    dir
}

fn copy_dir(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

#[test]
fn test_load_sample_project() {
    let project = Project::load(Path::new(SAMPLE)).unwrap();

    assert_eq!(project.config.name, "sample_project");
    assert_eq!(project.source.creates.len(), 2);
    assert_eq!(project.target.creates.len(), 1);
    assert_eq!(project.source.constraints.len(), 1);
    assert_eq!(project.universal.to_files.len(), 3);
}

#[test]
fn test_compile_sample_project() {
    let project = Project::load(Path::new(SAMPLE)).unwrap();
    let ctx = CompilationContext::from_project(&project).unwrap();
    let doc = compile(&ctx).unwrap();

    assert_eq!(ctx.source.dependency_order, vec!["_person", "_empdep"]);
    assert!(doc.contains("CREATE OR REPLACE FUNCTION transducer.target_insert_fn()"));
    assert!(doc.contains("CREATE OR REPLACE FUNCTION transducer.source_insert_fn()"));
    assert!(doc.contains(
        "   INSERT INTO _person_insert_scratch (ssn, name, dep_name)\n   SELECT ssn, name, dep_name\n   FROM transducer._person_INSERT\n   JOIN transducer._empdep USING (ssn);"
    ));
}

#[test]
fn test_compile_to_stdout() {
    let (stdout, stderr, success) = run_ssqlt(&["compile", "--stdout", "-p", SAMPLE]);
    assert!(success, "compile failed: {stderr}");
    assert!(stdout.starts_with("/***********/\n/* SCHEMAS */\n/***********/"));
    assert!(stdout.contains("CREATE TABLE transducer._loop (loop_start INT NOT NULL);"));

    let (again, _, _) = run_ssqlt(&["compile", "--stdout", "-p", SAMPLE]);
    assert_eq!(stdout, again);
}

#[test]
fn test_compile_writes_default_output() {
    let dir = copy_sample();
    let root = dir.path().to_str().unwrap();
    let (stdout, stderr, success) = run_ssqlt(&["compile", "-p", root]);
    assert!(success, "compile failed: {stderr}");
    assert!(stdout.contains("Compiled 2 source and 1 target tables"));

    let written = std::fs::read_to_string(dir.path().join("build/transducer.sql")).unwrap();
    assert!(written.contains("CREATE TRIGGER target_insert_trigger"));
}

#[test]
fn test_compile_output_override() {
    let dir = copy_sample();
    let out = dir.path().join("out/sync.sql");
    let (_, stderr, success) = run_ssqlt(&[
        "compile",
        "-p",
        dir.path().to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(success, "compile failed: {stderr}");
    assert!(out.exists());
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_order_text() {
    let (stdout, _, success) = run_ssqlt(&["order", "-p", SAMPLE]);
    assert!(success);
    assert_eq!(
        stdout,
        "source:\n  1. transducer._person\n  2. transducer._empdep\ntarget:\n  1. transducer.person\n"
    );
}

#[test]
fn test_order_json() {
    let (stdout, _, success) = run_ssqlt(&["order", "--output", "json", "-p", SAMPLE]);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["source"]["tables"][0], "_person");
    assert_eq!(json["source"]["tables"][1], "_empdep");
    assert_eq!(json["target"]["schema"], "transducer");
}

#[test]
fn test_validate_clean_project() {
    let (stdout, _, success) = run_ssqlt(&["validate", "--summary", "-p", SAMPLE]);
    assert!(success);
    assert!(stdout.contains("Project 'sample_project' is valid"));
    assert!(stdout.contains("source: 2 tables in schema transducer"));
    assert!(stdout.contains("universal: 3 attributes, 3 mappings"));
}

#[test]
fn test_validate_reports_missing_mapping() {
    let dir = copy_sample();
    std::fs::remove_file(dir.path().join("universal/from/transducer.person.sql")).unwrap();
    let (_, stderr, success) = run_ssqlt(&["validate", "-p", dir.path().to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("[J003]"), "{stderr}");
    assert!(stderr.contains("person"), "{stderr}");
}

#[test]
fn test_validate_reports_bad_phase() {
    let dir = copy_sample();
    std::fs::write(
        dir.path()
            .join("source/constraints/transducer._person.fd.2.update.sql"),
        "RETURN NEW;",
    )
    .unwrap();
    let (_, stderr, success) = run_ssqlt(&["validate", "-p", dir.path().to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("update"), "{stderr}");
}

#[test]
fn test_missing_project() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, success) = run_ssqlt(&["compile", "-p", dir.path().to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("Failed to load project"), "{stderr}");
}
