//! Integration tests for pipekit-cli.
//!
//! Each test builds a throwaway pipeline project (registry file plus
//! component directories) and drives the real binary against it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REMOTE: &str = "https://github.com/pipekit/components.git";

fn pipekit() -> Command {
    Command::cargo_bin("pipekit").unwrap()
}

/// Write a registry file with the standard cascade fixture:
/// sw1 (direct) → m1; m2 shared between sw1 and sw2 (direct).
fn cascade_registry() -> String {
    format!(
        r#"{{
  "{REMOTE}": {{
    "pipekit": {{
      "modules": {{
        "m1": {{"branch": "main", "git_sha": "1111111deadbeef", "installed_by": ["sw1"]}},
        "m2": {{"branch": "main", "git_sha": "2222222deadbeef", "installed_by": ["sw1", "sw2"]}}
      }},
      "subworkflows": {{
        "sw1": {{"branch": "main", "git_sha": "3333333deadbeef", "installed_by": ["direct"]}},
        "sw2": {{"branch": "main", "git_sha": "4444444deadbeef", "installed_by": ["direct"]}}
      }}
    }}
  }}
}}"#
    )
}

fn make_component_dir(project: &Path, section: &str, name: &str) {
    let dir = project.join(section).join("pipekit").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("main.config"), format!("// {name}\n")).unwrap();
}

fn cascade_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("components.json"), cascade_registry()).unwrap();
    for name in ["m1", "m2"] {
        make_component_dir(temp.path(), "modules", name);
    }
    for name in ["sw1", "sw2"] {
        make_component_dir(temp.path(), "subworkflows", name);
    }
    temp
}

#[test]
fn help_flag_shows_subcommands() {
    pipekit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("modules"))
        .stdout(predicate::str::contains("subworkflows"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_flag_matches_cargo() {
    pipekit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn modules_list_shows_installed_modules() {
    let temp = cascade_project();
    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .args(["modules", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("m1"))
        .stdout(predicate::str::contains("m2"));
}

#[test]
fn modules_list_plain_format_is_names_only() {
    let temp = cascade_project();
    pipekit()
        .arg("-d")
        .arg(temp.path())
        .args(["modules", "list", "--format", "list"])
        .assert()
        .success()
        .stdout("m1\nm2\n");
}

#[test]
fn modules_list_json_is_parseable() {
    let temp = cascade_project();
    let assert = pipekit()
        .arg("-d")
        .arg(temp.path())
        .args(["modules", "list", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["name"], "m1");
    assert_eq!(rows[1]["installed_by"][1], "sw2");
}

#[test]
fn subworkflow_removal_cascades_and_keeps_shared_module() {
    let temp = cascade_project();
    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .args(["subworkflows", "remove", "sw1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: sw1, m1"))
        .stdout(predicate::str::contains("Kept (still in use): m2"));

    assert!(!temp.path().join("subworkflows/pipekit/sw1").exists());
    assert!(!temp.path().join("modules/pipekit/m1").exists());
    assert!(temp.path().join("modules/pipekit/m2").exists());

    let registry: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("components.json")).unwrap())
            .unwrap();
    let repo = &registry[REMOTE]["pipekit"];
    assert!(repo["subworkflows"].get("sw1").is_none());
    assert!(repo["modules"].get("m1").is_none());
    assert_eq!(repo["modules"]["m2"]["installed_by"], serde_json::json!(["sw2"]));
}

#[test]
fn direct_module_removal_deletes_files() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("components.json"),
        format!(
            r#"{{"{REMOTE}": {{"pipekit": {{"modules": {{"fastqc": {{"branch": "main", "git_sha": "abcdef0", "installed_by": ["direct"]}}}}, "subworkflows": {{}}}}}}}}"#
        ),
    )
    .unwrap();
    make_component_dir(temp.path(), "modules", "fastqc");

    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .args(["modules", "remove", "fastqc", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: fastqc"));

    assert!(!temp.path().join("modules/pipekit/fastqc").exists());
}

#[test]
fn removing_an_unknown_component_exits_not_found() {
    let temp = TempDir::new().unwrap();
    pipekit()
        .arg("-d")
        .arg(temp.path())
        .args(["modules", "remove", "ghost", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn stale_registry_entry_is_purged_on_remove() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("components.json"),
        format!(
            r#"{{"{REMOTE}": {{"pipekit": {{"modules": {{"fastqc": {{"branch": "main", "git_sha": "abcdef0", "installed_by": ["direct"]}}}}, "subworkflows": {{}}}}}}}}"#
        ),
    )
    .unwrap();
    // no files on disk for fastqc

    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .args(["modules", "remove", "fastqc", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("purged the stale entry"));

    let registry: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("components.json")).unwrap())
            .unwrap();
    assert!(registry.get(REMOTE).is_none());
}

#[test]
fn corrupt_registry_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("components.json"), "{ not json").unwrap();
    make_component_dir(temp.path(), "modules", "fastqc");

    pipekit()
        .arg("-d")
        .arg(temp.path())
        .args(["modules", "remove", "fastqc", "--yes"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn check_reports_divergence_and_fix_purges() {
    let temp = cascade_project();
    // entry-without-files + files-without-entry
    fs::remove_dir_all(temp.path().join("modules/pipekit/m1")).unwrap();
    make_component_dir(temp.path(), "modules", "mystery");

    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .arg("check")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("m1"))
        .stdout(predicate::str::contains("mystery"));

    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .args(["check", "--fix"])
        .assert()
        .success();

    let registry: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("components.json")).unwrap())
            .unwrap();
    assert!(registry[REMOTE]["pipekit"]["modules"].get("m1").is_none());
    // untracked files are reported, never deleted
    assert!(temp.path().join("modules/pipekit/mystery").exists());
}

#[test]
fn check_on_a_clean_project_succeeds() {
    let temp = cascade_project();
    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("in sync"));
}

#[test]
fn quiet_removal_prints_nothing_on_stdout() {
    let temp = cascade_project();
    pipekit()
        .args(["-q", "-d"])
        .arg(temp.path())
        .args(["modules", "remove", "m1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_project_dir_exits_not_found() {
    pipekit()
        .args(["-d", "/definitely/not/a/project"])
        .args(["modules", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn info_shows_record_details() {
    let temp = cascade_project();
    pipekit()
        .args(["--no-color", "-d"])
        .arg(temp.path())
        .args(["modules", "info", "m2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2222222deadbeef"))
        .stdout(predicate::str::contains("sw1, sw2"));
}

#[test]
fn shell_completions_are_generated() {
    pipekit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pipekit"));
}
