use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn setup_project() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path().join("app");

    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/lib.rs"), "pub fn answer() -> u32 { 42 }\n").unwrap();
    fs::create_dir_all(root.join("dist")).unwrap();
    fs::write(root.join("dist/bundle.js"), "minified").unwrap();
    fs::write(root.join(".gitignore"), "*.tmp\n").unwrap();
    fs::write(root.join("scratch.tmp"), "scratch").unwrap();
    fs::write(root.join("package-lock.json"), "{}").unwrap();

    dir
}

fn bin() -> Command {
    Command::cargo_bin("copy-for-ai").unwrap()
}

#[test]
fn test_dump_to_stdout() {
    let dir = setup_project();
    let root = dir.path().join("app");

    bin()
        .arg("--stdout")
        .arg("--quiet")
        .arg("--workspace")
        .arg(&root)
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "================\nFile: src/lib.rs\n================\n\npub fn answer() -> u32 { 42 }\n\n\n\n",
        ))
        .stdout(predicate::str::contains("bundle.js").not())
        .stdout(predicate::str::contains("scratch").not())
        .stdout(predicate::str::contains("package-lock.json").not());
}

#[test]
fn test_tree_to_stdout() {
    let dir = setup_project();
    let root = dir.path().join("app");

    bin()
        .args(["--tree", "--stdout", "--quiet", "--workspace"])
        .arg(&root)
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Directory tree for:\napp\n├── src\n│   └── lib.rs\n"))
        .stdout(predicate::str::contains("└── package-lock.json\n"))
        .stdout(predicate::str::contains("dist").not());
}

#[test]
fn test_output_file_and_report() {
    let dir = setup_project();
    let root = dir.path().join("app");
    let out = dir.path().join("payload.txt");

    bin()
        .arg("-o")
        .arg(&out)
        .arg("--workspace")
        .arg(&root)
        .arg(root.join("src/lib.rs"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Copied 1 files to"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("================\nFile: src/lib.rs\n"));
}

#[test]
fn test_max_size_flag() {
    let dir = setup_project();
    let root = dir.path().join("app");

    bin()
        .args(["--stdout", "--quiet", "--max-size", "10", "--workspace"])
        .arg(&root)
        .arg(root.join("src/lib.rs"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "File: src/lib.rs (SKIPPED - SIZE 0.03KB) ---",
        ));
}

#[test]
fn test_no_selection_fails() {
    bin()
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No resources selected."));
}

#[test]
fn test_missing_path_fails() {
    let dir = tempdir().unwrap();

    bin()
        .arg("--stdout")
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_generate_completions() {
    bin()
        .args(["--generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copy-for-ai"));
}
