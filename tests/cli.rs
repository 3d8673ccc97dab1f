use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn workspace(words: &str) -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), words).unwrap();
    dir
}

fn spellscan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spellscan").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SPELLSCAN_DICTIONARY")
        .arg("--no-color")
        .arg("--dictionary")
        .arg(dir.path().join("words.txt"));
    cmd
}

#[test]
fn reports_mistakes_and_fails() {
    let dir = workspace("world\n");
    fs::write(dir.path().join("page.txt"), "Helo world helo").unwrap();

    spellscan(&dir)
        .arg("page.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Words Scanned: 3"))
        .stdout(predicate::str::contains("helo (2)"))
        .stdout(predicate::str::contains("2 mistakes found in 1 document"));
}

#[test]
fn clean_document_succeeds() {
    let dir = workspace("hello\nworld\n");
    fs::write(dir.path().join("page.txt"), "Hello, world! 2024").unwrap();

    spellscan(&dir)
        .arg("page.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling mistakes found"));
}

#[test]
fn no_fail_keeps_exit_code_zero() {
    let dir = workspace("world\n");
    fs::write(dir.path().join("page.txt"), "wrold").unwrap();

    spellscan(&dir).arg("--no-fail").arg("page.txt").assert().success();
}

#[test]
fn json_output() {
    let dir = workspace("the\nsnake\n");
    fs::write(dir.path().join("page.md"), "# The snake_kase\n\n[teh](http://example.com)").unwrap();

    let output = spellscan(&dir)
        .args(["--format", "json", "--no-fail", "page.md"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &reports[0];
    assert_eq!(report["document"], "page.md");
    assert_eq!(report["total_tokens_scanned"], 3);
    assert_eq!(report["mistakes"]["kase"], 1);
    assert_eq!(report["mistakes"]["teh"], 1);
    assert!(report["mistakes"].get("example").is_none());
}

#[test]
fn json_output_over_several_files_is_one_document() {
    let dir = workspace("fine
");
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("a.txt"), "fine").unwrap();
    fs::write(docs.join("b.txt"), "fien").unwrap();

    let output = spellscan(&dir)
        .args(["--format", "json", "docs"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["mistakes"].as_object().unwrap().is_empty());
    assert_eq!(reports[1]["mistakes"]["fien"], 1);
}

#[test]
fn scans_directories() {
    let dir = workspace("fine\n");
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("a.txt"), "fine").unwrap();
    fs::write(docs.join("b.txt"), "fien").unwrap();

    spellscan(&dir)
        .arg("docs")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("fien (1)"))
        .stdout(predicate::str::contains("1 mistake found in 2 documents"));
}

#[test]
fn missing_dictionary_flags_everything() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("page.txt"), "any words 7").unwrap();

    Command::cargo_bin("spellscan")
        .unwrap()
        .current_dir(dir.path())
        .args(["--no-color", "--dictionary", "absent.txt", "page.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dictionary unavailable"))
        .stdout(predicate::str::contains("any (1)"))
        .stdout(predicate::str::contains("words (1)"));
}

#[test]
fn watch_mode_scans_on_load() {
    let dir = workspace("world\n");
    fs::write(dir.path().join("page.txt"), "Helo world helo").unwrap();

    spellscan(&dir)
        .args(["--watch", "--debounce-ms", "10", "page.txt"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("helo (2)"));
}

#[test]
fn requires_files() {
    let dir = workspace("word\n");
    spellscan(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files specified"));
}
