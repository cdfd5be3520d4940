//! Drives the binary against a stand-in `lighthouse` script.
//!
//! The script is installed once and every run shares one test: writing an
//! executable while another test thread forks can fail with ETXTBSY.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("lighthouse-gate").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

const SCRIPT: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --output-path=*) out="${arg#--output-path=}" ;;
  esac
done
cat "$FAKE_LIGHTHOUSE_JSON" > "$out.report.json"
printf '<html>fake report</html>' > "$out.report.html"
"#;

fn install(dir: &Path) -> PathBuf {
    let path = dir.join("lighthouse");
    fs::write(&path, SCRIPT).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

const GOOD: &str = r#"{"audits":{"speed-index":{"score":0.9,"title":"Speed Index","description":"d"}}}"#;
const BAD: &str = r#"{"audits":{"speed-index":{"score":0.4,"title":"Speed Index","description":"d"}}}"#;

/// A working directory with a baseline, serving `current` as the next audit.
struct Workspace {
    dir: tempfile::TempDir,
    bin: PathBuf,
}

impl Workspace {
    fn new(bin: &Path) -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            bin: bin.to_path_buf(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn serve(&self, json: &str) {
        fs::write(self.path("current.json"), json).unwrap();
    }

    fn run(&self) -> Command {
        let mut c = cmd();
        c.current_dir(self.dir.path())
            .env("FAKE_LIGHTHOUSE_JSON", self.path("current.json"))
            .args(["--url", "https://example.com", "--lighthouse-bin"])
            .arg(&self.bin);
        c
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }
}

#[test]
fn test_runs_against_fake_lighthouse() {
    let bin_dir = tempfile::tempdir().unwrap();
    let bin = install(bin_dir.path());

    first_run_then_regression(&bin);
    regression_without_debug_never_prompts(&bin);
    debug_prompts_for_ignored_checks(&bin);
    yes_overwrites_snapshot(&bin);
}

fn first_run_then_regression(bin: &Path) {
    let ws = Workspace::new(bin);

    ws.serve(GOOD);
    ws.run()
        .assert()
        .success()
        .stdout(contains("Not snapshot file found"))
        .stdout(contains("Lighthouse audition passed"));
    assert_eq!(ws.read("lighthouse.json"), GOOD);

    ws.run()
        .args(["--variability", "0.07"])
        .assert()
        .success()
        .stdout(contains("1 analyzed scores"))
        .stdout(contains("variability of 7%"));

    ws.serve(BAD);
    ws.run()
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Error on Speed Index (speed-index)"))
        .stdout(contains("Saving report in"));
    assert_eq!(ws.read("lighthouse.json.html"), "<html>fake report</html>");

    ws.run().args(["--variability", "0.6"]).assert().success();
}

fn regression_without_debug_never_prompts(bin: &Path) {
    let ws = Workspace::new(bin);
    fs::write(ws.path("lighthouse.json"), GOOD).unwrap();
    ws.serve(BAD);

    ws.run()
        .write_stdin("y\ny\n")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("(y/N)").not());
    assert!(!ws.path(".lighthouseignore").exists());
    assert_eq!(ws.read("lighthouse.json"), GOOD);
}

fn debug_prompts_for_ignored_checks(bin: &Path) {
    let ws = Workspace::new(bin);
    fs::write(ws.path("lighthouse.json"), GOOD).unwrap();
    ws.serve(BAD);

    // yes to ignoring speed-index, no to the snapshot update
    ws.run()
        .arg("--debug")
        .write_stdin("Y\nn\n")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("(y/N)"));
    assert_eq!(ws.read(".lighthouseignore"), r#"["speed-index"]"#);
    assert_eq!(ws.read("lighthouse.json"), GOOD);

    ws.run()
        .assert()
        .success()
        .stdout(contains("Using ignore file"))
        .stdout(contains("1 ignored scores"));
}

fn yes_overwrites_snapshot(bin: &Path) {
    let ws = Workspace::new(bin);
    fs::write(ws.path("lighthouse.json"), GOOD).unwrap();
    ws.serve(BAD);

    ws.run()
        .arg("--yes")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("(y/N)").not());
    assert_eq!(ws.read("lighthouse.json"), BAD);
    assert_eq!(ws.read(".lighthouseignore"), r#"["speed-index"]"#);
}
