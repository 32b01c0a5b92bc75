#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Stand-in samtools: answers a few subcommands the way the real tool does.
const FAKE_SAMTOOLS: &str = r#"
case "$1" in
  idxstats)
    printf 'chr1\t1000\t12\t1\nchrM\t16569\t88\t0\n' ;;
  view)
    shift
    echo "view $*"
    echo "[W::hts_idx_load] index is older than data" >&2 ;;
  flagstat)
    if [ "$#" -eq 1 ]; then
      echo "Usage: samtools flagstat [options] <in.bam>" >&2
      exit 1
    fi
    echo "[main] no such file" >&2
    exit 2 ;;
  *)
    echo "unrecognized command '$1'" >&2
    exit 1 ;;
esac
"#;

fn fake_samtools(dir: &Path) -> PathBuf {
    let path = dir.join("samtools");
    std::fs::write(&path, format!("#!/bin/sh\n{FAKE_SAMTOOLS}")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn htsd(samtools: &Path) -> Command {
    let mut cmd = Command::cargo_bin("htsd").unwrap();
    cmd.arg("--samtools").arg(samtools);
    cmd
}

#[test]
fn run_prints_parsed_json() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    let out = htsd(&bin)
        .args(["run", "samtools", "idxstats", "--", "in.bam"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["kind"], "idx_stats");
    assert_eq!(v["records"][1]["contig"], "chrM");
    assert_eq!(v["records"][0]["mapped"], 12);
}

#[test]
fn run_raw_prints_text() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    htsd(&bin)
        .args(["run", "--raw", "samtools", "idxstats", "--", "in.bam"])
        .assert()
        .success()
        .stdout("chr1\t1000\t12\t1\nchrM\t16569\t88\t0\n");
}

#[test]
fn run_passes_args_and_logs_messages() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    htsd(&bin)
        .args(["run", "samtools", "view", "--", "-c", "-q", "30", "in.bam"])
        .assert()
        .success()
        .stdout("view -c -q 30 in.bam\n")
        .stderr(predicate::str::contains("index is older than data"));
}

#[test]
fn run_failure_exits_with_tool_code() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    htsd(&bin)
        .args(["run", "samtools", "flagstat", "--", "missing.bam"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "samtools returned with error 2: stdout=, stderr=[main] no such file",
        ));
}

#[test]
fn run_writes_json_out() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    let out = dir.path().join("view.json");
    htsd(&bin)
        .args(["run", "--split-lines", "--json-out"])
        .arg(&out)
        .args(["samtools", "view", "--", "in.bam"])
        .assert()
        .success()
        .stdout("");
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v, serde_json::json!(["view in.bam"]));
}

#[test]
fn unknown_subcommand_rejected_unless_unchecked() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    htsd(&bin)
        .args(["run", "samtools", "frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown samtools subcommand 'frobnicate'"));
    htsd(&bin)
        .args(["run", "--unchecked", "samtools", "frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized command 'frobnicate'"));
}

#[test]
fn usage_prints_stderr_of_failing_tool() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    htsd(&bin)
        .args(["usage", "samtools", "flagstat"])
        .assert()
        .success()
        .stdout("Usage: samtools flagstat [options] <in.bam>\n");
}

#[test]
fn missing_tool_is_reported() {
    Command::cargo_bin("htsd")
        .unwrap()
        .args(["--samtools", "/definitely/not/here", "run", "samtools", "idxstats"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("samtools not found at /definitely/not/here"));
}

#[test]
fn list_shows_parsed_subcommands() {
    Command::cargo_bin("htsd")
        .unwrap()
        .args(["list", "bcftools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index\tparsed: -s | --stats"))
        .stdout(predicate::str::contains("samtools").not());
}

#[test]
fn syscheck_reports_paths() {
    let dir = tempfile::tempdir().unwrap();
    let bin = fake_samtools(dir.path());
    let out = htsd(&bin)
        .args(["syscheck"])
        .env("HTS_DISPATCH_BCFTOOLS", "/definitely/not/bcftools")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["executables"]["samtools"]["path"], bin.to_str().unwrap());
    assert_eq!(
        v["executables"]["bcftools"]["path"],
        "/definitely/not/bcftools"
    );
}
