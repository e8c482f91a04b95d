use std::net::UdpSocket;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wxgauge"));
    cmd.env_remove("RUST_LOG").env_remove("WXGAUGE_UNITS");
    cmd
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_payloads() -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("fixtures")
        .join("payloads.jsonl")
}

fn decode_stdout(extra: &[&str]) -> Value {
    let assert = cmd()
        .args(extra)
        .arg("decode")
        .arg(sample_payloads())
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_lists_subcommands() {
    cmd().arg("decode").arg("--help").assert().success();
    cmd().arg("listen").arg("--help").assert().success();
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode").and(contains("listen")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.jsonl");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_report_counts() {
    let report = decode_stdout(&[]);
    assert_eq!(report["payloads_total"], 10);
    assert_eq!(report["updated"], 7);
    assert_eq!(report["rejected"], 1);
    assert_eq!(report["ignored"], 2);

    let snapshot = &report["snapshot"];
    assert_eq!(snapshot["units"], "imperial");
    assert_eq!(snapshot["rapid_wind"]["valid"], true);
    assert_eq!(snapshot["rapid_wind"]["data"]["wind_direction"], 128);
    assert_eq!(snapshot["observation_air"]["valid"], false);
    assert_eq!(snapshot["hub_status"]["identity"]["hub_sn"], "HB-00013030");
}

#[test]
fn units_flag_is_reflected_in_snapshot() {
    let report = decode_stdout(&["--units", "metric"]);
    assert_eq!(report["snapshot"]["units"], "metric");
    assert_eq!(report["snapshot"]["rapid_wind"]["units"], "metric");
}

#[test]
fn invalid_units_are_rejected() {
    cmd()
        .arg("--units")
        .arg("kelvin")
        .arg("decode")
        .arg(sample_payloads())
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unknown unit system"));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_payloads())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_payloads())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_payloads())
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let text = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["updated"], 7);
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_payloads())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("payloads.jsonl");
    std::fs::copy(sample_payloads(), &input).expect("copy fixture");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

fn free_udp_port() -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind ephemeral port");
    socket.local_addr().expect("local addr").port()
}

#[test]
fn listen_logs_one_datagram_and_clock_skew() {
    let port = free_udp_port();
    let done = Arc::new(AtomicBool::new(false));

    // The listener binds asynchronously; resend until it has exited.
    let sender = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let socket = UdpSocket::bind("127.0.0.1:0").expect("bind sender");
            let payload = br#"{"type":"rapid_wind","ob":[1588948614,2.3,128]}"#;
            while !done.load(Ordering::Relaxed) {
                let _ = socket.send_to(payload, ("127.0.0.1", port));
                thread::sleep(Duration::from_millis(50));
            }
        })
    };

    let assert = cmd()
        .env("NO_COLOR", "1")
        .args(["--units", "metric", "listen", "--bind", "127.0.0.1"])
        .arg("--port")
        .arg(port.to_string())
        .args(["--count", "1"])
        .timeout(Duration::from_secs(20))
        .assert();
    done.store(true, Ordering::Relaxed);
    sender.join().expect("sender thread");

    assert
        .success()
        .stderr(contains("listening for hub broadcasts"))
        .stderr(contains("rapid wind"))
        .stderr(contains("station clock differs"));
}
