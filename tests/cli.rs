use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    /// Command isolated from any ambient config or key.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("numinfo").expect("numinfo binary");
        cmd.current_dir(self.tmp.path())
            .env_remove("API_KEY")
            .env_remove("NUMINFO_BASE_URL")
            .env_remove("NUMINFO_TIMEOUT")
            .env("RUST_LOG", "error")
            .args(["--config", "missing.toml"]);
        cmd
    }
}

#[test]
fn empty_term_is_rejected() {
    let env = TestEnv::new();
    env.cmd()
        .args(["lookup", "", "--mock"])
        .assert()
        .failure()
        .stderr(contains("Please enter a search term"));
}

#[test]
fn live_lookup_without_key_is_rejected() {
    let env = TestEnv::new();
    env.cmd()
        .args(["lookup", "12345"])
        .assert()
        .failure()
        .stderr(contains("API_KEY"));
}

#[test]
fn mock_lookup_prints_summary() {
    let env = TestEnv::new();
    env.cmd()
        .args(["lookup", "9876543210", "--mock"])
        .assert()
        .success()
        .stdout(contains("API Response Status: 200"))
        .stdout(contains("Mobile: 9876543210"))
        .stdout(contains("[RAW JSON]"));
}

#[test]
fn mock_lookup_is_stable_across_runs() {
    let env = TestEnv::new();
    let run = || {
        let out = env
            .cmd()
            .args(["lookup", "F", "--mock", "--json"])
            .output()
            .expect("run numinfo");
        assert!(out.status.success());
        let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
        parsed["data"].clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn json_output_contains_mapping() {
    let env = TestEnv::new();
    env.cmd()
        .args(["lookup", "555", "--mock", "--json"])
        .assert()
        .success()
        .stdout(contains("\"mapped\""))
        .stdout(contains("\"status_code\": 200"));
}

#[test]
fn export_writes_csv_file() {
    let env = TestEnv::new();
    env.cmd()
        .args(["lookup", "555", "--mock", "--export-dir", "out"])
        .assert()
        .success()
        .stdout(contains("[EXPORT] Wrote 1 row(s)"));

    let csv = std::fs::read_to_string(env.tmp.path().join("out/numinfo_555.csv")).expect("csv");
    assert!(csv.starts_with("name,"));
    assert!(csv.contains("555"));
}

#[test]
fn unreachable_api_is_reported_not_fatal() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "lookup",
            "1",
            "--key",
            "k",
            "--base-url",
            "http://127.0.0.1:9/",
            "--timeout",
            "2",
        ])
        .assert()
        .success()
        .stdout(contains("API Response Status: N/A"))
        .stdout(contains("Error:"));
}

#[test]
fn validate_defaults() {
    let env = TestEnv::new();
    env.cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(contains("Config OK"));
}

#[test]
fn info_masks_key() {
    let env = TestEnv::new();
    env.cmd()
        .env("API_KEY", "supersecretkey")
        .arg("info")
        .assert()
        .success()
        .stdout(contains("secretkey").not())
        .stdout(contains("tkey"));
}
