use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn gateway() -> Command {
    let mut cmd = Command::new(cargo_bin!("payment-gateway"));
    cmd.env_remove("RUST_LOG")
        .env("ARGON2_TIME_COST", "1")
        .env("ARGON2_MEMORY_KIB", "1024")
        .env("ARGON2_PARALLELISM", "1");
    cmd
}

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = gateway();
    cmd.arg("--db-path")
        .arg(dir.path().join("some_db"))
        .args(["create-organization", "--name", "Acme", "--domain", "acme.com"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("falling back to in-memory storage"));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let output = gateway()
        .arg("--db-path")
        .arg(&db_path)
        .args(["create-organization", "--name", "Acme", "--domain", "acme.com"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let org: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = org["id"].as_str().unwrap();

    gateway()
        .arg("--db-path")
        .arg(&db_path)
        .args(["activate-organization", "--id", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"active\""))
        .stderr(predicate::str::contains("falling back").not());

    gateway()
        .arg("--db-path")
        .arg(&db_path)
        .args(["create-organization", "--name", "Again", "--domain", "acme.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("accounts::domain_already_exists"));
}
