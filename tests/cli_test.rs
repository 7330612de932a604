use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn gateway() -> Command {
    let mut cmd = Command::new(cargo_bin!("payment-gateway"));
    cmd.env_remove("RUST_LOG")
        .env_remove("DB_PATH")
        .env("ARGON2_TIME_COST", "1")
        .env("ARGON2_MEMORY_KIB", "1024")
        .env("ARGON2_PARALLELISM", "1")
        .env("JWT_SECRET_KEY", "cli-test-secret");
    cmd
}

#[test]
fn test_create_organization_prints_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = gateway();
    cmd.args(["create-organization", "--name", "Acme Corp", "--domain", "ACME.com"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"domain\": \"acme.com\""))
        .stdout(predicate::str::contains("\"status\": \"pending\""));

    Ok(())
}

#[test]
fn test_invalid_domain_fails() {
    let mut cmd = gateway();
    cmd.args(["create-organization", "--name", "Acme", "--domain", "not a domain"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("accounts::validation"));
}

#[test]
fn test_create_user_requires_organization() {
    let mut cmd = gateway();
    cmd.args([
        "create-user",
        "--email",
        "admin@acme.com",
        "--password",
        "SecurePass123!",
        "--organization-id",
        "00000000-0000-4000-8000-000000000000",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("accounts::not_found"));
}

#[test]
fn test_missing_subcommand_shows_usage() {
    gateway()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
