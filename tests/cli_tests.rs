use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn replay_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, payment, amount, token, gateway").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

#[test]
fn test_authorize_capture_flow() {
    let file = replay_file(&[
        "open, 1, 100, , mock",
        "authorize, 1, , tok-1, ",
        "capture, 1, , , ",
    ]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,100,100,fully-charged,true"));
}

#[test]
fn test_partial_refund_flow() {
    let file = replay_file(&[
        "open, 1, 100, , mock",
        "authorize, 1, , tok-1, ",
        "capture, 1, , , ",
        "refund, 1, 40, , ",
    ]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,100,60,partially-refunded,true"));
}

#[test]
fn test_inactive_payment_rejection() {
    let file = replay_file(&[
        "open, 1, 100, , mock",
        "deactivate, 1, , , ",
        "capture, 1, , , ",
    ]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("This payment is no longer active."))
        .stdout(predicate::str::contains("1,100,0,not-charged,false"));
}

#[test]
fn test_refund_exceeding_captured_is_reported_and_ignored() {
    let file = replay_file(&[
        "open, 1, 100, , mock",
        "authorize, 1, , tok-1, ",
        "capture, 1, , , ",
        "refund, 1, 150, , ",
    ]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    // The invalid refund leaves the captured amount untouched.
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Cannot refund more than captured"))
        .stdout(predicate::str::contains("1,100,100,fully-charged,true"));
}

#[test]
fn test_capture_without_prior_auth_is_reported() {
    let file = replay_file(&["open, 1, 100, , mock", "capture, 1, , , "]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Cannot find successful auth transaction",
        ))
        .stdout(predicate::str::contains("1,100,0,not-charged,true"));
}

#[test]
fn test_void_flow_deactivates_payment() {
    let file = replay_file(&[
        "open, 1, 100, , mock",
        "authorize, 1, , tok-1, ",
        "void, 1, , , ",
    ]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,100,0,not-charged,false"));
}

#[test]
fn test_declined_gateway_fleet_from_config() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[[gateway]]").unwrap();
    writeln!(config, "name = \"mock\"").unwrap();
    writeln!(config, "behavior = \"declined\"").unwrap();

    let file = replay_file(&["open, 1, 100, , mock", "process, 1, , tok-1, "]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path()).arg("--gateways").arg(config.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Card declined"))
        .stdout(predicate::str::contains("1,100,0,not-charged,true"));
}

#[test]
fn test_faulty_gateway_reports_generic_message() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[[gateway]]").unwrap();
    writeln!(config, "name = \"mock\"").unwrap();
    writeln!(config, "behavior = \"fault\"").unwrap();

    let file = replay_file(&["open, 1, 100, , mock", "authorize, 1, , tok-1, "]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path()).arg("--gateways").arg(config.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Oops! Something went wrong."))
        .stdout(predicate::str::contains("1,100,0,not-charged,true"));
}

#[test]
fn test_unknown_gateway_is_configuration_error() {
    let file = replay_file(&["open, 1, 100, , stripe", "authorize, 1, , tok-1, "]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Payment gateway stripe is not configured.",
        ))
        .stdout(predicate::str::contains("1,100,0,not-charged,true"));
}

#[test]
fn test_malformed_rows_are_skipped() {
    let file = replay_file(&[
        "open, 1, 100, , mock",
        "invalid, 1, , , ",
        "authorize, 1, , tok-1, ",
        "capture, 1, , , ",
    ]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading operation"))
        .stdout(predicate::str::contains("1,100,100,fully-charged,true"));
}

#[test]
fn test_operation_on_unknown_payment_is_reported() {
    let file = replay_file(&["authorize, 9, , tok-1, "]);

    let mut cmd = Command::new(cargo_bin!("payflow"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Unknown payment 9"));
}
