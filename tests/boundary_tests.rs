use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_age_boundary() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Id, FirstName, LastName, Age").unwrap();
    writeln!(file, "1, Lukas, Chan, 18").unwrap();
    writeln!(file, "2, Joel, Chan, 19").unwrap();
    file.flush().unwrap();

    let mut cmd = Command::new(cargo_bin!("cashdesk"));
    cmd.arg("customers").arg("add").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2,Joel,Chan,19"))
        .stdout(predicate::str::contains("Lukas").not());
}

#[test]
fn test_extreme_ids() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Id, FirstName, LastName, Age").unwrap();
    // i32::MAX is the largest id; 0 and negatives are rejected.
    writeln!(file, "2147483647, Carlos, Ronan, 44").unwrap();
    writeln!(file, "0, Sadie, Ronan, 44").unwrap();
    writeln!(file, "-5, Sara, Ronan, 44").unwrap();
    file.flush().unwrap();

    let mut cmd = Command::new(cargo_bin!("cashdesk"));
    cmd.arg("customers").arg("add").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2147483647,Carlos,Ronan,44"))
        .stderr(predicate::str::contains("Id: Id is required.").count(2));
}

#[test]
fn test_negative_payout_rejected() {
    let mut cmd = Command::new(cargo_bin!("cashdesk"));
    cmd.arg("payout").arg("-10");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("payout amount must be between 0"));
}

#[test]
fn test_large_payout() {
    let mut cmd = Command::new(cargo_bin!("cashdesk"));
    cmd.arg("payout").arg("980");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("9 x 100 EUR + 1 x 50 EUR + 3 x 10 EUR"))
        .stdout(predicate::str::contains("98 x 10 EUR"));
}

#[test]
fn test_payout_above_maximum_rejected() {
    let mut cmd = Command::new(cargo_bin!("cashdesk"));
    cmd.arg("payout").arg("10000000");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("payout amount must be between 0 and 10000"))
        .stderr(predicate::str::contains("overflowed").not());
}
