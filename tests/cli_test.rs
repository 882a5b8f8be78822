use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/catalog.csv")
        .arg("tests/fixtures/bookings.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "event,status,total_cost,total_paid,remaining,currency",
        ))
        // Event 1: 60000 + 500*100 + 100000 + 15000 = 225000, fully paid.
        .stdout(predicate::str::contains("1,PENDING,225000,225000,0,INR"))
        // Event 2: 60000 + 500*50 = 85000, 40000 paid.
        .stdout(predicate::str::contains("2,PENDING,85000,40000,45000,INR"));

    Ok(())
}
