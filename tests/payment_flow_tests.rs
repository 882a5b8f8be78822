use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_full_payment_then_overpayment_rejected() {
    let catalog = common::standard_catalog();
    let bookings = common::instructions(&[
        "create, 7, 1, , 100, , 2030-06-01, Reception",
        "package, 7, 1, 1, , , , ",
        "venue, 7, 1, 1, , , , ",
        "vendor, 7, 1, 1, 1, , , ",
        "pay, 7, 1, , , 225000, , UPI",
        // Fully paid; one more rupee must be rejected.
        "pay, 7, 1, , , 1, , UPI",
    ]);

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(catalog.path()).arg(bookings.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,PENDING,225000,225000,0,INR"))
        .stderr(predicate::str::contains("exceeds remaining balance"));
}

#[test]
fn test_non_positive_payment_rejected() {
    let catalog = common::standard_catalog();
    let bookings = common::instructions(&[
        "create, 7, 1, , 100, , 2030-06-01, Reception",
        "venue, 7, 1, 1, , , , ",
        "pay, 7, 1, , , 0, , UPI",
        "pay, 7, 1, , , -50, , UPI",
    ]);

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(catalog.path()).arg(bookings.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,PENDING,100000,0,100000,INR"))
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn test_partial_payments_accumulate() {
    let catalog = common::standard_catalog();
    let bookings = common::instructions(&[
        "create, 7, 1, , 100, , 2030-06-01, Reception",
        "venue, 7, 1, 1, , , , ",
        "pay, 7, 1, , , 30000, , UPI",
        "pay, 7, 1, , , 20000, , Card",
    ]);

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(catalog.path()).arg(bookings.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,PENDING,100000,50000,50000,INR"));
}

#[test]
fn test_payment_by_non_owner_rejected() {
    let catalog = common::standard_catalog();
    let bookings = common::instructions(&[
        "create, 7, 1, , 100, , 2030-06-01, Reception",
        "venue, 7, 1, 1, , , , ",
        // Client 8 does not own event 1.
        "pay, 8, 1, , , 1000, , UPI",
    ]);

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(catalog.path()).arg(bookings.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,PENDING,100000,0,100000,INR"))
        .stderr(predicate::str::contains("permission"));
}

#[test]
fn test_vendor_changes_keep_total_and_balance_in_step() {
    let catalog = common::standard_catalog();
    let bookings = common::instructions(&[
        "create, 7, 1, , 100, , 2030-06-01, Reception",
        "venue, 7, 1, 1, , , , ",
        // Custom price 12000 x 2 overrides the 15000 base price.
        "vendor, 7, 1, 1, 2, 12000, , ",
        "pay, 7, 1, , , 100000, , UPI",
        "unvendor, 7, 1, 1, , , , ",
    ]);

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(catalog.path()).arg(bookings.path());

    // After removal the total drops back to the venue rent, already paid
    // in full; remaining clamps at zero.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,PENDING,100000,100000,0,INR"));
}

#[test]
fn test_unpriced_vendor_contributes_nothing() {
    let catalog = common::standard_catalog();
    let bookings = common::instructions(&[
        "create, 7, 1, , 100, , 2030-06-01, Reception",
        "venue, 7, 1, 1, , , , ",
        "vendor, 7, 1, 2, 3, , , ",
    ]);

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(catalog.path()).arg(bookings.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,PENDING,100000,0,100000,INR"));
}
