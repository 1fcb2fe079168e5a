use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_quote_defaults_to_minimum_period() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["quote", "--catalog", "tests/fixtures/goods.csv", "--good", "laptop"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("good: Laptop"))
        .stdout(predicate::str::contains("period_months: 6"))
        .stdout(predicate::str::contains("monthly_amount: 7500"))
        .stdout(predicate::str::contains("total_monthly_payment: 7510"))
        .stdout(predicate::str::contains("amount_due: 7510"));

    Ok(())
}

#[test]
fn test_cli_quote_rejects_period_out_of_range() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args([
        "quote",
        "--catalog",
        "tests/fixtures/goods.csv",
        "--good",
        "phone",
        "--period",
        "12",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period"));
}

#[test]
fn test_cli_unknown_good() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["quote", "--catalog", "tests/fixtures/goods.csv", "--good", "boat"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_schedule() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["schedule", "--catalog", "tests/fixtures/goods.csv", "--good", "phone"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "period,monthly_amount,service_fee,total_monthly_payment\n",
        ))
        .stdout(predicate::str::contains("3,6000,7,6007"))
        .stdout(predicate::str::contains("6,3000,3,3003"));
}

#[test]
fn test_cli_emergency() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["emergency", "--savings", "12500", "--milestone", "50000"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("emergency_eligible: 250"))
        .stdout(predicate::str::contains("progress_percent: 25"))
        .stdout(predicate::str::contains("requested").not());
}

#[test]
fn test_cli_emergency_request() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["emergency", "--savings", "12500", "--milestone", "50000", "--request"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("requested: 250"))
        .stdout(predicate::str::contains("available_again_at: "))
        .stdout(predicate::str::contains("withdrawn: true"));
}

#[test]
fn test_cli_emergency_huge_savings_caps_progress() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args([
        "emergency",
        "--savings",
        "79228162514264337593543950335",
        "--milestone",
        "0.5",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("progress_percent: 100"));
}

#[test]
fn test_cli_pay_mpesa() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args([
        "pay", "--method", "mpesa", "--amount", "7510", "--phone", "0712345678", "--user",
        "user-1",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("status: pending"))
        .stdout(predicate::str::contains("transaction_id: ws_CO_000001"));
}

#[test]
fn test_cli_pay_requires_sign_in() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["pay", "--method", "mpesa", "--amount", "100", "--phone", "0712345678"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Authentication required"));
}

#[test]
fn test_cli_pay_gateway_rejection() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args([
        "pay",
        "--method",
        "airtel",
        "--amount",
        "100",
        "--phone",
        "0733000111",
        "--user",
        "user-1",
        "--fail",
        "Insufficient balance",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("status: failed"))
        .stdout(predicate::str::contains("error: Insufficient balance"));
}

#[test]
fn test_cli_pay_international_notice() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["pay", "--method", "paystack", "--amount", "100", "--user", "user-1"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("status: selecting"))
        .stdout(predicate::str::contains("integration will be available soon!"));
}

#[test]
fn test_cli_chat_with_context() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args([
        "chat",
        "How much savings do I have?",
        "--context",
        "tests/fixtures/context.json",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("KSh 12,500"))
        .stdout(predicate::str::contains("KSh 84,000"));
}

#[test]
fn test_cli_chat_without_context_falls_back() {
    let mut cmd = Command::new(cargo_bin!("awamu"));
    cmd.args(["chat", "hello there"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0 businesses with 0 products"));
}
