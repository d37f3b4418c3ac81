use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::process::Command;

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["self-check"], 0, "self-check passed", "stdout")]
#[case(&["run", "--seconds", "1", "--cpm", "3000"], 0, "final reading", "stdout")]
#[case(&["run", "--cpm", "lots"], 2, "invalid value", "stderr")]
#[case(&["count"], 2, "unrecognized subcommand", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let mut cmd = Command::cargo_bin("geiger_cli").unwrap();
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => assert.stdout(predicate::str::contains(needle)),
        _ => assert.stderr(predicate::str::contains(needle)),
    };
}

#[test]
fn self_check_reports_every_device() {
    let mut cmd = Command::cargo_bin("geiger_cli").unwrap();
    cmd.arg("self-check")
        .assert()
        .success()
        .stdout(predicate::str::contains("tube:"))
        .stdout(predicate::str::contains("touch: idle raw 65535, pressed raw 0"))
        .stdout(predicate::str::contains("battery: 4.20V"));
}

#[test]
fn run_with_periodic_flips_still_finishes() {
    // The presser thread holds the pad past the debounce window once per
    // second and must be joined when the run ends.
    let mut cmd = Command::cargo_bin("geiger_cli").unwrap();
    cmd.args(["run", "--seconds", "2", "--flip-every", "1", "--cpm", "3000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("final reading"));
}

#[test]
fn run_honors_the_frame_budget() {
    let mut cmd = Command::cargo_bin("geiger_cli").unwrap();
    cmd.args(["run", "--seconds", "1", "--cpm", "600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("counts in window"));
}
