//! Behavioural smoke test for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn cli_without_subcommand_prints_usage() {
    let mut cmd = cargo_bin_cmd!("cloudpayload");
    cmd.assert()
        .failure()
        .stdout("")
        .stderr(contains("Usage"));
}
