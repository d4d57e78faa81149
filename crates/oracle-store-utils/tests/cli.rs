use assert_cmd::Command;
use predicates::prelude::*;

const VALIDATOR: &str = "seivaloper1qyqszqgpqyqszqgpqyqszqgpqyqszqgppspx2d";
const VALIDATOR_HEX: &str = "0101010101010101010101010101010101010101";
const FEEDER: &str = "sei1qgpqyqszqgpqyqszqgpqyqszqgpqyqszwmkdqt";
const FEEDER_HEX: &str = "0202020202020202020202020202020202020202";

const VOTE_TARGET_KEY: &str = "0675736569";
const VOTE_TARGET_VALUE: &str = "040400000075736569";

fn oracle_store_utils() -> Command {
    let mut cmd = Command::cargo_bin("oracle-store-utils").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("ORACLE_STORE_UTILS_LOG", "off");
    cmd
}

fn decode_pair(key: &str, before: &str, after: &str) -> Command {
    let mut cmd = oracle_store_utils();
    cmd.args(["decode-pair", "--key", key, "--before", before, "--after", after]);
    cmd
}

#[test]
fn miss_counter_is_decoded() {
    decode_pair(
        &format!("0314{VALIDATOR_HEX}"),
        "011700000000000000",
        "011800000000000000",
    )
    .assert()
    .success()
    .stdout("23\n24\n");
}

#[test]
fn exchange_rate_is_decoded() {
    let value = "00d204000000000000000000000000000001000000";
    decode_pair("017561746f6d", value, value)
        .assert()
        .success()
        .stdout("123.4\n123.4\n");
}

#[test]
fn vote_target_is_decoded() {
    decode_pair(VOTE_TARGET_KEY, VOTE_TARGET_VALUE, VOTE_TARGET_VALUE)
        .assert()
        .success()
        .stdout("name: usei\n\nname: usei\n\n");
}

#[test]
fn feeder_delegation_is_rendered_with_configured_prefix() {
    let key = format!("0214{VALIDATOR_HEX}");
    decode_pair(&key, FEEDER_HEX, FEEDER_HEX)
        .assert()
        .success()
        .stdout(format!("{FEEDER}\n{FEEDER}\n"));

    decode_pair(&key, FEEDER_HEX, FEEDER_HEX)
        .env("ORACLE_STORE_UTILS_ACCOUNT_ADDRESS_PREFIX", "astria")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("astria1"));
}

#[test]
fn unrecognized_key_fails() {
    decode_pair("99", "99", "99")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "does not match any known oracle store prefix",
        ));
}

#[test]
fn malformed_value_fails() {
    decode_pair(VOTE_TARGET_KEY, VOTE_TARGET_VALUE, "04")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to decode value of entry B"));
}

#[test]
fn invalid_hex_argument_fails() {
    decode_pair("zz", "00", "00").assert().code(1);
}

#[test]
fn unknown_config_var_is_rejected() {
    decode_pair(VOTE_TARGET_KEY, VOTE_TARGET_VALUE, VOTE_TARGET_VALUE)
        .env("ORACLE_STORE_UTILS_FOOBAR", "baz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed reading config"));
}

#[test]
fn vote_target_is_encoded() {
    oracle_store_utils()
        .args(["encode", "vote-target", "--denom", "usei"])
        .assert()
        .success()
        .stdout(format!(
            "{{\"key\":\"{VOTE_TARGET_KEY}\",\"value\":\"{VOTE_TARGET_VALUE}\"}}\n"
        ));
}

#[test]
fn miss_counter_is_encoded() {
    oracle_store_utils()
        .args([
            "encode",
            "miss-counter",
            "--validator",
            VALIDATOR,
            "--count",
            "23",
        ])
        .assert()
        .success()
        .stdout(format!(
            "{{\"key\":\"0314{VALIDATOR_HEX}\",\"value\":\"011700000000000000\"}}\n"
        ));
}

#[test]
fn encoded_aggregate_vote_decodes_to_its_fields() {
    let output = oracle_store_utils()
        .args([
            "encode",
            "aggregate-vote",
            "--validator",
            VALIDATOR,
            "--exchange-rates",
            "123.4uatom,0.5ueth",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let pair: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let key = pair["key"].as_str().unwrap();
    let value = pair["value"].as_str().unwrap();

    let expected = format!(
        "exchange_rate_tuples:\n- denom: uatom\n  exchange_rate: \"123.4\"\n- denom: ueth\n  \
         exchange_rate: \"0.5\"\nvoter: {VALIDATOR}\n"
    );
    decode_pair(key, value, value)
        .assert()
        .success()
        .stdout(format!("{expected}\n{expected}\n"));
}

#[test]
fn prevote_requires_hash_or_salt() {
    oracle_store_utils()
        .args([
            "encode",
            "aggregate-prevote",
            "--validator",
            VALIDATOR,
            "--submit-block",
            "5",
        ])
        .assert()
        .code(1);
}

#[test]
fn prevote_with_computed_hash_is_decoded() {
    let output = oracle_store_utils()
        .args([
            "encode",
            "aggregate-prevote",
            "--validator",
            VALIDATOR,
            "--salt",
            "salt",
            "--exchange-rates",
            "123.4uatom",
            "--submit-block",
            "5",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let pair: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let key = pair["key"].as_str().unwrap();
    let value = pair["value"].as_str().unwrap();
    decode_pair(key, value, value)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "voter: {VALIDATOR}\nsubmit_block: 5\n"
        )));
}

#[test]
fn simulation_log_decodes_oracle_store() {
    let dir = tempfile::tempdir().unwrap();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    let entries = format!(
        r#"[{{"key":"{VOTE_TARGET_KEY}","value":"{VOTE_TARGET_VALUE}"}},{{"key":"0675","value":""}}]"#
    );
    std::fs::write(&before, &entries).unwrap();
    std::fs::write(&after, &entries).unwrap();

    oracle_store_utils()
        .arg("simulation-log")
        .arg("--before")
        .arg(&before)
        .arg("--after")
        .arg(&after)
        .assert()
        .success()
        .stdout("name: usei\n\nname: usei\n");

    oracle_store_utils()
        .args(["simulation-log", "--store", "bank"])
        .arg("--before")
        .arg(&before)
        .arg("--after")
        .arg(&after)
        .assert()
        .success()
        .stdout("store A 0675736569 => 040400000075736569\nstore B 0675736569 => 040400000075736569\n");
}

#[test]
fn simulation_log_rejects_snapshots_of_different_length() {
    let dir = tempfile::tempdir().unwrap();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    std::fs::write(
        &before,
        format!(r#"[{{"key":"{VOTE_TARGET_KEY}","value":"{VOTE_TARGET_VALUE}"}}]"#),
    )
    .unwrap();
    std::fs::write(&after, "[]").unwrap();

    oracle_store_utils()
        .arg("simulation-log")
        .arg("--before")
        .arg(&before)
        .arg("--after")
        .arg(&after)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("differ in length"));
}
