use std::fs;

use assert_cmd::Command;
use httpmock::prelude::*;
use rstest::rstest;

const BIN: &str = "magctl";

const ANSWER: &str = r##"{"result":[{"latitude":-24.559818,"longitude":-42.234573,"declination":-21.9,"inclination":-35.1,"totalintensity":23412.5}]}"##;

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-V").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_list_empty() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").assert().failure();
}

#[rstest]
#[case("zones", "31985")]
#[case("models", "WMM")]
fn test_list(#[case] what: &str, #[case] find: &str) {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd.arg("list").arg(what).assert().success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains(find));
}

#[test]
fn test_convert_dms() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .args(["convert", "dms", "24°33'35.3454\"S", "42°14'4.462\"W"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("24.559818° S"));
    assert!(stdout.contains("42.234573° W"));
}

#[test]
fn test_convert_utm() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .args(["convert", "utm", "7395000", "500000", "23"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    assert!(stdout.contains("23.555359° S"));
    assert!(stdout.contains("45.000000° W"));
}

#[rstest]
#[case(&["convert", "utm", "7395000", "500000", "17"])]
#[case(&["convert", "utm", "7395000", "500000", "26"])]
#[case(&["convert", "utm", "12000000", "500000", "23"])]
#[case(&["convert", "utm", "7395000", "1500000", "23"])]
#[case(&["convert", "dms", "24 33 35", "42 14 4 W"])]
#[case(&["convert", "decimal", "-95", "0"])]
fn test_convert_bad(#[case] args: &[&str]) {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(args).assert().failure();
}

#[test]
fn test_missing_config() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", "/nonexistent/magcalc.hcl", "list", "zones"])
        .assert()
        .failure();
}

#[test]
fn test_query_mock() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/calc")
            .query_param("key", "FROMFILE")
            .query_param("startYear", "2024")
            .query_param("startMonth", "3")
            .query_param("startDay", "15")
            .query_param("resultFormat", "json");
        then.status(200)
            .header("content-type", "application/json")
            .body(ANSWER);
    });

    let dir = std::env::temp_dir().join(format!("magctl-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let cfn = dir.join("config.hcl");
    fs::write(&cfn, "version = 1\napi_key = \"FROMFILE\"\n").unwrap();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .env_remove("MAGCALC_API_KEY")
        .arg("-c")
        .arg(&cfn)
        .args(["query", "-d", "2024-03-15", "-e"])
        .arg(server.url("/calc"))
        .args(["dms", "24 33 35.3454 S", "42 14 4.462 W"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();

    m.assert();
    assert!(stdout.contains("Declination: -21.90°"));
    assert!(stdout.contains("Total intensity: 23412.50 nT"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_query_server_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/calc");
        then.status(503).body("down for maintenance");
    });

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd
        .args(["query", "-k", "K", "-d", "2024-03-15", "-e"])
        .arg(server.url("/calc"))
        .args(["decimal", "-24.5", "-42.2"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).to_string();
    assert!(stderr.contains("503"));
}
