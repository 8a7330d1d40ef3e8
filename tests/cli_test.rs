use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

/// Points the face at a socket that does not exist so that runs needing a
/// session always degrade, whatever is installed on the host.
const NO_FORWARDER: &str = "unix:///nonexistent/ndnc-test/nfd.sock";

fn ndnc_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ndnc").unwrap();
    cmd.env_remove("NDN_CLIENT_TRANSPORT").env_remove("RUST_LOG");
    cmd
}

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn test_run_hello() {
    let file = script("print \"hello\"\n");
    ndnc_cmd()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_run_arithmetic_with_unreachable_forwarder() {
    let file = script("let a = 3\nprint a * 2\n");
    ndnc_cmd()
        .arg("run")
        .arg(file.path())
        .arg("--face")
        .arg(NO_FORWARDER)
        .assert()
        .success()
        .stdout("6\n");
}

#[test]
fn test_face_from_environment() {
    let file = script("print interest \"/data/x/\"\n");
    ndnc_cmd()
        .env("NDN_CLIENT_TRANSPORT", NO_FORWARDER)
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout("offline-data:_data_x_\n");
}

#[test]
fn test_invalid_name_exit_code() {
    let file = script("print \"before\"\nprint interest \"/data/ryu\"\nprint \"after\"\n");
    ndnc_cmd()
        .arg("run")
        .arg(file.path())
        .arg("--offline")
        .assert()
        .code(3)
        .stdout("before\n")
        .stderr(predicate::str::contains("Error: invalid interest name `/data/ryu`"));
}

#[test]
fn test_division_by_zero_exit_code() {
    let file = script("print 1 / 0\n");
    ndnc_cmd()
        .arg("run")
        .arg(file.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn test_parse_error() {
    let file = script("print \"ok\"\nprint 1 2\n");
    ndnc_cmd()
        .arg("run")
        .arg(file.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Parse error at line 2, column 9"));
}

#[test]
fn test_missing_script() {
    ndnc_cmd()
        .arg("run")
        .arg("/nonexistent/script.ndn")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read /nonexistent/script.ndn"));
}

#[test]
fn test_config_local_store() {
    let config = script(r#"{ "local_store": { "/data/count/": "41" } }"#);
    let file = script("print interest \"/data/count/\" * 2\n");
    ndnc_cmd()
        .arg("--config")
        .arg(config.path())
        .arg("run")
        .arg(file.path())
        .arg("--offline")
        .assert()
        .success()
        .stdout("82\n");
}

#[test]
fn test_invalid_config() {
    let config = script(r#"{ "local_store": { "/data/count": "41" } }"#);
    let file = script("print 1\n");
    ndnc_cmd()
        .arg("--config")
        .arg(config.path())
        .arg("run")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must end with `/`"));
}

#[test]
fn test_demo_script() {
    ndnc_cmd()
        .arg("run")
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/data/hello.ndn"))
        .arg("--face")
        .arg(NO_FORWARDER)
        .assert()
        .success()
        .stdout("hello\n6\nsuccess\n");
}
