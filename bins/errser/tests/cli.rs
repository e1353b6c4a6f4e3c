use assert_cmd::Command;
use predicates::prelude::*;

fn errser() -> Command {
    let mut cmd = Command::cargo_bin("errser").unwrap();
    cmd.env_remove("ERRSER_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn convert_reads_stdin() {
    errser()
        .arg("convert")
        .write_stdin(r#"{"name":"RangeError","cause":{"message":"inner"}}"#)
        .assert()
        .success()
        .stdout(concat!(
            r#"{"type":"RangeError","name":"RangeError","#,
            r#""cause":{"message":"inner"}}"#,
            "\n"
        ));
}

#[test]
fn convert_preserves_large_integers() {
    errser()
        .args(["convert", "-"])
        .write_stdin(r#"{"id":18446744073709551615}"#)
        .assert()
        .success()
        .stdout("{\"id\":18446744073709551615}\n");
}

#[test]
fn missing_input_fails_with_error_line() {
    errser()
        .args(["convert", "/nonexistent/input.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: input '/nonexistent/input.json'"));
}

#[test]
fn include_with_exclude_is_rejected() {
    errser()
        .args(["convert", "--include", "axios", "--exclude", "verror"])
        .write_stdin("{}")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot both include and exclude serializers"));
}

#[test]
fn plugins_lists_selected_chain() {
    errser()
        .args(["plugins", "--exclude", "verror"])
        .assert()
        .success()
        .stdout("axios\nbase\n");
}
