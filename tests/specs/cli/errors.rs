//! Startup error specs
//!
//! Invalid invocations and configurations exit non-zero with the reason on
//! stderr, before any event is read.

use crate::prelude::*;

#[test]
fn config_flag_is_required() {
    let output = assert_cmd::Command::new(binary())
        .timeout(WAIT)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--config"));
}

#[test]
fn missing_config_file_fails() {
    let project = Project::empty();

    project
        .pipelined()
        .fails()
        .stderr_has("failed to load")
        .stderr_has("pipelined.toml");
}

#[test]
fn invalid_toml_fails() {
    let project = Project::with_config("[handler.a\n");

    project.pipelined().fails().stderr_has("TOML parse error");
}

#[test]
fn unknown_handler_type_fails() {
    let project = Project::with_config(
        r#"
[handler.hook]
type = "webhook"
"#,
    );

    project.pipelined().fails().stderr_has("webhook");
}

#[test]
fn pipe_handler_without_command_fails() {
    let project = Project::with_config(
        r#"
[handler.a]
type = "pipe"
"#,
    );

    project
        .pipelined()
        .fails()
        .stderr_has("missing required field");
}

#[test]
fn handler_set_cycle_fails() {
    let project = Project::with_config(
        r#"
[handler.a]
type = "set"
handlers = ["b"]

[handler.b]
type = "set"
handlers = ["a"]
"#,
    );

    project.pipelined().fails().stderr_has("handler set cycle");
}

#[test]
fn builtin_mutator_name_is_reserved() {
    let project = Project::with_config(
        r#"
[mutator.json]
command = "cat"
"#,
    );

    project.pipelined().fails().stderr_has("reserved");
}

#[test]
fn zero_workers_is_rejected() {
    let project = Project::with_config("");

    project
        .pipelined()
        .args(&["--workers", "0"])
        .fails()
        .stderr_has("at least 1");
}

#[test]
fn empty_config_runs_and_exits_on_eof() {
    let project = Project::with_config("");

    project
        .pipelined()
        .events(&[event("cpu", &["nowhere"])])
        .passes();
}
