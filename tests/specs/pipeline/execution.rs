//! Pipe handler execution specs
//!
//! Events read from stdin reach their pipe handlers; failures of one handler
//! never prevent delivery to the others.

use crate::prelude::*;
use crate::prelude::assert_eq;

const FILE_HANDLER: &str = r#"
[handler.file]
type = "pipe"
pipe = { command = "cat > {dir}/out.json", timeout = 5 }
"#;

#[test]
fn event_reaches_pipe_handler_as_json() {
    let project = Project::with_config(FILE_HANDLER);

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["file"], "load 9")])
        .passes();

    let written: serde_json::Value = serde_json::from_str(&project.read("out.json")).unwrap();
    assert_eq!(written["check"]["name"], "cpu");
    assert_eq!(written["check"]["output"], "load 9");
    assert_eq!(written["entity"]["name"], "web-1");
}

#[test]
fn every_event_is_processed_before_exit() {
    let project = Project::with_config(
        r#"
[pipelined]
workers = 3

[handler.append]
type = "pipe"
mutator = "only_check_output"
pipe = { command = "cat >> {dir}/log.txt; echo >> {dir}/log.txt", timeout = 5 }
"#,
    );
    let events: Vec<String> = (0..10)
        .map(|i| event_with_output(&format!("check-{i}"), &["append"], &format!("line {i}")))
        .collect();

    project.pipelined().events(&events).passes();

    let mut lines: Vec<String> = project.read("log.txt").lines().map(String::from).collect();
    lines.sort();
    let mut expected: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
    expected.sort();
    assert_eq!(lines, expected);
}

#[test]
fn blank_and_malformed_lines_are_skipped() {
    let project = Project::with_config(FILE_HANDLER);
    let input = format!("\n{{not json\n\n{}\n", event("cpu", &["file"]));

    project.pipelined().stdin(&input).passes();

    assert!(project.read("out.json").contains("\"cpu\""));
}

#[test]
fn missing_handler_is_tolerated() {
    let project = Project::with_config(FILE_HANDLER);

    project
        .pipelined()
        .events(&[event("cpu", &["missing", "file"])])
        .passes();

    assert!(project.exists("out.json"));
}

#[test]
fn failing_handler_does_not_block_siblings() {
    let project = Project::with_config(&format!(
        r#"
[handler.broken]
type = "pipe"
pipe = {{ command = "exit 3" }}

[handler.absent]
type = "pipe"
pipe = {{ command = "/nonexistent/notify" }}
{FILE_HANDLER}"#
    ));

    project
        .pipelined()
        .events(&[event("cpu", &["broken", "absent", "file"])])
        .passes();

    assert!(project.exists("out.json"));
}

#[test]
fn slow_handler_is_killed_at_its_timeout() {
    let project = Project::with_config(&format!(
        r#"
[handler.slow]
type = "pipe"
pipe = {{ command = "sleep 30; touch {{dir}}/slow-finished", timeout = 1 }}
{FILE_HANDLER}"#
    ));

    let start = std::time::Instant::now();
    project
        .pipelined()
        .events(&[event("cpu", &["slow", "file"])])
        .passes();

    assert!(start.elapsed() < std::time::Duration::from_secs(8));
    assert!(project.exists("out.json"));
    assert!(!project.exists("slow-finished"));
}

#[test]
fn socket_handler_abandons_the_rest_of_the_event() {
    let project = Project::with_config(
        r#"
[handler.first]
type = "pipe"
pipe = { command = "cat > {dir}/first.json" }

[handler.relay]
type = "tcp"
socket = { host = "127.0.0.1", port = 4000 }

[handler.last]
type = "pipe"
pipe = { command = "cat > {dir}/last.json" }
"#,
    );

    project
        .pipelined()
        .events(&[
            event("cpu", &["first", "relay", "last"]),
            event("disk", &["last"]),
        ])
        .passes();

    assert!(project.exists("first.json"));
    // Only the second event reached `last`
    let last: serde_json::Value = serde_json::from_str(&project.read("last.json")).unwrap();
    assert_eq!(last["check"]["name"], "disk");
}
