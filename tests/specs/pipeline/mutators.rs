//! Mutator specs
//!
//! Mutators shape the payload each handler receives. A failing mutator skips
//! only its own handler.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn only_check_output_sends_raw_output() {
    let project = Project::with_config(
        r#"
[handler.file]
type = "pipe"
mutator = "only_check_output"
pipe = { command = "cat > {dir}/out.txt" }
"#,
    );

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["file"], "disk 91% full")])
        .passes();

    assert_eq!(project.read("out.txt"), "disk 91% full");
}

#[test]
fn json_mutator_matches_default_payload() {
    let project = Project::with_config(
        r#"
[handler.explicit]
type = "pipe"
mutator = "json"
pipe = { command = "cat > {dir}/explicit.json" }

[handler.implicit]
type = "pipe"
pipe = { command = "cat > {dir}/implicit.json" }
"#,
    );

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["explicit", "implicit"], "x")])
        .passes();

    assert_eq!(project.read("explicit.json"), project.read("implicit.json"));
}

#[test]
fn command_mutator_rewrites_payload() {
    let project = Project::with_config(
        r#"
[mutator.shout]
command = "tr a-z A-Z"
timeout = 5

[handler.file]
type = "pipe"
mutator = "shout"
pipe = { command = "cat > {dir}/out.json" }
"#,
    );

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["file"], "quiet")])
        .passes();

    let out = project.read("out.json");
    assert!(out.contains("\"CHECK\""), "{}", out);
    assert!(out.contains("\"QUIET\""), "{}", out);
}

#[test]
fn failing_mutator_skips_only_its_handler() {
    let project = Project::with_config(
        r#"
[mutator.broken]
command = "exit 1"

[handler.mutated]
type = "pipe"
mutator = "broken"
pipe = { command = "cat > {dir}/mutated.json" }

[handler.plain]
type = "pipe"
pipe = { command = "cat > {dir}/plain.json" }
"#,
    );

    project
        .pipelined()
        .events(&[event("cpu", &["mutated", "plain"])])
        .passes();

    assert!(!project.exists("mutated.json"));
    assert!(project.exists("plain.json"));
}

#[test]
fn undefined_mutator_skips_its_handler() {
    let project = Project::with_config(
        r#"
[handler.mutated]
type = "pipe"
mutator = "missing"
pipe = { command = "cat > {dir}/mutated.json" }

[handler.plain]
type = "pipe"
pipe = { command = "cat > {dir}/plain.json" }
"#,
    );

    project
        .pipelined()
        .events(&[event("cpu", &["mutated", "plain"])])
        .passes();

    assert!(!project.exists("mutated.json"));
    assert!(project.exists("plain.json"));
}
