//! Handler set specs
//!
//! Sets expand into their members, nested up to three levels, and every leaf
//! handler runs at most once per event.

use crate::prelude::*;
use crate::prelude::assert_eq;

fn appender(name: &str) -> String {
    format!(
        r#"
[handler.{name}]
type = "pipe"
mutator = "only_check_output"
pipe = {{ command = "cat >> {{dir}}/{name}.txt; echo >> {{dir}}/{name}.txt", timeout = 5 }}
"#
    )
}

#[test]
fn set_delivers_to_each_member() {
    let project = Project::with_config(&format!(
        r#"
[handler.ops]
type = "set"
handlers = ["slack", "pager"]
{}{}"#,
        appender("slack"),
        appender("pager")
    ));

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["ops"], "load 9")])
        .passes();

    assert_eq!(project.read("slack.txt"), "load 9\n");
    assert_eq!(project.read("pager.txt"), "load 9\n");
}

#[test]
fn shared_member_runs_once() {
    let project = Project::with_config(&format!(
        r#"
[handler.ops]
type = "set"
handlers = ["audit", "pager"]

[handler.dev]
type = "set"
handlers = ["audit"]
{}{}"#,
        appender("audit"),
        appender("pager")
    ));

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["ops", "dev", "audit"], "once")])
        .passes();

    assert_eq!(project.read("audit.txt"), "once\n");
}

#[test]
fn three_levels_of_sets_resolve() {
    let project = Project::with_config(&format!(
        r#"
[handler.outer]
type = "set"
handlers = ["inner"]

[handler.inner]
type = "set"
handlers = ["leaf"]
{}"#,
        appender("leaf")
    ));

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["outer"], "deep")])
        .passes();

    assert_eq!(project.read("leaf.txt"), "deep\n");
}

#[test]
fn fourth_level_is_dropped_without_losing_siblings() {
    let project = Project::with_config(&format!(
        r#"
[handler.l1]
type = "set"
handlers = ["l2", "shallow"]

[handler.l2]
type = "set"
handlers = ["l3"]

[handler.l3]
type = "set"
handlers = ["deep"]
{}{}"#,
        appender("deep"),
        appender("shallow")
    ));

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["l1"], "x")])
        .passes();

    assert_eq!(project.read("shallow.txt"), "x\n");
    assert!(!project.exists("deep.txt"));
}

#[test]
fn sibling_sets_share_the_depth_limit() {
    let project = Project::with_config(&format!(
        r#"
[handler.first]
type = "set"
handlers = ["first-inner"]

[handler.first-inner]
type = "set"
handlers = ["a"]

[handler.second]
type = "set"
handlers = ["second-inner"]

[handler.second-inner]
type = "set"
handlers = ["b"]
{}{}"#,
        appender("a"),
        appender("b")
    ));

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["first", "second"], "both")])
        .passes();

    assert_eq!(project.read("a.txt"), "both\n");
    assert_eq!(project.read("b.txt"), "both\n");
}

#[test]
fn set_with_undefined_member_still_delivers() {
    let project = Project::with_config(&format!(
        r#"
[handler.ops]
type = "set"
handlers = ["ghost", "slack"]
{}"#,
        appender("slack")
    ));

    project
        .pipelined()
        .events(&[event_with_output("cpu", &["ops"], "hi")])
        .passes();

    assert_eq!(project.read("slack.txt"), "hi\n");
}
