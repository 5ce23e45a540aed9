//! Configuration reload specs
//!
//! SIGHUP re-reads the configuration file. A broken file leaves the running
//! definitions untouched.

use crate::prelude::*;
use crate::prelude::assert_eq;

fn file_handler(target: &str) -> String {
    format!(
        r#"
[handler.file]
type = "pipe"
mutator = "only_check_output"
pipe = {{ command = "cat >> {{dir}}/{target}; echo >> {{dir}}/{target}", timeout = 5 }}
"#
    )
}

#[test]
fn sighup_swaps_definitions() {
    let project = Project::with_config(&file_handler("before.txt"));
    let mut daemon = project.start();

    daemon.send(&event_with_output("cpu", &["file"], "one"));
    daemon.wait_for_log_count("executed pipe handler", 1);
    assert_eq!(project.read("before.txt"), "one\n");

    project.write_config(&file_handler("after.txt"));
    daemon.signal("HUP");
    daemon.wait_for_log("configuration reloaded");

    daemon.send(&event_with_output("cpu", &["file"], "two"));
    daemon.wait_for_log_count("executed pipe handler", 2);
    assert_eq!(project.read("after.txt"), "two\n");

    daemon.close_stdin();
    assert!(daemon.wait().success());
    assert_eq!(project.read("before.txt"), "one\n");
}

#[test]
fn failed_reload_keeps_running_definitions() {
    let project = Project::with_config(&file_handler("out.txt"));
    let mut daemon = project.start();

    project.write_config("[handler.file]\ntype = \"webhook\"\n");
    daemon.signal("HUP");
    daemon.wait_for_log("failed to reload configuration");

    daemon.send(&event_with_output("cpu", &["file"], "still here"));
    daemon.close_stdin();

    assert!(daemon.wait().success());
    assert_eq!(project.read("out.txt"), "still here\n");
}

#[test]
fn repeated_reloads_are_each_applied() {
    let project = Project::with_config(&file_handler("first.txt"));
    let daemon = project.start();

    for (round, target) in ["second.txt", "third.txt"].iter().enumerate() {
        project.write_config(&file_handler(target));
        daemon.signal("HUP");
        daemon.wait_for_log_count("configuration reloaded", round + 1);
    }
}
