//! Daemon lifecycle specs
//!
//! End of input drains queued events; SIGTERM and SIGINT stop at once,
//! killing handlers still running.

use crate::prelude::*;
use crate::prelude::assert_eq;

const SLOW_HANDLER: &str = r#"
[handler.slow]
type = "pipe"
pipe = { command = "touch {dir}/started; sleep 30; touch {dir}/finished" }
"#;

#[test]
fn end_of_input_drains_and_exits_cleanly() {
    let project = Project::with_config(
        r#"
[handler.file]
type = "pipe"
mutator = "only_check_output"
pipe = { command = "sleep 1; cat > {dir}/out.txt", timeout = 5 }
"#,
    );
    let mut daemon = project.start();

    daemon.send(&event_with_output("cpu", &["file"], "drained"));
    daemon.close_stdin();

    assert!(daemon.wait().success());
    assert_eq!(project.read("out.txt"), "drained");
    assert!(daemon.log().contains("end of input, draining"));
}

#[test]
fn sigterm_kills_in_flight_handlers() {
    let project = Project::with_config(SLOW_HANDLER);
    let mut daemon = project.start();

    daemon.send(&event("cpu", &["slow"]));
    wait_for("handler to start", || project.exists("started"));
    daemon.signal("TERM");

    assert!(daemon.wait().success());
    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(!project.exists("finished"));
    assert!(daemon.log().contains("Received SIGTERM"));
}

#[test]
fn sigint_stops_the_daemon() {
    let project = Project::with_config(SLOW_HANDLER);
    let mut daemon = project.start();

    daemon.send(&event("cpu", &["slow"]));
    wait_for("handler to start", || project.exists("started"));
    daemon.signal("INT");

    assert!(daemon.wait().success());
    assert!(!project.exists("finished"));
}

#[test]
fn log_file_records_handler_results() {
    let project = Project::with_config(
        r#"
[handler.noisy]
type = "pipe"
pipe = { command = "echo delivered; exit 4" }
"#,
    );
    let mut daemon = project.start();

    daemon.send(&event("cpu", &["noisy"]));
    daemon.close_stdin();
    assert!(daemon.wait().success());

    let log = daemon.log();
    assert!(log.contains("pipe handler exited with non-zero status"), "{}", log);
    assert!(log.contains("status=4"), "{}", log);
    assert!(log.contains("handler=noisy"), "{}", log);
}
