//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_options() {
    let project = Project::empty();

    project
        .pipelined()
        .args(&["--help"])
        .passes()
        .stdout_has("--config")
        .stdout_has("--workers")
        .stdout_has("--log-file");
}

#[test]
fn version_is_reported() {
    let project = Project::empty();

    project
        .pipelined()
        .args(&["--version"])
        .passes()
        .stdout_has("pipelined");
}
