#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn gptref_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gptref").unwrap();
    cmd.env_remove("GPTREF_ROOT");
    cmd.env_remove("GPTREF_LOG");
    cmd
}

/// Run `gptref add` in `dir` and return the generated entry id
pub fn add_entry(dir: &Path, name: &str, reference: &str) -> String {
    let output = gptref_cmd()
        .current_dir(dir)
        .arg("add")
        .arg(name)
        .arg(reference)
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.rfind('(').unwrap() + 1;
    let end = stdout.rfind(')').unwrap();
    stdout[start..end].to_string()
}
