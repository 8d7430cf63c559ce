#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable
#![allow(missing_docs)] // integration test crate root

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hexer() -> Command {
    Command::cargo_bin("hexer").unwrap()
}

// ---------------------------------------------------------------------------
// stdin sessions
// ---------------------------------------------------------------------------

#[test]
fn loot_and_query_roundtrip() {
    hexer()
        .write_stdin("Geralt loots 5 Rebis, 3 Vitriol\nTotal ingredient ?\nExit\n")
        .assert()
        .success()
        .stdout("Alchemy ingredients obtained\n5 Rebis, 3 Vitriol\n");
}

#[test]
fn exit_stops_processing_with_no_output() {
    hexer()
        .write_stdin("Exit\nGeralt loots 5 Rebis\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn end_of_input_ends_the_session() {
    hexer()
        .write_stdin("Total trophy ?\n")
        .assert()
        .success()
        .stdout("None\n");
}

#[test]
fn invalid_lines_reply_invalid() {
    hexer()
        .write_stdin("Geralt loots 5, Rebis\nExit\n")
        .assert()
        .success()
        .stdout("INVALID\n");
}

#[test]
fn full_hunt_scenario() {
    let script = "\
Geralt loots 5 Rebis, 3 Vitriol
Geralt learns Swallow potion consists of 3 Vitriol, 2 Rebis
Geralt brews Swallow
Total ingredient ?
Geralt learns Igni sign is effective against Harpy
Geralt encounters a Harpy
Total trophy Harpy ?
What is in Swallow ?
Exit
";
    hexer().write_stdin(script).assert().success().stdout(
        "Alchemy ingredients obtained\n\
         New alchemy formula obtained: Swallow\n\
         Alchemy item created: Swallow\n\
         3 Rebis\n\
         New bestiary entry added: Harpy\n\
         Geralt defeats Harpy\n\
         1\n\
         3 Vitriol, 2 Rebis\n",
    );
}

// ---------------------------------------------------------------------------
// script files
// ---------------------------------------------------------------------------

#[test]
fn runs_commands_from_a_script_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("hunt.txt");
    fs::write(&script, "Geralt loots 2 Quebrith\nTotal ingredient ?\nExit\n").unwrap();

    hexer()
        .arg(script.to_str().unwrap())
        .assert()
        .success()
        .stdout("Alchemy ingredients obtained\n2 Quebrith\n");
}

#[test]
fn script_stops_at_exit() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("hunt.txt");
    fs::write(&script, "Total potion ?\nExit\nTotal trophy ?\n").unwrap();

    hexer()
        .arg(script.to_str().unwrap())
        .assert()
        .success()
        .stdout("None\n");
}

#[test]
fn missing_script_file_fails() {
    hexer()
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// prompt
// ---------------------------------------------------------------------------

#[test]
fn prompt_flag_prints_prompt_before_each_read() {
    hexer()
        .arg("--prompt")
        .write_stdin("Exit\n")
        .assert()
        .success()
        .stdout(">> ");
}
