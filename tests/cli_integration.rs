#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn todoz_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("todoz"));
    cmd.env("TODOZ_DATA", home.path().join("data"))
        .env_remove("TODOZ_LOG_LEVEL")
        .arg("--log-dir")
        .arg(home.path().join("logs"));
    cmd
}

#[test]
fn test_add_list_and_get() {
    let home = TempDir::new().unwrap();

    todoz_cmd(&home)
        .args(["add", "buy", "milk", "--due", "2030-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo added (1): buy milk"));

    todoz_cmd(&home)
        .args(["add", "call the bank"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo added (2)"));

    todoz_cmd(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("buy milk"))
        .stdout(predicate::str::contains("call the bank"));

    todoz_cmd(&home)
        .args(["get", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("description: buy milk"))
        .stdout(predicate::str::contains("status: pending"))
        .stdout(predicate::str::contains("due:"));

    let stored = fs::read_to_string(home.path().join("data").join("todos.yaml")).unwrap();
    assert!(stored.contains("buy milk"));
}

#[test]
fn test_default_command_lists() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("No todos found."));
}

#[test]
fn test_done_and_status_filter() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home).args(["add", "first"]).assert().success();
    todoz_cmd(&home).args(["add", "second"]).assert().success();

    todoz_cmd(&home)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo 1 marked as done"));

    todoz_cmd(&home)
        .args(["list", "--status", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("first").not());
}

#[test]
fn test_missing_todo_fails_with_message() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home)
        .args(["get", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find a todo item with id \"42\""));
}

#[test]
fn test_blank_description_is_rejected() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("description is required"));
}

#[test]
fn test_update_without_changes_warns() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home).args(["add", "a"]).assert().success();
    todoz_cmd(&home)
        .args(["update", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No updates provided"));
}

#[test]
fn test_update_clear_due() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home)
        .args(["add", "a", "--due", "2030-01-01"])
        .assert()
        .success();
    todoz_cmd(&home)
        .args(["update", "1", "--clear-due", "--description", "b"])
        .assert()
        .success();
    todoz_cmd(&home)
        .args(["get", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("description: b"))
        .stdout(predicate::str::contains("due:").not());
}

#[test]
fn test_move_swaps_and_renumber_compacts() {
    let home = TempDir::new().unwrap();
    for name in ["alpha", "beta", "gamma"] {
        todoz_cmd(&home).args(["add", name]).assert().success();
    }

    todoz_cmd(&home).args(["move", "1", "3"]).assert().success();
    todoz_cmd(&home)
        .args(["get", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"));
    todoz_cmd(&home)
        .args(["get", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gamma"));

    todoz_cmd(&home).args(["delete", "2"]).assert().success();
    todoz_cmd(&home)
        .arg("renumber")
        .assert()
        .success()
        .stdout(predicate::str::contains("Renumbered 2 todo(s)"));
}

#[test]
fn test_due_listings() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home)
        .args(["add", "ancient", "--due", "2001-01-01"])
        .assert()
        .success();
    todoz_cmd(&home)
        .args(["add", "far future", "--due", "2999-01-01"])
        .assert()
        .success();

    todoz_cmd(&home)
        .arg("overdue")
        .assert()
        .success()
        .stdout(predicate::str::contains("ancient"))
        .stdout(predicate::str::contains("far future").not());

    todoz_cmd(&home)
        .arg("due-today")
        .assert()
        .success()
        .stdout(predicate::str::contains("ancient"))
        .stdout(predicate::str::contains("far future").not());

    todoz_cmd(&home)
        .args(["due-by", "3000-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("far future"));
}

#[test]
fn test_clear_by_status() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home).args(["add", "a"]).assert().success();
    todoz_cmd(&home).args(["add", "b"]).assert().success();
    todoz_cmd(&home).args(["done", "2"]).assert().success();

    todoz_cmd(&home)
        .args(["clear", "--status", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 done todo(s)"));
}

#[test]
fn test_path_and_log_file() {
    let home = TempDir::new().unwrap();
    todoz_cmd(&home)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("todos.yaml"));
    assert!(home.path().join("logs").join("todoz.log").exists());
}

#[test]
fn test_base_dir_flag_overrides_env() {
    let home = TempDir::new().unwrap();
    let other = home.path().join("elsewhere");
    todoz_cmd(&home)
        .arg("--base-dir")
        .arg(&other)
        .args(["add", "here"])
        .assert()
        .success();
    assert!(other.join("todos.yaml").exists());
    assert!(!home.path().join("data").join("todos.yaml").exists());
}
