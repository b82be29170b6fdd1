//! CLI integration tests.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nanti(data: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nanti").unwrap();
    cmd.args(["--data-dir", data.path().to_str().unwrap()]);
    cmd
}

const SKIN: &str = r#"{
    "id": "skin-harbor-two",
    "name": "Harbor Two",
    "price": 40,
    "rarity": "common",
    "type": "card-skin",
    "card": "2",
    "suit": "diamonds"
}"#;

// ---------------------------------------------------------------------------
// levels
// ---------------------------------------------------------------------------

#[test]
fn levels_lists_catalog() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .arg("levels")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Salt Road")
                .and(predicate::str::contains("Throne of Nanti"))
                .and(predicate::str::contains("locked"))
                .and(predicate::str::contains("0 of 10 levels completed")),
        );
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_prints_json() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .arg("catalog")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"combinations\"")
                .and(predicate::str::contains("Crown of Nanti")),
        );
}

#[test]
fn custom_catalog_round_trips() {
    let data = TempDir::new().unwrap();
    let out = nanti(&data).arg("catalog").output().unwrap();
    let path = data.path().join("catalog.json");
    fs::write(&path, &out.stdout).unwrap();

    nanti(&data)
        .args(["--catalog", path.to_str().unwrap(), "levels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Harbor of Lanterns"));
}

#[test]
fn invalid_catalog_fails() {
    let data = TempDir::new().unwrap();
    let path = data.path().join("bad.json");
    fs::write(&path, r#"{"levels": []}"#).unwrap();

    nanti(&data)
        .args(["--catalog", path.to_str().unwrap(), "levels"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid catalog"));
}

// ---------------------------------------------------------------------------
// shop
// ---------------------------------------------------------------------------

#[test]
fn shop_lists_builtin_stock() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .args(["shop", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("die-ember")
                .and(predicate::str::contains("Merchant King"))
                .and(predicate::str::contains("legendary")),
        );
}

#[test]
fn shop_add_appends_items() {
    let data = TempDir::new().unwrap();
    let file = data.path().join("items.json");
    fs::write(&file, SKIN).unwrap();

    nanti(&data)
        .args(["shop", "add", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 item"));

    assert!(data.path().join("nanti.shop.items.json").exists());

    nanti(&data)
        .args(["shop", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skin-harbor-two"));

    nanti(&data)
        .args(["shop", "add", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn shop_add_rejects_bad_weights() {
    let data = TempDir::new().unwrap();
    let file = data.path().join("items.json");
    fs::write(
        &file,
        r#"[{"id": "die-odd", "name": "Odd", "price": 10, "rarity": "rare",
             "type": "die", "effect": "weightedOdd", "weights": [10, 10, 10, 10, 10, 10]}]"#,
    )
    .unwrap();

    nanti(&data)
        .args(["shop", "add", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid item"));
}

// ---------------------------------------------------------------------------
// profile
// ---------------------------------------------------------------------------

#[test]
fn profile_update_persists() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .args(["profile", "--name", "Ada", "--wallet", "w-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated profile"));

    nanti(&data)
        .arg("profile")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Ada")
                .and(predicate::str::contains("w-123"))
                .and(predicate::str::contains("completed:  none")),
        );
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_starts_a_level() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .args(["play", "--seed", "7", "--no-delay"])
        .write_stdin("levels\nstart 1\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Level 1: The Salt Road")
                .and(predicate::str::contains("Turn 1/5"))
                .and(predicate::str::contains("Farewell")),
        );
}

#[test]
fn play_reports_rejected_commands() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .args(["play", "--seed", "7", "--no-delay"])
        .write_stdin("start 2\nend\nbuy die-hourglass\ndance\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("level 2 is locked")
                .and(predicate::str::contains("no level in progress"))
                .and(predicate::str::contains("not enough silver"))
                .and(predicate::str::contains("unknown command: dance")),
        );
}

#[test]
fn play_leaves_profile_on_disk() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .args(["profile", "--name", "Ada"])
        .assert()
        .success();

    nanti(&data)
        .args(["play", "--no-delay"])
        .write_stdin("profile\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Ada"));
}

#[test]
fn play_treats_end_of_input_as_quit() {
    let data = TempDir::new().unwrap();
    nanti(&data)
        .args(["play", "--seed", "7", "--no-delay"])
        .write_stdin("levels\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Farewell, wanderer."));
}
