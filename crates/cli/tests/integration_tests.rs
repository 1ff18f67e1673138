//! Integration tests for meridianctl
//!
//! Each test runs the binary against a scratch emulator installation and
//! checks output, files on disk and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Test helper to create a meridianctl command with no ambient config
fn meridianctl() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("meridianctl")?;
    cmd.env_remove("MERIDIAN_CONFIG").env_remove("RUST_LOG");
    Ok(cmd)
}

/// Scratch installation with an empty executable and a players file
fn install(
    exe_name: &str,
    players: &Value,
) -> Result<(TempDir, PathBuf, PathBuf), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let exe = dir.path().join(exe_name);
    fs::write(&exe, b"")?;
    let players_path = dir.path().join("players.json");
    fs::write(&players_path, serde_json::to_string_pretty(players)?)?;
    Ok((dir, exe, players_path))
}

fn two_players() -> Value {
    json!({
        "1": {
            "connected": true,
            "api": "SDLController",
            "device": "Xbox Series X Controller",
            "device_index": 0,
            "device_guid": "030000005e040000130b000011050000",
            "bindings": { "a": "Button 0", "b": "Button 1", "ls_up": "Axis 1-" }
        },
        "2": {
            "connected": false,
            "bindings": { "a": "Button 0" }
        }
    })
}

fn stdout_json(output: &std::process::Output) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

fn profile_dir(dir: &Path) -> PathBuf {
    dir.join("controllerProfiles")
}

#[test]
fn test_help_lists_commands() -> TestResult {
    meridianctl()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("controls"));
    Ok(())
}

#[test]
fn test_configure_cemu_writes_slots() -> TestResult {
    let (dir, exe, players) = install("Cemu.exe", &two_players())?;

    let output = meridianctl()?
        .args(["--json", "configure", "--emulator", "cemu", "--exe"])
        .arg(&exe)
        .arg("--players")
        .arg(&players)
        .output()?;
    assert!(output.status.success());

    let report = stdout_json(&output)?;
    assert_eq!(report["success"], json!(true));
    assert_eq!(report["written"]["1"], json!("meridian_player1"));
    assert_eq!(report["cleared"], json!([2]));
    assert!(profile_dir(dir.path()).join("controller0.xml").is_file());
    assert!(profile_dir(dir.path()).join("meridian_player1.xml").is_file());
    assert!(!profile_dir(dir.path()).join("controller1.xml").exists());
    Ok(())
}

#[test]
fn test_profile_commands_after_configure() -> TestResult {
    let (dir, exe, players) = install("Cemu.exe", &two_players())?;
    meridianctl()?
        .args(["configure", "--emulator", "cemu", "--exe"])
        .arg(&exe)
        .arg("--players")
        .arg(&players)
        .assert()
        .success();

    meridianctl()?
        .args(["profile", "list", "--cemu-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("meridian_player1"))
        .stdout(predicate::str::contains("controller0").not());

    let output = meridianctl()?
        .args(["--json", "profile", "bindings", "meridian_player1", "--cemu-dir"])
        .arg(dir.path())
        .output()?;
    assert!(output.status.success());
    let bindings = stdout_json(&output)?;
    assert_eq!(bindings["bindings"]["a"], json!("Button 0"));
    assert_eq!(bindings["bindings"]["ls_up"], json!("Axis 1-"));

    let output = meridianctl()?
        .args(["--json", "slot", "show", "0", "--cemu-dir"])
        .arg(dir.path())
        .output()?;
    let slot = stdout_json(&output)?;
    assert_eq!(slot["profile"]["profile"], json!("meridian_player1"));
    assert_eq!(slot["profile"]["controllers"][0]["api"], json!("SDLController"));

    meridianctl()?
        .args(["profile", "delete", "meridian_player1", "--cemu-dir"])
        .arg(dir.path())
        .assert()
        .success();
    assert!(!profile_dir(dir.path()).join("meridian_player1.xml").exists());
    Ok(())
}

#[test]
fn test_missing_profile_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    let output = meridianctl()?
        .args(["--json", "profile", "show", "nobody", "--cemu-dir"])
        .arg(dir.path())
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let error = stdout_json(&output)?;
    assert_eq!(error["success"], json!(false));
    assert_eq!(error["error"]["exit_code"], json!(2));

    meridianctl()?
        .args(["profile", "delete", "nobody", "--cemu-dir"])
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile not found"));
    Ok(())
}

#[test]
fn test_invalid_snapshot_exit_code() -> TestResult {
    let (_dir, exe, players) = install("Cemu.exe", &json!(["not", "an", "object"]))?;
    meridianctl()?
        .args(["configure", "--emulator", "cemu", "--exe"])
        .arg(&exe)
        .arg("--players")
        .arg(&players)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid players file"));
    Ok(())
}

#[test]
fn test_missing_players_file_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    meridianctl()?
        .args(["configure", "--emulator", "eden", "--exe"])
        .arg(dir.path().join("eden.exe"))
        .arg("--players")
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(4);
    Ok(())
}

#[test]
fn test_configure_requires_emulator() -> TestResult {
    let (_dir, exe, players) = install("Cemu.exe", &two_players())?;
    meridianctl()?
        .args(["configure", "--exe"])
        .arg(&exe)
        .arg("--players")
        .arg(&players)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--emulator"));
    Ok(())
}

#[test]
fn test_default_emulator_from_config() -> TestResult {
    let (dir, exe, players) = install("eden.exe", &two_players())?;
    let config = dir.path().join("meridianctl.yaml");
    fs::write(&config, "default_emulator: eden\n")?;

    meridianctl()?
        .env("MERIDIAN_CONFIG", &config)
        .args(["configure", "--exe"])
        .arg(&exe)
        .arg("--players")
        .arg(&players)
        .assert()
        .success();
    assert!(dir.path().join("user/config/qt-config.ini").is_file());
    Ok(())
}

#[test]
fn test_configure_eden_then_show_controls() -> TestResult {
    let (dir, exe, players) = install("eden.exe", &two_players())?;
    let ini = dir.path().join("user/config/qt-config.ini");
    fs::create_dir_all(ini.parent().ok_or("no parent")?)?;
    fs::write(&ini, "[UI]\ntheme=dark\n")?;

    let output = meridianctl()?
        .args(["--json", "configure", "--emulator", "eden", "--exe"])
        .arg(&exe)
        .arg("--players")
        .arg(&players)
        .output()?;
    assert!(output.status.success());
    let report = stdout_json(&output)?;
    assert_eq!(report["configured"], json!([0]));
    assert_eq!(report["disconnected"], json!([1]));
    assert!(fs::read_to_string(&ini)?.starts_with("[UI]\ntheme=dark\n"));

    let output = meridianctl()?
        .args(["--json", "controls", "show", "--player", "1", "--eden-dir"])
        .arg(dir.path())
        .output()?;
    assert!(output.status.success());
    let controls = stdout_json(&output)?;
    assert_eq!(controls["controls"]["player_1_connected"], json!("false"));
    assert_eq!(controls["controls"].get("player_0_connected"), None);
    Ok(())
}

#[test]
fn test_bad_config_file_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    let config = dir.path().join("meridianctl.yaml");
    fs::write(&config, "profile_name_prefix: ''\n")?;
    meridianctl()?
        .arg("--config")
        .arg(&config)
        .args(["profile", "list", "--cemu-dir"])
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid config file"));
    Ok(())
}

#[test]
fn test_completion_generation() -> TestResult {
    meridianctl()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("meridianctl"));
    Ok(())
}
