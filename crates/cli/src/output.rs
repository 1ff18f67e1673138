//! Output formatting for CLI responses

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Error;
use colored::Colorize;
use meridian_cemu::{AxisSettings, CemuProfile, ConfigureReport as CemuReport};
use meridian_eden::{ConfigureReport as EdenReport, ControlSet};
use serde_json::{Value, json};

use crate::error::exit_status;

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    print_json(&json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "causes": causes,
            "exit_code": exit_status(error).code(),
        }
    }));
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

/// Print a one-line success message
pub fn print_success(message: &str, json: bool) {
    if json {
        print_json(&json!({ "success": true, "message": message }));
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

pub fn print_profile_list(names: &[String], json: bool) {
    if json {
        print_json(&json!({ "success": true, "profiles": names }));
        return;
    }
    if names.is_empty() {
        println!("{}", "No profiles found".yellow());
        return;
    }
    println!("{}", "Cemu Profiles:".bold());
    for name in names {
        println!("  {} {}", "●".green(), name);
    }
}

fn axis_json(axis: &AxisSettings) -> Value {
    json!({
        "deadzone": axis.deadzone,
        "range": axis.range,
    })
}

fn profile_json(profile: &CemuProfile) -> Value {
    let controllers: Vec<Value> = profile
        .controllers
        .iter()
        .map(|c| {
            let mappings: BTreeMap<String, u64> = c
                .mappings
                .iter()
                .map(|(id, code)| (id.to_string(), code))
                .collect();
            json!({
                "api": c.api,
                "uuid": c.uuid,
                "display_name": c.display_name,
                "product_guid": c.product_guid,
                "rumble": c.rumble,
                "motion": c.motion,
                "axis": axis_json(&c.axis),
                "rotation": axis_json(&c.rotation),
                "trigger": axis_json(&c.trigger),
                "mappings": mappings,
            })
        })
        .collect();
    json!({
        "type": profile.emulated_type.as_str(),
        "profile": profile.profile_name,
        "controllers": controllers,
    })
}

/// Print a profile's settings
pub fn print_profile(profile: &CemuProfile, json: bool) {
    if json {
        print_json(&json!({ "success": true, "profile": profile_json(profile) }));
        return;
    }

    let name = if profile.profile_name.is_empty() {
        "(unnamed)"
    } else {
        profile.profile_name.as_str()
    };
    println!("{} {}", "Profile:".bold(), name.cyan());
    println!("  Type: {}", profile.emulated_type.as_str());
    for (i, c) in profile.controllers.iter().enumerate() {
        println!("  {} {}", format!("Controller {i}:").bold(), c.display_name);
        println!("    API: {}", c.api);
        println!("    UUID: {}", c.uuid);
        if !c.product_guid.is_empty() {
            println!("    Product GUID: {}", c.product_guid);
        }
        println!("    Rumble: {:.2}  Motion: {}", c.rumble, c.motion);
        println!(
            "    Deadzones: axis {:.2}, rotation {:.2}, trigger {:.2}",
            c.axis.deadzone, c.rotation.deadzone, c.trigger.deadzone
        );
        println!("    Mappings: {}", c.mappings.len());
        for (id, code) in c.mappings.iter() {
            println!("      {id:>2} → {code}");
        }
    }
}

/// Print logical bindings recovered from a profile
pub fn print_bindings(name: &str, bindings: &BTreeMap<String, String>, json: bool) {
    if json {
        print_json(&json!({ "success": true, "profile": name, "bindings": bindings }));
        return;
    }
    if bindings.is_empty() {
        println!("{}", format!("No bindings in {name}").yellow());
        return;
    }
    println!("{} {}", "Bindings:".bold(), name.cyan());
    for (logical, physical) in bindings {
        println!("  {logical:<12} {physical}");
    }
}

/// Print the slot's profile, or that it is empty
pub fn print_slot(slot: u32, profile: Option<&CemuProfile>, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "slot": slot,
            "profile": profile.map(profile_json),
        }));
        return;
    }
    match profile {
        Some(profile) => {
            println!("{} {}", "Slot".bold(), slot);
            print_profile(profile, false);
        }
        None => println!("{}", format!("Slot {slot} is empty").yellow()),
    }
}

/// Print the outcome of a Cemu configuration pass
pub fn print_cemu_report(report: &CemuReport, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "emulator": "cemu",
            "written": report.written,
            "cleared": report.cleared,
            "failed": report.failed,
            "game_profile": report.game_profile,
        }));
        return;
    }

    println!("{}", "Cemu configuration written".bold());
    for (player, name) in &report.written {
        println!("  {} Player {}: {}", "●".green(), player, name);
    }
    for player in &report.cleared {
        println!("  {} Player {}: cleared", "●".dimmed(), player);
    }
    for player in &report.failed {
        println!("  {} Player {}: failed", "●".red(), player);
    }
    if let Some(path) = &report.game_profile {
        println!("  Game profile: {}", path.display());
    }
}

/// Print the outcome of an Eden configuration pass
pub fn print_eden_report(report: &EdenReport, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "emulator": "eden",
            "configured": report.configured,
            "disconnected": report.disconnected,
            "config_path": report.config_path,
        }));
        return;
    }

    match &report.config_path {
        Some(path) => println!("{} {}", "Eden configuration written:".bold(), path.display()),
        None => println!("{}", "No Eden controls to write".yellow()),
    }
    for index in &report.configured {
        println!("  {} player_{}", "●".green(), index);
    }
    for index in &report.disconnected {
        println!("  {} player_{} disconnected", "●".dimmed(), index);
    }
}

/// Print `[Controls]` entries
pub fn print_controls(path: &Path, controls: &ControlSet, json: bool) {
    if json {
        let entries: serde_json::Map<String, Value> = controls
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();
        print_json(&json!({
            "success": true,
            "path": path,
            "controls": entries,
        }));
        return;
    }
    if controls.is_empty() {
        println!("{}", format!("No controls in {}", path.display()).yellow());
        return;
    }
    println!("{} {}", "Controls:".bold(), path.display());
    for (key, value) in controls.iter() {
        println!("  {}={}", key.cyan(), value);
    }
}
