//! Eden configuration passes against a scratch installation.

use std::fs;
use std::path::PathBuf;

use meridian_eden::{
    ControlSet, configure_input, convert_player, patch_controls, read_controls,
    resolve_config_path,
};
use meridian_input::{BindingModel, ControllerType, InputApi, PlayerSnapshot};
use tempfile::TempDir;
use tracing_test::traced_test;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn eden_install() -> Result<(TempDir, PathBuf), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let exe = temp_dir.path().join("eden.exe");
    fs::write(&exe, b"")?;
    Ok((temp_dir, exe))
}

fn pad() -> BindingModel {
    BindingModel::connected(InputApi::Sdl)
        .with_device("Xbox Series X Controller")
        .with_device_index(1)
        .with_device_guid("030000005e040000130b000011050000")
        .with_type(ControllerType::ProController)
        .with_binding("cross", "Button 0")
        .with_binding("zl", "Axis 4+")
        .with_binding("dp_up", "Hat 0 Up")
        .with_binding("ls_left", "Axis 0-")
        .with_binding("ls_up", "Axis 1-")
        .with_binding("motion", "Gyro")
}

#[test]
fn test_engine_strings() -> TestResult {
    let set = convert_player(&pad(), 0).ok_or("player not converted")?;
    let base = "engine:sdl,guid:030000005e040000130b000011050000,port:1,pad:1";

    assert_eq!(set.get("player_0_type"), Some("0"));
    assert_eq!(set.get("player_0_connected"), Some("true"));
    assert_eq!(set.get("player_0_vibration_enabled"), Some("true"));
    assert_eq!(
        set.get("player_0_button_a"),
        Some(format!("\"{base},button:0\"").as_str())
    );
    assert_eq!(
        set.get("player_0_button_zl"),
        Some(format!("\"{base},axis:4,threshold:0.500000,direction:+\"").as_str())
    );
    assert_eq!(
        set.get("player_0_button_dup"),
        Some(format!("\"{base},button:11\"").as_str())
    );
    assert_eq!(
        set.get("player_0_lstick"),
        Some(
            format!(
                "\"{base},axis_x:0,axis_y:1,deadzone:0.150000,range:1.000000,threshold:0.500000\""
            )
            .as_str()
        )
    );
    assert_eq!(
        set.get("player_0_motionright"),
        Some(format!("\"{base},motion:1\"").as_str())
    );
    assert!(!set.contains_key("player_0_ls_up"));

    let value_keys: Vec<&str> = set.keys().filter(|k| !k.ends_with("\\default")).collect();
    for key in value_keys {
        assert_eq!(set.get(&format!("{key}\\default")), Some("false"), "{key}");
    }
    Ok(())
}

#[test]
fn test_defaults_without_device_identity() -> TestResult {
    let model = BindingModel::connected(InputApi::Sdl)
        .with_type(ControllerType::Handheld)
        .with_binding("a", "Button 3")
        .with_binding("rs_left", "Axis 3-");
    let set = convert_player(&model, 4).ok_or("player not converted")?;
    let base = "engine:sdl,guid:0,port:4,pad:4";

    assert_eq!(set.get("player_4_type"), Some("4"));
    assert_eq!(
        set.get("player_4_button_a"),
        Some(format!("\"{base},button:3\"").as_str())
    );
    // rs_up is missing, so the right stick keeps its default axes.
    assert!(
        set.get("player_4_rstick")
            .is_some_and(|v| v.contains("axis_x:2,axis_y:3"))
    );
    assert!(!set.contains_key("player_4_motionleft"));
    Ok(())
}

#[test]
fn test_pass_leaves_other_sections_identical() -> TestResult {
    let (temp_dir, exe) = eden_install()?;
    let config = resolve_config_path(temp_dir.path());
    fs::create_dir_all(config.parent().ok_or("no parent")?)?;
    fs::write(
        &config,
        "[Controls]\nplayer_0_connected=false\n\n[UI]\ntheme=dark\n",
    )?;

    let snapshot = PlayerSnapshot::new().with_player(1, pad());
    let report = configure_input(&snapshot, &exe)?;
    assert_eq!(report.configured, vec![0]);
    assert_eq!(report.config_path.as_deref(), Some(config.as_path()));

    let written = fs::read_to_string(&config)?;
    assert!(written.ends_with("\n[UI]\ntheme=dark\n"));
    let controls = read_controls(&config)?;
    assert_eq!(controls.get("player_0_connected"), Some("true"));
    assert_eq!(controls.get("player_0_connected\\default"), Some("false"));
    Ok(())
}

#[test]
fn test_disconnected_player_is_marked() -> TestResult {
    let (temp_dir, exe) = eden_install()?;
    let snapshot = PlayerSnapshot::new().with_player(1, pad()).with_player(
        2,
        BindingModel {
            connected: false,
            ..pad()
        },
    );
    let report = configure_input(&snapshot, &exe)?;
    assert_eq!(report.disconnected, vec![1]);

    let controls = read_controls(&resolve_config_path(temp_dir.path()))?;
    assert_eq!(controls.get("player_1_connected"), Some("false"));
    assert_eq!(controls.get("player_1_connected\\default"), Some("false"));
    assert!(!controls.contains_key("player_1_button_a"));
    Ok(())
}

#[test]
fn test_empty_snapshot_writes_nothing() -> TestResult {
    let (temp_dir, exe) = eden_install()?;
    let report = configure_input(&PlayerSnapshot::new(), &exe)?;
    assert_eq!(report.config_path, None);
    assert!(!resolve_config_path(temp_dir.path()).exists());
    Ok(())
}

#[test]
fn test_patch_keeps_crlf_and_unrelated_bytes() -> TestResult {
    let temp_dir = TempDir::new()?;
    let config = temp_dir.path().join("qt-config.ini");
    let original = "[Core]\r\nuse_multi_core=true\r\n[Controls]\r\nplayer_0_type=1\r\n[UI]\r\ntheme=dark\r\n";
    fs::write(&config, original)?;

    let updates: ControlSet = [("player_0_type", "0"), ("player_0_connected", "true")]
        .into_iter()
        .collect();
    patch_controls(&config, &updates)?;

    assert_eq!(
        fs::read_to_string(&config)?,
        "[Core]\r\nuse_multi_core=true\r\n[Controls]\r\nplayer_0_type=0\r\nplayer_0_connected=true\r\n[UI]\r\ntheme=dark\r\n"
    );
    let names: Vec<_> = fs::read_dir(temp_dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(names.len(), 1);
    Ok(())
}

#[test]
fn test_pass_keeps_non_utf8_bytes() -> TestResult {
    let (temp_dir, exe) = eden_install()?;
    let config = resolve_config_path(temp_dir.path());
    fs::create_dir_all(config.parent().ok_or("no parent")?)?;
    let mut original = b"[UI]\nlast_dir=C:/Jeux/\xe9t\xe9\n\n[Controls]\n".to_vec();
    original.extend_from_slice(b"player_0_connected=false\nlabel=\xff\xfe\n");
    fs::write(&config, &original)?;

    let snapshot = PlayerSnapshot::new().with_player(1, pad());
    configure_input(&snapshot, &exe)?;

    let written = fs::read(&config)?;
    assert!(written.starts_with(b"[UI]\nlast_dir=C:/Jeux/\xe9t\xe9\n\n[Controls]\n"));
    assert!(written.windows(9).any(|w| w == b"label=\xff\xfe\n".as_slice()));
    assert!(!written.windows(3).any(|w| w == "\u{fffd}".as_bytes()));
    assert_eq!(read_controls(&config)?.get("player_0_connected"), Some("true"));
    Ok(())
}

#[test]
#[traced_test]
fn test_out_of_range_player_is_logged() -> TestResult {
    let (_temp_dir, exe) = eden_install()?;
    let snapshot = PlayerSnapshot::new().with_player(11, pad());
    let report = configure_input(&snapshot, &exe)?;
    assert!(report.configured.is_empty());
    assert!(logs_contain("Player has no Eden slot"));
    Ok(())
}
