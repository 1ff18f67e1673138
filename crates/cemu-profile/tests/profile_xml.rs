//! Profile XML codec behavior across the layouts Cemu and older Meridian
//! builds have written.

use meridian_cemu::{
    AxisSettings, CemuError, CemuProfile, ControllerEntry, EmulatedType, MappingSet, parse_profile,
    to_xml,
};
use proptest::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const CANONICAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<emulated_controller>
  <type>Wii U GamePad</type>
  <controller>
    <api>SDLController</api>
    <uuid>0</uuid>
    <display_name>Pad</display_name>
    <mappings>
      <entry><mapping>1</mapping><button>0</button></entry>
      <entry><mapping>2</mapping><button>1</button></entry>
    </mappings>
  </controller>
</emulated_controller>"#;

const CANONICAL_AXIS_TAG: &str = r#"<emulated_controller>
  <type>Wii U GamePad</type>
  <controller>
    <api>SDLController</api>
    <mappings>
      <entry><mapping>2</mapping><axis>1</axis></entry>
      <entry><mapping>1</mapping><axis>0</axis></entry>
    </mappings>
  </controller>
</emulated_controller>"#;

const LEGACY_NESTED: &str = r#"<emulated_controller>
  <type>Wii U GamePad</type>
  <controller>
    <api>SDLController</api>
    <mappings>
      <entry>
        <mapping><device>0</device><button>0</button></mapping>
        <entry>1</entry>
      </entry>
      <entry>
        <mapping><device>0</device><button>1</button></mapping>
        <entry>2</entry>
      </entry>
    </mappings>
  </controller>
</emulated_controller>"#;

const FLAT: &str = r#"<emulated_controller>
  <type>Wii U GamePad</type>
  <controller>SDLController</controller>
  <mappings>
    <entry><mapping>1</mapping><button>0</button></entry>
    <entry><mapping>2</mapping><button>1</button></entry>
  </mappings>
</emulated_controller>"#;

fn mappings_of(profile: &CemuProfile) -> Vec<(u8, u64)> {
    profile
        .first_controller()
        .map(|c| c.mappings.iter().collect())
        .unwrap_or_default()
}

#[test]
fn test_all_layouts_parse_to_same_mappings() -> TestResult {
    let expected = vec![(1, 0), (2, 1)];
    for (layout, xml) in [
        ("canonical", CANONICAL),
        ("canonical with axis tag", CANONICAL_AXIS_TAG),
        ("legacy nested", LEGACY_NESTED),
        ("flat", FLAT),
    ] {
        let profile = parse_profile(xml)?;
        assert_eq!(mappings_of(&profile), expected, "layout: {layout}");
        assert_eq!(profile.controllers.len(), 1, "layout: {layout}");
        assert_eq!(
            profile.first_controller().map(|c| c.api.as_str()),
            Some("SDLController"),
            "layout: {layout}"
        );
    }
    Ok(())
}

#[test]
fn test_bare_axis_group_is_deadzone() -> TestResult {
    let xml = r#"<emulated_controller>
      <type>Wii U Pro Controller</type>
      <controller>
        <api>XInput</api>
        <rotation>0.2</rotation>
        <axis><deadzone>0.1</deadzone><range>0.9</range></axis>
        <mappings><entry><mapping>1</mapping><button>0</button></entry></mappings>
      </controller>
    </emulated_controller>"#;
    let profile = parse_profile(xml)?;
    let controller = profile.first_controller().ok_or("no controller")?;

    assert_eq!(profile.emulated_type, EmulatedType::ProController);
    assert_eq!(
        controller.rotation,
        AxisSettings {
            deadzone: 0.2,
            range: 1.0
        }
    );
    assert_eq!(
        controller.axis,
        AxisSettings {
            deadzone: 0.1,
            range: 0.9
        }
    );
    assert_eq!(controller.trigger, AxisSettings::TRIGGER);
    Ok(())
}

#[test]
fn test_structural_errors() {
    let wrong_root = parse_profile("<controller><api>XInput</api></controller>");
    assert!(matches!(
        wrong_root,
        Err(CemuError::UnexpectedRoot { ref found }) if found == "controller"
    ));
    assert!(wrong_root.is_err_and(|e| e.is_structural()));

    let malformed = parse_profile("<emulated_controller><type>");
    assert!(matches!(malformed, Err(CemuError::MalformedXml(_))));
}

#[test]
fn test_bad_values_degrade_to_defaults() -> TestResult {
    let xml = r#"<emulated_controller>
      <type>Wii U Balance Board</type>
      <controller>
        <api>SDLController</api>
        <rumble>loud</rumble>
        <trigger><deadzone>x</deadzone></trigger>
        <mappings>
          <entry><mapping>one</mapping><button>0</button></entry>
          <entry><mapping>3</mapping><button>?</button></entry>
        </mappings>
      </controller>
    </emulated_controller>"#;
    let profile = parse_profile(xml)?;
    let controller = profile.first_controller().ok_or("no controller")?;

    assert_eq!(profile.emulated_type, EmulatedType::GamePad);
    assert!(controller.rumble.abs() < f32::EPSILON);
    assert_eq!(controller.trigger, AxisSettings::TRIGGER);
    assert_eq!(mappings_of(&profile), vec![(3, 0)]);
    Ok(())
}

#[test]
fn test_round_trip_preserves_profile() -> TestResult {
    let profile = CemuProfile {
        emulated_type: EmulatedType::ProController,
        profile_name: "meridian_player2".into(),
        controllers: vec![ControllerEntry {
            api: "DirectInput".into(),
            uuid: "B7020510-997D-11F0-8001-444553540000".into(),
            display_name: "DualSense Wireless Controller".into(),
            product_guid: "0CE6054C-0000-0000-0000-504944564944".into(),
            rumble: 0.5,
            motion: true,
            mappings: [(1, 2), (7, 6), (12, 34), (18, 45)].into_iter().collect(),
            ..ControllerEntry::default()
        }],
    };

    let xml = to_xml(&profile)?;
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("\n  <type>Wii U Pro Controller</type>"));
    assert!(xml.ends_with("</emulated_controller>\n"));
    assert_eq!(parse_profile(&xml)?, profile);
    Ok(())
}

#[test]
fn test_display_name_whitespace_survives_round_trip() -> TestResult {
    let profile = CemuProfile {
        profile_name: "spaced".into(),
        controllers: vec![ControllerEntry {
            uuid: "03000000".into(),
            display_name: "  Arcade  Stick ".into(),
            ..ControllerEntry::default()
        }],
        ..CemuProfile::default()
    };

    let parsed = parse_profile(&to_xml(&profile)?)?;
    assert_eq!(
        parsed.first_controller().map(|c| c.display_name.as_str()),
        Some("  Arcade  Stick ")
    );
    assert_eq!(parsed, profile);
    Ok(())
}

#[test]
fn test_optional_elements_omitted() -> TestResult {
    let profile = CemuProfile {
        controllers: vec![ControllerEntry::default()],
        ..CemuProfile::default()
    };
    let xml = to_xml(&profile)?;
    assert!(!xml.contains("<profile>"));
    assert!(!xml.contains("<product_guid>"));
    assert!(xml.contains("<display_name></display_name>"));
    Ok(())
}

fn mapping_ids_in_output(xml: &str) -> Vec<u8> {
    xml.split("<mapping>")
        .skip(1)
        .filter_map(|rest| rest.split("</mapping>").next())
        .filter_map(|id| id.parse().ok())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_mappings_written_in_ascending_order(
        entries in prop::collection::vec((1u8..=27, 0u64..=49), 0..20)
    ) {
        let mappings: MappingSet = entries.iter().copied().collect();
        let profile = CemuProfile {
            profile_name: "ordered".into(),
            controllers: vec![ControllerEntry { mappings, ..ControllerEntry::default() }],
            ..CemuProfile::default()
        };
        let xml = to_xml(&profile).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let ids = mapping_ids_in_output(&xml);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(&ids, &sorted);

        let parsed = parse_profile(&xml).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(parsed, profile);
    }
}
