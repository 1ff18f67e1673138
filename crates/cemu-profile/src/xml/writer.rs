//! Canonical profile serialization

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::ROOT_TAG;
use crate::error::{CemuError, Result};
use crate::models::{AxisSettings, CemuProfile, ControllerEntry};

struct ProfileWriter {
    inner: Writer<Vec<u8>>,
}

impl ProfileWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| CemuError::Serialize(e.to_string()))
    }

    fn open(&mut self, tag: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    fn close(&mut self, tag: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    /// `<tag>text</tag>` on one line, even when `text` is empty.
    fn leaf(&mut self, tag: &str, text: &str) -> Result<()> {
        self.open(tag)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    fn axis_group(&mut self, tag: &str, settings: &AxisSettings) -> Result<()> {
        self.open(tag)?;
        self.leaf("deadzone", &settings.deadzone.to_string())?;
        self.leaf("range", &settings.range.to_string())?;
        self.close(tag)
    }

    fn controller(&mut self, controller: &ControllerEntry) -> Result<()> {
        self.open("controller")?;
        self.leaf("api", &controller.api)?;
        self.leaf("uuid", &controller.uuid)?;
        self.leaf("display_name", &controller.display_name)?;
        self.leaf("rumble", &controller.rumble.to_string())?;
        self.leaf("motion", if controller.motion { "true" } else { "false" })?;
        if !controller.product_guid.is_empty() {
            self.leaf("product_guid", &controller.product_guid)?;
        }
        self.axis_group("axis", &controller.axis)?;
        self.axis_group("rotation", &controller.rotation)?;
        self.axis_group("trigger", &controller.trigger)?;

        self.open("mappings")?;
        for (id, code) in controller.mappings.iter() {
            self.open("entry")?;
            self.leaf("mapping", &id.to_string())?;
            self.leaf("button", &code.to_string())?;
            self.close("entry")?;
        }
        self.close("mappings")?;
        self.close("controller")
    }

    fn finish(self) -> Result<String> {
        let mut xml = String::from_utf8(self.inner.into_inner())
            .map_err(|e| CemuError::Serialize(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }
}

/// Serialize `profile` in the layout Cemu itself writes.
///
/// Output starts with an XML declaration, is indented by two spaces and lists
/// mappings in ascending id order. An empty profile name omits `<profile>`
/// and an empty product GUID omits `<product_guid>`.
///
/// # Errors
///
/// Returns [`CemuError::Serialize`] if the writer fails.
pub fn to_xml(profile: &CemuProfile) -> Result<String> {
    let mut w = ProfileWriter::new();
    w.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.open(ROOT_TAG)?;
    w.leaf("type", profile.emulated_type.as_str())?;
    if !profile.profile_name.is_empty() {
        w.leaf("profile", &profile.profile_name)?;
    }
    for controller in &profile.controllers {
        w.controller(controller)?;
    }
    w.close(ROOT_TAG)?;
    w.finish()
}
