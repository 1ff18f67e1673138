//! Device identity resolution
//!
//! Turning a human-readable device label into a hardware instance identifier
//! needs the platform's enumeration API, which lives outside this workspace.
//! Writers accept any [`DeviceResolver`] and fall back to the identifiers in
//! the [`BindingModel`](crate::BindingModel) when it has no answer.

use tracing::debug;

/// Instance and product identifiers of one physical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDevice {
    /// Per-device instance GUID
    pub instance_guid: String,
    /// Product GUID shared by every unit of the same model
    pub product_guid: String,
}

/// Resolves a device label to its hardware identity.
pub trait DeviceResolver {
    /// Look up `label`, optionally preferring the device at `index_hint` in
    /// enumeration order. `label` may end in a ` [#N]` ordinal suffix.
    fn resolve(&self, label: &str, index_hint: Option<u32>) -> Option<ResolvedDevice>;
}

/// Resolver for platforms without device enumeration. Always returns `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeviceResolver;

impl DeviceResolver for NoDeviceResolver {
    fn resolve(&self, _label: &str, _index_hint: Option<u32>) -> Option<ResolvedDevice> {
        None
    }
}

/// One entry of an enumerated device list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedDevice {
    /// Product name as reported by the platform
    pub name: String,
    /// Per-device instance GUID
    pub instance_guid: String,
    /// Product GUID
    pub product_guid: String,
}

impl EnumeratedDevice {
    /// Build an entry.
    pub fn new(
        name: impl Into<String>,
        instance_guid: impl Into<String>,
        product_guid: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            instance_guid: instance_guid.into(),
            product_guid: product_guid.into(),
        }
    }

    fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    fn resolved(&self) -> ResolvedDevice {
        ResolvedDevice {
            instance_guid: self.instance_guid.clone(),
            product_guid: self.product_guid.clone(),
        }
    }
}

/// Resolver over a device list captured by the caller.
///
/// Selection order for a label:
///
/// 1. with a ` [#N]` suffix, the Nth device (1-based) whose name equals the
///    base label
/// 2. the device at the index hint, when its name equals or contains the label
/// 3. the first device whose name equals the label
/// 4. the first device whose name contains the label
///
/// Name comparisons ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct EnumeratedDevices {
    devices: Vec<EnumeratedDevice>,
}

impl EnumeratedDevices {
    /// Wrap a device list in enumeration order.
    pub fn new(devices: Vec<EnumeratedDevice>) -> Self {
        Self { devices }
    }

    /// Devices in enumeration order.
    pub fn devices(&self) -> &[EnumeratedDevice] {
        &self.devices
    }

    fn select(&self, label: &str, index_hint: Option<u32>) -> Option<&EnumeratedDevice> {
        let (base, ordinal) = split_device_label(label);
        let wanted = base.to_lowercase();

        let position = ordinal
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| usize::try_from(n).ok());
        if let Some(position) = position {
            let nth = self
                .devices
                .iter()
                .filter(|dev| dev.normalized_name() == wanted)
                .nth(position);
            if nth.is_some() {
                return nth;
            }
        }

        let hinted = index_hint
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| self.devices.get(i));
        if let Some(candidate) = hinted {
            let name = candidate.normalized_name();
            if name == wanted || name.contains(&wanted) {
                return Some(candidate);
            }
        }

        self.devices
            .iter()
            .find(|dev| dev.normalized_name() == wanted)
            .or_else(|| {
                self.devices
                    .iter()
                    .find(|dev| dev.name.to_lowercase().contains(&wanted))
            })
    }
}

impl DeviceResolver for EnumeratedDevices {
    fn resolve(&self, label: &str, index_hint: Option<u32>) -> Option<ResolvedDevice> {
        let found = self.select(label, index_hint).map(EnumeratedDevice::resolved);
        if found.is_none() {
            debug!(label, ?index_hint, "No enumerated device matches label");
        }
        found
    }
}

/// Split a device picker label into its base name and optional ordinal.
///
/// `"DualSense Wireless Controller [#2]"` becomes
/// `("DualSense Wireless Controller", Some(2))`. Labels without a well-formed
/// suffix are returned trimmed with no ordinal.
pub fn split_device_label(label: &str) -> (&str, Option<u32>) {
    let trimmed = label.trim();
    let Some(body) = trimmed.strip_suffix(']') else {
        return (trimmed, None);
    };
    let Some(open) = body.rfind("[#") else {
        return (trimmed, None);
    };
    let (head, digits) = body.split_at(open);
    let digits = digits.trim_start_matches("[#");
    let separated = head.ends_with(char::is_whitespace);
    if !separated || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (trimmed, None);
    }
    match digits.parse() {
        Ok(ordinal) => (head.trim(), Some(ordinal)),
        Err(_) => (head.trim(), None),
    }
}
