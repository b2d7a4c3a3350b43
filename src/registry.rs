//! Device registry
//!
//! Ordered, append-only collection of registered devices. Registration
//! happens once per device at construction time and there is no removal;
//! lookups are linear scans, which is fine at the tens-of-devices,
//! sub-100 Hz telegram rates of a sensor mesh.

use crate::device::Device;
use std::sync::Arc;

/// Append-only collection of registered device handles
#[derive(Default)]
pub struct DeviceRegistry {
    devices: Vec<Arc<dyn Device>>,
}

impl DeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        DeviceRegistry {
            devices: Vec::new(),
        }
    }

    /// Append a device. Duplicate addresses are legal: every matching
    /// device receives updates, supporting one physical device exposed as
    /// several logical ones.
    pub fn register(&mut self, device: Arc<dyn Device>) {
        self.devices.push(device);
    }

    /// All devices whose combined address equals `sender`, in registration
    /// order. Returns cloned handles so dispatch can run without holding
    /// the registry lock.
    pub fn matching(&self, sender: u32) -> Vec<Arc<dyn Device>> {
        self.devices
            .iter()
            .filter(|device| device.address().combined() == sender)
            .cloned()
            .collect()
    }

    /// Number of registered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device has been registered yet
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::decode::{ListenerKind, Reading};
    use crate::error::Result;

    struct StubDevice {
        name: &'static str,
        address: Address,
    }

    impl Device for StubDevice {
        fn name(&self) -> &str {
            self.name
        }

        fn address(&self) -> Address {
            self.address
        }

        fn kind(&self) -> ListenerKind {
            ListenerKind::Generic
        }

        fn on_reading(&self, _reading: &Reading) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_matching_preserves_registration_order() {
        let mut registry = DeviceRegistry::new();
        let address = Address::new([0x01, 0x02, 0x03, 0x04]);

        registry.register(Arc::new(StubDevice {
            name: "first",
            address,
        }));
        registry.register(Arc::new(StubDevice {
            name: "other",
            address: Address::new([0x0A, 0x0B, 0x0C, 0x0D]),
        }));
        registry.register(Arc::new(StubDevice {
            name: "second",
            address,
        }));

        let matched = registry.matching(address.combined());
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].name(), "first");
        assert_eq!(matched[1].name(), "second");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let mut registry = DeviceRegistry::new();
        registry.register(Arc::new(StubDevice {
            name: "only",
            address: Address::new([0x01, 0x02, 0x03, 0x04]),
        }));

        assert!(registry.matching(0xFFFF_FFFF).is_empty());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}
