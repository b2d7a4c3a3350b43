//! Dimmable light device

use crate::address::Address;
use crate::commands::Command;
use crate::decode::{ListenerKind, Reading};
use crate::device::Device;
use crate::dongle::DongleHandle;
use crate::error::Result;
use parking_lot::Mutex;

/// Brightness used when turning on with no remembered level
const DEFAULT_BRIGHTNESS: u8 = 50;

#[derive(Debug)]
struct DimmerState {
    on: bool,
    brightness: u8,
    /// Last positive brightness, restored by `turn_on(None)`
    last_brightness: u8,
}

/// A dimmable light actuator controlled through the A5-38-08 gateway profile
///
/// Tracks its own state from the actuator's dimmer status telegrams, so the
/// reported brightness reflects what the actuator confirmed rather than
/// what was last requested.
pub struct DimmerLight {
    name: String,
    device_id: Address,
    sender_id: Address,
    handle: DongleHandle,
    state: Mutex<DimmerState>,
}

impl DimmerLight {
    /// Create a dimmer bound to its actuator and gateway sender addresses
    pub fn new(name: &str, device_id: Address, sender_id: Address, handle: DongleHandle) -> Self {
        DimmerLight {
            name: name.to_string(),
            device_id,
            sender_id,
            handle,
            state: Mutex::new(DimmerState {
                on: false,
                brightness: 0,
                last_brightness: DEFAULT_BRIGHTNESS,
            }),
        }
    }

    /// Turn on, optionally at a specific brightness (0-255)
    ///
    /// With no brightness given, the last remembered positive level is
    /// restored. Brightness 0 behaves exactly like [`DimmerLight::turn_off`].
    pub fn turn_on(&self, brightness: Option<u8>) -> Result<()> {
        let brightness = brightness.unwrap_or_else(|| {
            let state = self.state.lock();
            if state.last_brightness > 0 {
                state.last_brightness
            } else {
                DEFAULT_BRIGHTNESS
            }
        });

        if brightness == 0 {
            return self.turn_off();
        }

        log::debug!("{}: turn on at brightness {}", self.name, brightness);
        self.handle.send(
            &Command::DimmerSet {
                sender: self.sender_id,
                destination: self.device_id,
                brightness,
            }
            .encode(),
        )?;
        self.state.lock().on = true;
        Ok(())
    }

    /// Turn the light off
    pub fn turn_off(&self) -> Result<()> {
        log::debug!("{}: turn off", self.name);
        self.handle.send(
            &Command::DimmerOff {
                sender: self.sender_id,
                destination: self.device_id,
            }
            .encode(),
        )?;
        let mut state = self.state.lock();
        state.on = false;
        state.brightness = 0;
        Ok(())
    }

    /// Whether the actuator output is on
    pub fn is_on(&self) -> bool {
        self.state.lock().on
    }

    /// Current brightness, 0-255
    pub fn brightness(&self) -> u8 {
        self.state.lock().brightness
    }
}

impl Device for DimmerLight {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Address {
        self.device_id
    }

    fn kind(&self) -> ListenerKind {
        ListenerKind::Generic
    }

    fn on_reading(&self, reading: &Reading) -> Result<()> {
        if let Reading::DimmerStatus { value } = *reading {
            // Status carries the 0-100 dim scale; values above 100 clamp
            let brightness = (u16::from(value) * 255 / 100).min(255) as u8;
            let mut state = self.state.lock();
            state.brightness = brightness;
            state.on = value > 0;
            if brightness > 0 {
                state.last_brightness = brightness;
            }
            log::debug!("{}: dimmer status {} -> brightness {}", self.name, value, brightness);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dongle::EnOceanDongle;
    use crate::transport::MockCommunicator;

    const DEVICE: Address = Address::new([0x01, 0x94, 0xE3, 0xB9]);
    const SENDER: Address = Address::new([0xFF, 0xC6, 0xEA, 0x04]);

    fn dimmer_with_mock() -> (DimmerLight, MockCommunicator, EnOceanDongle) {
        let mock = MockCommunicator::new();
        let dongle = EnOceanDongle::connect(mock.clone());
        let dimmer = DimmerLight::new("office", DEVICE, SENDER, dongle.handle());
        (dimmer, mock, dongle)
    }

    #[test]
    fn test_turn_on_encodes_brightness() {
        let (dimmer, mock, _dongle) = dimmer_with_mock();
        dimmer.turn_on(Some(255)).unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        // EDIM = floor(255 * 100 / 255) = 100
        assert_eq!(sent[0].data[2], 100);
        assert!(dimmer.is_on());
    }

    #[test]
    fn test_turn_on_zero_is_off() {
        let (dimmer, mock, _dongle) = dimmer_with_mock();
        dimmer.turn_on(Some(0)).unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        // Off telegram: SW clear, EDIM zero
        assert_eq!(sent[0].data[2], 0x00);
        assert_eq!(sent[0].data[4], 0x08);
        assert!(!dimmer.is_on());
    }

    #[test]
    fn test_turn_on_restores_remembered_brightness() {
        let (dimmer, mock, _dongle) = dimmer_with_mock();

        // Actuator confirms 50% -> brightness 127 remembered
        dimmer
            .on_reading(&Reading::DimmerStatus { value: 50 })
            .unwrap();
        assert_eq!(dimmer.brightness(), 127);

        dimmer.turn_on(None).unwrap();
        let sent = mock.sent();
        // floor(127 * 100 / 255) = 49
        assert_eq!(sent[0].data[2], 49);
    }

    #[test]
    fn test_fresh_device_uses_default_level() {
        let (dimmer, mock, _dongle) = dimmer_with_mock();
        dimmer.turn_on(None).unwrap();

        // floor(50 * 100 / 255) = 19
        assert_eq!(mock.sent()[0].data[2], 19);
    }

    #[test]
    fn test_status_updates_state() {
        let (dimmer, _mock, _dongle) = dimmer_with_mock();

        dimmer
            .on_reading(&Reading::DimmerStatus { value: 100 })
            .unwrap();
        assert!(dimmer.is_on());
        assert_eq!(dimmer.brightness(), 255);

        dimmer
            .on_reading(&Reading::DimmerStatus { value: 0 })
            .unwrap();
        assert!(!dimmer.is_on());
        assert_eq!(dimmer.brightness(), 0);
        // Remembered level survives the off status
        dimmer.turn_on(None).unwrap();
        assert!(dimmer.is_on());
    }

    #[test]
    fn test_unrelated_readings_are_ignored() {
        let (dimmer, _mock, _dongle) = dimmer_with_mock();
        dimmer
            .on_reading(&Reading::Power { watts: 300 })
            .unwrap();
        assert!(!dimmer.is_on());
    }
}
