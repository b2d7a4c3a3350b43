//! Wall-mounted rocker switch listener

use crate::address::Address;
use crate::decode::{ListenerKind, Reading};
use crate::device::Device;
use crate::error::Result;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct WallSwitchState {
    pressed: bool,
    /// Raw rocker byte of the last press, identifying the button
    last_rocker: Option<u8>,
    /// Last on/off confirmation seen from the paired actuator
    confirmed_on: Option<bool>,
}

/// A battery-less wall rocker observed by the gateway
///
/// Declares itself a `Listener`, so RPS telegrams from its address decode as
/// press/release events and actuator status confirmations rather than relay
/// toggles.
pub struct WallSwitch {
    name: String,
    device_id: Address,
    state: Mutex<WallSwitchState>,
}

impl WallSwitch {
    /// Create a wall switch bound to its rocker's address
    pub fn new(name: &str, device_id: Address) -> Self {
        WallSwitch {
            name: name.to_string(),
            device_id,
            state: Mutex::new(WallSwitchState::default()),
        }
    }

    /// Whether a rocker button is currently held down
    pub fn is_pressed(&self) -> bool {
        self.state.lock().pressed
    }

    /// Raw rocker byte of the most recent press
    pub fn last_rocker(&self) -> Option<u8> {
        self.state.lock().last_rocker
    }

    /// Last actuator on/off confirmation observed on this address
    pub fn confirmed_on(&self) -> Option<bool> {
        self.state.lock().confirmed_on
    }
}

impl Device for WallSwitch {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Address {
        self.device_id
    }

    fn kind(&self) -> ListenerKind {
        ListenerKind::Listener
    }

    fn on_reading(&self, reading: &Reading) -> Result<()> {
        match *reading {
            Reading::WallSwitch { pressed, raw } => {
                let mut state = self.state.lock();
                state.pressed = pressed;
                if pressed {
                    state.last_rocker = Some(raw);
                }
                log::debug!(
                    "{}: rocker 0x{:02X} {}",
                    self.name,
                    raw,
                    if pressed { "pressed" } else { "released" }
                );
            }
            Reading::SwitchStatus { on } => {
                self.state.lock().confirmed_on = Some(on);
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE: Address = Address::new([0xFE, 0xF0, 0xA2, 0x60]);

    #[test]
    fn test_press_and_release() {
        let switch = WallSwitch::new("hallway", DEVICE);
        assert!(!switch.is_pressed());

        switch
            .on_reading(&Reading::WallSwitch {
                pressed: true,
                raw: 0x30,
            })
            .unwrap();
        assert!(switch.is_pressed());
        assert_eq!(switch.last_rocker(), Some(0x30));

        switch
            .on_reading(&Reading::WallSwitch {
                pressed: false,
                raw: 0x00,
            })
            .unwrap();
        assert!(!switch.is_pressed());
        // Release does not forget which button was pressed
        assert_eq!(switch.last_rocker(), Some(0x30));
    }

    #[test]
    fn test_status_confirmation() {
        let switch = WallSwitch::new("hallway", DEVICE);
        assert_eq!(switch.confirmed_on(), None);
        switch
            .on_reading(&Reading::SwitchStatus { on: true })
            .unwrap();
        assert_eq!(switch.confirmed_on(), Some(true));
    }
}
