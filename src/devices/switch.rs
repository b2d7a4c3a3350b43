//! Relay switch device
//!
//! One switch type covers the three wire variants the actuators speak; the
//! command encoding is a construction-time strategy rather than a subtype.

use crate::address::Address;
use crate::commands::Command;
use crate::decode::{ListenerKind, Reading};
use crate::device::Device;
use crate::dongle::DongleHandle;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Which command encoding a relay actuator expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchStyle {
    /// FSR14-style actuator driven through the 4BS gateway profile
    #[default]
    Fsr14,
    /// Actuator toggled by emulated rocker presses
    Rps,
    /// Actuator addressed per output channel through the optional field
    Channel,
}

/// A relay switch actuator
pub struct RelaySwitch {
    name: String,
    device_id: Address,
    sender_id: Option<Address>,
    channel: u8,
    style: SwitchStyle,
    handle: DongleHandle,
    on: Mutex<bool>,
}

impl RelaySwitch {
    /// Create a relay switch with the given command-encoding style
    ///
    /// The `Fsr14` and `Rps` styles address the actuator through the radio
    /// sender/destination fields and need a gateway sender id; `Channel`
    /// carries the destination in the optional field and ignores it.
    pub fn new(
        name: &str,
        device_id: Address,
        sender_id: Option<Address>,
        channel: u8,
        style: SwitchStyle,
        handle: DongleHandle,
    ) -> Result<Self> {
        if sender_id.is_none() && style != SwitchStyle::Channel {
            return Err(Error::InvalidConfig(format!(
                "switch '{}' needs a sender id for style {:?}",
                name, style
            )));
        }
        Ok(RelaySwitch {
            name: name.to_string(),
            device_id,
            sender_id,
            channel,
            style,
            handle,
            on: Mutex::new(false),
        })
    }

    /// Switch the relay on
    pub fn turn_on(&self) -> Result<()> {
        self.switch(true)
    }

    /// Switch the relay off
    pub fn turn_off(&self) -> Result<()> {
        self.switch(false)
    }

    /// Whether the relay output is on
    pub fn is_on(&self) -> bool {
        *self.on.lock()
    }

    fn switch(&self, on: bool) -> Result<()> {
        log::debug!("{}: switch {}", self.name, if on { "on" } else { "off" });
        // sender presence for the addressed styles is checked at construction
        let missing_sender =
            || Error::InvalidConfig(format!("switch '{}' has no sender id", self.name));
        let command = match self.style {
            SwitchStyle::Fsr14 => Command::RelaySwitch4bs {
                sender: self.sender_id.ok_or_else(missing_sender)?,
                destination: self.device_id,
                on,
            },
            SwitchStyle::Rps => Command::RelaySwitchRps {
                sender: self.sender_id.ok_or_else(missing_sender)?,
                destination: self.device_id,
                on,
            },
            SwitchStyle::Channel => Command::ChannelSwitch {
                destination: self.device_id,
                channel: self.channel,
                on,
            },
        };
        self.handle.send(&command.encode())?;
        *self.on.lock() = on;
        Ok(())
    }
}

impl Device for RelaySwitch {
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
        match *reading {
            Reading::Fsr14Toggle { on } | Reading::SwitchStatus { on } => {
                *self.on.lock() = on;
                log::debug!("{}: reported {}", self.name, if on { "on" } else { "off" });
            }
            _ => {}
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

    fn setup() -> (MockCommunicator, EnOceanDongle) {
        let mock = MockCommunicator::new();
        let dongle = EnOceanDongle::connect(mock.clone());
        (mock, dongle)
    }

    #[test]
    fn test_fsr14_style_sends_4bs() {
        let (mock, dongle) = setup();
        let switch = RelaySwitch::new(
            "heater",
            DEVICE,
            Some(SENDER),
            0,
            SwitchStyle::Fsr14,
            dongle.handle(),
        )
        .unwrap();

        switch.turn_on().unwrap();
        assert!(switch.is_on());
        let sent = mock.sent();
        assert_eq!(sent[0].data[0], 0xA5);
        assert_eq!(sent[0].data[1], 0x01);
        assert_eq!(sent[0].data[4], 0x09);
    }

    #[test]
    fn test_rps_style_sends_rocker() {
        let (mock, dongle) = setup();
        let switch = RelaySwitch::new(
            "pump",
            DEVICE,
            Some(SENDER),
            0,
            SwitchStyle::Rps,
            dongle.handle(),
        )
        .unwrap();

        switch.turn_on().unwrap();
        switch.turn_off().unwrap();
        assert!(!switch.is_on());
        let sent = mock.sent();
        assert_eq!(sent[0].data, vec![0xF6, 0x70, 0xFF, 0xC6, 0xEA, 0x04, 0x00]);
        assert_eq!(sent[1].data[1], 0x50);
    }

    #[test]
    fn test_channel_style_sends_raw_command() {
        let (mock, dongle) = setup();
        let switch = RelaySwitch::new(
            "socket",
            DEVICE,
            None,
            3,
            SwitchStyle::Channel,
            dongle.handle(),
        )
        .unwrap();

        switch.turn_on().unwrap();
        let sent = mock.sent();
        assert_eq!(
            sent[0].data,
            vec![0xD2, 0x01, 0x03, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(sent[0].optional, vec![0x03, 0x01, 0x94, 0xE3, 0xB9, 0xFF, 0x00]);
    }

    #[test]
    fn test_addressed_styles_require_sender() {
        let (_mock, dongle) = setup();
        assert!(RelaySwitch::new(
            "bad",
            DEVICE,
            None,
            0,
            SwitchStyle::Fsr14,
            dongle.handle()
        )
        .is_err());
        assert!(RelaySwitch::new(
            "bad",
            DEVICE,
            None,
            0,
            SwitchStyle::Rps,
            dongle.handle()
        )
        .is_err());
    }

    #[test]
    fn test_toggle_readings_update_state() {
        let (_mock, dongle) = setup();
        let switch = RelaySwitch::new(
            "heater",
            DEVICE,
            Some(SENDER),
            0,
            SwitchStyle::Fsr14,
            dongle.handle(),
        )
        .unwrap();

        switch
            .on_reading(&Reading::Fsr14Toggle { on: true })
            .unwrap();
        assert!(switch.is_on());
        switch
            .on_reading(&Reading::SwitchStatus { on: false })
            .unwrap();
        assert!(!switch.is_on());
    }
}
