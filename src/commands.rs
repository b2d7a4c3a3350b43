//! Outgoing command telegram construction
//!
//! Builds the radio telegrams this crate can transmit: dimmer control and
//! relay switching through the A5-38-08 gateway profile, rocker emulation
//! for RPS-controlled actuators, and the raw channel-addressed switch
//! command. The encoder performs no I/O; callers hand the result to the
//! dongle's send path. Inputs are expected in range (brightness and channel
//! are u8 by construction).

use crate::address::Address;
use crate::telegram::{Telegram, PACKET_TYPE_RADIO, RORG_4BS, RORG_RPS, RORG_VLD};

// ===== Optional-field constants (sub-telegram addressing) =====

/// Sub-telegram count used when transmitting
const SUBTEL_SEND: u8 = 0x03;
/// Transmit at maximum power (dBm placeholder in the optional field)
const DBM_SEND: u8 = 0xFF;
/// No security processing on the outgoing telegram
const SECURITY_NONE: u8 = 0x00;

// ===== A5-38-08 gateway profile =====

/// Gateway command: switching
const GW_CMD_SWITCHING: u8 = 0x01;
/// Gateway command: dimming
const GW_CMD_DIMMING: u8 = 0x02;
/// DB0 bit marking a 4BS data telegram (as opposed to teach-in)
const BS4_DATA_TELEGRAM: u8 = 0x08;
/// DB0 bit: switch output on
const BS4_SW_ON: u8 = 0x01;
/// Ramp time used for dimming commands
const DIM_RAMP_TIME: u8 = 0x01;

// ===== F6-02-02 rocker emulation =====

/// Rocker byte for "on": R1 = 3 with the energy bow pressed
const RPS_ROCKER_ON: u8 = 0x70;
/// Rocker byte for "off": R1 = 2 with the energy bow pressed
const RPS_ROCKER_OFF: u8 = 0x50;

// ===== Channel-addressed switch command =====

/// Output level byte for "on" (100%)
const CHANNEL_LEVEL_ON: u8 = 0x64;

/// One outgoing actuator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set a dimmer's level. Brightness 0 encodes identically to
    /// [`Command::DimmerOff`].
    DimmerSet {
        /// Gateway sender address the actuator was taught
        sender: Address,
        /// Target actuator address
        destination: Address,
        /// Requested brightness, 0-255 (scaled to 0-100 on the wire)
        brightness: u8,
    },
    /// Switch a dimmer off
    DimmerOff {
        /// Gateway sender address the actuator was taught
        sender: Address,
        /// Target actuator address
        destination: Address,
    },
    /// Switch a relay through the 4BS gateway profile
    RelaySwitch4bs {
        /// Gateway sender address the actuator was taught
        sender: Address,
        /// Target actuator address
        destination: Address,
        /// Desired output state
        on: bool,
    },
    /// Switch a relay by emulating a rocker press
    RelaySwitchRps {
        /// Gateway sender address the actuator was taught
        sender: Address,
        /// Target actuator address
        destination: Address,
        /// Desired output state
        on: bool,
    },
    /// Switch one output channel of an actuator addressed through the
    /// optional field rather than the radio sender/destination
    ChannelSwitch {
        /// Target actuator address (carried in the optional field)
        destination: Address,
        /// Output channel, 0-255
        channel: u8,
        /// Desired output state
        on: bool,
    },
}

impl Command {
    /// Encode this command into a transmit-ready telegram
    pub fn encode(&self) -> Telegram {
        match *self {
            Command::DimmerSet {
                sender,
                destination,
                brightness,
            } => {
                if brightness == 0 {
                    return Command::DimmerOff {
                        sender,
                        destination,
                    }
                    .encode();
                }
                // 0-255 input scales to the profile's 0-100 dim range
                let dim = (u16::from(brightness) * 100 / 255) as u8;
                bs4_telegram(
                    sender,
                    destination,
                    [
                        GW_CMD_DIMMING,
                        dim,
                        DIM_RAMP_TIME,
                        BS4_DATA_TELEGRAM | BS4_SW_ON,
                    ],
                )
            }
            Command::DimmerOff {
                sender,
                destination,
            } => bs4_telegram(
                sender,
                destination,
                [GW_CMD_DIMMING, 0x00, DIM_RAMP_TIME, BS4_DATA_TELEGRAM],
            ),
            Command::RelaySwitch4bs {
                sender,
                destination,
                on,
            } => {
                let db0 = if on {
                    BS4_DATA_TELEGRAM | BS4_SW_ON
                } else {
                    BS4_DATA_TELEGRAM
                };
                bs4_telegram(sender, destination, [GW_CMD_SWITCHING, 0x00, 0x00, db0])
            }
            Command::RelaySwitchRps {
                sender,
                destination,
                on,
            } => {
                let rocker = if on { RPS_ROCKER_ON } else { RPS_ROCKER_OFF };
                let mut data = Vec::with_capacity(7);
                data.push(RORG_RPS);
                data.push(rocker);
                data.extend_from_slice(&sender.bytes());
                data.push(0x00); // status
                Telegram {
                    packet_type: PACKET_TYPE_RADIO,
                    data,
                    optional: addressed_optional(destination),
                }
            }
            Command::ChannelSwitch {
                destination,
                channel,
                on,
            } => {
                let level = if on { CHANNEL_LEVEL_ON } else { 0x00 };
                Telegram {
                    packet_type: PACKET_TYPE_RADIO,
                    data: vec![RORG_VLD, 0x01, channel, level, 0x00, 0x00, 0x00, 0x00, 0x00],
                    optional: addressed_optional(destination),
                }
            }
        }
    }
}

/// Assemble a 4BS radio telegram: RORG, DB3..DB0, sender, status
fn bs4_telegram(sender: Address, destination: Address, db: [u8; 4]) -> Telegram {
    let mut data = Vec::with_capacity(10);
    data.push(RORG_4BS);
    data.extend_from_slice(&db);
    data.extend_from_slice(&sender.bytes());
    data.push(0x00); // status
    Telegram {
        packet_type: PACKET_TYPE_RADIO,
        data,
        optional: addressed_optional(destination),
    }
}

/// Optional field carrying the explicit destination:
/// sub-telegram count, 4 address bytes, dBm, security level
fn addressed_optional(destination: Address) -> Vec<u8> {
    let mut optional = Vec::with_capacity(7);
    optional.push(SUBTEL_SEND);
    optional.extend_from_slice(&destination.bytes());
    optional.push(DBM_SEND);
    optional.push(SECURITY_NONE);
    optional
}
