//! Telegram records exchanged with the communicator
//!
//! The communicator library owns the serial framing, escaping, and checksum
//! verification; what crosses this boundary is already-validated structured
//! records. Inbound radio telegrams keep the on-wire layout: `data[0]` is
//! the RORG byte, followed by the family payload, the 4 sender bytes, and
//! the status byte.

use crate::address::Address;

/// ESP3 packet type: radio telegram
pub const PACKET_TYPE_RADIO: u8 = 0x01;
/// ESP3 packet type: response to a controller command
pub const PACKET_TYPE_RESPONSE: u8 = 0x02;
/// ESP3 packet type: controller event
pub const PACKET_TYPE_EVENT: u8 = 0x04;

/// RORG for four-byte data telegrams (4BS)
pub const RORG_4BS: u8 = 0xA5;
/// RORG for repeated-switch rocker telegrams (RPS)
pub const RORG_RPS: u8 = 0xF6;
/// RORG for variable-length data telegrams (VLD), used raw by the
/// channel-addressed switch command
pub const RORG_VLD: u8 = 0xD2;

/// Inbound radio telegram, as handed over by the communicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioTelegram {
    /// Telegram family selector (equals `data[0]`)
    pub rorg: u8,
    /// Sender device address (4 wire bytes)
    pub sender: Address,
    /// Full data field: RORG byte, family payload, sender, status
    pub data: Vec<u8>,
    /// Optional sub-telegram field (repeater/dBm/security info)
    pub optional: Vec<u8>,
}

impl RadioTelegram {
    /// Build a telegram record from its parts
    pub fn new(rorg: u8, sender: Address, data: Vec<u8>, optional: Vec<u8>) -> Self {
        RadioTelegram {
            rorg,
            sender,
            data,
            optional,
        }
    }
}

/// Outgoing telegram, handed opaquely to the communicator's send path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telegram {
    /// ESP3 packet type (0x01 for radio telegrams)
    pub packet_type: u8,
    /// Data field bytes
    pub data: Vec<u8>,
    /// Optional field bytes
    pub optional: Vec<u8>,
}

/// One record delivered by the communicator
///
/// Only address-bearing radio telegrams participate in device dispatch;
/// everything else (command responses, controller events) is ignored by the
/// link and surfaced here only with its packet type.
#[derive(Debug, Clone)]
pub enum DongleEvent {
    /// A radio telegram with a sender address
    Radio(RadioTelegram),
    /// Any other packet type the communicator parsed
    Other {
        /// ESP3 packet type of the ignored record
        packet_type: u8,
    },
}
