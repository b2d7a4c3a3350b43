//! Device capability contract

use crate::address::Address;
use crate::decode::{ListenerKind, Reading};
use crate::error::Result;

/// Capability contract every addressable device implements
///
/// Implementations are shared with the receive thread, so state updates go
/// through interior mutability and `on_reading` takes `&self`. An error
/// return is logged by the dispatch loop and never stops fan-out to other
/// matched devices.
pub trait Device: Send + Sync {
    /// Human-readable device name, used in logs
    fn name(&self) -> &str;

    /// The device's 4-byte address
    fn address(&self) -> Address;

    /// How this device wants ambiguous RPS telegrams decoded
    fn kind(&self) -> ListenerKind;

    /// Process one decoded reading addressed to this device
    fn on_reading(&self, reading: &Reading) -> Result<()>;
}
