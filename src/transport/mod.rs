//! Communicator boundary
//!
//! The lower-level communicator library owns the serial port: framing,
//! escaping, checksum verification, and base-id retrieval all happen below
//! this trait. What the link sees are already-validated [`DongleEvent`]
//! records in, opaque [`Telegram`]s out.

use crate::address::Address;
use crate::error::Result;
use crate::telegram::{DongleEvent, Telegram};
use std::time::Duration;

pub mod mock;
pub use mock::MockCommunicator;

/// Telegram-level transport to the EnOcean gateway
///
/// The receive thread and outbound senders share one communicator behind a
/// mutex, so `receive` must not block longer than `timeout`; returning
/// `Ok(None)` on an empty window keeps the write path responsive.
pub trait Communicator: Send {
    /// Wait up to `timeout` for the next inbound record
    fn receive(&mut self, timeout: Duration) -> Result<Option<DongleEvent>>;

    /// Transmit one telegram immediately; no queuing or retry
    fn send(&mut self, telegram: &Telegram) -> Result<()>;

    /// The gateway's own transmit base address
    fn base_id(&mut self) -> Result<Address>;
}
