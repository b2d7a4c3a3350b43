//! enocean-io - EnOcean dongle link
//!
//! Decodes binary radio telegrams arriving from an EnOcean gateway stick,
//! routes each decoded reading to the matching logical devices by sender
//! address, and encodes outgoing command telegrams for dimmers and relay
//! switches.
//!
//! Serial framing, escaping, and checksum verification live in the
//! lower-level communicator the link is constructed with; this crate starts
//! where already-validated telegram records end.
//!
//! ## Example
//!
//! ```no_run
//! use enocean_io::{Address, EnOceanDongle, MockCommunicator};
//! use enocean_io::devices::DimmerLight;
//! use std::sync::Arc;
//!
//! let dongle = EnOceanDongle::connect(MockCommunicator::new());
//! let light = Arc::new(DimmerLight::new(
//!     "office",
//!     Address::new([0x01, 0x94, 0xE3, 0xB9]),
//!     Address::new([0xFF, 0xC6, 0xEA, 0x04]),
//!     dongle.handle(),
//! ));
//! dongle.register(light.clone());
//! light.turn_on(Some(200))?;
//! # Ok::<(), enocean_io::Error>(())
//! ```

pub mod address;
pub mod commands;
pub mod config;
pub mod decode;
pub mod device;
pub mod devices;
pub mod dongle;
pub mod error;
pub mod registry;
pub mod telegram;
pub mod transport;

// Re-export commonly used types
pub use address::{combine, Address};
pub use commands::Command;
pub use config::HubConfig;
pub use decode::{decode, ListenerKind, Reading};
pub use device::Device;
pub use dongle::{DongleHandle, EnOceanDongle};
pub use error::{Error, Result};
pub use registry::DeviceRegistry;
pub use telegram::{DongleEvent, RadioTelegram, Telegram};
pub use transport::{Communicator, MockCommunicator};
