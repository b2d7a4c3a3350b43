//! EnOcean dongle link
//!
//! Owns the communicator connection and the device registry. Construction
//! opens the link and starts the receive thread; from then on every inbound
//! radio telegram is matched against the registry by sender address and
//! dispatched to each matching device, decoded per that device's listener
//! kind. A failing device never stops fan-out to the remaining matches.
//!
//! Outbound commands go through [`DongleHandle`], a cheap clone of the send
//! path that devices keep from construction. Writes are serialized behind
//! the communicator mutex; commands are fire-and-forget with no
//! request/response correlation.

use crate::address::Address;
use crate::decode::{decode, Reading};
use crate::device::Device;
use crate::error::Result;
use crate::registry::DeviceRegistry;
use crate::telegram::{DongleEvent, RadioTelegram, Telegram};
use crate::transport::Communicator;

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Upper bound on how long one receive poll may hold the communicator lock
const RECEIVE_POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Pause between polls, slept outside the lock so senders get through
const RECEIVE_IDLE: Duration = Duration::from_millis(2);
/// Backoff after a receive error before polling again
const RECEIVE_ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Cloneable send path to the gateway
///
/// Devices receive one at construction time and use it to transmit their
/// encoded commands. Holding a handle does not keep the receive loop alive;
/// that is the dongle's job.
#[derive(Clone)]
pub struct DongleHandle {
    communicator: Arc<Mutex<Box<dyn Communicator>>>,
}

impl DongleHandle {
    /// Transmit one telegram. Errors surface to the caller; there is no
    /// retry at this layer.
    pub fn send(&self, telegram: &Telegram) -> Result<()> {
        log::debug!(
            "Dongle: TX type=0x{:02X}, data={:02X?}, optional={:02X?}",
            telegram.packet_type,
            telegram.data,
            telegram.optional
        );
        self.communicator.lock().send(telegram)
    }
}

/// The dongle link: connected communicator, registry, and receive thread
pub struct EnOceanDongle {
    communicator: Arc<Mutex<Box<dyn Communicator>>>,
    registry: Arc<RwLock<DeviceRegistry>>,
    receive_thread: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl EnOceanDongle {
    /// Open the link and start receiving
    ///
    /// The link goes from disconnected to connected exactly once, here.
    /// There is no reconnect transition: if the communicator dies, receive
    /// errors are logged and sends fail until the process restarts the
    /// link.
    pub fn connect<C: Communicator + 'static>(communicator: C) -> Self {
        let communicator =
            Arc::new(Mutex::new(Box::new(communicator) as Box<dyn Communicator>));
        let registry = Arc::new(RwLock::new(DeviceRegistry::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let receive_thread = Some(spawn_receive_thread(
            Arc::clone(&communicator),
            Arc::clone(&registry),
            Arc::clone(&shutdown),
        ));

        log::info!("Dongle: Link connected, receive loop running");

        EnOceanDongle {
            communicator,
            registry,
            receive_thread,
            shutdown,
        }
    }

    /// Send path handle for device construction
    pub fn handle(&self) -> DongleHandle {
        DongleHandle {
            communicator: Arc::clone(&self.communicator),
        }
    }

    /// Register a device for inbound dispatch
    ///
    /// Called once per device at construction time. Duplicate addresses are
    /// legal; all matching devices receive updates in registration order.
    pub fn register(&self, device: Arc<dyn Device>) {
        log::info!(
            "Dongle: Registered device '{}' at {}",
            device.name(),
            device.address()
        );
        self.registry.write().register(device);
    }

    /// Transmit one telegram through the link
    pub fn send(&self, telegram: &Telegram) -> Result<()> {
        self.handle().send(telegram)
    }

    /// The gateway's own transmit base address
    pub fn base_id(&self) -> Result<Address> {
        self.communicator.lock().base_id()
    }

    /// Number of registered devices
    pub fn device_count(&self) -> usize {
        self.registry.read().len()
    }
}

impl Drop for EnOceanDongle {
    fn drop(&mut self) {
        log::info!("Dongle: Shutting down");
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.receive_thread.take() {
            let _ = handle.join();
        }
        log::info!("Dongle: Shutdown complete");
    }
}

/// Spawn the receive thread: poll the communicator, dispatch radio
/// telegrams, ignore everything else
fn spawn_receive_thread(
    communicator: Arc<Mutex<Box<dyn Communicator>>>,
    registry: Arc<RwLock<DeviceRegistry>>,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("enocean-receive".to_string())
        .spawn(move || {
            log::info!("Dongle: Receive thread started");

            while !shutdown.load(Ordering::Relaxed) {
                // Lock only for the bounded poll; sends interleave between
                // iterations.
                let received = {
                    let mut communicator = communicator.lock();
                    communicator.receive(RECEIVE_POLL_TIMEOUT)
                };

                match received {
                    Ok(Some(DongleEvent::Radio(telegram))) => {
                        dispatch(&telegram, &registry);
                    }
                    Ok(Some(DongleEvent::Other { packet_type })) => {
                        log::debug!("Dongle: Ignoring packet type 0x{:02X}", packet_type);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::warn!("Dongle: Receive error: {}", e);
                        thread::sleep(RECEIVE_ERROR_BACKOFF);
                    }
                }

                thread::sleep(RECEIVE_IDLE);
            }

            log::info!("Dongle: Receive thread exiting");
        })
        .expect("Failed to spawn receive thread")
}

/// Fan one radio telegram out to every device matching its sender
///
/// Decoding runs once per matched device so the listener-kind-dependent RPS
/// rules apply per device. One device's failure is logged and never aborts
/// dispatch to the rest.
fn dispatch(telegram: &RadioTelegram, registry: &RwLock<DeviceRegistry>) {
    let sender = telegram.sender.combined();
    let matched = registry.read().matching(sender);
    if matched.is_empty() {
        log::debug!("Dongle: No device registered for sender {}", telegram.sender);
        return;
    }

    log::debug!(
        "Dongle: RX RORG=0x{:02X} from {} -> {} device(s)",
        telegram.rorg,
        telegram.sender,
        matched.len()
    );

    for device in matched {
        let Some(reading) = decode(telegram.rorg, &telegram.data, device.kind()) else {
            continue;
        };

        // A zero-valued energy update means "no change" and is not
        // forwarded.
        if let Reading::Energy { value } = reading {
            if value <= 0.0 {
                log::debug!("Dongle: Suppressing zero energy update for '{}'", device.name());
                continue;
            }
        }

        if let Err(e) = device.on_reading(&reading) {
            log::error!(
                "Dongle: Device '{}' at {} failed to process {:?}: {}",
                device.name(),
                device.address(),
                reading,
                e
            );
        }
    }
}
