//! Device implementations
//!
//! The concrete actuator and sensor types a host registers on the link.
//! Each holds its own state behind a mutex and a [`DongleHandle`] for its
//! outgoing commands; the receive thread drives state updates through the
//! [`Device`] trait.

mod dimmer;
mod sensor;
mod switch;
mod wall_switch;

pub use dimmer::DimmerLight;
pub use sensor::PowerMeter;
pub use switch::{RelaySwitch, SwitchStyle};
pub use wall_switch::WallSwitch;

use crate::config::DevicesConfig;
use crate::device::Device;
use crate::dongle::EnOceanDongle;
use crate::error::Result;
use std::sync::Arc;

/// Build and register every device declared in the configuration
///
/// Devices are registered in declaration order (dimmers, switches, meters,
/// wall switches), which fixes their fan-out order for duplicate addresses.
/// Returns the constructed handles so the host can keep driving them.
pub fn build_from_config(
    config: &DevicesConfig,
    dongle: &EnOceanDongle,
) -> Result<Vec<Arc<dyn Device>>> {
    let handle = dongle.handle();
    let mut devices: Vec<Arc<dyn Device>> = Vec::new();

    for dimmer in &config.dimmers {
        devices.push(Arc::new(DimmerLight::new(
            &dimmer.name,
            dimmer.id,
            dimmer.sender_id,
            handle.clone(),
        )));
    }

    for switch in &config.switches {
        devices.push(Arc::new(RelaySwitch::new(
            &switch.name,
            switch.id,
            switch.sender_id,
            switch.channel,
            switch.style,
            handle.clone(),
        )?));
    }

    for meter in &config.meters {
        devices.push(Arc::new(PowerMeter::new(&meter.name, meter.id)));
    }

    for wall_switch in &config.wall_switches {
        devices.push(Arc::new(WallSwitch::new(&wall_switch.name, wall_switch.id)));
    }

    for device in &devices {
        dongle.register(Arc::clone(device));
    }

    log::info!("Devices: Built {} device(s) from config", devices.len());
    Ok(devices)
}
