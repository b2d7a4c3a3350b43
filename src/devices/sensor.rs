//! Power/energy meter device

use crate::address::Address;
use crate::decode::{ListenerKind, Reading};
use crate::device::Device;
use crate::error::Result;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct MeterState {
    power: Option<u16>,
    energy: Option<f64>,
}

/// A metering actuator reporting instantaneous power and cumulative energy
///
/// Values are `None` until the first matching telegram arrives, so "no data
/// yet" is distinguishable from a zero reading.
pub struct PowerMeter {
    name: String,
    device_id: Address,
    state: Mutex<MeterState>,
}

impl PowerMeter {
    /// Create a meter bound to its device address
    pub fn new(name: &str, device_id: Address) -> Self {
        PowerMeter {
            name: name.to_string(),
            device_id,
            state: Mutex::new(MeterState::default()),
        }
    }

    /// Latest power reading in watts
    pub fn power(&self) -> Option<u16> {
        self.state.lock().power
    }

    /// Latest scaled energy reading
    pub fn energy(&self) -> Option<f64> {
        self.state.lock().energy
    }
}

impl Device for PowerMeter {
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
            Reading::Power { watts } => {
                self.state.lock().power = Some(watts);
                log::debug!("{}: power {} W", self.name, watts);
            }
            Reading::Energy { value } => {
                self.state.lock().energy = Some(value);
                log::debug!("{}: energy {}", self.name, value);
            }
            // Serial-number announcements carry no value
            Reading::PowerStatus => {}
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE: Address = Address::new([0x01, 0x85, 0x46, 0x7C]);

    #[test]
    fn test_readings_fill_state() {
        let meter = PowerMeter::new("mains", DEVICE);
        assert_eq!(meter.power(), None);
        assert_eq!(meter.energy(), None);

        meter.on_reading(&Reading::Power { watts: 300 }).unwrap();
        meter.on_reading(&Reading::Energy { value: 25.6 }).unwrap();

        assert_eq!(meter.power(), Some(300));
        assert_eq!(meter.energy(), Some(25.6));
    }

    #[test]
    fn test_power_status_is_ignored() {
        let meter = PowerMeter::new("mains", DEVICE);
        meter.on_reading(&Reading::PowerStatus).unwrap();
        assert_eq!(meter.power(), None);
    }
}
