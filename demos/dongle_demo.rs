//! Quick demonstration of the dongle link on the mock communicator
//!
//! Builds a small device table, feeds a few canned telegrams through the
//! link, and drives the actuators. Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example dongle_demo
//! ```

use enocean_io::devices::{DimmerLight, PowerMeter, WallSwitch};
use enocean_io::{Address, EnOceanDongle, MockCommunicator, RadioTelegram, Result};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const LIGHT: Address = Address::new([0x01, 0x94, 0xE3, 0xB9]);
const METER: Address = Address::new([0x01, 0x85, 0x46, 0x7C]);
const ROCKER: Address = Address::new([0xFE, 0xF0, 0xA2, 0x60]);
const SENDER: Address = Address::new([0xFF, 0xC6, 0xEA, 0x04]);

fn bs4(sender: Address, db: [u8; 4]) -> RadioTelegram {
    let mut data = vec![0xA5];
    data.extend_from_slice(&db);
    data.extend_from_slice(&sender.bytes());
    data.push(0x00);
    RadioTelegram::new(0xA5, sender, data, vec![])
}

fn rps(sender: Address, rocker: u8, status: u8) -> RadioTelegram {
    let mut data = vec![0xF6, rocker];
    data.extend_from_slice(&sender.bytes());
    data.push(status);
    RadioTelegram::new(0xF6, sender, data, vec![])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mock = MockCommunicator::new();
    let dongle = EnOceanDongle::connect(mock.clone());
    println!("Gateway base id: {}", dongle.base_id()?);

    let light = Arc::new(DimmerLight::new("office", LIGHT, SENDER, dongle.handle()));
    let meter = Arc::new(PowerMeter::new("mains", METER));
    let rocker_switch = Arc::new(WallSwitch::new("hallway", ROCKER));
    dongle.register(light.clone());
    dongle.register(meter.clone());
    dongle.register(rocker_switch.clone());

    // Pretend the mesh is talking: a dimmer confirmation, a power reading,
    // an energy counter, and a rocker press.
    mock.inject_radio(bs4(LIGHT, [0x02, 75, 0x01, 0x08]));
    mock.inject_radio(bs4(METER, [0x00, 0x01, 0x2C, 0x0C]));
    mock.inject_radio(bs4(METER, [0x00, 0x01, 0x00, 0x09]));
    mock.inject_radio(rps(ROCKER, 0x30, 0x30));

    thread::sleep(Duration::from_millis(100));

    println!(
        "office light: on={} brightness={}",
        light.is_on(),
        light.brightness()
    );
    println!(
        "mains meter: power={:?} W energy={:?}",
        meter.power(),
        meter.energy()
    );
    println!(
        "hallway rocker: pressed={} button={:?}",
        rocker_switch.is_pressed(),
        rocker_switch.last_rocker()
    );

    // Drive the light from the host side and show what hit the wire
    light.turn_on(Some(200))?;
    light.turn_off()?;
    for telegram in mock.sent() {
        println!("sent: data={:02X?} optional={:02X?}", telegram.data, telegram.optional);
    }

    Ok(())
}
