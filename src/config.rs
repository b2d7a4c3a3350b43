//! Configuration for the EnOcean link
//!
//! Loads hub configuration from a TOML file: dongle port, logging, and the
//! declarative device table a host uses to build its registry.

use crate::address::Address;
use crate::devices::SwitchStyle;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level hub configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubConfig {
    pub dongle: DongleConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub devices: DevicesConfig,
}

/// Dongle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DongleConfig {
    /// Serial port the gateway stick is plugged into, handed to the
    /// communicator library
    pub port: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log output (stdout, stderr, or file path)
    pub output: String,
}

/// Declarative device table
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DevicesConfig {
    #[serde(default)]
    pub dimmers: Vec<DimmerConfig>,
    #[serde(default)]
    pub switches: Vec<SwitchConfig>,
    #[serde(default)]
    pub meters: Vec<MeterConfig>,
    #[serde(default)]
    pub wall_switches: Vec<WallSwitchConfig>,
}

/// One dimmable light
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DimmerConfig {
    pub name: String,
    /// Actuator address (4 bytes)
    pub id: Address,
    /// Gateway sender address the actuator was taught
    pub sender_id: Address,
}

/// One relay switch
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwitchConfig {
    pub name: String,
    /// Actuator address (4 bytes)
    pub id: Address,
    /// Gateway sender address; required for the fsr14 and rps styles
    #[serde(default)]
    pub sender_id: Option<Address>,
    /// Output channel for the channel style
    #[serde(default)]
    pub channel: u8,
    /// Command encoding the actuator expects
    #[serde(default)]
    pub style: SwitchStyle,
}

/// One power/energy meter
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeterConfig {
    pub name: String,
    /// Meter address (4 bytes)
    pub id: Address,
}

/// One wall-mounted rocker
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WallSwitchConfig {
    pub name: String,
    /// Rocker address (4 bytes)
    pub id: Address,
}

impl HubConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: HubConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration: USB stick on the first port, no devices
    pub fn defaults() -> Self {
        Self {
            dongle: DongleConfig {
                port: "/dev/ttyUSB0".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                output: "stdout".to_string(),
            },
            devices: DevicesConfig::default(),
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubConfig::defaults();
        assert_eq!(config.dongle.port, "/dev/ttyUSB0");
        assert_eq!(config.logging.level, "info");
        assert!(config.devices.dimmers.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = HubConfig::defaults();
        config.devices.dimmers.push(DimmerConfig {
            name: "office".to_string(),
            id: Address::new([0x01, 0x94, 0xE3, 0xB9]),
            sender_id: Address::new([0xFF, 0xC6, 0xEA, 0x04]),
        });

        let toml_string = toml::to_string_pretty(&config).unwrap();
        assert!(toml_string.contains("[dongle]"));
        assert!(toml_string.contains("[logging]"));
        assert!(toml_string.contains("office"));

        let parsed: HubConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.devices.dimmers.len(), 1);
        assert_eq!(
            parsed.devices.dimmers[0].id,
            Address::new([0x01, 0x94, 0xE3, 0xB9])
        );
    }

    #[test]
    fn test_parse_full_device_table() {
        let toml_content = r#"
[dongle]
port = "/dev/ttyUSB1"

[logging]
level = "debug"
output = "stderr"

[[devices.dimmers]]
name = "office"
id = [1, 148, 227, 185]
sender_id = [255, 198, 234, 4]

[[devices.switches]]
name = "heater"
id = [1, 148, 227, 200]
sender_id = [255, 198, 234, 4]
style = "fsr14"

[[devices.switches]]
name = "socket"
id = [5, 16, 11, 38]
channel = 2
style = "channel"

[[devices.meters]]
name = "mains"
id = [1, 133, 70, 124]

[[devices.wall_switches]]
name = "hallway"
id = [254, 240, 162, 96]
"#;

        let config: HubConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.dongle.port, "/dev/ttyUSB1");
        assert_eq!(config.devices.switches.len(), 2);
        assert_eq!(config.devices.switches[0].style, SwitchStyle::Fsr14);
        assert_eq!(config.devices.switches[1].style, SwitchStyle::Channel);
        assert_eq!(config.devices.switches[1].channel, 2);
        assert!(config.devices.switches[1].sender_id.is_none());
        assert_eq!(config.devices.meters[0].id.combined(), 0x0185_467C);
    }

    #[test]
    fn test_switch_style_defaults_to_fsr14() {
        let toml_content = r#"
[dongle]
port = "/dev/ttyUSB0"

[logging]
level = "info"
output = "stdout"

[[devices.switches]]
name = "plain"
id = [1, 2, 3, 4]
sender_id = [255, 0, 0, 1]
"#;
        let config: HubConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.devices.switches[0].style, SwitchStyle::Fsr14);
    }
}
