//! Error types for enocean-io

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// enocean-io error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failed to deliver an outgoing telegram
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Transport failed while receiving
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// The communicator link is gone (closed or never opened)
    #[error("Dongle not connected")]
    NotConnected,

    /// A device rejected a dispatched reading
    #[error("Device update failed: {0}")]
    DeviceUpdate(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file serialization error
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
