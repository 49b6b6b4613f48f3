//! Listener and application configuration.
//!
//! Configuration is read from an optional YAML file and then overridden by
//! command-line flags. Every field has a default, so an empty file (or no file)
//! is a valid configuration:
//!
//! ```yaml
//! listener:
//!   bind_address: 127.0.0.1
//!   port: 20777
//!   queue_capacity: 4096
//!   max_datagram_size: 65507
//! consumer: log
//! capture_path: session.jsonl
//! capture_all_packets: false
//! log_level: info
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::protocol::constants::{DEFAULT_PORT, MAX_PACKET_SIZE, UDP_MAX_SIZE};
use crate::{Result, TelemetryError};

/// Datagrams the listener will queue before the receiver waits.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4096;

/// Where and how to receive datagrams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    pub queue_capacity: usize,
    pub max_datagram_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_datagram_size: UDP_MAX_SIZE,
        }
    }
}

impl ListenerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(TelemetryError::config_error("port must be between 1 and 65535"));
        }
        if self.queue_capacity == 0 {
            return Err(TelemetryError::config_error("queue_capacity must be at least 1"));
        }
        if !(MAX_PACKET_SIZE..=UDP_MAX_SIZE).contains(&self.max_datagram_size) {
            return Err(TelemetryError::config_error(format!(
                "max_datagram_size must be between {MAX_PACKET_SIZE} and {UDP_MAX_SIZE}, got {}",
                self.max_datagram_size
            )));
        }
        Ok(())
    }
}

/// Which built-in consumer receives decoded packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerKind {
    /// Receives the decoded packets but does nothing with them
    Null,
    /// Logs the kind of every packet
    Debug,
    /// Logs session information and events
    #[default]
    Log,
    /// Writes packets to a JSON Lines file, one session at a time
    Capture,
}

/// Complete configuration for the `pitlane` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub listener: ListenerConfig,
    pub consumer: ConsumerKind,
    pub capture_path: Option<PathBuf>,
    /// Capture every packet instead of only those between session start and
    /// final classification.
    pub capture_all_packets: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            consumer: ConsumerKind::default(),
            capture_path: None,
            capture_all_packets: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| TelemetryError::io_error(format!("reading config {}", path.display()), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        self.listener.validate()?;
        if self.consumer == ConsumerKind::Capture && self.capture_path.is_none() {
            return Err(TelemetryError::config_error("the capture consumer needs capture_path"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_game() {
        let config = AppConfig::default();
        assert_eq!(config.listener.socket_addr().to_string(), "127.0.0.1:20777");
        assert_eq!(config.listener.queue_capacity, 4096);
        assert_eq!(config.listener.max_datagram_size, 65507);
        assert_eq!(config.consumer, ConsumerKind::Log);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() -> Result<()> {
        let config = AppConfig::from_yaml_str(
            "listener:\n  port: 20778\nconsumer: capture\ncapture_path: out.jsonl\n",
        )?;
        assert_eq!(config.listener.port, 20778);
        assert_eq!(config.listener.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.consumer, ConsumerKind::Capture);
        assert_eq!(config.capture_path, Some(PathBuf::from("out.jsonl")));
        config.validate()
    }

    #[test]
    fn empty_yaml_is_the_default() -> Result<()> {
        assert_eq!(AppConfig::from_yaml_str("")?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.listener.port = 0;
        assert!(matches!(config.validate(), Err(TelemetryError::Config { .. })));

        let mut config = AppConfig::default();
        config.listener.queue_capacity = 0;
        assert!(matches!(config.validate(), Err(TelemetryError::Config { .. })));

        let config = AppConfig { consumer: ConsumerKind::Capture, ..AppConfig::default() };
        assert!(matches!(config.validate(), Err(TelemetryError::Config { .. })));
    }

    #[test]
    fn datagram_buffer_must_hold_the_largest_packet() {
        let mut config = AppConfig::default();
        config.listener.max_datagram_size = MAX_PACKET_SIZE - 1;
        assert!(matches!(config.validate(), Err(TelemetryError::Config { .. })));

        config.listener.max_datagram_size = MAX_PACKET_SIZE;
        assert!(config.validate().is_ok());

        config.listener.max_datagram_size = UDP_MAX_SIZE + 1;
        assert!(matches!(config.validate(), Err(TelemetryError::Config { .. })));
    }

    #[test]
    fn capture_all_packets_defaults_off() -> Result<()> {
        assert!(!AppConfig::default().capture_all_packets);
        let config = AppConfig::from_yaml_str("capture_all_packets: true\n")?;
        assert!(config.capture_all_packets);
        Ok(())
    }

    #[test]
    fn unknown_fields_and_bad_yaml_are_config_errors() {
        assert!(matches!(
            AppConfig::from_yaml_str("listener:\n  prot: 1\n"),
            Err(TelemetryError::Config { .. })
        ));
        assert!(matches!(AppConfig::from_yaml_str("consumer: [1, 2"), Err(TelemetryError::Config { .. })));
    }
}
