//! Typed decoder and UDP listener for F1 22 game telemetry.
//!
//! The game broadcasts twelve kinds of packet over UDP, each a fixed-layout
//! little-endian record behind a common 24 byte header. Pitlane turns one
//! datagram into one typed [`Packet`] and runs a small pipeline that receives
//! datagrams, decodes them in order and hands them to a [`Consumer`].
//!
//! # Features
//!
//! - **Typed packets**: every field of the 2022 format, with fixed-size arrays
//!   for per-car and per-corner data
//! - **Generic view**: the same packets as ordered [`Value`] trees, decoded from
//!   the same layout descriptions
//! - **Strict decoding**: short datagrams, unknown packet ids and unknown event
//!   codes are errors, never partially filled packets
//! - **Listener**: producer/consumer tasks on tokio with a bounded queue and
//!   clean shutdown
//!
//! # Quick Start
//!
//! ```rust
//! use pitlane::{Packet, PacketId};
//!
//! # fn handle(datagram: &[u8]) -> Result<(), pitlane::DecodeError> {
//! match pitlane::decode(datagram)? {
//!     Packet::CarTelemetry(telemetry) => {
//!         let player = usize::from(telemetry.header.player_car_index);
//!         if let Some(car) = telemetry.car_telemetry_data.get(player) {
//!             println!("{} km/h in gear {}", car.speed, car.gear);
//!         }
//!     }
//!     packet if packet.id() == PacketId::Event => println!("{:?}", packet),
//!     _ => {}
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example (listening)
//!
//! ```rust,no_run
//! use pitlane::{ListenerConfig, Pitlane};
//! use pitlane::consumers::LogConsumer;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> pitlane::Result<()> {
//!     let handle = Pitlane::listen(&ListenerConfig::default(), LogConsumer::new()).await?;
//!     tokio::signal::ctrl_c().await?;
//!     handle.shutdown().await?;
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod names;
pub mod protocol;
pub mod text;
pub mod wire;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Listener pipeline
pub mod config;
pub mod consumer;
pub mod consumers;
pub mod listener;
pub mod logging;
pub mod source;
pub mod sources;

// Core exports
pub use error::*;
pub use protocol::{EventCode, EventDetails, Packet, PacketHeader, PacketId, decode_value};
pub use text::FixedText;
pub use wire::{Decode, Layout, Value};

// Pipeline exports
pub use config::{AppConfig, ConsumerKind, ListenerConfig};
pub use consumer::Consumer;
pub use consumers::PacketStream;
pub use listener::{Listener, ListenerHandle, ListenerStats};
pub use source::DatagramSource;
pub use sources::{MemorySource, UdpSource};

/// Decode one datagram into a typed packet.
///
/// Shorthand for [`Packet::decode`].
pub fn decode(data: &[u8]) -> std::result::Result<Packet, DecodeError> {
    Packet::decode(data)
}

/// Unified entry point for starting listeners.
///
/// # Examples
///
/// ## Live UDP
/// ```rust,no_run
/// use pitlane::{ListenerConfig, Pitlane};
/// use pitlane::consumers::DebugConsumer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> pitlane::Result<()> {
/// let config = ListenerConfig { port: 20778, ..ListenerConfig::default() };
/// let handle = Pitlane::listen(&config, DebugConsumer::new()).await?;
/// # handle.shutdown().await?;
/// # Ok(())
/// # }
/// ```
///
/// ## Async stream
/// ```rust,no_run
/// use futures::StreamExt;
/// use pitlane::{ListenerConfig, Pitlane};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> pitlane::Result<()> {
/// let (handle, mut packets) = Pitlane::subscribe(&ListenerConfig::default(), 256).await?;
/// while let Some(packet) = packets.next().await {
///     println!("{}", packet.id());
/// }
/// handle.join().await?;
/// # Ok(())
/// # }
/// ```
pub struct Pitlane;

impl Pitlane {
    /// Bind a UDP socket and start delivering packets to `consumer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the socket cannot
    /// be bound.
    pub async fn listen<C: Consumer>(config: &ListenerConfig, consumer: C) -> Result<ListenerHandle> {
        config.validate()?;
        let source = UdpSource::from_config(config).await?;
        Ok(Listener::spawn(source, consumer, config.queue_capacity))
    }

    /// Bind a UDP socket and receive packets as a stream.
    ///
    /// `buffer` packets may wait in the stream; further packets are dropped
    /// until the reader catches up.
    pub async fn subscribe(
        config: &ListenerConfig,
        buffer: usize,
    ) -> Result<(ListenerHandle, PacketStream)> {
        let (consumer, stream) = consumers::StreamConsumer::channel(buffer);
        let handle = Self::listen(config, consumer).await?;
        Ok((handle, stream))
    }

    /// Replay recorded datagrams through `consumer`.
    ///
    /// The listener finishes on its own once every datagram has been delivered.
    /// Must be called from within a tokio runtime.
    pub fn replay<I, C>(datagrams: I, consumer: C) -> ListenerHandle
    where
        I: IntoIterator<Item = Vec<u8>>,
        C: Consumer,
    {
        Listener::spawn(MemorySource::new(datagrams), consumer, config::DEFAULT_QUEUE_CAPACITY)
    }
}
