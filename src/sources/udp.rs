//! UDP socket source

use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::{info, trace, warn};

use crate::config::ListenerConfig;
use crate::protocol::constants::MAX_PACKET_SIZE;
use crate::source::DatagramSource;
use crate::{Result, TelemetryError};

/// Receives datagrams from the game on a bound UDP socket.
pub struct UdpSource {
    socket: UdpSocket,
    /// One byte longer than the largest accepted datagram, so a full read
    /// means the datagram did not fit.
    buffer: Vec<u8>,
    local_addr: SocketAddr,
}

impl UdpSource {
    /// Bind to `addr`, reading datagrams of up to `max_datagram_size` bytes.
    ///
    /// Sizes below the largest packet are raised to it. Longer datagrams are
    /// skipped with a warning rather than handed on truncated.
    pub async fn bind(addr: SocketAddr, max_datagram_size: usize) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| TelemetryError::io_error(format!("binding UDP socket to {addr}"), e))?;
        let local_addr = socket
            .local_addr()
            .map_err(|e| TelemetryError::io_error("reading bound UDP address", e))?;

        info!("Listening for telemetry on {}", local_addr);
        let accepted = max_datagram_size.max(MAX_PACKET_SIZE);
        Ok(Self { socket, buffer: vec![0; accepted + 1], local_addr })
    }

    /// Bind using a listener configuration.
    pub async fn from_config(config: &ListenerConfig) -> Result<Self> {
        Self::bind(config.socket_addr(), config.max_datagram_size).await
    }

    /// Address actually bound, useful when binding to port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait::async_trait]
impl DatagramSource for UdpSource {
    async fn next_datagram(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let (len, peer) = self
                .socket
                .recv_from(&mut self.buffer)
                .await
                .map_err(|e| TelemetryError::io_error("receiving UDP datagram", e))?;
            if len == self.buffer.len() {
                warn!(
                    "Skipping datagram from {} longer than {} bytes",
                    peer,
                    self.buffer.len() - 1
                );
                continue;
            }
            trace!("{} bytes from {}", len, peer);
            return Ok(Some(self.buffer[..len].to_vec()));
        }
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn receives_whole_datagrams() -> Result<()> {
        let mut source = UdpSource::bind("127.0.0.1:0".parse().expect("valid address"), 2048).await?;
        let sender = UdpSocket::bind("127.0.0.1:0").await?;
        sender.send_to(&[1, 2, 3], source.local_addr()).await?;
        sender.send_to(&[4; 1500], source.local_addr()).await?;

        assert_eq!(source.next_datagram().await?, Some(vec![1, 2, 3]));
        assert_eq!(source.next_datagram().await?.map(|d| d.len()), Some(1500));
        assert!(source.describe().starts_with("udp://127.0.0.1:"));
        Ok(())
    }

    #[tokio::test]
    async fn oversized_datagrams_are_skipped_not_truncated() -> Result<()> {
        let mut source =
            UdpSource::bind("127.0.0.1:0".parse().expect("valid address"), MAX_PACKET_SIZE).await?;
        let sender = UdpSocket::bind("127.0.0.1:0").await?;
        sender.send_to(&[7; MAX_PACKET_SIZE], source.local_addr()).await?;
        sender.send_to(&[8; MAX_PACKET_SIZE + 100], source.local_addr()).await?;
        sender.send_to(&[9; 40], source.local_addr()).await?;

        assert_eq!(source.next_datagram().await?, Some(vec![7; MAX_PACKET_SIZE]));
        assert_eq!(source.next_datagram().await?, Some(vec![9; 40]));
        Ok(())
    }

    #[tokio::test]
    async fn small_sizes_still_hold_the_largest_packet() -> Result<()> {
        let mut source = UdpSource::bind("127.0.0.1:0".parse().expect("valid address"), 16).await?;
        let sender = UdpSocket::bind("127.0.0.1:0").await?;
        sender.send_to(&[1; MAX_PACKET_SIZE], source.local_addr()).await?;

        assert_eq!(source.next_datagram().await?.map(|d| d.len()), Some(MAX_PACKET_SIZE));
        Ok(())
    }
}
